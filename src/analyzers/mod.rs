//! Rental aggregation.
//!
//! This module groups year-filtered rental records into monthly, day-type
//! and hour-type summaries, and reduces the monthly summary into per-segment
//! total, highest, lowest and average figures.

pub mod aggregate;
pub mod types;
pub mod utility;
