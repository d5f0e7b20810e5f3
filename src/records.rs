//! Raw rental records and their CSV decoding.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One row per calendar day, as found in `dayRent_data.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRentalRecord {
    pub year: i32,
    #[serde(rename = "mnth")]
    pub month_number: u32,
    #[serde(rename = "month")]
    pub month_name: String,
    pub day_type: String,
    #[serde(rename = "casual")]
    pub casual_count: u64,
    #[serde(rename = "registered")]
    pub registered_count: u64,
}

/// One row per (day, hour), as found in `hourRent_data.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRentalRecord {
    pub year: i32,
    pub hour_type: String,
    #[serde(rename = "casual")]
    pub casual_count: u64,
    #[serde(rename = "registered")]
    pub registered_count: u64,
}

/// Access to the per-segment counters shared by both record kinds.
pub trait SegmentCounts {
    fn casual_count(&self) -> u64;
    fn registered_count(&self) -> u64;
}

impl SegmentCounts for DailyRentalRecord {
    fn casual_count(&self) -> u64 {
        self.casual_count
    }

    fn registered_count(&self) -> u64 {
        self.registered_count
    }
}

impl SegmentCounts for HourlyRentalRecord {
    fn casual_count(&self) -> u64 {
        self.casual_count
    }

    fn registered_count(&self) -> u64 {
        self.registered_count
    }
}

/// Decodes every row of a headered CSV stream into `T`.
///
/// Columns not named by `T` are ignored.
///
/// # Errors
///
/// Returns an error naming the 1-based data row if a row is malformed or a
/// required column is missing.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    let mut rdr = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (index, result) in rdr.deserialize().enumerate() {
        let record: T = result.with_context(|| format!("invalid record at row {}", index + 1))?;
        rows.push(record);
    }

    Ok(rows)
}
