//! Data types produced by the aggregation pipeline.

use serde::Serialize;
use std::fmt;

use crate::analyzers::utility::{maximum, mean, minimum, total};
use crate::error::{AggregateError, Statistic};
use crate::records::SegmentCounts;

/// One of the two rental-user segments tracked as separate count columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Casual,
    Registered,
}

impl Segment {
    pub const ALL: [Segment; 2] = [Segment::Casual, Segment::Registered];

    /// Reads this segment's counter from a record.
    pub fn count<R: SegmentCounts + ?Sized>(self, record: &R) -> u64 {
        match self {
            Segment::Casual => record.casual_count(),
            Segment::Registered => record.registered_count(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Segment::Casual => "Casual",
            Segment::Registered => "Registered",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Casual => f.write_str("casual"),
            Segment::Registered => f.write_str("registered"),
        }
    }
}

/// Rentals for one month of the selected year, both segments summed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub month_number: u32,
    pub month_name: String,
    pub casual_count: u64,
    pub registered_count: u64,
}

impl MonthlySummary {
    pub const COLUMNS: [&'static str; 4] = [
        "month_number",
        "month_name",
        "casual_count",
        "registered_count",
    ];
}

impl SegmentCounts for MonthlySummary {
    fn casual_count(&self) -> u64 {
        self.casual_count
    }

    fn registered_count(&self) -> u64 {
        self.registered_count
    }
}

/// Rentals for one day type, for a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayTypeSummary {
    pub day_type: String,
    pub count: u64,
}

impl DayTypeSummary {
    pub const COLUMNS: [&'static str; 2] = ["day_type", "count"];
}

/// Rentals for one hour type, for a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourTypeSummary {
    pub hour_type: String,
    pub count: u64,
}

impl HourTypeSummary {
    pub const COLUMNS: [&'static str; 2] = ["hour_type", "count"];
}

/// Total, highest, lowest and average monthly rentals for a segment.
///
/// Each figure is `None` when there were no monthly rows to reduce.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub total: Option<u64>,
    pub max: Option<u64>,
    pub min: Option<u64>,
    pub mean: Option<f64>,
}

impl SegmentStats {
    /// Reduces a segment's monthly counts into the four dashboard figures.
    pub fn from_monthly(monthly: &[MonthlySummary], segment: Segment) -> Self {
        let counts: Vec<u64> = monthly.iter().map(|m| segment.count(m)).collect();

        Self {
            total: total(&counts).ok(),
            max: maximum(&counts).ok(),
            min: minimum(&counts).ok(),
            mean: mean(&counts).ok(),
        }
    }

    /// Returns one figure as `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptyAggregate`] naming `statistic` when the
    /// figure could not be computed.
    pub fn value(&self, statistic: Statistic) -> Result<f64, AggregateError> {
        let value = match statistic {
            Statistic::Total => self.total.map(|v| v as f64),
            Statistic::Max => self.max.map(|v| v as f64),
            Statistic::Min => self.min.map(|v| v as f64),
            Statistic::Mean => self.mean,
        };
        value.ok_or(AggregateError::EmptyAggregate { statistic })
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_none()
    }
}
