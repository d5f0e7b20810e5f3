//! Domain errors raised while selecting a year or reducing a summary.

use std::fmt;
use thiserror::Error;

/// Inclusive span of years observed in the daily records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Scalar statistic computed over a monthly summary column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Total,
    Max,
    Min,
    Mean,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Total,
        Statistic::Max,
        Statistic::Min,
        Statistic::Mean,
    ];
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Statistic::Total => "total",
            Statistic::Max => "max",
            Statistic::Min => "min",
            Statistic::Mean => "mean",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while building a dashboard from loaded records.
///
/// Load-time failures (I/O, malformed CSV) are not represented here; they are
/// reported through [`anyhow::Error`] when the store is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The requested year lies outside the years present in the daily records.
    #[error("year {year} is not selectable (available: {})", describe(.available))]
    InvalidSelection {
        year: i32,
        available: Option<YearRange>,
    },

    /// A statistic was requested over zero rows.
    #[error("cannot compute {statistic} over an empty summary")]
    EmptyAggregate { statistic: Statistic },
}

fn describe(available: &Option<YearRange>) -> String {
    match available {
        Some(range) => range.to_string(),
        None => "none, no daily records loaded".to_string(),
    }
}
