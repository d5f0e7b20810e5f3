//! Locations of the input files.
//!
//! Each path resolves from an explicit value, then an environment variable
//! (possibly loaded from `.env`), then a default file name in the working
//! directory.

use std::path::PathBuf;

pub const DAY_DATA_ENV: &str = "DAY_DATA_PATH";
pub const HOUR_DATA_ENV: &str = "HOUR_DATA_PATH";

pub const DEFAULT_DAY_DATA: &str = "dayRent_data.csv";
pub const DEFAULT_HOUR_DATA: &str = "hourRent_data.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub daily: PathBuf,
    pub hourly: PathBuf,
}

impl DataPaths {
    /// Resolves both paths against the process environment.
    pub fn resolve(daily: Option<PathBuf>, hourly: Option<PathBuf>) -> Self {
        Self::resolve_with(daily, hourly, |key| std::env::var(key).ok())
    }

    /// Resolves both paths using `lookup` in place of the environment.
    pub fn resolve_with(
        daily: Option<PathBuf>,
        hourly: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let pick = |explicit: Option<PathBuf>, key: &str, default: &str| {
            explicit
                .or_else(|| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(default))
        };

        Self {
            daily: pick(daily, DAY_DATA_ENV, DEFAULT_DAY_DATA),
            hourly: pick(hourly, HOUR_DATA_ENV, DEFAULT_HOUR_DATA),
        }
    }
}
