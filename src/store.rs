//! Immutable in-memory record store and the year-selection filter.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{AggregateError, YearRange};
use crate::records::{DailyRentalRecord, HourlyRentalRecord, read_records};

/// Daily and hourly rental tables, loaded once and never mutated.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    daily: Vec<DailyRentalRecord>,
    hourly: Vec<HourlyRentalRecord>,
}

/// Both tables narrowed, independently, to a single year.
#[derive(Debug, Clone)]
pub struct YearSelection<'a> {
    pub year: i32,
    pub daily: Vec<&'a DailyRentalRecord>,
    pub hourly: Vec<&'a HourlyRentalRecord>,
}

impl YearSelection<'_> {
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty() && self.hourly.is_empty()
    }
}

impl RecordStore {
    pub fn new(daily: Vec<DailyRentalRecord>, hourly: Vec<HourlyRentalRecord>) -> Self {
        Self { daily, hourly }
    }

    /// Loads both tables from CSV files on disk.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file if it cannot be opened or contains a
    /// malformed row.
    #[tracing::instrument(
        skip_all,
        fields(daily = %daily_path.display(), hourly = %hourly_path.display())
    )]
    pub fn load(daily_path: &Path, hourly_path: &Path) -> Result<Self> {
        let daily_file = File::open(daily_path)
            .with_context(|| format!("failed to open {}", daily_path.display()))?;
        let hourly_file = File::open(hourly_path)
            .with_context(|| format!("failed to open {}", hourly_path.display()))?;

        let daily = read_records(daily_file)
            .with_context(|| format!("failed to load {}", daily_path.display()))?;
        let hourly = read_records(hourly_file)
            .with_context(|| format!("failed to load {}", hourly_path.display()))?;

        let store = Self::new(daily, hourly);
        info!(
            daily_rows = store.daily.len(),
            hourly_rows = store.hourly.len(),
            "Record store loaded"
        );
        Ok(store)
    }

    /// Loads both tables from already-open CSV streams.
    pub fn from_readers(daily: impl Read, hourly: impl Read) -> Result<Self> {
        let daily = read_records(daily).context("failed to load daily records")?;
        let hourly = read_records(hourly).context("failed to load hourly records")?;
        Ok(Self::new(daily, hourly))
    }

    pub fn daily(&self) -> &[DailyRentalRecord] {
        &self.daily
    }

    pub fn hourly(&self) -> &[HourlyRentalRecord] {
        &self.hourly
    }

    /// Observed min/max of the daily table's `year` column.
    pub fn year_range(&self) -> Option<YearRange> {
        let min = self.daily.iter().map(|r| r.year).min()?;
        let max = self.daily.iter().map(|r| r.year).max()?;
        Some(YearRange { min, max })
    }

    /// Every year between the observed min and max, inclusive.
    pub fn selectable_years(&self) -> Vec<i32> {
        self.year_range()
            .map(|range| (range.min..=range.max).collect())
            .unwrap_or_default()
    }

    /// Narrows both tables to rows whose `year` equals `year`.
    ///
    /// A year inside the observed range but without rows yields an empty
    /// selection.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidSelection`] when `year` lies outside
    /// the observed range, or when no daily records are loaded.
    pub fn select_year(&self, year: i32) -> Result<YearSelection<'_>, AggregateError> {
        let available = self.year_range();
        if !available.is_some_and(|range| range.contains(year)) {
            return Err(AggregateError::InvalidSelection { year, available });
        }

        let daily: Vec<_> = self.daily.iter().filter(|r| r.year == year).collect();
        let hourly: Vec<_> = self.hourly.iter().filter(|r| r.year == year).collect();

        debug!(
            year,
            daily_rows = daily.len(),
            hourly_rows = hourly.len(),
            "Year selected"
        );

        Ok(YearSelection {
            year,
            daily,
            hourly,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_and_selectable_years() {
        let store = sample_store();
        assert_eq!(
            store.year_range(),
            Some(YearRange {
                min: 2011,
                max: 2013
            })
        );
        assert_eq!(store.selectable_years(), vec![2011, 2012, 2013]);
    }

    #[test]
    fn test_empty_store_has_no_years() {
        let store = RecordStore::default();
        assert_eq!(store.year_range(), None);
        assert!(store.selectable_years().is_empty());
        assert_eq!(
            store.select_year(2012).unwrap_err(),
            AggregateError::InvalidSelection {
                year: 2012,
                available: None
            }
        );
    }

    #[test]
    fn test_select_year_filters_tables_independently() {
        let store = sample_store();
        let selection = store.select_year(2012).unwrap();

        assert_eq!(selection.year, 2012);
        assert_eq!(selection.daily.len(), 2);
        assert!(selection.daily.iter().all(|r| r.year == 2012));
        assert_eq!(selection.hourly.len(), 1);
        assert_eq!(selection.hourly[0].hour_type, "night");
    }

    #[test]
    fn test_select_year_out_of_range() {
        let store = sample_store();
        let err = store.select_year(2014).unwrap_err();
        assert_eq!(
            err,
            AggregateError::InvalidSelection {
                year: 2014,
                available: Some(YearRange {
                    min: 2011,
                    max: 2013
                }),
            }
        );
        assert!(store.select_year(2010).is_err());
    }

    #[test]
    fn test_select_year_in_range_without_rows() {
        let store = RecordStore::new(
            vec![daily(2011, 10, 20), daily(2013, 1, 1)],
            vec![hourly(2011, "night", 1, 1)],
        );

        let selection = store.select_year(2012).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_from_readers() {
        let day_csv = "year,mnth,month,day_type,casual,registered\n2011,1,Jan,weekday,1,2\n";
        let hour_csv = "year,hour_type,casual,registered\n2011,night,3,4\n";

        let store = RecordStore::from_readers(day_csv.as_bytes(), hour_csv.as_bytes()).unwrap();

        assert_eq!(store.daily().len(), 1);
        assert_eq!(store.hourly().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let missing = std::env::temp_dir().join("bike_rental_dashboard_missing_day.csv");
        let result = RecordStore::load(&missing, &missing);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("bike_rental_dashboard_missing_day.csv"));
    }

    // Helper functions for tests
    fn sample_store() -> RecordStore {
        RecordStore::new(
            vec![
                daily(2011, 10, 20),
                daily(2012, 5, 6),
                daily(2012, 7, 8),
                daily(2013, 1, 1),
            ],
            vec![hourly(2011, "midday", 1, 2), hourly(2012, "night", 3, 4)],
        )
    }

    fn daily(year: i32, casual: u64, registered: u64) -> DailyRentalRecord {
        DailyRentalRecord {
            year,
            month_number: 1,
            month_name: "Jan".to_string(),
            day_type: "weekday".to_string(),
            casual_count: casual,
            registered_count: registered,
        }
    }

    fn hourly(year: i32, hour_type: &str, casual: u64, registered: u64) -> HourlyRentalRecord {
        HourlyRentalRecord {
            year,
            hour_type: hour_type.to_string(),
            casual_count: casual,
            registered_count: registered,
        }
    }
}
