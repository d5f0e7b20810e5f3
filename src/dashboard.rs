//! Assembles every derived table and statistic shown for a selected year.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::analyzers::aggregate::{day_type_summary, hour_type_summary, monthly_summary};
use crate::analyzers::types::{
    DayTypeSummary, HourTypeSummary, MonthlySummary, Segment, SegmentStats,
};
use crate::error::{AggregateError, Statistic};
use crate::store::RecordStore;

/// Per-segment view: day-type and hour-type breakdowns plus monthly statistics.
///
/// Each statistic in `stats` is `None` when the selected year has no monthly
/// rows.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentView {
    pub segment: Segment,
    pub stats: SegmentStats,
    pub day_types: Vec<DayTypeSummary>,
    pub hour_types: Vec<HourTypeSummary>,
}

/// Everything the presentation layer renders for one year.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub generated_at: DateTime<Utc>,
    pub monthly: Vec<MonthlySummary>,
    pub casual: SegmentView,
    pub registered: SegmentView,
}

impl Dashboard {
    /// Filters `store` to `year` and computes all summaries from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidSelection`] if `year` is outside the
    /// store's observed range. Statistics over an empty year are not an error
    /// here; they are recorded as missing.
    #[tracing::instrument(skip(store))]
    pub fn build(store: &RecordStore, year: i32) -> Result<Self, AggregateError> {
        let selection = store.select_year(year)?;
        let monthly = monthly_summary(selection.daily.iter().copied());

        let view = |segment: Segment| {
            let stats = SegmentStats::from_monthly(&monthly, segment);
            if stats.is_empty() {
                warn!(%segment, "No data for segment statistics");
            }

            SegmentView {
                segment,
                stats,
                day_types: day_type_summary(selection.daily.iter().copied(), segment),
                hour_types: hour_type_summary(selection.hourly.iter().copied(), segment),
            }
        };

        let casual = view(Segment::Casual);
        let registered = view(Segment::Registered);

        debug!(
            months = monthly.len(),
            day_types = casual.day_types.len(),
            hour_types = casual.hour_types.len(),
            "Dashboard built"
        );

        Ok(Dashboard {
            year,
            generated_at: Utc::now(),
            monthly,
            casual,
            registered,
        })
    }

    pub fn segment(&self, segment: Segment) -> &SegmentView {
        match segment {
            Segment::Casual => &self.casual,
            Segment::Registered => &self.registered,
        }
    }

    pub fn stats(&self, segment: Segment) -> &SegmentStats {
        &self.segment(segment).stats
    }

    /// A single statistic for `segment`, widened to `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptyAggregate`] naming `statistic` when the
    /// year had no monthly rows.
    pub fn statistic(&self, segment: Segment, statistic: Statistic) -> Result<f64, AggregateError> {
        self.stats(segment).value(statistic)
    }

    /// True when the selected year matched no daily or hourly rows.
    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
            && self.casual.hour_types.is_empty()
            && self.registered.hour_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DailyRentalRecord, HourlyRentalRecord};

    #[test]
    fn test_build_filters_to_selected_year() {
        let store = sample_store();
        let dashboard = Dashboard::build(&store, 2012).unwrap();

        assert_eq!(dashboard.year, 2012);
        assert_eq!(dashboard.monthly.len(), 1);
        assert_eq!(dashboard.monthly[0].casual_count, 15);
        assert_eq!(dashboard.monthly[0].registered_count, 70);

        let casual = dashboard.stats(Segment::Casual);
        assert_eq!(casual.total, Some(15));
        assert_eq!(casual.max, Some(15));
        assert_eq!(casual.min, Some(15));
        assert_eq!(casual.mean, Some(15.0));
        assert_eq!(
            dashboard.statistic(Segment::Registered, Statistic::Total),
            Ok(70.0)
        );

        assert_eq!(dashboard.casual.day_types[0].day_type, "weekday");
        assert_eq!(dashboard.registered.hour_types.len(), 2);
    }

    #[test]
    fn test_build_rejects_out_of_range_year() {
        let store = sample_store();
        let err = Dashboard::build(&store, 2015).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::InvalidSelection { year: 2015, .. }
        ));
    }

    #[test]
    fn test_build_empty_year_reports_missing_stats() {
        let dashboard = Dashboard::build(&gap_year_store(), 2012).unwrap();

        assert!(dashboard.is_empty());
        assert!(dashboard.casual.day_types.is_empty());
        assert!(dashboard.registered.hour_types.is_empty());
        for segment in Segment::ALL {
            assert!(dashboard.stats(segment).is_empty());
            assert_eq!(
                dashboard.statistic(segment, Statistic::Total),
                Err(AggregateError::EmptyAggregate {
                    statistic: Statistic::Total
                })
            );
            assert_eq!(
                dashboard.statistic(segment, Statistic::Max),
                Err(AggregateError::EmptyAggregate {
                    statistic: Statistic::Max
                })
            );
            assert_eq!(
                dashboard.statistic(segment, Statistic::Min),
                Err(AggregateError::EmptyAggregate {
                    statistic: Statistic::Min
                })
            );
            assert_eq!(
                dashboard.statistic(segment, Statistic::Mean),
                Err(AggregateError::EmptyAggregate {
                    statistic: Statistic::Mean
                })
            );
        }
    }

    #[test]
    fn test_build_is_idempotent_apart_from_timestamp() {
        let store = sample_store();
        let first = Dashboard::build(&store, 2012).unwrap();
        let second = Dashboard::build(&store, 2012).unwrap();

        assert_eq!(first.monthly, second.monthly);
        assert_eq!(first.casual.day_types, second.casual.day_types);
        assert_eq!(first.registered.hour_types, second.registered.hour_types);
    }

    #[test]
    fn test_dashboard_serializes_missing_stats_as_null() {
        let empty = Dashboard::build(&gap_year_store(), 2012).unwrap();
        let json = serde_json::to_value(&empty).unwrap();
        for field in ["total", "max", "min", "mean"] {
            assert!(json["casual"]["stats"][field].is_null());
            assert!(json["registered"]["stats"][field].is_null());
        }
        assert_eq!(json["casual"]["segment"], "casual");

        let filled = Dashboard::build(&gap_year_store(), 2011).unwrap();
        let json = serde_json::to_value(&filled).unwrap();
        assert_eq!(json["registered"]["stats"]["total"], 1);
        assert_eq!(json["registered"]["stats"]["mean"], 1.0);
    }

    // Helper functions for tests
    fn gap_year_store() -> RecordStore {
        RecordStore::new(
            vec![
                daily(2011, 1, "weekday", 1, 1),
                daily(2013, 1, "weekday", 1, 1),
            ],
            vec![],
        )
    }

    fn sample_store() -> RecordStore {
        RecordStore::new(
            vec![
                daily(2012, 1, "weekday", 10, 50),
                daily(2012, 1, "weekend", 5, 20),
                daily(2013, 1, "weekday", 99, 99),
            ],
            vec![
                hourly(2012, "night", 2, 8),
                hourly(2012, "midday", 3, 9),
                hourly(2013, "night", 100, 100),
            ],
        )
    }

    fn daily(
        year: i32,
        month_number: u32,
        day_type: &str,
        casual: u64,
        registered: u64,
    ) -> DailyRentalRecord {
        DailyRentalRecord {
            year,
            month_number,
            month_name: "Jan".to_string(),
            day_type: day_type.to_string(),
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
