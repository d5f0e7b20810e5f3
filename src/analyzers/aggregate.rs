use crate::analyzers::types::{DayTypeSummary, HourTypeSummary, MonthlySummary, Segment};
use crate::records::{DailyRentalRecord, HourlyRentalRecord};
use std::collections::HashMap;
use std::hash::Hash;

/// Folds `rows` into one running sum per group key.
///
/// Each row contributes `N` counters; sums saturate at `u64::MAX`. Groups are
/// returned in the order their key was first encountered, so callers that
/// sort with a stable sort get a deterministic result for equal sort keys.
pub fn group_sum<'a, R, K, const N: usize>(
    rows: impl IntoIterator<Item = &'a R>,
    key: impl Fn(&'a R) -> K,
    values: impl Fn(&'a R) -> [u64; N],
) -> Vec<(K, [u64; N])>
where
    R: 'a,
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, [u64; N])> = Vec::new();

    for row in rows {
        let k = key(row);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push((k, [0; N]));
            groups.len() - 1
        });

        for (acc, value) in groups[slot].1.iter_mut().zip(values(row)) {
            *acc = acc.saturating_add(value);
        }
    }

    groups
}

/// Sums both segments per `(month_number, month_name)`, ascending by month.
///
/// Expects rows already narrowed to a single year.
pub fn monthly_summary<'a>(
    daily_rows: impl IntoIterator<Item = &'a DailyRentalRecord>,
) -> Vec<MonthlySummary> {
    let groups = group_sum(
        daily_rows,
        |r| (r.month_number, r.month_name.as_str()),
        |r| [r.casual_count, r.registered_count],
    );

    let mut summary: Vec<MonthlySummary> = groups
        .into_iter()
        .map(|((month_number, month_name), [casual, registered])| MonthlySummary {
            month_number,
            month_name: month_name.to_string(),
            casual_count: casual,
            registered_count: registered,
        })
        .collect();

    summary.sort_by_key(|m| m.month_number);
    summary
}

/// Sums one segment per day type, highest total first.
///
/// Equal totals are ordered by ascending day-type label.
pub fn day_type_summary<'a>(
    daily_rows: impl IntoIterator<Item = &'a DailyRentalRecord>,
    segment: Segment,
) -> Vec<DayTypeSummary> {
    let groups = group_sum(daily_rows, |r| r.day_type.as_str(), |r| [segment.count(r)]);

    let mut summary: Vec<DayTypeSummary> = groups
        .into_iter()
        .map(|(day_type, [count])| DayTypeSummary {
            day_type: day_type.to_string(),
            count,
        })
        .collect();

    summary.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.day_type.cmp(&b.day_type))
    });
    summary
}

/// Sums one segment per hour type, ordered by hour-type label.
pub fn hour_type_summary<'a>(
    hourly_rows: impl IntoIterator<Item = &'a HourlyRentalRecord>,
    segment: Segment,
) -> Vec<HourTypeSummary> {
    let groups = group_sum(
        hourly_rows,
        |r| r.hour_type.as_str(),
        |r| [segment.count(r)],
    );

    let mut summary: Vec<HourTypeSummary> = groups
        .into_iter()
        .map(|(hour_type, [count])| HourTypeSummary {
            hour_type: hour_type.to_string(),
            count,
        })
        .collect();

    summary.sort_by(|a, b| a.hour_type.cmp(&b.hour_type));
    summary
}
