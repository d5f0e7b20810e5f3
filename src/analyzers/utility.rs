use crate::error::{AggregateError, Statistic};

fn saturating_sum(values: &[u64]) -> u64 {
    values.iter().fold(0u64, |acc, v| acc.saturating_add(*v))
}

/// Sums a slice of counts. Fails with `EmptyAggregate` for empty input rather
/// than reporting zero.
pub fn total(values: &[u64]) -> Result<u64, AggregateError> {
    if values.is_empty() {
        return Err(AggregateError::EmptyAggregate {
            statistic: Statistic::Total,
        });
    }
    Ok(saturating_sum(values))
}

/// Largest count in the slice.
pub fn maximum(values: &[u64]) -> Result<u64, AggregateError> {
    values
        .iter()
        .copied()
        .max()
        .ok_or(AggregateError::EmptyAggregate {
            statistic: Statistic::Max,
        })
}

/// Smallest count in the slice.
pub fn minimum(values: &[u64]) -> Result<u64, AggregateError> {
    values
        .iter()
        .copied()
        .min()
        .ok_or(AggregateError::EmptyAggregate {
            statistic: Statistic::Min,
        })
}

/// Arithmetic mean of the counts.
pub fn mean(values: &[u64]) -> Result<f64, AggregateError> {
    if values.is_empty() {
        return Err(AggregateError::EmptyAggregate {
            statistic: Statistic::Mean,
        });
    }
    let sum: f64 = values.iter().map(|v| *v as f64).sum();
    Ok(sum / values.len() as f64)
}
