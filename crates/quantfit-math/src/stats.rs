//! Descriptive statistics over f64 slices.

use crate::error::{MathError, MathResult};

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by `n`, not `n - 1`).
pub fn population_std(values: &[f64]) -> MathResult<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|&v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    Ok(variance.sqrt())
}

/// Median of the values.
///
/// Even-length inputs return the midpoint of the two central values.
pub fn median(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}
