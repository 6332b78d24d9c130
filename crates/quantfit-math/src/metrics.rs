//! Goodness-of-fit metrics: R², RMSE, and AIC.
//!
//! AIC is comparable only across models scored on the same data; lower
//! is better. A near-perfect fit (SSE below [`PERFECT_FIT_SSE`]) maps
//! to an AIC of negative infinity, which must compare smaller than any
//! finite score so that an exact fit always wins selection.

use crate::error::{MathError, MathResult};
use crate::stats::mean;

/// SST below this is treated as a constant target (R² reported as 0).
pub const CONSTANT_TARGET_SST: f64 = 1e-10;

/// SSE below this is treated as a perfect fit (AIC of −∞).
pub const PERFECT_FIT_SSE: f64 = 1e-10;

/// Quality metrics for a fitted model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoodnessOfFit {
    /// Coefficient of determination. 0 when the target is constant.
    pub r_squared: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Akaike information criterion; −∞ for a perfect fit.
    pub aic: f64,
}

/// Scores predictions against observations.
///
/// # Arguments
///
/// * `y_true` - Observed values
/// * `y_pred` - Predicted values, same length
/// * `n_params` - Number of free parameters in the model (the AIC
///   complexity penalty is `2 * n_params`)
///
/// # Formulas
///
/// ```text
/// RMSE = sqrt(SSE / n)
/// R²   = 1 − SSE / SST        (0 when SST < 1e-10)
/// AIC  = n·ln(SSE / n) + 2k   (−∞ when SSE < 1e-10)
/// ```
pub fn goodness_of_fit(
    y_true: &[f64],
    y_pred: &[f64],
    n_params: usize,
) -> MathResult<GoodnessOfFit> {
    if y_true.len() != y_pred.len() {
        return Err(MathError::length_mismatch(y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }

    let n = y_true.len() as f64;
    let sse: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();

    let rmse = (sse / n).sqrt();

    let y_mean = mean(y_true)?;
    let sst: f64 = y_true.iter().map(|&t| (t - y_mean) * (t - y_mean)).sum();
    let r_squared = if sst < CONSTANT_TARGET_SST {
        0.0
    } else {
        1.0 - sse / sst
    };

    let aic = if sse < PERFECT_FIT_SSE {
        f64::NEG_INFINITY
    } else {
        n * (sse / n).ln() + 2.0 * n_params as f64
    };

    Ok(GoodnessOfFit {
        r_squared,
        rmse,
        aic,
    })
}
