//! Input cleaning ahead of fitting.
//!
//! Fitting runs on two passes over the raw series: first drop pairs with
//! NaN or infinite members, then remove outliers by modified z-score
//! against a rough linear trend. The outlier pass is conservative and
//! reverts itself when it would leave fewer points than a fit needs.

use log::warn;

use quantfit_math::polyfit::linear_fit;
use quantfit_math::stats::median;

use crate::error::FitResult;

/// Minimum number of points any fit needs.
pub const MIN_POINTS: usize = 3;

/// MAD below this is treated as zero spread and disables the filter.
const MAD_FLOOR: f64 = 1e-9;

/// Scale factor converting MAD to an estimate of the standard deviation.
const MODIFIED_Z_SCALE: f64 = 0.6745;

/// Modified z-score above which a point is discarded.
const OUTLIER_CUTOFF: f64 = 3.5;

/// A series after outlier removal, with the number of points dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedSeries {
    /// Surviving x values.
    pub x: Vec<f64>,
    /// Surviving y values.
    pub y: Vec<f64>,
    /// How many points the outlier filter discarded.
    pub outliers_removed: usize,
}

/// Drops pairs where either member is NaN or infinite.
#[must_use]
pub fn drop_non_finite(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter(|(&xi, &yi)| xi.is_finite() && yi.is_finite())
        .map(|(&xi, &yi)| (xi, yi))
        .unzip()
}

/// Removes outliers by modified z-score of residuals from a linear
/// pre-fit.
///
/// Residuals are taken against a least-squares line through the data;
/// points whose modified z-score (`0.6745 * |r| / MAD`) exceeds 3.5 are
/// dropped. When the MAD is effectively zero, or when filtering would
/// leave fewer than [`MIN_POINTS`] points, the input passes through
/// unchanged.
pub fn filter_outliers(x: &[f64], y: &[f64]) -> FitResult<CleanedSeries> {
    let (slope, intercept) = linear_fit(x, y)?;

    let residuals: Vec<f64> = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (yi - (slope * xi + intercept)).abs())
        .collect();
    let mad = median(&residuals)?;

    if mad <= MAD_FLOOR {
        return Ok(CleanedSeries {
            x: x.to_vec(),
            y: y.to_vec(),
            outliers_removed: 0,
        });
    }

    let keep: Vec<bool> = residuals
        .iter()
        .map(|&r| MODIFIED_Z_SCALE * r / mad < OUTLIER_CUTOFF)
        .collect();
    let kept = keep.iter().filter(|&&k| k).count();

    if kept < MIN_POINTS {
        warn!(
            "outlier filter would keep {kept} of {} points; keeping all",
            x.len()
        );
        return Ok(CleanedSeries {
            x: x.to_vec(),
            y: y.to_vec(),
            outliers_removed: 0,
        });
    }

    let (x_clean, y_clean): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .zip(keep.iter())
        .filter(|(_, &k)| k)
        .map(|((&xi, &yi), _)| (xi, yi))
        .unzip();

    Ok(CleanedSeries {
        outliers_removed: x.len() - x_clean.len(),
        x: x_clean,
        y: y_clean,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_non_finite_pairs() {
        let x = [1.0, 2.0, f64::NAN, 4.0, 5.0];
        let y = [1.0, f64::INFINITY, 3.0, 4.0, 5.0];

        let (xf, yf) = drop_non_finite(&x, &y);

        assert_eq!(xf, vec![1.0, 4.0, 5.0]);
        assert_eq!(yf, vec![1.0, 4.0, 5.0]);
    }

    #[test]
    fn test_single_spike_removed() {
        let x: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let mut y: Vec<f64> = x.iter().map(|&v| 2.0 * v + 0.01 * (v * 3.7).sin()).collect();
        y[5] = 100.0;

        let cleaned = filter_outliers(&x, &y).unwrap();

        assert_eq!(cleaned.outliers_removed, 1);
        assert_eq!(cleaned.x.len(), 9);
        assert!(!cleaned.x.contains(&6.0));
    }

    #[test]
    fn test_clean_linear_data_untouched() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0];

        let cleaned = filter_outliers(&x, &y).unwrap();

        // Residuals are all ~0, so the MAD gate leaves the data alone.
        assert_eq!(cleaned.outliers_removed, 0);
        assert_eq!(cleaned.x.len(), 5);
    }

    #[test]
    fn test_wild_data_keeps_minimum_points() {
        // When half the points are wild the pre-fit line chases them,
        // so the filter never thins below what a fit needs.
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 2.0, 500.0, -400.0];

        let cleaned = filter_outliers(&x, &y).unwrap();

        assert!(cleaned.x.len() >= MIN_POINTS);
        assert_eq!(cleaned.outliers_removed + cleaned.x.len(), 4);
    }

    #[test]
    fn test_constant_series_passes_through() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [5.0, 5.0, 5.0, 5.0, 5.0];

        let cleaned = filter_outliers(&x, &y).unwrap();

        assert_eq!(cleaned.outliers_removed, 0);
        assert_eq!(cleaned.y, y.to_vec());
    }
}
