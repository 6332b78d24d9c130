//! The fitting engine: validation, cleaning, selection, storage, and
//! prediction against stored models.

use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{FitError, FitResult};
use crate::preprocess::{self, MIN_POINTS};
use crate::selection::{fit_and_select, FitOptions};
use crate::store::{ModelId, ModelStore};

/// Rounded quality metrics reported for a fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// R², rounded to four decimals.
    pub r_squared: f64,
    /// RMSE, rounded to four decimals.
    pub rmse: f64,
    /// AIC, rounded to two decimals.
    pub aic: f64,
}

/// Summary of a completed fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Identifier for later predictions against this fit.
    pub model_id: ModelId,
    /// Family label of the winner, e.g. `polynomial_deg2`.
    pub model_type: String,
    /// Rendered equation of the winner.
    pub equation: String,
    /// Fitted parameters.
    pub parameters: Vec<f64>,
    /// Rounded quality metrics.
    pub quality: FitQuality,
    /// Number of points used after cleaning.
    pub data_points: usize,
    /// Number of points discarded by the outlier filter.
    pub outliers_removed: usize,
}

/// Curve fitting engine with an attached model store.
///
/// The engine is cheap to share: it holds the store behind an [`Arc`],
/// and both fitting and prediction take `&self`.
#[derive(Debug, Default)]
pub struct FitEngine {
    store: Arc<ModelStore>,
}

impl FitEngine {
    /// Engine with its own empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine backed by an existing store.
    #[must_use]
    pub fn with_store(store: Arc<ModelStore>) -> Self {
        Self { store }
    }

    /// The underlying model store.
    #[must_use]
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    /// Fits the best model to `(x, y)` and stores it.
    ///
    /// The input is validated (non-empty, equal lengths, at least three
    /// points), NaN/infinite pairs are dropped, outliers are removed by
    /// modified z-score, and every candidate family from `options` is
    /// fitted. The lowest-AIC candidate is stored and summarized in the
    /// returned [`FitReport`].
    pub fn fit(&self, x: &[f64], y: &[f64], options: &FitOptions) -> FitResult<FitReport> {
        if x.is_empty() || y.is_empty() {
            return Err(FitError::EmptyInput);
        }
        if x.len() != y.len() {
            return Err(FitError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < MIN_POINTS {
            return Err(FitError::TooFewPoints {
                required: MIN_POINTS,
                actual: x.len(),
            });
        }

        let (x_finite, y_finite) = preprocess::drop_non_finite(x, y);
        if x_finite.len() < MIN_POINTS {
            return Err(FitError::TooManyInvalid);
        }

        let cleaned = preprocess::filter_outliers(&x_finite, &y_finite)?;
        let selection = fit_and_select(&cleaned.x, &cleaned.y, options)?;
        let best = selection.best;

        let model_id = self.store.insert(best.clone());
        info!(
            "fit {} stored as {model_id} ({} points, {} outliers removed)",
            best.model.kind,
            cleaned.x.len(),
            cleaned.outliers_removed
        );

        let model_type = best.model.kind.label();
        Ok(FitReport {
            model_id,
            model_type,
            equation: best.equation,
            quality: FitQuality {
                r_squared: round_to(best.quality.r_squared, 4),
                rmse: round_to(best.quality.rmse, 4),
                aic: round_to(best.quality.aic, 2),
            },
            parameters: best.model.parameters,
            data_points: cleaned.x.len(),
            outliers_removed: cleaned.outliers_removed,
        })
    }

    /// Evaluates a stored model over new points.
    ///
    /// Fails with [`FitError::ModelNotFound`] for unknown ids and with
    /// [`FitError::PredictionFailed`] when a point falls outside the
    /// model's domain.
    pub fn predict(&self, id: &ModelId, xs: &[f64]) -> FitResult<Vec<f64>> {
        let fitted = self
            .store
            .get(id)
            .ok_or_else(|| FitError::model_not_found(id.as_str()))?;
        fitted.model.predict(xs)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_linear_series() {
        let engine = FitEngine::new();
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [3.0, 5.0, 7.0, 9.0, 11.0];

        let report = engine.fit(&x, &y, &FitOptions::default()).unwrap();

        assert_eq!(report.model_type, "polynomial_deg1");
        assert_eq!(report.equation, "y = 2x + 1");
        assert_relative_eq!(report.parameters[0], 2.0, epsilon = 1e-8);
        assert_relative_eq!(report.parameters[1], 1.0, epsilon = 1e-8);
        assert_relative_eq!(report.quality.r_squared, 1.0);
        assert_eq!(report.data_points, 5);
        assert_eq!(report.outliers_removed, 0);
        assert!(engine.store().contains(&report.model_id));
    }

    #[test]
    fn test_validation_order() {
        let engine = FitEngine::new();
        let options = FitOptions::default();

        assert_eq!(
            engine.fit(&[], &[], &options).unwrap_err(),
            FitError::EmptyInput
        );
        assert_eq!(
            engine.fit(&[1.0, 2.0], &[1.0], &options).unwrap_err(),
            FitError::LengthMismatch { x_len: 2, y_len: 1 }
        );
        assert_eq!(
            engine.fit(&[1.0, 2.0], &[1.0, 2.0], &options).unwrap_err(),
            FitError::TooFewPoints {
                required: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_too_many_invalid_points() {
        let engine = FitEngine::new();
        let x = [1.0, 2.0, f64::NAN, 4.0];
        let y = [1.0, f64::INFINITY, 3.0, 4.0];

        // Four points but only two finite pairs survive.
        let err = engine.fit(&x, &y, &FitOptions::default()).unwrap_err();
        assert_eq!(err, FitError::TooManyInvalid);
    }

    #[test]
    fn test_outlier_is_dropped_before_fitting() {
        let engine = FitEngine::new();
        let x: Vec<f64> = (1..=9).map(|i| i as f64).collect();
        let mut y: Vec<f64> = x.iter().map(|&v| 3.0 * v + 1.0 + 0.02 * (v * 2.1).cos()).collect();
        y[4] = 200.0;

        let report = engine.fit(&x, &y, &FitOptions::default()).unwrap();

        assert!(report.outliers_removed >= 1);
        assert_eq!(report.data_points + report.outliers_removed, 9);
        assert!(report.quality.r_squared > 0.99);
    }

    #[test]
    fn test_predict_round_trip() {
        let engine = FitEngine::new();
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 6.0, 8.0, 10.0];

        let report = engine.fit(&x, &y, &FitOptions::default()).unwrap();
        let predicted = engine.predict(&report.model_id, &x).unwrap();

        for (&p, &expected) in predicted.iter().zip(y.iter()) {
            assert_relative_eq!(p, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_predict_unknown_model() {
        let engine = FitEngine::new();
        let err = engine
            .predict(&ModelId::from("fit_ffffffff"), &[1.0])
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Model 'fit_ffffffff' not found. It may have expired or never existed."
        );
    }

    #[test]
    fn test_engines_can_share_a_store() {
        let store = Arc::new(ModelStore::new());
        let fitter = FitEngine::with_store(Arc::clone(&store));
        let predictor = FitEngine::with_store(store);

        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let report = fitter.fit(&x, &y, &FitOptions::default()).unwrap();

        let predicted = predictor.predict(&report.model_id, &[5.0]).unwrap();
        assert_relative_eq!(predicted[0], 9.0, epsilon = 1e-6);
    }

    #[test]
    fn test_report_serializes_with_expected_keys() {
        let engine = FitEngine::new();
        let x: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let y: Vec<f64> = x.iter().map(|&v| 1.5 * v + 0.2 * (v * 1.7).sin()).collect();

        let report = engine.fit(&x, &y, &FitOptions::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["model_id"].as_str().unwrap().starts_with("fit_"));
        assert!(json["model_type"].is_string());
        assert!(json["quality"]["r_squared"].is_number());
        assert!(json["data_points"].as_u64().unwrap() >= 3);
    }

    #[test]
    fn test_rounding() {
        assert_relative_eq!(round_to(0.123456, 4), 0.1235);
        assert_relative_eq!(round_to(1234.56789, 2), 1234.57);
        assert_eq!(round_to(f64::NEG_INFINITY, 2), f64::NEG_INFINITY);
    }
}
