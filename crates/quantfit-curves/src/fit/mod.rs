//! Per-family fitting routines.
//!
//! Each fitter estimates parameters for one [`ModelKind`] and scores the
//! result on the training data. Fitters never hard-fail the whole fit:
//! a family that cannot be estimated for the given data reports itself
//! as [`Infeasible`] and model selection moves on.

use std::fmt;

use quantfit_math::metrics::{goodness_of_fit, GoodnessOfFit};

use crate::models::{CurveModel, ModelKind};

mod closed_form;
mod nonlinear;

pub use closed_form::{fit_logarithmic, fit_polynomial, fit_power};
pub use nonlinear::{fit_exponential, fit_sigmoid};

/// A scored fit of one model family.
#[derive(Debug, Clone, PartialEq)]
pub struct FitCandidate {
    /// The fitted model.
    pub model: CurveModel,
    /// Goodness-of-fit on the training data.
    pub quality: GoodnessOfFit,
    /// Rendered equation string.
    pub equation: String,
}

/// Why a model family could not be fitted to the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Infeasible {
    /// The family that was attempted.
    pub kind: ModelKind,
    /// Human-readable reason.
    pub reason: String,
}

impl Infeasible {
    pub(crate) fn new(kind: ModelKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Infeasible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.reason)
    }
}

/// Outcome of attempting one model family.
pub type FitAttempt = Result<FitCandidate, Infeasible>;

/// Dispatches to the fitter for the given family.
pub fn fit_kind(kind: &ModelKind, x: &[f64], y: &[f64]) -> FitAttempt {
    match kind {
        ModelKind::Polynomial(degree) => fit_polynomial(x, y, *degree),
        ModelKind::Exponential => fit_exponential(x, y),
        ModelKind::Logarithmic => fit_logarithmic(x, y),
        ModelKind::Power => fit_power(x, y),
        ModelKind::Sigmoid => fit_sigmoid(x, y),
    }
}

/// Scores estimated parameters on the training data.
///
/// Rejects non-finite parameters and non-finite error metrics so that a
/// diverged optimization surfaces as infeasible rather than as a
/// candidate with NaN quality. An AIC of negative infinity (an
/// essentially perfect fit) is allowed through.
pub(crate) fn score(model: CurveModel, x: &[f64], y: &[f64]) -> FitAttempt {
    if model.parameters.iter().any(|p| !p.is_finite()) {
        return Err(Infeasible::new(model.kind, "non-finite parameters"));
    }

    let y_pred = model.evaluate_all(x);
    let quality = match goodness_of_fit(y, &y_pred, model.kind.param_count()) {
        Ok(q) => q,
        Err(e) => return Err(Infeasible::new(model.kind, e.to_string())),
    };
    if !quality.rmse.is_finite() {
        return Err(Infeasible::new(model.kind, "non-finite fit error"));
    }

    let equation = model.equation();
    Ok(FitCandidate {
        model,
        quality,
        equation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rejects_nan_parameters() {
        let model = CurveModel::new(ModelKind::Logarithmic, vec![f64::NAN, 1.0]);
        let err = score(model, &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert_eq!(err.kind, ModelKind::Logarithmic);
        assert!(err.reason.contains("parameters"));
    }

    #[test]
    fn test_score_rejects_overflowing_model() {
        // Parameters are finite but the model explodes on this domain.
        let model = CurveModel::new(ModelKind::Exponential, vec![1.0, 400.0, 0.0]);
        let err = score(model, &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.reason.contains("fit error"));
    }

    #[test]
    fn test_score_accepts_perfect_fit() {
        let model = CurveModel::new(ModelKind::Polynomial(1), vec![2.0, 1.0]);
        let x = [1.0, 2.0, 3.0];
        let y = [3.0, 5.0, 7.0];

        let candidate = score(model, &x, &y).unwrap();

        // A perfect fit carries AIC of negative infinity and stays
        // selectable.
        assert_eq!(candidate.quality.aic, f64::NEG_INFINITY);
        assert_eq!(candidate.equation, "y = 2x + 1");
    }
}
