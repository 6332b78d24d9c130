//! Fitters with closed-form least-squares solutions.
//!
//! Polynomials are solved directly; logarithmic and power models reduce
//! to a straight line after transforming the inputs.

use quantfit_math::polyfit::{linear_fit, polyfit};

use super::{score, FitAttempt, Infeasible};
use crate::models::{CurveModel, ModelKind};

/// Fits a polynomial of the given degree.
pub fn fit_polynomial(x: &[f64], y: &[f64], degree: usize) -> FitAttempt {
    match polyfit(x, y, degree) {
        Ok(coeffs) => score(CurveModel::new(ModelKind::Polynomial(degree), coeffs), x, y),
        Err(e) => Err(Infeasible::new(ModelKind::Polynomial(degree), e.to_string())),
    }
}

/// Fits `y = a + b * ln(x)` by regressing y on ln(x).
pub fn fit_logarithmic(x: &[f64], y: &[f64]) -> FitAttempt {
    if x.iter().any(|&v| v <= 0.0) {
        return Err(Infeasible::new(
            ModelKind::Logarithmic,
            "requires strictly positive x",
        ));
    }

    let ln_x: Vec<f64> = x.iter().map(|v| v.ln()).collect();
    match linear_fit(&ln_x, y) {
        Ok((b, a)) => score(CurveModel::new(ModelKind::Logarithmic, vec![a, b]), x, y),
        Err(e) => Err(Infeasible::new(ModelKind::Logarithmic, e.to_string())),
    }
}

/// Fits `y = a * x^b` by regressing ln(y) on ln(x).
pub fn fit_power(x: &[f64], y: &[f64]) -> FitAttempt {
    if x.iter().any(|&v| v <= 0.0) || y.iter().any(|&v| v <= 0.0) {
        return Err(Infeasible::new(
            ModelKind::Power,
            "requires strictly positive x and y",
        ));
    }

    let ln_x: Vec<f64> = x.iter().map(|v| v.ln()).collect();
    let ln_y: Vec<f64> = y.iter().map(|v| v.ln()).collect();
    match linear_fit(&ln_x, &ln_y) {
        Ok((b, ln_a)) => score(
            CurveModel::new(ModelKind::Power, vec![ln_a.exp(), b]),
            x,
            y,
        ),
        Err(e) => Err(Infeasible::new(ModelKind::Power, e.to_string())),
    }
}
