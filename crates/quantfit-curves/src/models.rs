//! Curve model families and fitted model evaluation.
//!
//! A [`CurveModel`] pairs a [`ModelKind`] with its fitted parameters and
//! knows how to evaluate itself, render a human-readable equation, and
//! predict over new points with domain checks.

use serde::{Deserialize, Serialize};
use std::fmt;

use quantfit_math::polyfit::polyval;

use crate::error::{FitError, FitResult};

/// Coefficients smaller than this are dropped from rendered equations.
const EQUATION_COEF_FLOOR: f64 = 1e-10;

/// The model families the fitting engine can try.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Polynomial of the given degree, `y = c_d x^d + ... + c_0`.
    Polynomial(usize),
    /// Exponential with vertical offset, `y = a * e^(bx) + c`.
    Exponential,
    /// Logarithmic, `y = a + b * ln(x)`. Requires `x > 0`.
    Logarithmic,
    /// Power law, `y = a * x^b`. Requires `x > 0` (and `y > 0` to fit).
    Power,
    /// Four-parameter logistic, `y = L / (1 + e^(-k(x - x0))) + b`.
    Sigmoid,
}

impl ModelKind {
    /// Number of free parameters, used as `k` in the AIC penalty.
    #[must_use]
    pub fn param_count(&self) -> usize {
        match self {
            Self::Polynomial(degree) => degree + 1,
            Self::Exponential => 3,
            Self::Logarithmic | Self::Power => 2,
            Self::Sigmoid => 4,
        }
    }

    /// Stable identifier used in fit reports, e.g. `polynomial_deg2`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Polynomial(degree) => format!("polynomial_deg{degree}"),
            Self::Exponential => "exponential".to_string(),
            Self::Logarithmic => "logarithmic".to_string(),
            Self::Power => "power".to_string(),
            Self::Sigmoid => "sigmoid".to_string(),
        }
    }

    /// Whether evaluation is only defined for strictly positive `x`.
    #[must_use]
    pub fn requires_positive_x(&self) -> bool {
        matches!(self, Self::Logarithmic | Self::Power)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which model families a fit request should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    /// Try every family and keep the best by AIC.
    #[default]
    Auto,
    /// Polynomial only.
    Polynomial,
    /// Exponential only.
    Exponential,
    /// Logarithmic only.
    Logarithmic,
    /// Power law only.
    Power,
    /// Sigmoid only.
    Sigmoid,
}

/// A fitted curve: a model family plus its estimated parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveModel {
    /// The family this model belongs to.
    pub kind: ModelKind,
    /// Fitted parameters, ordered per family (see [`ModelKind`] docs).
    pub parameters: Vec<f64>,
}

impl CurveModel {
    /// Builds a model from a family and its parameter vector.
    #[must_use]
    pub fn new(kind: ModelKind, parameters: Vec<f64>) -> Self {
        debug_assert_eq!(parameters.len(), kind.param_count());
        Self { kind, parameters }
    }

    /// Evaluates the model at a single point.
    ///
    /// This is the raw functional form; out-of-domain inputs (e.g.
    /// `x <= 0` for logarithmic models) produce NaN or infinities.
    /// [`CurveModel::predict`] performs the checked version.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let p = &self.parameters;
        match self.kind {
            ModelKind::Polynomial(_) => polyval(p, x),
            ModelKind::Exponential => p[0] * (p[1] * x).exp() + p[2],
            ModelKind::Logarithmic => p[0] + p[1] * x.ln(),
            ModelKind::Power => p[0] * x.powf(p[1]),
            ModelKind::Sigmoid => p[0] / (1.0 + (-p[1] * (x - p[2])).exp()) + p[3],
        }
    }

    /// Evaluates the model over a slice of points without domain checks.
    #[must_use]
    pub fn evaluate_all(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// Evaluates the model over new points, rejecting out-of-domain
    /// inputs and non-finite outputs.
    pub fn predict(&self, xs: &[f64]) -> FitResult<Vec<f64>> {
        if self.kind.requires_positive_x() {
            if let Some(bad) = xs.iter().find(|&&x| x <= 0.0) {
                return Err(FitError::prediction_failed(format!(
                    "{} model requires x > 0, got {bad}",
                    self.kind
                )));
            }
        }

        let mut out = Vec::with_capacity(xs.len());
        for &x in xs {
            let y = self.evaluate(x);
            if !y.is_finite() {
                return Err(FitError::prediction_failed(format!(
                    "model produced a non-finite value at x = {x}"
                )));
            }
            out.push(y);
        }
        Ok(out)
    }

    /// Renders the fitted equation with coefficients at four significant
    /// figures, e.g. `y = 2x^2 - 3x + 1`.
    #[must_use]
    pub fn equation(&self) -> String {
        let p = &self.parameters;
        match self.kind {
            ModelKind::Polynomial(degree) => polynomial_equation(p, degree),
            ModelKind::Exponential => format!(
                "y = {} * e^({}x) + {}",
                sig4(p[0]),
                sig4(p[1]),
                sig4(p[2])
            ),
            ModelKind::Logarithmic => {
                format!("y = {} + {} * ln(x)", sig4(p[0]), sig4(p[1]))
            }
            ModelKind::Power => format!("y = {} * x^{}", sig4(p[0]), sig4(p[1])),
            ModelKind::Sigmoid => format!(
                "y = {} / (1 + e^(-{}(x - {}))) + {}",
                sig4(p[0]),
                sig4(p[1]),
                sig4(p[2]),
                sig4(p[3])
            ),
        }
    }
}

fn polynomial_equation(coeffs: &[f64], degree: usize) -> String {
    let mut terms = Vec::new();
    for (i, &c) in coeffs.iter().enumerate() {
        if c.abs() < EQUATION_COEF_FLOOR {
            continue;
        }
        let power = degree - i;
        let coef = sig4(c);
        let term = match power {
            0 => coef,
            1 => format!("{coef}x"),
            _ => format!("{coef}x^{power}"),
        };
        terms.push(term);
    }
    if terms.is_empty() {
        return "y = 0".to_string();
    }
    // Fold "+ -c" into "- c" so negatives read naturally.
    format!("y = {}", terms.join(" + ").replace("+ -", "- "))
}

/// Formats a value to four significant figures, switching to scientific
/// notation outside roughly `1e-4..1e4` and trimming trailing zeros.
fn sig4(value: f64) -> String {
    format_significant(value, 4)
}

fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Let the exponential formatter find the decimal exponent after
    // rounding, then pick plain or scientific style from it.
    let sci = format!("{:.*e}", digits.saturating_sub(1), value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        format!("{}e{exponent}", trim_zeros(mantissa))
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_zeros(&format!("{value:.decimals$}"))
    }
}

fn trim_zeros(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}
