//! Polynomial least-squares fitting.
//!
//! Coefficients are ordered from the highest power down to the constant
//! term, so `polyfit(x, y, 1)` returns `[slope, intercept]` and
//! [`polyval`] evaluates with Horner's method.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};

/// Fits a polynomial of the given degree to `(x, y)` by least squares.
///
/// The system is solved through an SVD of the Vandermonde matrix, which
/// stays well defined for rank-deficient systems (e.g. a degree higher
/// than the data can determine) and returns the minimum-norm solution.
///
/// # Arguments
///
/// * `x` - Independent values
/// * `y` - Dependent values, same length as `x`
/// * `degree` - Polynomial degree (0 = constant)
///
/// # Returns
///
/// Coefficients ordered highest power first, length `degree + 1`.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> MathResult<Vec<f64>> {
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    if x.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }

    let n = x.len();
    let cols = degree + 1;

    // Vandermonde matrix with the highest power in the first column.
    let vandermonde = DMatrix::from_fn(n, cols, |i, j| x[i].powi((degree - j) as i32));
    let rhs = DVector::from_column_slice(y);

    let svd = vandermonde.svd(true, true);
    let solution = svd
        .solve(&rhs, f64::EPSILON)
        .map_err(|_| MathError::SingularSystem { degree })?;

    Ok(solution.iter().copied().collect())
}

/// Fits a straight line `y = slope * x + intercept` by least squares.
pub fn linear_fit(x: &[f64], y: &[f64]) -> MathResult<(f64, f64)> {
    let coeffs = polyfit(x, y, 1)?;
    Ok((coeffs[0], coeffs[1]))
}

/// Evaluates a polynomial at `x` using Horner's method.
///
/// `coeffs` are ordered highest power first, matching [`polyfit`].
#[must_use]
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Evaluates a polynomial over a slice of points.
#[must_use]
pub fn polyval_slice(coeffs: &[f64], xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| polyval(coeffs, x)).collect()
}
