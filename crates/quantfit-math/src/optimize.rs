//! Gradient-based optimization.
//!
//! Provides a small Adam minimizer for the nonlinear least-squares
//! problems in curve fitting. The caller supplies the objective and its
//! analytic gradient; the optimizer runs a fixed iteration budget with
//! an optional early exit on a vanishing gradient.

use log::trace;

use crate::error::{MathError, MathResult};

/// Configuration for the Adam optimizer.
#[derive(Debug, Clone, Copy)]
pub struct AdamConfig {
    /// Step size.
    pub learning_rate: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Exponential decay rate for the first moment estimate.
    pub beta1: f64,
    /// Exponential decay rate for the second moment estimate.
    pub beta2: f64,
    /// Denominator fuzz to avoid division by zero.
    pub epsilon: f64,
    /// Gradient norm below which the run stops early as converged.
    pub tolerance: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.001,
            max_iterations: 1000,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            tolerance: 1e-12,
        }
    }
}

impl AdamConfig {
    /// Sets the learning rate.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the iteration budget.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameters found.
    pub parameters: Vec<f64>,
    /// Objective value at those parameters.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the gradient norm fell below the tolerance.
    pub converged: bool,
}

/// Minimizes `f` starting from `initial` using Adam.
///
/// Tracks the best finite objective seen and returns those parameters,
/// so a run that wanders into overflow late still reports its best
/// iterate. A non-finite objective at the starting point is returned
/// as-is (`objective_value` NaN/∞) for the caller to reject.
///
/// # Arguments
///
/// * `f` - Objective function to minimize
/// * `grad` - Analytic gradient of `f`
/// * `initial` - Starting parameters
/// * `config` - Learning rate, iteration budget, moment decay rates
pub fn adam<F, G>(
    f: F,
    grad: G,
    initial: &[f64],
    config: &AdamConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    if initial.is_empty() {
        return Err(MathError::invalid_input("optimizer needs at least one parameter"));
    }
    if config.learning_rate <= 0.0 {
        return Err(MathError::invalid_input("learning rate must be positive"));
    }

    let n = initial.len();
    let mut params = initial.to_vec();
    let mut first_moment = vec![0.0; n];
    let mut second_moment = vec![0.0; n];

    let mut best_params = params.clone();
    let mut best_value = f(&params);
    if !best_value.is_finite() {
        return Ok(OptimizationResult {
            parameters: best_params,
            objective_value: best_value,
            iterations: 0,
            converged: false,
        });
    }

    let mut converged = false;
    let mut iterations = 0;

    for t in 1..=config.max_iterations {
        iterations = t;
        let gradient = grad(&params);
        if gradient.iter().any(|g| !g.is_finite()) {
            break;
        }

        let grad_norm: f64 = gradient.iter().map(|g| g * g).sum::<f64>().sqrt();
        if grad_norm < config.tolerance {
            converged = true;
            break;
        }

        let bias1 = 1.0 - config.beta1.powi(t as i32);
        let bias2 = 1.0 - config.beta2.powi(t as i32);

        for i in 0..n {
            first_moment[i] = config.beta1 * first_moment[i] + (1.0 - config.beta1) * gradient[i];
            second_moment[i] =
                config.beta2 * second_moment[i] + (1.0 - config.beta2) * gradient[i] * gradient[i];

            let m_hat = first_moment[i] / bias1;
            let v_hat = second_moment[i] / bias2;
            params[i] -= config.learning_rate * m_hat / (v_hat.sqrt() + config.epsilon);
        }

        let value = f(&params);
        if !value.is_finite() {
            break;
        }
        if value < best_value {
            best_value = value;
            best_params.clone_from(&params);
        }
    }

    trace!(
        "adam finished after {iterations} iterations, objective {best_value:.6e}, converged={converged}"
    );

    Ok(OptimizationResult {
        parameters: best_params,
        objective_value: best_value,
        iterations,
        converged,
    })
}
