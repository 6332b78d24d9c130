//! Error types for curve fitting operations.

use quantfit_math::MathError;
use thiserror::Error;

/// Errors that can occur during curve fitting, model storage, and prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// One or both input arrays are empty.
    #[error("Both 'x' and 'y' arrays are required")]
    EmptyInput,

    /// The x and y arrays have different lengths.
    #[error("Input arrays must have same length. Got x={x_len}, y={y_len}")]
    LengthMismatch {
        /// Number of x values supplied.
        x_len: usize,
        /// Number of y values supplied.
        y_len: usize,
    },

    /// Fewer points than the minimum the fitters can work with.
    #[error("At least {required} data points are required for curve fitting")]
    TooFewPoints {
        /// Minimum number of points required.
        required: usize,
        /// Number of points actually supplied.
        actual: usize,
    },

    /// Dropping NaN/infinite pairs left too few points to fit.
    #[error("Too many invalid points (NaN/Inf)")]
    TooManyInvalid,

    /// Every candidate model was infeasible for the data.
    #[error("Could not fit any model to the data")]
    NoFeasibleModel,

    /// Lookup of a stored model failed.
    #[error("Model '{id}' not found. It may have expired or never existed.")]
    ModelNotFound {
        /// The identifier that was requested.
        id: String,
    },

    /// Evaluating a stored model over the requested points failed.
    #[error("Prediction failed: {reason}")]
    PredictionFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// A numerical routine from the math layer failed.
    #[error("Numerical error: {0}")]
    Numerical(#[from] MathError),
}

impl FitError {
    /// Creates a prediction failure with the given reason.
    #[must_use]
    pub fn prediction_failed(reason: impl Into<String>) -> Self {
        Self::PredictionFailed {
            reason: reason.into(),
        }
    }

    /// Creates a model-not-found error for the given identifier.
    #[must_use]
    pub fn model_not_found(id: impl Into<String>) -> Self {
        Self::ModelNotFound { id: id.into() }
    }
}

/// Result type alias for curve fitting operations.
pub type FitResult<T> = Result<T, FitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = FitError::LengthMismatch { x_len: 4, y_len: 3 };
        assert_eq!(
            err.to_string(),
            "Input arrays must have same length. Got x=4, y=3"
        );

        let err = FitError::model_not_found("fit_deadbeef");
        assert_eq!(
            err.to_string(),
            "Model 'fit_deadbeef' not found. It may have expired or never existed."
        );

        let err = FitError::TooFewPoints {
            required: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "At least 3 data points are required for curve fitting"
        );
    }

    #[test]
    fn math_errors_convert() {
        let math = MathError::invalid_input("bad");
        let fit: FitError = math.into();
        assert!(matches!(fit, FitError::Numerical(_)));
    }
}
