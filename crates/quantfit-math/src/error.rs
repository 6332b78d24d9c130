//! Error types for numerical operations.

use thiserror::Error;

/// A specialized Result type for numerical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during numerical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Input arrays have different lengths.
    #[error("Input arrays must have same length. Got x={left}, y={right}")]
    LengthMismatch {
        /// Length of the first array.
        left: usize,
        /// Length of the second array.
        right: usize,
    },

    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Least-squares system could not be solved.
    #[error("Singular system: least-squares solve failed for degree {degree}")]
    SingularSystem {
        /// Polynomial degree of the attempted fit.
        degree: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates a length mismatch error.
    #[must_use]
    pub fn length_mismatch(left: usize, right: usize) -> Self {
        Self::LengthMismatch { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::length_mismatch(5, 3);
        assert!(err.to_string().contains("x=5"));
        assert!(err.to_string().contains("y=3"));

        let err = MathError::insufficient_data(3, 2);
        assert!(err.to_string().contains("at least 3"));
    }
}
