//! Error types for option pricing.

use thiserror::Error;

/// Errors that can occur while pricing an option.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A contract parameter that must be non-negative was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeParameter {
        /// Parameter name, e.g. `spot price`.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The lattice needs at least one step.
    #[error("At least one tree step is required")]
    NoSteps,

    /// Escrowing the dividends leaves no stock value to diffuse.
    #[error("Present value of dividends exceeds spot price")]
    DividendsExceedSpot,

    /// Lattice Greeks need enough steps to observe the near-root nodes.
    #[error("At least {required} tree steps are required for lattice Greeks, got {actual}")]
    TooFewStepsForGreeks {
        /// Minimum number of steps.
        required: usize,
        /// Steps actually configured.
        actual: usize,
    },
}

impl PricingError {
    /// Creates a negative-parameter error.
    #[must_use]
    pub fn negative(name: &'static str, value: f64) -> Self {
        Self::NegativeParameter { name, value }
    }
}

/// Result type alias for pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            PricingError::negative("spot price", -1.0).to_string(),
            "spot price must be non-negative, got -1"
        );
        assert_eq!(
            PricingError::DividendsExceedSpot.to_string(),
            "Present value of dividends exceeds spot price"
        );
        assert_eq!(
            PricingError::TooFewStepsForGreeks {
                required: 3,
                actual: 2
            }
            .to_string(),
            "At least 3 tree steps are required for lattice Greeks, got 2"
        );
    }
}
