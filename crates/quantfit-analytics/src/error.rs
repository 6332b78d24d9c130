//! Error types for fixed income analytics and indicators.

use quantfit_math::MathError;
use thiserror::Error;

/// Errors from bond pricing, discounting, rate conversion, and
/// indicator calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A parameter that must be non-negative was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeParameter {
        /// Parameter name, e.g. `face value`.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A parameter that must be strictly positive was not.
    #[error("{name} must be positive, got {value}")]
    NonPositiveParameter {
        /// Parameter name, e.g. `years to maturity`.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Yields at or below -100% are meaningless.
    #[error("Yield to maturity must be greater than -1.0 (-100%)")]
    YieldTooLow,

    /// The bond matures before a single coupon period completes.
    #[error("Bond term is too short for a single coupon period")]
    NoCouponPeriods,

    /// Present value needs at least one cash flow.
    #[error("At least one cash flow is required")]
    EmptyCashFlows,

    /// Per-flow rates must line up with the cash flows.
    #[error("Number of rates must match number of cash flows. Got {rates} rates and {flows} cash flows")]
    RateCountMismatch {
        /// Rates supplied.
        rates: usize,
        /// Cash flows supplied.
        flows: usize,
    },

    /// Per-flow times must line up with the cash flows.
    #[error("Number of times must match number of cash flows. Got {times} times and {flows} cash flows")]
    TimeCountMismatch {
        /// Times supplied.
        times: usize,
        /// Cash flows supplied.
        flows: usize,
    },

    /// Discrete discounting breaks down at or below -100%.
    #[error("Rate must be greater than -1.0 (-100%) for discrete compounding")]
    RateTooLow,

    /// A compounding frequency name failed to parse.
    #[error("Unknown compounding frequency '{0}'")]
    UnknownFrequency(String),

    /// An indicator window was zero.
    #[error("Window must be at least 1")]
    ZeroWindow,

    /// A series is shorter than the indicator window needs.
    #[error("At least {required} data points are required, got {actual}")]
    InsufficientData {
        /// Minimum number of points.
        required: usize,
        /// Points actually supplied.
        actual: usize,
    },

    /// A price series was empty.
    #[error("Price series is empty")]
    EmptySeries,

    /// PE is undefined at zero earnings.
    #[error("Earnings cannot be zero for PE ratio")]
    ZeroEarnings,

    /// A numerical routine from the math layer failed.
    #[error("Numerical error: {0}")]
    Numerical(#[from] MathError),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            AnalyticsError::YieldTooLow.to_string(),
            "Yield to maturity must be greater than -1.0 (-100%)"
        );
        assert_eq!(
            AnalyticsError::RateCountMismatch { rates: 3, flows: 2 }.to_string(),
            "Number of rates must match number of cash flows. Got 3 rates and 2 cash flows"
        );
        assert_eq!(
            AnalyticsError::InsufficientData {
                required: 14,
                actual: 5
            }
            .to_string(),
            "At least 14 data points are required, got 5"
        );
    }
}
