//! Interest rate conversion between compounding frequencies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Compounding frequency of a quoted rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    /// Simple interest, treated as one period per year.
    Simple,
    /// Compounded once per year.
    Annual,
    /// Compounded twice per year.
    SemiAnnual,
    /// Compounded four times per year.
    Quarterly,
    /// Compounded twelve times per year.
    Monthly,
    /// Compounded fifty-two times per year.
    Weekly,
    /// Compounded 365 times per year.
    Daily,
    /// Continuously compounded.
    Continuous,
}

impl Compounding {
    /// Number of compounding periods per year, or `None` for continuous.
    #[must_use]
    pub fn periods_per_year(self) -> Option<f64> {
        match self {
            Self::Simple | Self::Annual => Some(1.0),
            Self::SemiAnnual => Some(2.0),
            Self::Quarterly => Some(4.0),
            Self::Monthly => Some(12.0),
            Self::Weekly => Some(52.0),
            Self::Daily => Some(365.0),
            Self::Continuous => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Annual => "annual",
            Self::SemiAnnual => "semiannual",
            Self::Quarterly => "quarterly",
            Self::Monthly => "monthly",
            Self::Weekly => "weekly",
            Self::Daily => "daily",
            Self::Continuous => "continuous",
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Compounding {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "annual" => Ok(Self::Annual),
            "semiannual" => Ok(Self::SemiAnnual),
            "quarterly" => Ok(Self::Quarterly),
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "daily" => Ok(Self::Daily),
            "continuous" => Ok(Self::Continuous),
            other => Err(AnalyticsError::UnknownFrequency(other.to_string())),
        }
    }
}

/// Result of converting a rate between compounding frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateConversion {
    /// The rate re-expressed at the target frequency.
    pub converted_rate: f64,
    /// Effective annual rate implied by the source quote.
    pub effective_annual_rate: f64,
    /// Frequency the input rate was quoted at.
    pub from_frequency: Compounding,
    /// Frequency the converted rate is quoted at.
    pub to_frequency: Compounding,
}

/// Re-expresses a nominal rate at a different compounding frequency.
///
/// The conversion goes through the effective annual rate, so chaining
/// conversions is exact up to floating point rounding.
pub fn convert_rate(
    rate: f64,
    from: Compounding,
    to: Compounding,
) -> AnalyticsResult<RateConversion> {
    if from != Compounding::Continuous && rate <= -1.0 {
        return Err(AnalyticsError::RateTooLow);
    }

    let effective_annual_rate = match from.periods_per_year() {
        Some(m) => (1.0 + rate / m).powf(m) - 1.0,
        None => rate.exp() - 1.0,
    };

    let converted_rate = match to.periods_per_year() {
        Some(m) => m * ((1.0 + effective_annual_rate).powf(1.0 / m) - 1.0),
        None => (1.0 + effective_annual_rate).ln(),
    };

    Ok(RateConversion {
        converted_rate,
        effective_annual_rate,
        from_frequency: from,
        to_frequency: to,
    })
}
