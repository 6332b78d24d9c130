//! Option contract types.

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 100;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Exercise value at the given spot.
    #[must_use]
    pub fn payoff(&self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

/// When the option can be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStyle {
    /// Exercise only at maturity.
    European,
    /// Exercise at any lattice date.
    American,
}

/// A discrete cash dividend at a point in time.
///
/// Dividends with `time <= 0` or `time` past the option maturity are
/// ignored by the pricer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dividend {
    /// Cash amount per share.
    pub amount: f64,
    /// Payment time in years from valuation.
    pub time: f64,
}

impl Dividend {
    /// Creates a dividend of `amount` paid at `time` years.
    #[must_use]
    pub fn new(amount: f64, time: f64) -> Self {
        Self { amount, time }
    }
}

/// Full description of an option to price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Call or put.
    pub kind: OptionKind,
    /// European or American exercise.
    pub style: ExerciseStyle,
    /// Current underlying price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Annualized volatility.
    pub volatility: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Discrete cash dividends, escrowed out of the spot.
    pub dividends: Vec<Dividend>,
    /// Number of lattice steps.
    pub steps: usize,
}

impl OptionSpec {
    /// A contract with no dividends and the default step count.
    #[must_use]
    pub fn new(
        kind: OptionKind,
        style: ExerciseStyle,
        spot: f64,
        strike: f64,
        maturity: f64,
        rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            kind,
            style,
            spot,
            strike,
            maturity,
            rate,
            volatility,
            dividend_yield: 0.0,
            dividends: Vec::new(),
            steps: DEFAULT_STEPS,
        }
    }

    /// Sets a continuous dividend yield.
    #[must_use]
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Sets discrete cash dividends.
    #[must_use]
    pub fn with_dividends(mut self, dividends: Vec<Dividend>) -> Self {
        self.dividends = dividends;
        self
    }

    /// Sets the number of lattice steps.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the spot price.
    #[must_use]
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Sets the strike price.
    #[must_use]
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    /// Sets the time to maturity.
    #[must_use]
    pub fn with_maturity(mut self, maturity: f64) -> Self {
        self.maturity = maturity;
        self
    }

    /// Sets the volatility.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Sets the risk-free rate.
    #[must_use]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Exercise value of this contract at the given spot.
    #[must_use]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.kind.payoff(spot, self.strike)
    }

    /// Checks the contract parameters.
    pub fn validate(&self) -> PricingResult<()> {
        if self.spot < 0.0 {
            return Err(PricingError::negative("spot price", self.spot));
        }
        if self.strike < 0.0 {
            return Err(PricingError::negative("strike price", self.strike));
        }
        if self.volatility < 0.0 {
            return Err(PricingError::negative("volatility", self.volatility));
        }
        if self.steps < 1 {
            return Err(PricingError::NoSteps);
        }
        Ok(())
    }
}
