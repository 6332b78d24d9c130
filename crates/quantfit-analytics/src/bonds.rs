//! Fixed-coupon bond pricing and risk measures.
//!
//! Prices by discounting each coupon period at the periodic yield and
//! reports Macaulay duration (in years), modified duration, and
//! convexity alongside the price.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Face value used when none is given.
pub const DEFAULT_FACE_VALUE: f64 = 100.0;

/// Coupon payments per year used when none is given.
pub const DEFAULT_FREQUENCY: u32 = 2;

/// A fixed-coupon bullet bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondSpec {
    /// Principal repaid at maturity.
    pub face_value: f64,
    /// Annual coupon rate as a decimal.
    pub coupon_rate: f64,
    /// Annual yield to maturity as a decimal.
    pub yield_to_maturity: f64,
    /// Years until maturity.
    pub years_to_maturity: f64,
    /// Coupon payments per year.
    pub frequency: u32,
}

impl BondSpec {
    /// A bond with the default face value and semiannual coupons.
    #[must_use]
    pub fn new(coupon_rate: f64, yield_to_maturity: f64, years_to_maturity: f64) -> Self {
        Self {
            face_value: DEFAULT_FACE_VALUE,
            coupon_rate,
            yield_to_maturity,
            years_to_maturity,
            frequency: DEFAULT_FREQUENCY,
        }
    }

    /// Sets the face value.
    #[must_use]
    pub fn with_face_value(mut self, face_value: f64) -> Self {
        self.face_value = face_value;
        self
    }

    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency;
        self
    }

    fn validate(&self) -> AnalyticsResult<()> {
        if self.face_value < 0.0 {
            return Err(AnalyticsError::NegativeParameter {
                name: "face value",
                value: self.face_value,
            });
        }
        if self.frequency == 0 {
            return Err(AnalyticsError::NonPositiveParameter {
                name: "payment frequency",
                value: 0.0,
            });
        }
        if self.years_to_maturity <= 0.0 {
            return Err(AnalyticsError::NonPositiveParameter {
                name: "years to maturity",
                value: self.years_to_maturity,
            });
        }
        if self.yield_to_maturity <= -1.0 {
            return Err(AnalyticsError::YieldTooLow);
        }
        Ok(())
    }
}

/// Price and risk measures of a bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondValuation {
    /// Present value of all cash flows.
    pub price: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Convexity.
    pub convexity: f64,
    /// Face value echoed from the input.
    pub face_value: f64,
    /// Coupon rate echoed from the input.
    pub coupon_rate: f64,
    /// Yield echoed from the input.
    pub yield_to_maturity: f64,
}

/// Prices the bond and computes duration and convexity.
///
/// The number of coupon periods is `floor(years * frequency)`; a term
/// shorter than one period is rejected.
pub fn bond_price(spec: &BondSpec) -> AnalyticsResult<BondValuation> {
    spec.validate()?;

    let frequency = f64::from(spec.frequency);
    let n_periods = (spec.years_to_maturity * frequency).floor() as usize;
    if n_periods == 0 {
        return Err(AnalyticsError::NoCouponPeriods);
    }

    let period_yield = spec.yield_to_maturity / frequency;
    let coupon = spec.coupon_rate * spec.face_value / frequency;

    let mut price = 0.0;
    let mut weighted_time = 0.0;
    let mut convexity_sum = 0.0;
    for t in 1..=n_periods {
        let tf = t as f64;
        let mut cash = coupon;
        if t == n_periods {
            cash += spec.face_value;
        }
        let pv = cash * (1.0 + period_yield).powi(-(t as i32));
        price += pv;
        weighted_time += tf * pv;
        convexity_sum += tf * (tf + 1.0) * pv;
    }

    let macaulay_duration = weighted_time / price / frequency;
    let modified_duration = macaulay_duration / (1.0 + period_yield);
    let convexity =
        convexity_sum / (price * (1.0 + period_yield).powi(2)) / frequency.powi(2);

    debug!(
        "bond priced at {price:.6} over {n_periods} periods (macaulay {macaulay_duration:.4}y)"
    );

    Ok(BondValuation {
        price,
        macaulay_duration,
        modified_duration,
        convexity,
        face_value: spec.face_value,
        coupon_rate: spec.coupon_rate,
        yield_to_maturity: spec.yield_to_maturity,
    })
}
