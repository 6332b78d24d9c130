//! Option valuation: price plus Greeks.
//!
//! Delta, gamma, and theta come straight from the lattice nodes near
//! the root; vega and rho are bump-and-reprice sensitivities quoted per
//! one percentage point. Expired contracts short-circuit to intrinsic
//! value, and zero-volatility contracts use the deterministic-path
//! pricer with finite-difference Greeks.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::deterministic;
use crate::error::{PricingError, PricingResult};
use crate::lattice::{self, dividend_pv_remaining};
use crate::types::OptionSpec;

/// Absolute bump applied to volatility and rate for sensitivities.
const BUMP: f64 = 0.001;

/// Rescales a bump sensitivity to a one-percentage-point move.
const PER_POINT: f64 = 0.01 / BUMP;

/// Steps required before the near-root layers exist.
const MIN_STEPS_FOR_GREEKS: usize = 3;

/// Relative spot bump for finite-difference delta and gamma.
const SPOT_BUMP_RELATIVE: f64 = 1e-4;

/// Floor on the absolute spot bump.
const SPOT_BUMP_MIN: f64 = 1e-4;

/// One calendar day in years.
const ONE_DAY: f64 = 1.0 / 365.0;

/// Price and sensitivities of an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionValuation {
    /// Present value.
    pub price: f64,
    /// Change in price per unit move in the spot.
    pub delta: f64,
    /// Change in delta per unit move in the spot.
    pub gamma: f64,
    /// Price decay per calendar day.
    pub theta: f64,
    /// Price change per one-point move in volatility.
    pub vega: f64,
    /// Price change per one-point move in the rate.
    pub rho: f64,
    /// Pricing model used.
    pub model: String,
    /// Lattice steps used.
    pub steps: usize,
}

/// Prices the option without Greeks.
///
/// Expired contracts return intrinsic value; zero volatility routes to
/// the deterministic-path pricer; everything else runs the CRR tree.
pub fn price(spec: &OptionSpec) -> PricingResult<f64> {
    spec.validate()?;
    if spec.maturity <= 0.0 {
        return Ok(spec.payoff(spec.spot));
    }
    if spec.volatility == 0.0 {
        return deterministic::price(spec);
    }
    Ok(lattice::solve(spec)?.price)
}

/// Prices the option and computes its Greeks.
///
/// Lattice Greeks need at least three steps so the tree exposes the
/// step-one and step-two node values.
pub fn value(spec: &OptionSpec) -> PricingResult<OptionValuation> {
    spec.validate()?;

    if spec.maturity <= 0.0 {
        // Nothing left to decay or hedge.
        return Ok(OptionValuation {
            price: spec.payoff(spec.spot),
            delta: 0.0,
            gamma: 0.0,
            theta: 0.0,
            vega: 0.0,
            rho: 0.0,
            model: "Binomial CRR".to_string(),
            steps: spec.steps,
        });
    }

    if spec.volatility == 0.0 {
        return value_deterministic(spec);
    }

    let solution = lattice::solve(spec)?;
    let (Some(layer1), Some(layer2)) = (solution.layer1, solution.layer2) else {
        return Err(PricingError::TooFewStepsForGreeks {
            required: MIN_STEPS_FOR_GREEKS,
            actual: spec.steps,
        });
    };

    let s_tree = solution.s_tree;
    let dt = solution.dt;
    let u = solution.u;
    let d = solution.d;

    // Spots at the captured layers carry the escrow value back in.
    let escrow1 = dividend_pv_remaining(&spec.dividends, spec.rate, spec.maturity, dt);
    let s_up = s_tree * u + escrow1;
    let s_down = s_tree * d + escrow1;
    let delta = (layer1[0] - layer1[1]) / (s_up - s_down);

    let escrow2 = dividend_pv_remaining(&spec.dividends, spec.rate, spec.maturity, 2.0 * dt);
    let s_uu = s_tree * u * u + escrow2;
    let s_ud = s_tree + escrow2;
    let s_dd = s_tree * d * d + escrow2;
    let delta_up = (layer2[0] - layer2[1]) / (s_uu - s_ud);
    let delta_down = (layer2[1] - layer2[2]) / (s_ud - s_dd);
    let half_width = 0.5 * (s_uu - s_dd);
    let gamma = (delta_up - delta_down) / half_width;

    // The middle node two steps out sits at the root spot.
    let theta = (layer2[1] - solution.price) / (2.0 * dt) / 365.0;

    let vega = (price(&spec.clone().with_volatility(spec.volatility + BUMP))? - solution.price)
        * PER_POINT;
    let rho = (price(&spec.clone().with_rate(spec.rate + BUMP))? - solution.price) * PER_POINT;

    debug!(
        "{:?} {:?} priced at {:.6} (delta {:.4}, {} steps)",
        spec.style, spec.kind, solution.price, delta, spec.steps
    );

    Ok(OptionValuation {
        price: solution.price,
        delta,
        gamma,
        theta,
        vega,
        rho,
        model: "Binomial CRR".to_string(),
        steps: spec.steps,
    })
}

/// Volatility used when bumping a zero-volatility contract for vega.
///
/// The bumped re-pricing runs through the CRR tree, whose risk-neutral
/// probability only stays inside (0, 1) while sigma exceeds
/// `|r - q| * sqrt(dt)`. A plain [`BUMP`] can land below that boundary
/// and turn the induction into a diverging signed sum, so the bump is
/// widened past it; callers must scale the price difference by the bump
/// actually used.
fn stable_sigma_bump(spec: &OptionSpec) -> f64 {
    let dt = spec.maturity / spec.steps as f64;
    BUMP.max(2.0 * (spec.rate - spec.dividend_yield).abs() * dt.sqrt())
}

/// Finite-difference Greeks for the zero-volatility pricer.
fn value_deterministic(spec: &OptionSpec) -> PricingResult<OptionValuation> {
    let base = deterministic::price(spec)?;

    let h = (spec.spot * SPOT_BUMP_RELATIVE).max(SPOT_BUMP_MIN);
    let up = price(&spec.clone().with_spot(spec.spot + h))?;
    let (delta, gamma) = if spec.spot > h {
        let down = price(&spec.clone().with_spot(spec.spot - h))?;
        ((up - down) / (2.0 * h), (up - 2.0 * base + down) / (h * h))
    } else {
        ((up - base) / h, 0.0)
    };

    let step_back = ONE_DAY.min(spec.maturity / 2.0);
    let decayed = price(&spec.clone().with_maturity(spec.maturity - step_back))?;
    let theta = (decayed - base) / step_back / 365.0;

    let sigma_bump = stable_sigma_bump(spec);
    let vega =
        (price(&spec.clone().with_volatility(sigma_bump))? - base) * (0.01 / sigma_bump);
    let rho = (price(&spec.clone().with_rate(spec.rate + BUMP))? - base) * PER_POINT;

    Ok(OptionValuation {
        price: base,
        delta,
        gamma,
        theta,
        vega,
        rho,
        model: "Deterministic forward".to_string(),
        steps: spec.steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dividend, ExerciseStyle, OptionKind};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn atm_call() -> OptionSpec {
        OptionSpec::new(
            OptionKind::Call,
            ExerciseStyle::European,
            100.0,
            100.0,
            1.0,
            0.05,
            0.2,
        )
    }

    #[test]
    fn test_atm_call_price_and_delta() {
        let valuation = value(&atm_call()).unwrap();

        // Black-Scholes gives 10.45; a 100-step CRR tree lands close.
        assert!(valuation.price > 10.30 && valuation.price < 10.60);
        assert!(valuation.delta > 0.4 && valuation.delta < 0.7);
        assert!(valuation.gamma > 0.0);
        assert!(valuation.theta < 0.0);
        assert!(valuation.vega > 0.0);
        assert!(valuation.rho > 0.0);
        assert_eq!(valuation.model, "Binomial CRR");
        assert_eq!(valuation.steps, 100);
    }

    #[test]
    fn test_expired_option_is_intrinsic() {
        let spec = atm_call().with_spot(110.0).with_maturity(0.0);
        let valuation = value(&spec).unwrap();

        assert_relative_eq!(valuation.price, 10.0);
        assert_eq!(valuation.delta, 0.0);
        assert_eq!(valuation.vega, 0.0);
        assert_eq!(valuation.rho, 0.0);
    }

    #[test]
    fn test_put_rho_is_negative() {
        let spec = OptionSpec {
            kind: OptionKind::Put,
            ..atm_call()
        };
        let valuation = value(&spec).unwrap();

        assert!(valuation.rho < 0.0);
        assert!(valuation.delta < 0.0);
    }

    #[test]
    fn test_too_few_steps_for_greeks() {
        let spec = atm_call().with_steps(2);

        let err = value(&spec).unwrap_err();
        assert_eq!(
            err,
            PricingError::TooFewStepsForGreeks {
                required: 3,
                actual: 2
            }
        );
        // Pricing alone still works on a two-step tree.
        assert!(price(&spec).is_ok());
    }

    #[test]
    fn test_dividend_lowers_call_price() {
        let plain = atm_call();
        let with_div = atm_call().with_dividends(vec![Dividend::new(3.0, 0.5)]);

        let p_plain = price(&plain).unwrap();
        let p_div = price(&with_div).unwrap();

        assert!(p_div < p_plain);
    }

    #[test]
    fn test_american_call_no_dividends_matches_european() {
        let european = atm_call();
        let american = OptionSpec {
            style: ExerciseStyle::American,
            ..atm_call()
        };

        let eu = price(&european).unwrap();
        let am = price(&american).unwrap();

        assert_relative_eq!(am, eu, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_volatility_valuation() {
        let spec = OptionSpec::new(
            OptionKind::Call,
            ExerciseStyle::European,
            100.0,
            90.0,
            1.0,
            0.05,
            0.0,
        );

        let valuation = value(&spec).unwrap();

        assert_relative_eq!(
            valuation.price,
            100.0 - 90.0 * (-0.05f64).exp(),
            epsilon = 1e-9
        );
        // Forward is in the money along the whole bump range, so the
        // payoff is linear in spot.
        assert_relative_eq!(valuation.delta, 1.0, epsilon = 1e-6);
        assert_relative_eq!(valuation.gamma, 0.0, epsilon = 1e-4);
        assert_eq!(valuation.model, "Deterministic forward");
    }

    #[test]
    fn test_zero_volatility_atm_vega_is_bounded() {
        // At r = 0.05 with 100 steps the plain 0.001 bump would put the
        // bumped tree's risk-neutral probability near 3 and the vega
        // estimate off by dozens of orders of magnitude.
        let spec = atm_call().with_volatility(0.0);

        let valuation = value(&spec).unwrap();

        assert_relative_eq!(
            valuation.price,
            100.0 - 100.0 * (-0.05f64).exp(),
            epsilon = 1e-9
        );
        assert!(valuation.vega.is_finite());
        // The forward sits 5% in the money, so a 1% vol adds almost no
        // optionality.
        assert!(valuation.vega.abs() < 0.1, "vega = {}", valuation.vega);
    }

    #[test]
    fn test_valuation_serializes_with_expected_keys() {
        let valuation = value(&atm_call()).unwrap();
        let json = serde_json::to_value(&valuation).unwrap();

        for key in ["price", "delta", "gamma", "theta", "vega", "rho", "model", "steps"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(json["model"], "Binomial CRR");
    }

    proptest! {
        #[test]
        fn prop_american_at_least_european(
            spot in 50.0f64..150.0,
            strike in 50.0f64..150.0,
            maturity in 0.1f64..2.0,
            rate in 0.0f64..0.08,
            volatility in 0.1f64..0.5,
            is_call in any::<bool>(),
        ) {
            let kind = if is_call { OptionKind::Call } else { OptionKind::Put };
            let european = OptionSpec::new(
                kind, ExerciseStyle::European, spot, strike, maturity, rate, volatility,
            )
            .with_steps(25);
            let american = OptionSpec {
                style: ExerciseStyle::American,
                ..european.clone()
            };

            let eu = price(&european).unwrap();
            let am = price(&american).unwrap();
            prop_assert!(am >= eu - 1e-9);
        }
    }
}
