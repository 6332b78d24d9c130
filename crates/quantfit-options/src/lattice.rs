//! Cox-Ross-Rubinstein binomial lattice.
//!
//! Discrete dividends are handled with the escrow model: their present
//! value is stripped from the spot before the tree is built, and added
//! back (discounted to the node date) whenever an exercise decision
//! compares intrinsic value against continuation.
//!
//! The backward sweep captures the node values at steps one and two so
//! the caller can form delta, gamma, and theta directly from the tree.

use crate::error::{PricingError, PricingResult};
use crate::types::{Dividend, ExerciseStyle, OptionSpec};

/// Node values near the root, kept for lattice Greeks.
///
/// `layer1` and `layer2` are present once the tree has at least two and
/// three steps respectively; node 0 is the top of the tree.
#[derive(Debug, Clone)]
pub(crate) struct TreeSolution {
    /// Value at the root.
    pub price: f64,
    /// Values at step 1, if the tree reached it.
    pub layer1: Option<[f64; 2]>,
    /// Values at step 2, if the tree reached it.
    pub layer2: Option<[f64; 3]>,
    /// Escrow-adjusted spot at the root.
    pub s_tree: f64,
    /// Step length in years.
    pub dt: f64,
    /// Up factor.
    pub u: f64,
    /// Down factor.
    pub d: f64,
}

/// Present value of the dividends that fall inside the option's life.
pub(crate) fn dividend_pv(dividends: &[Dividend], rate: f64, maturity: f64) -> f64 {
    dividends
        .iter()
        .filter(|div| div.time > 0.0 && div.time <= maturity)
        .map(|div| div.amount * (-rate * div.time).exp())
        .sum()
}

/// Present value, as of time `t`, of the dividends still to be paid.
pub(crate) fn dividend_pv_remaining(
    dividends: &[Dividend],
    rate: f64,
    maturity: f64,
    t: f64,
) -> f64 {
    dividends
        .iter()
        .filter(|div| div.time > t && div.time <= maturity)
        .map(|div| div.amount * (-rate * (div.time - t)).exp())
        .sum()
}

/// Spot with the dividend escrow stripped out.
pub(crate) fn escrowed_spot(spec: &OptionSpec) -> PricingResult<f64> {
    let s_tree = spec.spot - dividend_pv(&spec.dividends, spec.rate, spec.maturity);
    if s_tree <= 0.0 {
        return Err(PricingError::DividendsExceedSpot);
    }
    Ok(s_tree)
}

/// Prices the option on a CRR tree.
///
/// Assumes `maturity > 0` and `volatility > 0`; the valuation layer
/// routes expired and zero-volatility contracts elsewhere.
pub(crate) fn solve(spec: &OptionSpec) -> PricingResult<TreeSolution> {
    let s_tree = escrowed_spot(spec)?;

    let n = spec.steps;
    let dt = spec.maturity / n as f64;
    let u = (spec.volatility * dt.sqrt()).exp();
    let d = 1.0 / u;
    let growth = ((spec.rate - spec.dividend_yield) * dt).exp();
    let p = (growth - d) / (u - d);
    let discount = (-spec.rate * dt).exp();

    // Terminal payoffs; node 0 is the top of the tree. No dividends
    // remain at maturity, so the tree spot is the full spot.
    let mut values: Vec<f64> = (0..=n)
        .map(|i| {
            let spot = s_tree * u.powi((n - i) as i32) * d.powi(i as i32);
            spec.payoff(spot)
        })
        .collect();

    let mut layer1 = None;
    let mut layer2 = None;

    for j in (0..n).rev() {
        for i in 0..=j {
            values[i] = discount * (p * values[i] + (1.0 - p) * values[i + 1]);
        }

        if spec.style == ExerciseStyle::American {
            let t = j as f64 * dt;
            let escrow = dividend_pv_remaining(&spec.dividends, spec.rate, spec.maturity, t);
            for i in 0..=j {
                let spot = s_tree * u.powi((j - i) as i32) * d.powi(i as i32) + escrow;
                let intrinsic = spec.payoff(spot);
                if intrinsic > values[i] {
                    values[i] = intrinsic;
                }
            }
        }

        if j == 2 {
            layer2 = Some([values[0], values[1], values[2]]);
        } else if j == 1 {
            layer1 = Some([values[0], values[1]]);
        }
    }

    Ok(TreeSolution {
        price: values[0],
        layer1,
        layer2,
        s_tree,
        dt,
        u,
        d,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionKind;
    use approx::assert_relative_eq;

    fn call(spot: f64, strike: f64) -> OptionSpec {
        OptionSpec::new(
            OptionKind::Call,
            ExerciseStyle::European,
            spot,
            strike,
            1.0,
            0.05,
            0.2,
        )
    }

    #[test]
    fn test_dividend_pv_filters_invalid_times() {
        let dividends = [
            Dividend::new(2.0, 0.5),
            Dividend::new(3.0, -0.1), // before valuation: ignored
            Dividend::new(4.0, 1.5),  // after maturity: ignored
        ];

        let pv = dividend_pv(&dividends, 0.05, 1.0);
        assert_relative_eq!(pv, 2.0 * (-0.05f64 * 0.5).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_dividend_pv_remaining() {
        let dividends = [Dividend::new(2.0, 0.25), Dividend::new(2.0, 0.75)];

        // As of t = 0.5 only the later dividend remains.
        let pv = dividend_pv_remaining(&dividends, 0.05, 1.0, 0.5);
        assert_relative_eq!(pv, 2.0 * (-0.05f64 * 0.25).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_escrow_rejects_oversized_dividends() {
        let spec = call(10.0, 10.0).with_dividends(vec![Dividend::new(20.0, 0.5)]);
        assert_eq!(
            escrowed_spot(&spec).unwrap_err(),
            PricingError::DividendsExceedSpot
        );
    }

    #[test]
    fn test_single_step_tree_by_hand() {
        // One step, sigma = 0.2, T = 1: u = e^0.2, d = e^-0.2.
        let spec = call(100.0, 100.0).with_steps(1);
        let solution = solve(&spec).unwrap();

        let u = 0.2f64.exp();
        let d = (-0.2f64).exp();
        let p = (0.05f64.exp() - d) / (u - d);
        let expected = (-0.05f64).exp() * (p * (100.0 * u - 100.0)).max(0.0);

        assert_relative_eq!(solution.price, expected, epsilon = 1e-12);
        assert!(solution.layer1.is_none());
        assert!(solution.layer2.is_none());
    }

    #[test]
    fn test_put_call_parity_on_tree() {
        // C - P = S - K e^{-rT} holds exactly on a CRR tree without
        // dividends, up to floating point noise.
        let call_spec = call(100.0, 95.0);
        let put_spec = OptionSpec {
            kind: OptionKind::Put,
            ..call_spec.clone()
        };

        let c = solve(&call_spec).unwrap().price;
        let p = solve(&put_spec).unwrap().price;
        let forward = 100.0 - 95.0 * (-0.05f64).exp();

        assert_relative_eq!(c - p, forward, epsilon = 1e-9);
    }

    #[test]
    fn test_layers_captured_with_three_steps() {
        let spec = call(100.0, 100.0).with_steps(3);
        let solution = solve(&spec).unwrap();

        assert!(solution.layer1.is_some());
        assert!(solution.layer2.is_some());

        // Root value must equal the discounted expectation of layer 1.
        let [v10, v11] = solution.layer1.unwrap();
        let u = solution.u;
        let d = solution.d;
        let p = ((0.05 * solution.dt).exp() - d) / (u - d);
        let discounted = (-0.05 * solution.dt).exp() * (p * v10 + (1.0 - p) * v11);
        assert_relative_eq!(solution.price, discounted, epsilon = 1e-12);
    }

    #[test]
    fn test_american_put_worth_more_on_tree() {
        let european = OptionSpec::new(
            OptionKind::Put,
            ExerciseStyle::European,
            90.0,
            100.0,
            1.0,
            0.08,
            0.2,
        );
        let american = OptionSpec {
            style: ExerciseStyle::American,
            ..european.clone()
        };

        let eu = solve(&european).unwrap().price;
        let am = solve(&american).unwrap().price;

        assert!(am > eu);
    }
}
