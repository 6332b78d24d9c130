//! Zero-volatility pricing.
//!
//! With no diffusion the underlying follows its forward path, so a CRR
//! tree degenerates (`u = d = 1` leaves the martingale probability
//! undefined). Instead the option is priced directly on the
//! deterministic path: Europeans discount the terminal payoff, and
//! Americans pick the best exercise date along the path.

use crate::error::PricingResult;
use crate::lattice::{dividend_pv_remaining, escrowed_spot};
use crate::types::{ExerciseStyle, OptionSpec};

/// Underlying level at time `t` along the deterministic path.
///
/// The escrowed spot grows at the carry rate; dividends not yet paid
/// are added back at their present value as of `t`.
fn path_spot(spec: &OptionSpec, s_tree: f64, t: f64) -> f64 {
    let grown = s_tree * ((spec.rate - spec.dividend_yield) * t).exp();
    grown + dividend_pv_remaining(&spec.dividends, spec.rate, spec.maturity, t)
}

/// Prices a zero-volatility option.
///
/// Assumes `maturity > 0`; expired contracts are handled by the caller.
pub(crate) fn price(spec: &OptionSpec) -> PricingResult<f64> {
    let s_tree = escrowed_spot(spec)?;

    match spec.style {
        ExerciseStyle::European => {
            let terminal = path_spot(spec, s_tree, spec.maturity);
            Ok((-spec.rate * spec.maturity).exp() * spec.payoff(terminal))
        }
        ExerciseStyle::American => {
            let n = spec.steps.max(1);
            let dt = spec.maturity / n as f64;
            let step_discount = (-spec.rate * dt).exp();

            // Backward walk along the single path: exercise whenever
            // intrinsic beats the discounted continuation.
            let mut value = spec.payoff(path_spot(spec, s_tree, spec.maturity));
            for j in (0..n).rev() {
                let t = j as f64 * dt;
                let intrinsic = spec.payoff(path_spot(spec, s_tree, t));
                value = intrinsic.max(step_discount * value);
            }
            Ok(value)
        }
    }
}
