//! Candidate planning and AIC-based model selection.
//!
//! Builds the list of families to try, fits them in parallel, and keeps
//! the candidate with the lowest AIC. Ties resolve to the earlier entry
//! in the plan, which orders simpler models first.

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FitError, FitResult};
use crate::fit::{fit_kind, FitAttempt, FitCandidate, Infeasible};
use crate::models::{ModelKind, ModelSpec};

/// Highest polynomial degree the automatic scan will try.
const MAX_AUTO_DEGREE: usize = 10;

/// Options controlling which candidate models a fit considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FitOptions {
    /// Which families to try.
    #[serde(default)]
    pub model: ModelSpec,
    /// Fixes the polynomial degree instead of scanning degrees.
    #[serde(default)]
    pub degree: Option<usize>,
}

impl FitOptions {
    /// Options that scan every family.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the fit to a single family.
    #[must_use]
    pub fn with_model(mut self, model: ModelSpec) -> Self {
        self.model = model;
        self
    }

    /// Fixes the polynomial degree.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
        self
    }
}

/// Outcome of fitting every candidate family.
#[derive(Debug, Clone)]
pub struct FitSelection {
    /// The candidate with the lowest AIC.
    pub best: FitCandidate,
    /// All feasible candidates, in plan order (`best` is among them).
    pub candidates: Vec<FitCandidate>,
    /// Families that could not be fitted, with reasons.
    pub skipped: Vec<Infeasible>,
}

/// Lists the families to try for the given options and sample size.
///
/// Polynomial degrees scan 1 up to `min(10, n - 2)` unless a degree is
/// fixed. A fixed degree narrows the polynomial entry only; under
/// [`ModelSpec::Auto`] the other families are still tried.
fn candidate_plan(options: &FitOptions, n: usize) -> Vec<ModelKind> {
    let wants = |family: ModelSpec| options.model == ModelSpec::Auto || options.model == family;
    let mut plan = Vec::new();

    if wants(ModelSpec::Polynomial) {
        match options.degree {
            Some(degree) => plan.push(ModelKind::Polynomial(degree)),
            None => {
                let max_degree = MAX_AUTO_DEGREE.min(n.saturating_sub(2)).max(1);
                plan.extend((1..=max_degree).map(ModelKind::Polynomial));
            }
        }
    }
    if wants(ModelSpec::Exponential) {
        plan.push(ModelKind::Exponential);
    }
    if wants(ModelSpec::Logarithmic) {
        plan.push(ModelKind::Logarithmic);
    }
    if wants(ModelSpec::Power) {
        plan.push(ModelKind::Power);
    }
    if wants(ModelSpec::Sigmoid) {
        plan.push(ModelKind::Sigmoid);
    }
    plan
}

/// Fits every candidate family and selects the lowest AIC.
///
/// Candidates run in parallel; selection is a sequential scan over the
/// results in plan order, so the winner is deterministic for the same
/// data and options.
pub fn fit_and_select(x: &[f64], y: &[f64], options: &FitOptions) -> FitResult<FitSelection> {
    let plan = candidate_plan(options, x.len());

    let attempts: Vec<FitAttempt> = plan.par_iter().map(|kind| fit_kind(kind, x, y)).collect();

    let mut candidates = Vec::new();
    let mut skipped = Vec::new();
    for attempt in attempts {
        match attempt {
            Ok(candidate) => candidates.push(candidate),
            Err(infeasible) => {
                debug!("skipped {infeasible}");
                skipped.push(infeasible);
            }
        }
    }

    if candidates.is_empty() {
        return Err(FitError::NoFeasibleModel);
    }

    let mut best_idx = 0;
    for (i, candidate) in candidates.iter().enumerate().skip(1) {
        if candidate.quality.aic < candidates[best_idx].quality.aic {
            best_idx = i;
        }
    }
    let best = candidates[best_idx].clone();
    debug!(
        "selected {} (AIC {:.2}) from {} feasible candidates",
        best.model.kind,
        best.quality.aic,
        candidates.len()
    );

    Ok(FitSelection {
        best,
        candidates,
        skipped,
    })
}
