//! # Quantfit
//!
//! Curve fitting, model selection, and pricing analytics.
//!
//! This crate is a facade over the Quantfit workspace:
//!
//! - **[`math`]**: polynomial least squares, descriptive statistics,
//!   fit quality metrics, and Adam optimization
//! - **[`curves`]**: robust curve fitting with automatic model
//!   selection and a store for later prediction
//! - **[`options`]**: binomial option pricing with discrete dividends
//!   and lattice Greeks
//! - **[`analytics`]**: bond analytics, cash flow discounting, rate
//!   conversion, and technical indicators
//!
//! ## Example
//!
//! ```
//! use quantfit::curves::{FitEngine, FitOptions};
//!
//! let engine = FitEngine::new();
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.9, 5.1, 7.0, 9.1, 10.9];
//!
//! let report = engine.fit(&x, &y, &FitOptions::default())?;
//! assert!(report.quality.r_squared > 0.99);
//!
//! let predictions = engine.predict(&report.model_id, &[6.0])?;
//! assert_eq!(predictions.len(), 1);
//! # Ok::<(), quantfit::curves::FitError>(())
//! ```
//!
//! ## Design Philosophy
//!
//! - **One import**: applications depend on `quantfit` and reach every
//!   subcrate through a module alias or the prelude
//! - **Nothing added**: the facade re-exports; behavior lives in the
//!   member crates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

pub use quantfit_analytics as analytics;
pub use quantfit_curves as curves;
pub use quantfit_math as math;
pub use quantfit_options as options;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use quantfit_analytics::prelude::*;
    pub use quantfit_curves::prelude::*;
    pub use quantfit_math::prelude::*;
    pub use quantfit_options::prelude::*;
}

pub use quantfit_analytics::{BondSpec, BondValuation, Compounding, PresentValue};
pub use quantfit_curves::{FitEngine, FitOptions, FitReport, ModelId, ModelSpec};
pub use quantfit_options::types::{Dividend, ExerciseStyle, OptionKind, OptionSpec};
pub use quantfit_options::valuation::OptionValuation;
