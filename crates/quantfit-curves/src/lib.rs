//! # Quantfit Curves
//!
//! Curve fitting with automatic model selection.
//!
//! This crate provides:
//!
//! - **Model families**: polynomial, exponential, logarithmic, power,
//!   and sigmoid curves
//! - **Robust preprocessing**: NaN/Inf filtering and modified z-score
//!   outlier removal
//! - **Model selection**: parallel candidate fitting scored by AIC
//! - **Model store**: fitted curves kept under stable ids for later
//!   prediction
//!
//! ## Example
//!
//! ```
//! use quantfit_curves::{FitEngine, FitOptions};
//!
//! let engine = FitEngine::new();
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [3.1, 4.9, 7.2, 8.8, 11.0];
//!
//! let report = engine.fit(&x, &y, &FitOptions::default())?;
//! let predictions = engine.predict(&report.model_id, &[6.0, 7.0])?;
//! assert_eq!(predictions.len(), 2);
//! # Ok::<(), quantfit_curves::FitError>(())
//! ```
//!
//! ## Design Philosophy
//!
//! - **Deterministic selection**: same data and options, same winner
//! - **Infeasible is not fatal**: families that cannot fit are skipped
//!   with a reason, not errored

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod engine;
pub mod error;
pub mod fit;
pub mod models;
pub mod preprocess;
pub mod selection;
pub mod store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::{FitEngine, FitQuality, FitReport};
    pub use crate::error::{FitError, FitResult};
    pub use crate::fit::{FitCandidate, Infeasible};
    pub use crate::models::{CurveModel, ModelKind, ModelSpec};
    pub use crate::selection::{fit_and_select, FitOptions, FitSelection};
    pub use crate::store::{ModelId, ModelStore};
}

pub use engine::{FitEngine, FitQuality, FitReport};
pub use error::{FitError, FitResult};
pub use models::{CurveModel, ModelKind, ModelSpec};
pub use selection::{FitOptions, FitSelection};
pub use store::{ModelId, ModelStore};
