//! # Quantfit Math
//!
//! Numerical utilities for the Quantfit analytics library.
//!
//! This crate provides:
//!
//! - **Polynomial fitting**: SVD-based least squares and Horner evaluation
//! - **Statistics**: mean, population standard deviation, median
//! - **Metrics**: R², RMSE, and AIC goodness-of-fit scoring
//! - **Optimization**: an embedded Adam minimizer for nonlinear fits
//!
//! ## Design Philosophy
//!
//! - **Numerical stability**: explicit policies for degenerate inputs
//! - **Plain data**: `f64` slices in, owned results out

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

pub mod error;
pub mod metrics;
pub mod optimize;
pub mod polyfit;
pub mod stats;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::metrics::{goodness_of_fit, GoodnessOfFit};
    pub use crate::optimize::{adam, AdamConfig, OptimizationResult};
    pub use crate::polyfit::{linear_fit, polyfit, polyval, polyval_slice};
    pub use crate::stats::{mean, median, population_std};
}

pub use error::{MathError, MathResult};
