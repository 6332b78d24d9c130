//! # Quantfit Options
//!
//! Binomial option pricing with escrowed dividends.
//!
//! This crate provides:
//!
//! - **CRR lattice**: European and American calls and puts
//! - **Escrowed dividends**: discrete cash dividends stripped from the
//!   spot and restored at exercise checks
//! - **Greeks**: delta, gamma, and theta from the tree nodes; vega and
//!   rho by bump-and-reprice, quoted per percentage point
//! - **Degenerate contracts**: expired options return intrinsic value,
//!   zero-volatility options price on the deterministic forward path
//!
//! ## Example
//!
//! ```
//! use quantfit_options::{value, ExerciseStyle, OptionKind, OptionSpec};
//!
//! let spec = OptionSpec::new(
//!     OptionKind::Call,
//!     ExerciseStyle::American,
//!     100.0, // spot
//!     100.0, // strike
//!     1.0,   // maturity in years
//!     0.05,  // risk-free rate
//!     0.2,   // volatility
//! );
//!
//! let valuation = value(&spec)?;
//! assert!(valuation.price > 0.0);
//! assert!(valuation.delta > 0.0);
//! # Ok::<(), quantfit_options::PricingError>(())
//! ```

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

mod deterministic;
mod lattice;

pub mod error;
pub mod types;
pub mod valuation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{PricingError, PricingResult};
    pub use crate::types::{Dividend, ExerciseStyle, OptionKind, OptionSpec, DEFAULT_STEPS};
    pub use crate::valuation::{price, value, OptionValuation};
}

pub use error::{PricingError, PricingResult};
pub use types::{Dividend, ExerciseStyle, OptionKind, OptionSpec, DEFAULT_STEPS};
pub use valuation::{price, value, OptionValuation};
