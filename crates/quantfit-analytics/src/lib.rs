//! # Quantfit Analytics
//!
//! Fixed income analytics and technical indicators.
//!
//! This crate provides:
//!
//! - **Bond analytics**: price, Macaulay and modified duration, and
//!   convexity from yield to maturity
//! - **Cash flow tools**: present value of arbitrary schedules under
//!   discrete or continuous discounting
//! - **Rate conversion**: between compounding frequencies via the
//!   effective annual rate
//! - **Technical indicators**: SMA, EMA, RSI, MACD, Bollinger bands,
//!   and moving average crossover detection
//!
//! ## Example
//!
//! ```
//! use quantfit_analytics::bonds::{bond_price, BondSpec};
//!
//! // A bond whose coupon equals its yield prices at par.
//! let spec = BondSpec::new(0.05, 0.05, 10.0);
//! let valuation = bond_price(&spec)?;
//! assert!((valuation.price - 100.0).abs() < 1e-9);
//! # Ok::<(), quantfit_analytics::AnalyticsError>(())
//! ```
//!
//! ## Design Philosophy
//!
//! - **Aligned outputs**: rolling indicators match the input length,
//!   with `NaN` where the window has not filled
//! - **Errors over silence**: invalid requests fail with typed errors
//!   instead of propagating `NaN` through results

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

pub mod bonds;
pub mod cashflows;
pub mod error;
pub mod indicators;
pub mod rates;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bonds::{bond_price, BondSpec, BondValuation};
    pub use crate::cashflows::{present_value, Discounting, PresentValue, Rates};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::indicators::{
        bollinger, cross_signal, ema, macd, pe_ratio, rsi, sma, BollingerBands, CrossReport,
        CrossSignal, MacdOutput,
    };
    pub use crate::rates::{convert_rate, Compounding, RateConversion};
}

pub use bonds::{bond_price, BondSpec, BondValuation};
pub use cashflows::{present_value, Discounting, PresentValue, Rates};
pub use error::{AnalyticsError, AnalyticsResult};
pub use indicators::{BollingerBands, CrossReport, CrossSignal, MacdOutput};
pub use rates::{convert_rate, Compounding, RateConversion};
