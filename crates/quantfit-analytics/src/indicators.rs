//! Technical indicators over price series.
//!
//! Rolling indicators return a vector the same length as the input,
//! with `NaN` in the positions where the window has not yet filled.
//! Callers can therefore align indicator values with prices by index.

use quantfit_math::stats;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Default lookback window for single-window indicators such as RSI.
pub const DEFAULT_INDICATOR_WINDOW: usize = 14;
/// Default fast EMA window for MACD.
pub const DEFAULT_MACD_FAST: usize = 12;
/// Default slow EMA window for MACD.
pub const DEFAULT_MACD_SLOW: usize = 26;
/// Default signal EMA window for MACD.
pub const DEFAULT_MACD_SIGNAL: usize = 9;
/// Default window for Bollinger bands.
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
/// Default band width in standard deviations.
pub const DEFAULT_BOLLINGER_WIDTH: f64 = 2.0;
/// Default short moving average for crossover detection.
pub const DEFAULT_CROSS_SHORT: usize = 50;
/// Default long moving average for crossover detection.
pub const DEFAULT_CROSS_LONG: usize = 200;

/// MACD line, signal line, and histogram, aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// Fast EMA minus slow EMA.
    pub macd: Vec<f64>,
    /// EMA of the MACD line.
    pub signal: Vec<f64>,
    /// MACD line minus signal line.
    pub histogram: Vec<f64>,
}

/// Bollinger band triple, aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    /// Simple moving average.
    pub middle: Vec<f64>,
    /// Middle band plus `num_std` standard deviations.
    pub upper: Vec<f64>,
    /// Middle band minus `num_std` standard deviations.
    pub lower: Vec<f64>,
}

/// Moving average crossover state at the end of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossSignal {
    /// No crossover between the last two observations.
    Neutral,
    /// Short average crossed above the long average.
    GoldenCross,
    /// Short average crossed below the long average.
    DeathCross,
}

/// Crossover signal with the final moving average values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossReport {
    /// Detected crossover state.
    pub signal: CrossSignal,
    /// Last value of the short moving average.
    pub sma_short: f64,
    /// Last value of the long moving average.
    pub sma_long: f64,
}

/// Simple moving average.
///
/// The first `window - 1` entries are `NaN`.
pub fn sma(prices: &[f64], window: usize) -> AnalyticsResult<Vec<f64>> {
    if window == 0 {
        return Err(AnalyticsError::ZeroWindow);
    }
    let n = prices.len();
    if n < window {
        return Err(AnalyticsError::InsufficientData {
            required: window,
            actual: n,
        });
    }

    let mut out = vec![f64::NAN; n];
    for (i, chunk) in prices.windows(window).enumerate() {
        out[i + window - 1] = stats::mean(chunk)?;
    }
    Ok(out)
}

/// Exponential moving average with smoothing `2 / (window + 1)`.
///
/// Seeded with the first price, so every entry is defined.
pub fn ema(prices: &[f64], window: usize) -> AnalyticsResult<Vec<f64>> {
    if window == 0 {
        return Err(AnalyticsError::ZeroWindow);
    }
    let n = prices.len();
    if n < window {
        return Err(AnalyticsError::InsufficientData {
            required: window,
            actual: n,
        });
    }
    Ok(ema_core(prices, window))
}

fn ema_core(prices: &[f64], window: usize) -> Vec<f64> {
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut out = Vec::with_capacity(prices.len());
    let mut level = match prices.first() {
        Some(&first) => first,
        None => return out,
    };
    out.push(level);
    for &price in &prices[1..] {
        level = alpha * price + (1.0 - alpha) * level;
        out.push(level);
    }
    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Relative strength index using Wilder's smoothing.
///
/// Requires `window + 1` prices for the initial averages. The first
/// `window` entries are `NaN`; a series with no losses reads 100 and a
/// series with no gains reads 0.
pub fn rsi(prices: &[f64], window: usize) -> AnalyticsResult<Vec<f64>> {
    if window == 0 {
        return Err(AnalyticsError::ZeroWindow);
    }
    let n = prices.len();
    if n < window + 1 {
        return Err(AnalyticsError::InsufficientData {
            required: window + 1,
            actual: n,
        });
    }

    let deltas: Vec<f64> = prices.windows(2).map(|pair| pair[1] - pair[0]).collect();

    let w = window as f64;
    let mut avg_gain = deltas[..window].iter().map(|d| d.max(0.0)).sum::<f64>() / w;
    let mut avg_loss = deltas[..window].iter().map(|d| (-d).max(0.0)).sum::<f64>() / w;

    let mut out = vec![f64::NAN; n];
    out[window] = rsi_value(avg_gain, avg_loss);
    for i in window + 1..n {
        let delta = deltas[i - 1];
        avg_gain = (avg_gain * (w - 1.0) + delta.max(0.0)) / w;
        avg_loss = (avg_loss * (w - 1.0) + (-delta).max(0.0)) / w;
        out[i] = rsi_value(avg_gain, avg_loss);
    }
    Ok(out)
}

/// Moving average convergence divergence.
///
/// EMAs are seeded from the first price, so short series still produce
/// output; values early in the series are less settled rather than
/// missing.
pub fn macd(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> AnalyticsResult<MacdOutput> {
    if prices.is_empty() {
        return Err(AnalyticsError::EmptySeries);
    }
    if fast == 0 || slow == 0 || signal == 0 {
        return Err(AnalyticsError::ZeroWindow);
    }

    let fast_ema = ema_core(prices, fast);
    let slow_ema = ema_core(prices, slow);
    let macd_line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_core(&macd_line, signal);
    let histogram: Vec<f64> = macd_line
        .iter()
        .zip(&signal_line)
        .map(|(m, s)| m - s)
        .collect();

    Ok(MacdOutput {
        macd: macd_line,
        signal: signal_line,
        histogram,
    })
}

/// Bollinger bands at `num_std` population standard deviations.
pub fn bollinger(prices: &[f64], window: usize, num_std: f64) -> AnalyticsResult<BollingerBands> {
    let middle = sma(prices, window)?;
    let n = prices.len();

    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    for (i, chunk) in prices.windows(window).enumerate() {
        let std = stats::population_std(chunk)?;
        let idx = i + window - 1;
        upper[idx] = middle[idx] + num_std * std;
        lower[idx] = middle[idx] - num_std * std;
    }

    Ok(BollingerBands {
        middle,
        upper,
        lower,
    })
}

/// Detects a moving average crossover at the end of the series.
///
/// Compares the short and long SMAs at the last two positions. When the
/// long window has only just filled, the previous position is `NaN` and
/// the signal is neutral.
pub fn cross_signal(prices: &[f64], short: usize, long: usize) -> AnalyticsResult<CrossReport> {
    if short == 0 || long == 0 {
        return Err(AnalyticsError::ZeroWindow);
    }
    let n = prices.len();
    if n < long {
        return Err(AnalyticsError::InsufficientData {
            required: long,
            actual: n,
        });
    }

    let short_series = sma(prices, short)?;
    let long_series = sma(prices, long)?;

    let signal = if n < 2 {
        CrossSignal::Neutral
    } else {
        let prev_short = short_series[n - 2];
        let prev_long = long_series[n - 2];
        let curr_short = short_series[n - 1];
        let curr_long = long_series[n - 1];

        // The averages must actually swap sides: a previous-bar tie
        // (common on flat prices, where both window means are equal)
        // is not a crossover.
        if prev_short < prev_long && curr_short > curr_long {
            CrossSignal::GoldenCross
        } else if prev_short > prev_long && curr_short < curr_long {
            CrossSignal::DeathCross
        } else {
            CrossSignal::Neutral
        }
    };

    Ok(CrossReport {
        signal,
        sma_short: short_series[n - 1],
        sma_long: long_series[n - 1],
    })
}

/// Price to earnings ratio.
pub fn pe_ratio(price: f64, earnings_per_share: f64) -> AnalyticsResult<f64> {
    if earnings_per_share == 0.0 {
        return Err(AnalyticsError::ZeroEarnings);
    }
    Ok(price / earnings_per_share)
}
