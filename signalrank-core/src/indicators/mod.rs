//! Indicator trait and concrete indicator implementations.
//!
//! Indicators are pure functions: bar history in, numeric series out, one value
//! per bar. Undefined values (warmup, degenerate windows, NaN inputs) are
//! `f64::NAN`; callers turn them into `None`/`Unknown` at the snapshot boundary.
//!
//! Multi-series indicators (MACD, Bollinger, support/resistance) are exposed as
//! separate named instances per output line, keeping the single-series
//! `Indicator` trait unchanged.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod pct_change;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod support_resistance;
pub mod volume_avg;

pub use atr::Atr;
pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use macd::{Macd, MacdLine};
pub use pct_change::PctChange;
pub use rsi::Rsi;
pub use sma::Sma;
pub use support_resistance::{Level, SupportResistance};
pub use volume_avg::VolumeAverage;

use crate::domain::Bar;

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No indicator value at bar t may depend on price data from bar t+1 or later.
/// Every indicator must pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_20", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars needed before the indicator can produce a value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    ///
    /// Returns a `Vec<f64>` of the same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Close prices of a bar slice.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Create synthetic bars from close prices for testing.
///
/// Generates plausible OHLV: open = prev_close (or close for first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
