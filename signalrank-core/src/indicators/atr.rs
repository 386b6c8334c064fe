//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|)
//! ATR uses Wilder smoothing (alpha = 1/period), seeded with the mean of the
//! first `period` true ranges that have a previous close.
//! Lookback: period.

use super::ema::recursive_smooth;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "ATR period must be >= 1");
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

/// True Range per bar. The first bar has no previous close and is undefined.
pub fn true_range(bars: &[Bar]) -> Vec<f64> {
    let mut tr = vec![f64::NAN; bars.len()];
    for (i, pair) in bars.windows(2).enumerate() {
        let (prev, cur) = (&pair[0], &pair[1]);
        let pc = prev.close;
        // f64::max ignores NaN operands
        if cur.high.is_nan() || cur.low.is_nan() || pc.is_nan() {
            continue;
        }
        tr[i + 1] = (cur.high - cur.low)
            .max((cur.high - pc).abs())
            .max((cur.low - pc).abs());
    }
    tr
}

/// Wilder smoothing (alpha = 1/period). Undefined inputs are skipped the same
/// way as in [`recursive_smooth`].
pub fn wilder_smooth(values: &[f64], period: usize) -> Vec<f64> {
    recursive_smooth(values, period, 1.0 / period as f64)
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        wilder_smooth(&true_range(bars), self.period)
    }
}
