//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2/(period+1).
//! Seed: SMA of the first `period` defined values.
//! Lookback: period - 1.

use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "EMA period must be >= 1");
        Self {
            period,
            name: format!("ema_{period}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        ema_of_series(&closes(bars), self.period)
    }
}

/// EMA of an arbitrary series. See [`recursive_smooth`] for the handling of
/// undefined inputs.
pub fn ema_of_series(values: &[f64], period: usize) -> Vec<f64> {
    recursive_smooth(values, period, 2.0 / (period as f64 + 1.0))
}

/// Exponential smoothing with weight `alpha` on each new observation.
///
/// Seeded with the mean of the first `period` defined values and emitted at
/// the bar holding the last of them, so a leading warmup run (the MACD line)
/// is skipped. An undefined input, before or after the seed, is NaN at its
/// own bar and leaves the running value untouched; the recursion resumes at
/// the next defined value.
pub fn recursive_smooth(values: &[f64], period: usize, alpha: f64) -> Vec<f64> {
    let mut result = vec![f64::NAN; values.len()];
    if period == 0 {
        return result;
    }

    let mut seed_sum = 0.0;
    let mut seen = 0;
    let mut prev: Option<f64> = None;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            continue;
        }
        let next = match prev {
            Some(p) => alpha * v + (1.0 - alpha) * p,
            None => {
                seed_sum += v;
                seen += 1;
                if seen < period {
                    continue;
                }
                seed_sum / period as f64
            }
        };
        prev = Some(next);
        result[i] = next;
    }

    result
}
