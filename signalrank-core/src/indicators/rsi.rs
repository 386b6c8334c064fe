//! Relative Strength Index (RSI), the bounded 0–100 momentum oscillator.
//!
//! Wilder smoothing of average gains and average losses, seeded with the
//! simple mean of the first `period` defined changes. A change touching an
//! undefined close is skipped: NaN at that bar, averages carried forward.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss); 100 whenever avg_loss is 0.
//! Lookback: period.

use super::atr::wilder_smooth;
use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rsi_of_series(&closes(bars), self.period)
    }
}

pub fn rsi_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let change = values[i] - values[i - 1];
        if change.is_finite() {
            gains[i] = change.max(0.0);
            losses[i] = (-change).max(0.0);
        }
    }

    let avg_gain = wilder_smooth(&gains, period);
    let avg_loss = wilder_smooth(&losses, period);
    avg_gain
        .iter()
        .zip(&avg_loss)
        .map(|(&g, &l)| {
            if g.is_nan() || l.is_nan() {
                f64::NAN
            } else {
                rsi_value(g, l)
            }
        })
        .collect()
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
