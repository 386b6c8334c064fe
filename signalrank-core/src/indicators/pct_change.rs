//! Percent change of close over N bars, as a fraction.
//!
//! pct[t] = close[t] / close[t-period] - 1
//! Lookback: period.

use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct PctChange {
    period: usize,
    name: String,
}

impl PctChange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "PctChange period must be >= 1");
        Self {
            period,
            name: format!("mom_{period}"),
        }
    }
}

/// Percent change of an arbitrary series. A zero or NaN base is undefined.
pub fn pct_change_of_series(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in period..n {
        let prev = values[i - period];
        let curr = values[i];
        if prev != 0.0 && prev.is_finite() && curr.is_finite() {
            result[i] = curr / prev - 1.0;
        }
    }
    result
}

impl Indicator for PctChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        pct_change_of_series(&closes(bars), self.period)
    }
}
