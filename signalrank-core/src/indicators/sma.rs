//! Simple moving average of close.
//!
//! Strict full window: one NaN close leaves every window containing it
//! undefined. The frame uses the 20- and 50-bar averages for trend labels.

use super::rolling::{mean, rolling_apply};
use super::{closes, Indicator};
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

/// Full-window rolling mean of an arbitrary series.
pub fn sma_of_series(values: &[f64], period: usize) -> Vec<f64> {
    rolling_apply(values, period, period, mean)
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        sma_of_series(&closes(bars), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn fast_window_on_ramp() {
        // mean of 1..=20 is 10.5, then shifts by one per bar
        let out = Sma::new(20).compute(&make_bars(&ramp(25)));
        assert!(out[18].is_nan());
        assert_approx(out[19], 10.5, DEFAULT_EPSILON);
        assert_approx(out[24], 15.5, DEFAULT_EPSILON);
    }

    #[test]
    fn slow_window_needs_fifty_bars() {
        let short = Sma::new(50).compute(&make_bars(&ramp(49)));
        assert!(short.iter().all(|v| v.is_nan()));
        let full = Sma::new(50).compute(&make_bars(&ramp(50)));
        assert_approx(full[49], 25.5, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_close_blanks_its_windows() {
        let mut closes = ramp(8);
        closes[3] = f64::NAN;
        let out = sma_of_series(&closes, 3);
        assert!(out[3..6].iter().all(|v| v.is_nan()));
        assert_approx(out[6], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn names_follow_period() {
        assert_eq!(Sma::new(20).name(), "sma_20");
        assert_eq!(Sma::new(50).lookback(), 49);
    }
}
