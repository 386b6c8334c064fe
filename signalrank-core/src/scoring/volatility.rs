//! Horizon-aware volatility selection.
//!
//! Two estimators are computed and the larger one wins:
//! - ATR(14) of the last bar as a fraction of the last close
//! - sample std of daily close-to-close returns over a horizon-sized window
//!
//! The unfloored value drives the risk tier; the floored one sizes the band.

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, Horizon};
use crate::indicators::atr::Atr;
use crate::indicators::rolling::sample_std;
use crate::indicators::Indicator;

/// Minimum number of returns in the trailing window before it is trusted.
pub const MIN_RETURN_OBSERVATIONS: usize = 5;
/// Floor applied when volatility sizes the target band.
pub const VOLATILITY_FLOOR: f64 = 0.01;

/// Trading-bar window of the return-std estimator per horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolatilityWindows {
    pub daily: usize,
    pub weekly: usize,
    pub monthly: usize,
    pub quarterly: usize,
    pub biquarterly: usize,
    pub yearly: usize,
}

impl Default for VolatilityWindows {
    fn default() -> Self {
        Self {
            daily: 20,
            weekly: 40,
            monthly: 60,
            quarterly: 60,
            biquarterly: 120,
            yearly: 240,
        }
    }
}

impl VolatilityWindows {
    pub fn window(&self, horizon: Horizon) -> usize {
        match horizon {
            Horizon::Daily => self.daily,
            Horizon::Weekly => self.weekly,
            Horizon::Monthly => self.monthly,
            Horizon::Quarterly => self.quarterly,
            Horizon::Biquarterly => self.biquarterly,
            Horizon::Yearly => self.yearly,
        }
    }
}

/// Both estimators and the selected value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityEstimate {
    pub atr_pct: Option<f64>,
    pub return_std: Option<f64>,
    /// Larger of the defined estimators, 0 if neither is defined.
    pub value: f64,
}

impl VolatilityEstimate {
    pub fn select(atr_pct: Option<f64>, return_std: Option<f64>) -> Self {
        let value = match (atr_pct, return_std) {
            (Some(a), Some(r)) => a.max(r),
            (Some(v), None) | (None, Some(v)) => v,
            (None, None) => 0.0,
        };
        Self {
            atr_pct,
            return_std,
            value,
        }
    }

    /// Value used for band sizing, never below 1%.
    pub fn floored(&self) -> f64 {
        self.value.max(VOLATILITY_FLOOR)
    }
}

/// Last ATR value divided by the last close.
pub fn atr_pct(bars: &[Bar], period: usize) -> Option<f64> {
    let last_close = bars.last()?.close;
    let atr = *Atr::new(period).compute(bars).last()?;
    let pct = atr / last_close;
    (pct.is_finite() && last_close > 0.0).then_some(pct)
}

/// Finite daily close-to-close returns, in order.
pub fn daily_returns(bars: &[Bar]) -> Vec<f64> {
    bars.windows(2)
        .map(|w| w[1].close / w[0].close - 1.0)
        .filter(|r| r.is_finite())
        .collect()
}

/// Sample std of the trailing `window` returns, or of every return when the
/// trailing window holds fewer than five.
pub fn horizon_return_std(bars: &[Bar], window: usize) -> Option<f64> {
    let returns = daily_returns(bars);
    let tail = &returns[returns.len().saturating_sub(window)..];
    let std = if tail.len() >= MIN_RETURN_OBSERVATIONS {
        sample_std(tail)
    } else {
        sample_std(&returns)
    };
    std.is_finite().then_some(std)
}

pub fn estimate(bars: &[Bar], window: usize, atr_period: usize) -> VolatilityEstimate {
    VolatilityEstimate::select(atr_pct(bars, atr_period), horizon_return_std(bars, window))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn default_windows() {
        let w = VolatilityWindows::default();
        assert_eq!(w.window(Horizon::Daily), 20);
        assert_eq!(w.window(Horizon::Monthly), w.window(Horizon::Quarterly));
        assert_eq!(w.window(Horizon::Yearly), 240);
    }

    #[test]
    fn partial_toml_override_keeps_other_defaults() {
        let w: VolatilityWindows = toml::from_str("weekly = 30").unwrap();
        assert_eq!(w.weekly, 30);
        assert_eq!(w.daily, 20);
    }

    #[test]
    fn select_takes_the_max() {
        let e = VolatilityEstimate::select(Some(0.02), Some(0.05));
        assert_eq!(e.value, 0.05);
        assert_eq!(e.floored(), 0.05);
    }

    #[test]
    fn select_falls_back_to_defined_side() {
        assert_eq!(VolatilityEstimate::select(None, Some(0.03)).value, 0.03);
        assert_eq!(VolatilityEstimate::select(Some(0.02), None).value, 0.02);
        let none = VolatilityEstimate::select(None, None);
        assert_eq!(none.value, 0.0);
        assert_eq!(none.floored(), VOLATILITY_FLOOR);
    }

    #[test]
    fn alternating_returns_std() {
        // closes alternate 100, 110: returns +0.1, -1/11, ...
        let closes: Vec<f64> = (0..30).map(|i| if i % 2 == 0 { 100.0 } else { 110.0 }).collect();
        let bars = make_bars(&closes);
        let std = horizon_return_std(&bars, 10).unwrap();
        let tail: Vec<f64> = daily_returns(&bars)[19..].to_vec();
        assert_eq!(tail.len(), 10);
        assert_approx(std, sample_std(&tail), DEFAULT_EPSILON);
    }

    #[test]
    fn short_series_uses_whole_series_std() {
        let bars = make_bars(&[100.0, 101.0, 99.0, 102.0]);
        let std = horizon_return_std(&bars, 20).unwrap();
        assert_approx(std, sample_std(&daily_returns(&bars)), DEFAULT_EPSILON);
    }

    #[test]
    fn single_return_is_undefined() {
        assert_eq!(horizon_return_std(&make_bars(&[100.0, 101.0]), 20), None);
    }

    #[test]
    fn atr_pct_needs_history() {
        assert_eq!(atr_pct(&make_bars(&[100.0; 5]), 14), None);
        // flat closes, high-low = 2 every bar: ATR = 2
        let pct = atr_pct(&make_bars(&[100.0; 30]), 14).unwrap();
        assert_approx(pct, 0.02, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_closes_are_skipped_in_returns() {
        let bars = make_bars(&[100.0, f64::NAN, 102.0, 103.0]);
        assert_eq!(daily_returns(&bars).len(), 1);
    }
}
