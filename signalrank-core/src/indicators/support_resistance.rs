//! Naive support/resistance: rolling lowest low / highest high.
//!
//! - Support: min(low) over the trailing window
//! - Resistance: max(high) over the trailing window
//!
//! Unlike a strict channel, a window produces a value once it holds
//! `min_periods` defined observations; NaN lows/highs are skipped.
//! Lookback: min_periods - 1.

use super::rolling::{max, min, rolling_apply};
use super::Indicator;
use crate::domain::Bar;

/// Which level to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Support,
    Resistance,
}

#[derive(Debug, Clone)]
pub struct SupportResistance {
    window: usize,
    min_periods: usize,
    level: Level,
    name: String,
}

impl SupportResistance {
    pub fn new(window: usize, min_periods: usize, level: Level) -> Self {
        assert!(window >= 1, "support/resistance window must be >= 1");
        assert!(
            (1..=window).contains(&min_periods),
            "min_periods must be within 1..=window"
        );
        let label = match level {
            Level::Support => "support",
            Level::Resistance => "resistance",
        };
        Self {
            window,
            min_periods,
            level,
            name: format!("{label}_{window}"),
        }
    }

    pub fn support(window: usize, min_periods: usize) -> Self {
        Self::new(window, min_periods, Level::Support)
    }

    pub fn resistance(window: usize, min_periods: usize) -> Self {
        Self::new(window, min_periods, Level::Resistance)
    }
}

impl Indicator for SupportResistance {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.min_periods - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        match self.level {
            Level::Support => {
                let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
                rolling_apply(&lows, self.window, self.min_periods, min)
            }
            Level::Resistance => {
                let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
                rolling_apply(&highs, self.window, self.min_periods, max)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};
    use chrono::NaiveDate;

    fn make_hl_bars(data: &[(f64, f64)]) -> Vec<Bar> {
        let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(high, low))| Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: (high + low) / 2.0,
                high,
                low,
                close: (high + low) / 2.0,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn needs_min_periods_observations() {
        let bars = make_hl_bars(&[(12.0, 9.0), (15.0, 10.0), (14.0, 13.0), (16.0, 12.0)]);
        let res = SupportResistance::resistance(20, 3).compute(&bars);
        assert!(res[0].is_nan());
        assert!(res[1].is_nan());
        assert_approx(res[2], 15.0, DEFAULT_EPSILON);
        assert_approx(res[3], 16.0, DEFAULT_EPSILON);

        let sup = SupportResistance::support(20, 3).compute(&bars);
        assert_approx(sup[2], 9.0, DEFAULT_EPSILON);
        assert_approx(sup[3], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn old_extremes_roll_out_of_window() {
        let bars = make_hl_bars(&[(20.0, 1.0), (12.0, 9.0), (13.0, 10.0), (14.0, 11.0)]);
        let res = SupportResistance::resistance(3, 1).compute(&bars);
        let sup = SupportResistance::support(3, 1).compute(&bars);
        assert_approx(res[2], 20.0, DEFAULT_EPSILON);
        assert_approx(res[3], 14.0, DEFAULT_EPSILON);
        assert_approx(sup[3], 9.0, DEFAULT_EPSILON);
    }

    #[test]
    fn nan_highs_are_skipped() {
        let mut bars = make_hl_bars(&[(12.0, 9.0), (15.0, 10.0), (14.0, 13.0)]);
        bars[1].high = f64::NAN;
        let res = SupportResistance::resistance(20, 2).compute(&bars);
        assert!(res[1].is_nan());
        assert_approx(res[2], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn lookback_and_name() {
        let ind = SupportResistance::support(20, 5);
        assert_eq!(ind.lookback(), 4);
        assert_eq!(ind.name(), "support_20");
    }
}
