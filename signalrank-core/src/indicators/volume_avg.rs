//! Rolling average volume, used for the volume-surge flag.
//!
//! Mean volume over the trailing window once `min_periods` bars are available.

use super::rolling::{mean, rolling_apply};
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct VolumeAverage {
    window: usize,
    min_periods: usize,
    name: String,
}

impl VolumeAverage {
    pub fn new(window: usize, min_periods: usize) -> Self {
        assert!(
            window >= 1 && (1..=window).contains(&min_periods),
            "volume average needs window >= 1 and 1 <= min_periods <= window"
        );
        Self {
            window,
            min_periods,
            name: format!("vol_avg_{window}"),
        }
    }
}

impl Indicator for VolumeAverage {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.min_periods - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
        rolling_apply(&volumes, self.window, self.min_periods, mean)
    }
}
