//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Four outputs (separate Indicator instances):
//! - Middle: SMA(close, period)
//! - Upper: middle + mult * stddev(close, period)
//! - Lower: middle - mult * stddev(close, period)
//! - Position: (close - lower) / (upper - lower + 1e-9), 0 at the lower band, 1 at the upper
//!
//! Uses population stddev (divide by N).
//! Lookback: period - 1.

use super::rolling::{mean, population_std, rolling_apply};
use super::{closes, Indicator};
use crate::domain::Bar;

/// Guard added to the band width so collapsed bands do not divide by zero.
pub const BAND_EPSILON: f64 = 1e-9;

/// Which Bollinger output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    Position,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

/// All Bollinger outputs for one series.
#[derive(Debug, Clone)]
pub struct BollingerSeries {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
    pub position: Vec<f64>,
}

impl Bollinger {
    pub fn new(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
            BollingerBand::Position => "pos",
        };
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }
}

/// Compute every band in one pass.
pub fn bollinger_series(values: &[f64], period: usize, multiplier: f64) -> BollingerSeries {
    let middle = rolling_apply(values, period, period, mean);
    let stddev = rolling_apply(values, period, period, population_std);
    let upper: Vec<f64> = middle
        .iter()
        .zip(&stddev)
        .map(|(m, s)| m + multiplier * s)
        .collect();
    let lower: Vec<f64> = middle
        .iter()
        .zip(&stddev)
        .map(|(m, s)| m - multiplier * s)
        .collect();
    let position = values
        .iter()
        .zip(upper.iter().zip(&lower))
        .map(|(c, (u, l))| (c - l) / (u - l + BAND_EPSILON))
        .collect();
    BollingerSeries {
        upper,
        middle,
        lower,
        position,
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let series = bollinger_series(&closes(bars), self.period, self.multiplier);
        match self.band {
            BollingerBand::Upper => series.upper,
            BollingerBand::Middle => series.middle,
            BollingerBand::Lower => series.lower,
            BollingerBand::Position => series.position,
        }
    }
}
