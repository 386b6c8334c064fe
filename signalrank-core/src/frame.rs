//! Indicator frame: the bar series augmented with every indicator column.
//!
//! Columns are computed in dependency order (the trend label needs the fast
//! SMA and its slope). Every column value at bar i depends only on bars <= i.

use polars::prelude::DataFrame;

use crate::data::frame::{bars_from_frame, FrameError};
use crate::domain::{Bar, Trend};
use crate::indicators::bollinger::bollinger_series;
use crate::indicators::ema::ema_of_series;
use crate::indicators::macd::macd_series;
use crate::indicators::pct_change::pct_change_of_series;
use crate::indicators::rsi::rsi_of_series;
use crate::indicators::sma::sma_of_series;
use crate::indicators::{closes, Indicator, SupportResistance, VolumeAverage};

pub const SMA_FAST: usize = 20;
pub const SMA_SLOW: usize = 50;
pub const EMA_FAST: usize = 12;
pub const EMA_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const RSI_PERIOD: usize = 14;
pub const BB_PERIOD: usize = 20;
pub const BB_MULTIPLIER: f64 = 2.0;
pub const MOM_SHORT: usize = 5;
pub const MOM_LONG: usize = 20;
pub const LEVEL_WINDOW: usize = 20;
pub const LEVEL_MIN_PERIODS: usize = 5;
pub const VOLUME_WINDOW: usize = 20;
pub const VOLUME_MIN_PERIODS: usize = 5;

/// Bars plus one column per indicator, all of the same length.
#[derive(Debug, Clone, Default)]
pub struct IndicatorFrame {
    pub bars: Vec<Bar>,
    pub sma_20: Vec<f64>,
    pub sma_50: Vec<f64>,
    pub ema_12: Vec<f64>,
    pub ema_26: Vec<f64>,
    pub rsi_14: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_diff: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub bb_mid: Vec<f64>,
    pub bb_pos: Vec<f64>,
    pub mom_5: Vec<f64>,
    pub mom_20: Vec<f64>,
    pub support_20: Vec<f64>,
    pub resistance_20: Vec<f64>,
    pub vol_avg_20: Vec<f64>,
    pub trend: Vec<Trend>,
}

impl IndicatorFrame {
    /// Compute every indicator column over `bars`.
    pub fn compute(bars: &[Bar]) -> Self {
        let close = closes(bars);

        let sma_20 = sma_of_series(&close, SMA_FAST);
        let sma_50 = sma_of_series(&close, SMA_SLOW);
        let ema_12 = ema_of_series(&close, EMA_FAST);
        let ema_26 = ema_of_series(&close, EMA_SLOW);
        let rsi_14 = rsi_of_series(&close, RSI_PERIOD);
        let macd = macd_series(&close, EMA_FAST, EMA_SLOW, MACD_SIGNAL);
        let bands = bollinger_series(&close, BB_PERIOD, BB_MULTIPLIER);
        let mom_5 = pct_change_of_series(&close, MOM_SHORT);
        let mom_20 = pct_change_of_series(&close, MOM_LONG);
        let support_20 = SupportResistance::support(LEVEL_WINDOW, LEVEL_MIN_PERIODS).compute(bars);
        let resistance_20 =
            SupportResistance::resistance(LEVEL_WINDOW, LEVEL_MIN_PERIODS).compute(bars);
        let vol_avg_20 = VolumeAverage::new(VOLUME_WINDOW, VOLUME_MIN_PERIODS).compute(bars);
        let trend = trend_labels(&sma_20, &sma_50);

        Self {
            bars: bars.to_vec(),
            sma_20,
            sma_50,
            ema_12,
            ema_26,
            rsi_14,
            macd: macd.line,
            macd_signal: macd.signal,
            macd_diff: macd.histogram,
            bb_upper: bands.upper,
            bb_lower: bands.lower,
            bb_mid: bands.middle,
            bb_pos: bands.position,
            mom_5,
            mom_20,
            support_20,
            resistance_20,
            vol_avg_20,
            trend,
        }
    }

    /// Coerce a loosely-typed price frame and compute the indicator frame.
    ///
    /// Fails only on structural problems (missing close or date column).
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, FrameError> {
        let bars = bars_from_frame(df)?;
        Ok(Self::compute(&bars))
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Frame with `len` NaN rows and unknown trend, dated from 2024-01-02.
    /// Test fixture for hand-built frames.
    #[cfg(test)]
    pub fn blank(len: usize) -> Self {
        let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let nan = vec![f64::NAN; len];
        Self {
            bars: (0..len)
                .map(|i| Bar {
                    date: base + chrono::Duration::days(i as i64),
                    open: f64::NAN,
                    high: f64::NAN,
                    low: f64::NAN,
                    close: f64::NAN,
                    volume: 0.0,
                })
                .collect(),
            sma_20: nan.clone(),
            sma_50: nan.clone(),
            ema_12: nan.clone(),
            ema_26: nan.clone(),
            rsi_14: nan.clone(),
            macd: nan.clone(),
            macd_signal: nan.clone(),
            macd_diff: nan.clone(),
            bb_upper: nan.clone(),
            bb_lower: nan.clone(),
            bb_mid: nan.clone(),
            bb_pos: nan.clone(),
            mom_5: nan.clone(),
            mom_20: nan.clone(),
            support_20: nan.clone(),
            resistance_20: nan.clone(),
            vol_avg_20: nan,
            trend: vec![Trend::Unknown; len],
        }
    }
}

/// Per-bar trend label from the fast/slow SMA ordering and the fast SMA slope.
pub fn trend_labels(fast: &[f64], slow: &[f64]) -> Vec<Trend> {
    (0..fast.len())
        .map(|i| {
            let slope = if i == 0 { f64::NAN } else { fast[i] - fast[i - 1] };
            Trend::classify(fast[i], slow[i], slope)
        })
        .collect()
}
