//! MACD: trend-following oscillator.
//!
//! Three lines (separate Indicator instances):
//! - Line: EMA(fast) - EMA(slow)
//! - Signal: EMA(signal) of the line
//! - Histogram: line - signal (the "crossover distance")
//!
//! Lookback: slow - 1 for the line, slow + signal - 2 for signal/histogram.

use super::ema::ema_of_series;
use super::{closes, Indicator};
use crate::domain::Bar;

/// Which MACD output to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdLine {
    Line,
    Signal,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal: usize,
    line: MacdLine,
    name: String,
}

/// All three MACD outputs for one series.
#[derive(Debug, Clone)]
pub struct MacdSeries {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl Macd {
    pub fn new(fast: usize, slow: usize, signal: usize, line: MacdLine) -> Self {
        assert!(fast >= 1 && signal >= 1, "MACD periods must be >= 1");
        assert!(fast < slow, "MACD fast period must be shorter than slow period");
        let suffix = match line {
            MacdLine::Line => "line",
            MacdLine::Signal => "signal",
            MacdLine::Histogram => "hist",
        };
        Self {
            fast,
            slow,
            signal,
            line,
            name: format!("macd_{suffix}_{fast}_{slow}_{signal}"),
        }
    }

    /// The 12/26/9 configuration.
    pub fn standard(line: MacdLine) -> Self {
        Self::new(12, 26, 9, line)
    }
}

/// Compute line, signal, and histogram in one pass over the closes.
pub fn macd_series(values: &[f64], fast: usize, slow: usize, signal: usize) -> MacdSeries {
    let fast_ema = ema_of_series(values, fast);
    let slow_ema = ema_of_series(values, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = ema_of_series(&line, signal);
    let histogram = line.iter().zip(&signal_line).map(|(l, s)| l - s).collect();
    MacdSeries {
        line,
        signal: signal_line,
        histogram,
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.line {
            MacdLine::Line => self.slow - 1,
            MacdLine::Signal | MacdLine::Histogram => self.slow + self.signal - 2,
        }
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let series = macd_series(&closes(bars), self.fast, self.slow, self.signal);
        match self.line {
            MacdLine::Line => series.line,
            MacdLine::Signal => series.signal,
            MacdLine::Histogram => series.histogram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn warmup_matches_lookback() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
        let bars = make_bars(&closes);
        for line in [MacdLine::Line, MacdLine::Signal, MacdLine::Histogram] {
            let ind = Macd::standard(line);
            let out = ind.compute(&bars);
            let first = out.iter().position(|v| !v.is_nan()).unwrap();
            assert_eq!(first, ind.lookback(), "{}", ind.name());
        }
    }

    #[test]
    fn constant_price_has_zero_histogram() {
        let bars = make_bars(&[50.0; 40]);
        let hist = Macd::standard(MacdLine::Histogram).compute(&bars);
        assert_approx(hist[39], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn histogram_is_line_minus_signal() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + i as f64 * 0.5).collect();
        let s = macd_series(&closes, 12, 26, 9);
        for i in 33..80 {
            assert_approx(s.histogram[i], s.line[i] - s.signal[i], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rising_series_has_positive_line() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let s = macd_series(&closes, 12, 26, 9);
        assert!(s.line[59] > 0.0);
    }
}
