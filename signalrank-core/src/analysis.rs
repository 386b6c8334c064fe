//! Per-symbol analysis: indicator frame plus its signal snapshot.

use polars::prelude::DataFrame;
use tracing::debug;

use crate::data::frame::{bars_from_frame, FrameError};
use crate::domain::{Bar, SignalSnapshot, Symbol};
use crate::frame::IndicatorFrame;
use crate::signals::signals;

/// Everything the scoring engine needs for one symbol.
#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub symbol: Symbol,
    pub frame: IndicatorFrame,
    pub signals: SignalSnapshot,
}

impl SymbolAnalysis {
    /// Last close of the series, if defined.
    pub fn last_close(&self) -> Option<f64> {
        self.signals.price
    }
}

/// Analyze already-typed bars. Cannot fail.
pub fn analyze_bars(symbol: impl Into<Symbol>, bars: &[Bar]) -> SymbolAnalysis {
    let symbol = symbol.into();
    let frame = IndicatorFrame::compute(bars);
    let signals = signals(&frame);
    let void_bars = bars.iter().filter(|b| b.is_void()).count();
    let inconsistent_bars = bars.iter().filter(|b| !b.is_void() && !b.is_sane()).count();
    debug!(
        symbol = %symbol,
        bars = frame.len(),
        void_bars,
        inconsistent_bars,
        rsi_signal = %signals.rsi_signal,
        macd_signal = %signals.macd_signal,
        trend = %signals.trend,
        "analyzed"
    );
    SymbolAnalysis {
        symbol,
        frame,
        signals,
    }
}

/// Analyze a loosely-typed price frame. Structural problems (no close or
/// date column, broken date index) are returned for the caller to isolate.
pub fn analyze(symbol: impl Into<Symbol>, df: &DataFrame) -> Result<SymbolAnalysis, FrameError> {
    let bars = bars_from_frame(df)?;
    Ok(analyze_bars(symbol, &bars))
}
