//! Signal derivation: reads the last one or two rows of an indicator frame.
//!
//! Nothing here looks further back than the previous row, so the snapshot
//! of a frame equals the snapshot of any frame sharing its two-row tail.

use crate::domain::{CrossoverState, Recommendation, RsiState, SignalSnapshot};
use crate::frame::IndicatorFrame;

/// Current volume must exceed this multiple of the 20-bar average.
pub const VOLUME_SURGE_RATIO: f64 = 1.5;

fn defined(v: f64) -> Option<f64> {
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}

/// `true` only when both sides are defined and `price > level`.
fn above(price: f64, level: f64) -> bool {
    !price.is_nan() && !level.is_nan() && price > level
}

/// True iff the average is positive and volume exceeds 1.5x of it.
pub fn volume_surge(volume: Option<f64>, average: Option<f64>) -> bool {
    match (volume, average) {
        (Some(v), Some(avg)) => avg > 0.0 && v > VOLUME_SURGE_RATIO * avg,
        _ => false,
    }
}

/// Interpret the latest row of `frame`. A zero-row frame yields the empty
/// snapshot.
pub fn signals(frame: &IndicatorFrame) -> SignalSnapshot {
    let n = frame.len();
    if n == 0 {
        return SignalSnapshot::empty();
    }
    let last = n - 1;
    let bar = &frame.bars[last];

    let rsi = defined(frame.rsi_14[last]);
    let macd_diff = defined(frame.macd_diff[last]);
    let prev_macd_diff = last.checked_sub(1).and_then(|i| defined(frame.macd_diff[i]));
    let volume = defined(bar.volume);
    let vol_avg_20 = defined(frame.vol_avg_20[last]);

    let mut snapshot = SignalSnapshot {
        rsi,
        rsi_signal: RsiState::classify(rsi),
        macd_diff,
        macd_signal: CrossoverState::classify(prev_macd_diff, macd_diff),
        price: defined(bar.close),
        above_sma20: above(bar.close, frame.sma_20[last]),
        above_sma50: above(bar.close, frame.sma_50[last]),
        trend: frame.trend[last],
        volume,
        vol_avg_20,
        volume_surge: volume_surge(volume, vol_avg_20),
        bb_pos: defined(frame.bb_pos[last]),
        support_20: defined(frame.support_20[last]),
        resistance_20: defined(frame.resistance_20[last]),
        recommendation: None,
    };
    snapshot.recommendation = Some(Recommendation::from_votes(snapshot.buy_votes()));
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Trend;
    use crate::indicators::make_bars;

    fn bullish_frame() -> IndicatorFrame {
        let mut f = IndicatorFrame::blank(2);
        f.bars[1].close = 105.0;
        f.bars[1].volume = 2000.0;
        f.rsi_14[1] = 25.0;
        f.macd_diff = vec![-0.1, 0.2];
        f.sma_20[1] = 100.0;
        f.sma_50[1] = 98.0;
        f.trend[1] = Trend::Up;
        f.vol_avg_20[1] = 1000.0;
        f.bb_pos[1] = 0.15;
        f
    }

    #[test]
    fn empty_frame_gives_empty_snapshot() {
        let s = signals(&IndicatorFrame::default());
        assert!(s.is_empty());
        assert_eq!(s, SignalSnapshot::empty());
    }

    #[test]
    fn four_votes_is_strong_buy() {
        let s = signals(&bullish_frame());
        assert_eq!(s.rsi_signal, RsiState::Oversold);
        assert_eq!(s.macd_signal, CrossoverState::BullishCrossover);
        assert!(s.volume_surge);
        assert!(s.above_sma20 && s.above_sma50);
        assert_eq!(s.buy_votes(), 4);
        assert_eq!(s.recommendation, Some(Recommendation::StrongBuy));
        assert_eq!(s.price, Some(105.0));
        assert_eq!(s.bb_pos, Some(0.15));
    }

    #[test]
    fn single_row_crossover_is_unknown() {
        let mut f = IndicatorFrame::blank(1);
        f.bars[0].close = 10.0;
        f.macd_diff[0] = 0.5;
        let s = signals(&f);
        assert_eq!(s.macd_signal, CrossoverState::Unknown);
        assert_eq!(s.rsi_signal, RsiState::Unknown);
        assert_eq!(s.recommendation, Some(Recommendation::Sell));
        assert!(!s.is_empty());
    }

    #[test]
    fn undefined_average_never_surges() {
        assert!(!volume_surge(Some(5000.0), None));
        assert!(!volume_surge(Some(5000.0), Some(0.0)));
        assert!(!volume_surge(Some(1500.0), Some(1000.0)));
        assert!(volume_surge(Some(1501.0), Some(1000.0)));
    }

    #[test]
    fn nan_sma_is_not_above() {
        let mut f = IndicatorFrame::blank(2);
        f.bars[1].close = 50.0;
        let s = signals(&f);
        assert!(!s.above_sma20);
        assert!(!s.above_sma50);
        assert_eq!(s.trend, Trend::Unknown);
    }

    #[test]
    fn computed_frame_flat_series() {
        let bars = make_bars(&[100.0; 60]);
        let s = signals(&IndicatorFrame::compute(&bars));
        // Flat closes: no losses, so the oscillator pins at the top.
        assert_eq!(s.rsi, Some(100.0));
        assert_eq!(s.rsi_signal, RsiState::Overbought);
        assert_eq!(s.trend, Trend::Sideways);
        assert!(!s.volume_surge);
        assert_ne!(s.macd_signal, CrossoverState::Unknown);
    }

    #[test]
    fn depends_only_on_tail() {
        let mut a = bullish_frame();
        let b = bullish_frame();
        a.rsi_14[0] = 99.0;
        a.bars[0].close = 1.0;
        assert_eq!(signals(&a), signals(&b));
    }
}
