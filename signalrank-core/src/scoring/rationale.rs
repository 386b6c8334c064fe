//! One-line human-readable rationale for a scored symbol.

use crate::domain::{CrossoverState, RsiState, SignalSnapshot, Trend};

pub const NO_SIGNALS: &str = "No strong technical signals";
const MAX_PHRASES: usize = 2;

/// First two applicable phrases, joined by `"; "`.
pub fn rationale(signals: &SignalSnapshot) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    match signals.macd_signal {
        CrossoverState::BullishCrossover => parts.push("MACD bullish crossover".into()),
        CrossoverState::BearishCrossover => parts.push("MACD bearish crossover".into()),
        _ => {}
    }
    if matches!(signals.rsi_signal, RsiState::Oversold | RsiState::Strong) {
        parts.push(format!("RSI {}", signals.rsi_signal));
    }
    if signals.trend != Trend::Unknown {
        parts.push(format!("Trend: {}", signals.trend));
    }
    if signals.volume_surge {
        parts.push("Volume surge".into());
    }

    if parts.is_empty() {
        return NO_SIGNALS.to_string();
    }
    parts.truncate(MAX_PHRASES);
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_snapshot_has_no_signals() {
        assert_eq!(rationale(&SignalSnapshot::empty()), NO_SIGNALS);
    }

    #[test]
    fn keeps_first_two_phrases() {
        let s = SignalSnapshot {
            macd_signal: CrossoverState::BullishCrossover,
            rsi_signal: RsiState::Oversold,
            trend: Trend::Up,
            volume_surge: true,
            ..SignalSnapshot::empty()
        };
        assert_eq!(rationale(&s), "MACD bullish crossover; RSI oversold");
    }

    #[test]
    fn trend_and_volume() {
        let s = SignalSnapshot {
            rsi_signal: RsiState::Weak,
            trend: Trend::Sideways,
            volume_surge: true,
            ..SignalSnapshot::empty()
        };
        assert_eq!(rationale(&s), "Trend: sideways; Volume surge");
    }

    #[test]
    fn bearish_alone() {
        let s = SignalSnapshot {
            macd_signal: CrossoverState::BearishCrossover,
            ..SignalSnapshot::empty()
        };
        assert_eq!(rationale(&s), "MACD bearish crossover");
    }
}
