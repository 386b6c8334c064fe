//! Signal snapshot: the latest-bar interpretation of an indicator frame.
//!
//! Every state that can be undefined carries an explicit `Unknown` variant,
//! so "not enough history" never collapses into "neutral".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative state of the 14-period oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiState {
    Oversold,
    Overbought,
    Weak,
    Strong,
    Neutral,
    Unknown,
}

impl RsiState {
    /// `<30` oversold, `>70` overbought, `<45` weak, `>55` strong, else neutral.
    pub fn classify(rsi: Option<f64>) -> Self {
        match rsi {
            None => RsiState::Unknown,
            Some(v) if v < 30.0 => RsiState::Oversold,
            Some(v) if v > 70.0 => RsiState::Overbought,
            Some(v) if v < 45.0 => RsiState::Weak,
            Some(v) if v > 55.0 => RsiState::Strong,
            Some(_) => RsiState::Neutral,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RsiState::Oversold => "oversold",
            RsiState::Overbought => "overbought",
            RsiState::Weak => "weak",
            RsiState::Strong => "strong",
            RsiState::Neutral => "neutral",
            RsiState::Unknown => "unknown",
        }
    }
}

/// Crossover state of the trend-following oscillator against its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverState {
    BullishCrossover,
    BearishCrossover,
    Neutral,
    Unknown,
}

impl CrossoverState {
    /// Classify from the previous and current crossover distance.
    ///
    /// Both values must be defined; otherwise the state is `Unknown`.
    pub fn classify(prev: Option<f64>, curr: Option<f64>) -> Self {
        match (prev, curr) {
            (Some(p), Some(c)) if p < 0.0 && c > 0.0 => CrossoverState::BullishCrossover,
            (Some(p), Some(c)) if p > 0.0 && c < 0.0 => CrossoverState::BearishCrossover,
            (Some(_), Some(_)) => CrossoverState::Neutral,
            _ => CrossoverState::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CrossoverState::BullishCrossover => "bullish_crossover",
            CrossoverState::BearishCrossover => "bearish_crossover",
            CrossoverState::Neutral => "neutral",
            CrossoverState::Unknown => "unknown",
        }
    }
}

/// Trend label derived from moving-average ordering and slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Sideways,
    #[default]
    Unknown,
}

impl Trend {
    /// Label one bar from its fast/slow SMA and the fast SMA's one-bar slope.
    pub fn classify(fast: f64, slow: f64, fast_slope: f64) -> Self {
        if fast.is_nan() || slow.is_nan() {
            Trend::Unknown
        } else if fast > slow && fast_slope > 0.0 {
            Trend::Up
        } else if fast < slow && fast_slope < 0.0 {
            Trend::Down
        } else {
            Trend::Sideways
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Sideways => "sideways",
            Trend::Unknown => "unknown",
        }
    }
}

/// Coarse buy/sell/hold hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
}

impl Recommendation {
    /// Map a 0–4 buy-vote count to a recommendation.
    pub fn from_votes(votes: u8) -> Self {
        match votes {
            0 => Recommendation::Sell,
            1 => Recommendation::Hold,
            2 => Recommendation::Buy,
            _ => Recommendation::StrongBuy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG BUY",
            Recommendation::Buy => "BUY",
            Recommendation::Hold => "HOLD",
            Recommendation::Sell => "SELL",
        }
    }
}

macro_rules! display_via_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(RsiState, CrossoverState, Trend, Recommendation);

/// Interpretation of the last (and second-to-last) indicator row.
///
/// Recomputed on every run. An empty snapshot (no rows) means "no opinion".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSnapshot {
    pub rsi: Option<f64>,
    pub rsi_signal: RsiState,
    pub macd_diff: Option<f64>,
    pub macd_signal: CrossoverState,
    pub price: Option<f64>,
    pub above_sma20: bool,
    pub above_sma50: bool,
    pub trend: Trend,
    pub volume: Option<f64>,
    pub vol_avg_20: Option<f64>,
    pub volume_surge: bool,
    pub bb_pos: Option<f64>,
    pub support_20: Option<f64>,
    pub resistance_20: Option<f64>,
    pub recommendation: Option<Recommendation>,
}

impl SignalSnapshot {
    pub fn empty() -> Self {
        Self {
            rsi: None,
            rsi_signal: RsiState::Unknown,
            macd_diff: None,
            macd_signal: CrossoverState::Unknown,
            price: None,
            above_sma20: false,
            above_sma50: false,
            trend: Trend::Unknown,
            volume: None,
            vol_avg_20: None,
            volume_surge: false,
            bb_pos: None,
            support_20: None,
            resistance_20: None,
            recommendation: None,
        }
    }

    /// True for the snapshot of a zero-row frame.
    pub fn is_empty(&self) -> bool {
        self.recommendation.is_none()
    }

    /// Number of buy votes: bullish crossover, oscillator oversold-or-strong,
    /// trend up, volume surge.
    pub fn buy_votes(&self) -> u8 {
        let votes = [
            self.macd_signal == CrossoverState::BullishCrossover,
            matches!(self.rsi_signal, RsiState::Oversold | RsiState::Strong),
            self.trend == Trend::Up,
            self.volume_surge,
        ];
        votes.iter().filter(|v| **v).count() as u8
    }
}

impl Default for SignalSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_state_thresholds() {
        assert_eq!(RsiState::classify(Some(25.0)), RsiState::Oversold);
        assert_eq!(RsiState::classify(Some(30.0)), RsiState::Weak);
        assert_eq!(RsiState::classify(Some(44.9)), RsiState::Weak);
        assert_eq!(RsiState::classify(Some(50.0)), RsiState::Neutral);
        assert_eq!(RsiState::classify(Some(55.0)), RsiState::Neutral);
        assert_eq!(RsiState::classify(Some(60.0)), RsiState::Strong);
        assert_eq!(RsiState::classify(Some(70.0)), RsiState::Strong);
        assert_eq!(RsiState::classify(Some(72.0)), RsiState::Overbought);
        assert_eq!(RsiState::classify(None), RsiState::Unknown);
    }

    #[test]
    fn crossover_sign_flips() {
        assert_eq!(
            CrossoverState::classify(Some(-0.1), Some(0.2)),
            CrossoverState::BullishCrossover
        );
        assert_eq!(
            CrossoverState::classify(Some(0.1), Some(-0.2)),
            CrossoverState::BearishCrossover
        );
        assert_eq!(
            CrossoverState::classify(Some(0.1), Some(0.2)),
            CrossoverState::Neutral
        );
        // Touching zero is not a flip.
        assert_eq!(
            CrossoverState::classify(Some(0.0), Some(0.2)),
            CrossoverState::Neutral
        );
    }

    #[test]
    fn crossover_unknown_is_distinct_from_neutral() {
        assert_eq!(CrossoverState::classify(None, Some(0.2)), CrossoverState::Unknown);
        assert_eq!(CrossoverState::classify(Some(-0.2), None), CrossoverState::Unknown);
        assert_ne!(CrossoverState::Unknown, CrossoverState::Neutral);
    }

    #[test]
    fn trend_rules() {
        assert_eq!(Trend::classify(f64::NAN, 10.0, 1.0), Trend::Unknown);
        assert_eq!(Trend::classify(11.0, 10.0, 0.5), Trend::Up);
        assert_eq!(Trend::classify(9.0, 10.0, -0.5), Trend::Down);
        assert_eq!(Trend::classify(11.0, 10.0, -0.5), Trend::Sideways);
        // Undefined slope on the first defined bar falls through to sideways.
        assert_eq!(Trend::classify(11.0, 10.0, f64::NAN), Trend::Sideways);
    }

    #[test]
    fn recommendation_from_votes() {
        assert_eq!(Recommendation::from_votes(0), Recommendation::Sell);
        assert_eq!(Recommendation::from_votes(1), Recommendation::Hold);
        assert_eq!(Recommendation::from_votes(2), Recommendation::Buy);
        assert_eq!(Recommendation::from_votes(3), Recommendation::StrongBuy);
        assert_eq!(Recommendation::from_votes(4), Recommendation::StrongBuy);
    }

    #[test]
    fn serialized_names_match_report_columns() {
        let json = serde_json::to_string(&Recommendation::StrongBuy).unwrap();
        assert_eq!(json, "\"STRONG BUY\"");
        let json = serde_json::to_string(&CrossoverState::BullishCrossover).unwrap();
        assert_eq!(json, "\"bullish_crossover\"");
        let json = serde_json::to_string(&Trend::Sideways).unwrap();
        assert_eq!(json, "\"sideways\"");
    }

    #[test]
    fn empty_snapshot_has_no_opinion() {
        let s = SignalSnapshot::empty();
        assert!(s.is_empty());
        assert_eq!(s.buy_votes(), 0);
        assert_eq!(s.macd_signal, CrossoverState::Unknown);
    }
}
