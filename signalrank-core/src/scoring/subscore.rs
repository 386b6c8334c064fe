//! Sub-score tables and the weighted composite.
//!
//! Each signal maps to a sub-score in [0, 1] through fixed thresholds; the
//! composite is the weighted sum, clamped to [0, 100].

use crate::domain::{CrossoverState, SignalSnapshot, Trend};

pub const WEIGHT_RSI: f64 = 20.0;
pub const WEIGHT_CROSSOVER: f64 = 20.0;
pub const WEIGHT_TREND: f64 = 20.0;
pub const WEIGHT_VOLUME: f64 = 15.0;
pub const WEIGHT_MOMENTUM: f64 = 15.0;
pub const WEIGHT_BAND: f64 = 10.0;

/// Oscillator value assumed when the series is too short to define one.
pub const NEUTRAL_RSI: f64 = 50.0;
/// Band position assumed when the bands are undefined.
pub const NEUTRAL_BAND_POSITION: f64 = 0.5;

pub fn rsi_subscore(rsi: f64) -> f64 {
    if rsi < 30.0 {
        1.0
    } else if rsi < 45.0 {
        0.8
    } else if rsi < 55.0 {
        0.6
    } else if rsi < 70.0 {
        0.3
    } else {
        0.1
    }
}

pub fn crossover_subscore(state: CrossoverState) -> f64 {
    match state {
        CrossoverState::BullishCrossover => 1.0,
        CrossoverState::BearishCrossover => 0.0,
        CrossoverState::Neutral | CrossoverState::Unknown => 0.4,
    }
}

pub fn trend_subscore(trend: Trend) -> f64 {
    match trend {
        Trend::Up => 1.0,
        Trend::Down => 0.0,
        Trend::Sideways | Trend::Unknown => 0.4,
    }
}

pub fn volume_subscore(surge: bool) -> f64 {
    if surge {
        1.0
    } else {
        0.3
    }
}

/// Mean of the two momentum ratios, undefined components counted as 0.
pub fn mean_momentum(short: f64, long: f64) -> f64 {
    let z = |v: f64| if v.is_finite() { v } else { 0.0 };
    (z(short) + z(long)) / 2.0
}

pub fn momentum_subscore(momentum: f64) -> f64 {
    if momentum > 0.05 {
        1.0
    } else if momentum > 0.01 {
        0.7
    } else if momentum > -0.01 {
        0.4
    } else {
        0.1
    }
}

pub fn band_subscore(bb_pos: f64) -> f64 {
    if bb_pos < 0.2 {
        1.0
    } else if bb_pos < 0.4 {
        0.8
    } else if bb_pos < 0.6 {
        0.5
    } else if bb_pos < 0.8 {
        0.2
    } else {
        0.0
    }
}

/// The six inputs of the composite, with undefined values already defaulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub rsi: f64,
    pub crossover: CrossoverState,
    pub trend: Trend,
    pub volume_surge: bool,
    pub momentum: f64,
    pub bb_pos: f64,
}

impl ScoreInputs {
    /// Gather inputs from a snapshot and the latest momentum ratios.
    pub fn from_snapshot(signals: &SignalSnapshot, mom_5: f64, mom_20: f64) -> Self {
        Self {
            rsi: signals.rsi.unwrap_or(NEUTRAL_RSI),
            crossover: signals.macd_signal,
            trend: signals.trend,
            volume_surge: signals.volume_surge,
            momentum: mean_momentum(mom_5, mom_20),
            bb_pos: signals.bb_pos.unwrap_or(NEUTRAL_BAND_POSITION),
        }
    }
}

/// Weighted composite in [0, 100].
pub fn composite_score(inputs: &ScoreInputs) -> f64 {
    let total = WEIGHT_RSI * rsi_subscore(inputs.rsi)
        + WEIGHT_CROSSOVER * crossover_subscore(inputs.crossover)
        + WEIGHT_TREND * trend_subscore(inputs.trend)
        + WEIGHT_VOLUME * volume_subscore(inputs.volume_surge)
        + WEIGHT_MOMENTUM * momentum_subscore(inputs.momentum)
        + WEIGHT_BAND * band_subscore(inputs.bb_pos);
    total.clamp(0.0, 100.0)
}
