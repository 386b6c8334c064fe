//! Scoring engine: composite score, horizon volatility, target band, risk
//! tier and rationale for every analyzed symbol, then ranking.
//!
//! The engine holds only immutable configuration; `score` is a pure function
//! of its inputs.

pub mod rationale;
pub mod subscore;
pub mod target;
pub mod volatility;

pub use rationale::rationale;
pub use subscore::{composite_score, ScoreInputs};
pub use target::{risk_tier, target_band, TargetBand};
pub use volatility::{VolatilityEstimate, VolatilityWindows};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

use crate::analysis::SymbolAnalysis;
use crate::data::sectors::SectorMap;
use crate::domain::{Horizon, ScoredEntry, ScoredUniverse};

pub const DEFAULT_ATR_PERIOD: usize = 14;

fn default_atr_period() -> usize {
    DEFAULT_ATR_PERIOD
}

/// Immutable scoring parameters. Weights and thresholds are constants; only
/// the volatility estimator windows are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub volatility_windows: VolatilityWindows,
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            volatility_windows: VolatilityWindows::default(),
            atr_period: DEFAULT_ATR_PERIOD,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
    sectors: SectorMap,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig, sectors: SectorMap) -> Self {
        Self { config, sectors }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn sectors(&self) -> &SectorMap {
        &self.sectors
    }

    /// Score one analyzed symbol.
    pub fn score_symbol(&self, analysis: &SymbolAnalysis, horizon: Horizon) -> ScoredEntry {
        let frame = &analysis.frame;
        let signals = &analysis.signals;

        let (mom_5, mom_20) = match frame.len().checked_sub(1) {
            Some(last) => (frame.mom_5[last], frame.mom_20[last]),
            None => (f64::NAN, f64::NAN),
        };
        let score = composite_score(&ScoreInputs::from_snapshot(signals, mom_5, mom_20));

        let window = self.config.volatility_windows.window(horizon);
        let vol = volatility::estimate(&frame.bars, window, self.config.atr_period);
        let band = target_band(signals.price, signals.resistance_20, vol.floored());

        debug!(
            symbol = %analysis.symbol,
            score,
            atr_pct = ?vol.atr_pct,
            return_std = ?vol.return_std,
            volatility = vol.value,
            "scored"
        );

        ScoredEntry {
            symbol: analysis.symbol.clone(),
            score,
            signals: signals.clone(),
            last_price: signals.price,
            target: band.map(|b| b.target),
            target_low: band.map(|b| b.low),
            target_high: band.map(|b| b.high),
            expected_return_pct: band.map(|b| b.expected_return_pct),
            volatility: vol.value,
            risk: risk_tier(score, vol.value),
            sector: self.sectors.sector(&analysis.symbol).to_string(),
            rationale: rationale(signals),
        }
    }

    /// Score every symbol, sort by descending score and cut the horizon's top-N.
    ///
    /// The sort is stable: equal scores keep input order.
    pub fn score(&self, analyses: &[SymbolAnalysis], horizon: Horizon) -> ScoredUniverse {
        let mut all: Vec<ScoredEntry> = analyses
            .iter()
            .map(|a| self.score_symbol(a, horizon))
            .collect();
        all.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let top = all.iter().take(horizon.top_n()).cloned().collect();
        ScoredUniverse { horizon, all, top }
    }
}
