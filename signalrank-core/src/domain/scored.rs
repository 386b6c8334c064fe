//! Scored output: one entry per symbol, ranked into a universe.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::horizon::Horizon;
use super::signal::SignalSnapshot;

/// Coarse risk classification from score and unfloored volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::High => "High",
            RiskTier::Medium => "Medium",
            RiskTier::Low => "Low",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One symbol's final scoring output.
///
/// `target_low <= target <= target_high` whenever all three are defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    pub symbol: String,
    /// Composite score in [0, 100].
    pub score: f64,
    pub signals: SignalSnapshot,
    pub last_price: Option<f64>,
    pub target: Option<f64>,
    pub target_low: Option<f64>,
    pub target_high: Option<f64>,
    pub expected_return_pct: Option<f64>,
    /// Unfloored volatility used for the risk tier.
    pub volatility: f64,
    pub risk: RiskTier,
    pub sector: String,
    pub rationale: String,
}

/// Every scored symbol sorted by descending score, plus the horizon-sized prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUniverse {
    pub horizon: Horizon,
    pub all: Vec<ScoredEntry>,
    pub top: Vec<ScoredEntry>,
}

impl ScoredUniverse {
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&ScoredEntry> {
        self.all.iter().find(|e| e.symbol == symbol)
    }
}
