//! Domain types for SignalRank

pub mod bar;
pub mod horizon;
pub mod scored;
pub mod signal;

pub use bar::Bar;
pub use horizon::{Horizon, HorizonParseError};
pub use scored::{RiskTier, ScoredEntry, ScoredUniverse};
pub use signal::{CrossoverState, Recommendation, RsiState, SignalSnapshot, Trend};

/// Symbol type alias
pub type Symbol = String;
