//! SignalRank Core: indicator engine, signal derivation, scoring engine.
//!
//! This crate contains the numeric heart of the screener:
//! - Domain types (bars, horizons, signal snapshots, scored entries)
//! - Indicators and the per-symbol indicator frame
//! - Latest-bar signal snapshot
//! - Composite scoring, horizon-aware volatility, target band and risk tier
//!
//! Everything here is a pure function of the supplied bars and configuration.

pub mod analysis;
pub mod data;
pub mod domain;
pub mod frame;
pub mod indicators;
pub mod scoring;
pub mod signals;

pub use analysis::{analyze, analyze_bars, SymbolAnalysis};
pub use frame::IndicatorFrame;
pub use scoring::{ScoringConfig, ScoringEngine};
pub use signals::signals;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the runner moves across rayon workers
    /// is Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::SignalSnapshot>();
        require_sync::<domain::SignalSnapshot>();
        require_send::<domain::ScoredEntry>();
        require_sync::<domain::ScoredEntry>();
        require_send::<domain::ScoredUniverse>();
        require_sync::<domain::ScoredUniverse>();

        // Analysis and scoring
        require_send::<IndicatorFrame>();
        require_sync::<IndicatorFrame>();
        require_send::<SymbolAnalysis>();
        require_sync::<SymbolAnalysis>();
        require_send::<ScoringEngine>();
        require_sync::<ScoringEngine>();

        // Errors
        require_send::<data::FrameError>();
        require_sync::<data::FrameError>();
    }
}
