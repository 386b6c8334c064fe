//! SignalRank Runner: universe screening on top of `signalrank-core`.
//!
//! This crate provides:
//! - TOML screen configuration
//! - Price-file loading (CSV/Parquet) with per-symbol failure reporting
//! - Parallel per-symbol analysis with failure isolation, then scoring
//! - JSON/CSV export with a run manifest and dataset hash

pub mod config;
pub mod data_loader;
pub mod export;
pub mod screen;

pub use config::{ConfigError, ScreenConfig, ScreenSection};
pub use data_loader::{load_universe, LoadError, LoadReport, SymbolFrame};
pub use export::{export_screen, ExportError, ScreenManifest, ScreenReport};
pub use screen::{screen_loaded, screen_universe, ScreenOutcome, SkippedSymbol};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<ScreenConfig>();
        assert_sync::<ScreenConfig>();
    }

    #[test]
    fn symbol_frame_is_send_sync() {
        assert_send::<SymbolFrame>();
        assert_sync::<SymbolFrame>();
    }

    #[test]
    fn screen_outcome_is_send_sync() {
        assert_send::<ScreenOutcome>();
        assert_sync::<ScreenOutcome>();
        assert_send::<ScreenReport>();
        assert_sync::<ScreenReport>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<LoadError>();
        assert_sync::<LoadError>();
        assert_send::<ExportError>();
        assert_sync::<ExportError>();
    }
}
