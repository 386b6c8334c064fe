//! Screen run configuration (TOML).
//!
//! ```toml
//! [screen]
//! horizon = "weekly"
//! data_dir = "data/prices"
//! output_dir = "reports"
//! universe = "universe.toml"
//! parallel = true
//!
//! [volatility_windows]
//! weekly = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use signalrank_core::domain::Horizon;
use signalrank_core::scoring::{ScoringConfig, VolatilityWindows, DEFAULT_ATR_PERIOD};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

fn default_parallel() -> bool {
    true
}

/// The `[screen]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSection {
    #[serde(default)]
    pub horizon: Horizon,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Sector universe TOML; without it every price file in `data_dir` is screened.
    #[serde(default)]
    pub universe: Option<PathBuf>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for ScreenSection {
    fn default() -> Self {
        Self {
            horizon: Horizon::default(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            universe: None,
            parallel: default_parallel(),
        }
    }
}

/// Complete screen configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub screen: ScreenSection,
    #[serde(default)]
    pub volatility_windows: VolatilityWindows,
}

impl ScreenConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every volatility window must hold at least two returns.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for horizon in Horizon::ALL {
            let window = self.volatility_windows.window(horizon);
            if window < 2 {
                return Err(ConfigError::Invalid(format!(
                    "volatility window for {horizon} must be >= 2 (got {window})"
                )));
            }
        }
        Ok(())
    }

    pub fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            volatility_windows: self.volatility_windows,
            atr_period: DEFAULT_ATR_PERIOD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ScreenConfig::from_toml("").unwrap();
        assert_eq!(config.screen.horizon, Horizon::Daily);
        assert_eq!(config.screen.data_dir, PathBuf::from("data"));
        assert!(config.screen.parallel);
        assert!(config.screen.universe.is_none());
        assert_eq!(config.volatility_windows, VolatilityWindows::default());
    }

    #[test]
    fn parses_full_config() {
        let config = ScreenConfig::from_toml(
            r#"
[screen]
horizon = "biquarterly"
data_dir = "prices"
output_dir = "out"
universe = "universe.toml"
parallel = false

[volatility_windows]
biquarterly = 100
"#,
        )
        .unwrap();
        assert_eq!(config.screen.horizon, Horizon::Biquarterly);
        assert_eq!(config.screen.universe, Some(PathBuf::from("universe.toml")));
        assert!(!config.screen.parallel);
        assert_eq!(config.scoring().volatility_windows.window(Horizon::Biquarterly), 100);
        assert_eq!(config.scoring().volatility_windows.window(Horizon::Yearly), 240);
    }

    #[test]
    fn unknown_horizon_is_rejected() {
        let err = ScreenConfig::from_toml("[screen]\nhorizon = \"hourly\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn degenerate_window_is_rejected() {
        let err = ScreenConfig::from_toml("[volatility_windows]\ndaily = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file() {
        let err = ScreenConfig::from_file(Path::new("/nonexistent/screen.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
