//! Universe configuration and the symbol → sector lookup.
//!
//! The universe is a TOML file with a `[sectors]` table mapping each sector
//! name to its member tickers. The same file drives both the symbol list and
//! the sector column of the scored output.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Sector reported for symbols the universe does not mention.
pub const UNKNOWN_SECTOR: &str = "Unknown";

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("read universe file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse universe TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The complete universe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Universe {
    pub sectors: BTreeMap<String, Vec<String>>,
}

impl Universe {
    /// Load a universe from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, UniverseError> {
        let content = std::fs::read_to_string(path).map_err(|source| UniverseError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a universe from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, UniverseError> {
        Ok(toml::from_str(content)?)
    }

    /// All tickers across all sectors, deduplicated in first-seen order.
    pub fn all_tickers(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.sectors
            .values()
            .flat_map(|tickers| tickers.iter().map(|t| t.as_str()))
            .filter(|t| seen.insert(*t))
            .collect()
    }

    pub fn ticker_count(&self) -> usize {
        self.all_tickers().len()
    }
}

/// Symbol → sector lookup. Never fails: unknown symbols map to `"Unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorMap {
    by_symbol: HashMap<String, String>,
}

impl SectorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, sector: impl Into<String>) {
        self.by_symbol.insert(symbol.into(), sector.into());
    }

    pub fn sector(&self, symbol: &str) -> &str {
        self.by_symbol
            .get(symbol)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_SECTOR)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}

impl From<&Universe> for SectorMap {
    /// A ticker listed under several sectors keeps the first (alphabetical) one.
    fn from(universe: &Universe) -> Self {
        let mut map = SectorMap::new();
        for (sector, tickers) in &universe.sectors {
            for ticker in tickers {
                map.by_symbol
                    .entry(ticker.clone())
                    .or_insert_with(|| sector.clone());
            }
        }
        map
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for SectorMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut map = SectorMap::new();
        for (symbol, sector) in iter {
            map.insert(symbol, sector);
        }
        map
    }
}
