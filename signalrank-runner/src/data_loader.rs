//! Price-file loading for a screen run.
//!
//! Each symbol is one file in the data directory: `{SYMBOL}.csv` or
//! `{SYMBOL}.parquet` (CSV wins when both exist). Files are read with the
//! polars lazy readers and handed on as raw frames; coercion into bars
//! happens per symbol in the analysis step.
//!
//! A symbol whose file is missing or unreadable is recorded as a failure and
//! never aborts the batch. Only an unreadable data directory is fatal.

use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use signalrank_core::domain::Bar;

use crate::screen::SkippedSymbol;

const EXTENSIONS: [&str; 2] = ["csv", "parquet"];

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("read data directory {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no price file for '{symbol}' in {dir}")]
    NotFound { symbol: String, dir: String },

    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: PolarsError,
    },
}

/// One symbol's raw price frame.
#[derive(Debug, Clone)]
pub struct SymbolFrame {
    pub symbol: String,
    pub frame: DataFrame,
}

/// Outcome of loading a batch of symbols.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Loaded frames, in requested order.
    pub loaded: Vec<SymbolFrame>,
    /// Symbols that could not be loaded, with the reason.
    pub failures: Vec<SkippedSymbol>,
}

impl LoadReport {
    pub fn requested(&self) -> usize {
        self.loaded.len() + self.failures.len()
    }
}

/// Rank of a price-file extension (CSV before Parquet), matched
/// case-insensitively.
fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?;
    EXTENSIONS.iter().position(|x| ext.eq_ignore_ascii_case(x))
}

/// Path of the price file for `symbol`, if one exists. The extension may be
/// lower- or upper-case.
pub fn price_file(dir: &Path, symbol: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .flat_map(|ext| [ext.to_string(), ext.to_ascii_uppercase()])
        .map(|ext| dir.join(format!("{symbol}.{ext}")))
        .find(|p| p.is_file())
}

/// Every price file in `dir`, keyed by symbol (file stem).
pub fn discover_price_files(dir: &Path) -> Result<BTreeMap<String, PathBuf>, LoadError> {
    let dir_err = |source| LoadError::Directory {
        path: dir.display().to_string(),
        source,
    };
    let mut files: BTreeMap<String, (usize, PathBuf)> = BTreeMap::new();
    for entry in std::fs::read_dir(dir).map_err(dir_err)? {
        let path = entry.map_err(dir_err)?.path();
        let Some(rank) = extension_rank(&path) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        match files.get(&stem) {
            Some((kept, _)) if *kept <= rank => {}
            _ => {
                files.insert(stem, (rank, path));
            }
        }
    }
    Ok(files.into_iter().map(|(stem, (_, path))| (stem, path)).collect())
}

/// Every symbol with a price file in `dir`, sorted and deduplicated.
pub fn discover_symbols(dir: &Path) -> Result<Vec<String>, LoadError> {
    Ok(discover_price_files(dir)?.into_keys().collect())
}

/// Read one price file into a frame.
pub fn read_price_file(path: &Path) -> Result<DataFrame, LoadError> {
    let read_err = |source| LoadError::Read {
        path: path.display().to_string(),
        source,
    };
    let is_parquet = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));

    let lazy = if is_parquet {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default()).map_err(read_err)?
    } else {
        LazyCsvReader::new(path)
            .with_has_header(true)
            .finish()
            .map_err(read_err)?
    };
    lazy.collect().map_err(read_err)
}

pub fn load_symbol(dir: &Path, symbol: &str) -> Result<DataFrame, LoadError> {
    let path = price_file(dir, symbol).ok_or_else(|| LoadError::NotFound {
        symbol: symbol.to_string(),
        dir: dir.display().to_string(),
    })?;
    read_price_file(&path)
}

/// Load every requested symbol from `dir`. With no explicit list, every
/// price file in the directory is loaded from the path it was found at.
pub fn load_universe(dir: &Path, symbols: Option<&[&str]>) -> Result<LoadReport, LoadError> {
    let requested: Vec<(String, Option<PathBuf>)> = match symbols {
        Some(list) => list
            .iter()
            .map(|s| (s.to_string(), price_file(dir, s)))
            .collect(),
        None => discover_price_files(dir)?
            .into_iter()
            .map(|(symbol, path)| (symbol, Some(path)))
            .collect(),
    };

    let mut report = LoadReport::default();
    for (symbol, path) in requested {
        let loaded = match path {
            Some(path) => read_price_file(&path),
            None => Err(LoadError::NotFound {
                symbol: symbol.clone(),
                dir: dir.display().to_string(),
            }),
        };
        match loaded {
            Ok(frame) => {
                debug!(symbol = %symbol, rows = frame.height(), "loaded price file");
                report.loaded.push(SymbolFrame { symbol, frame });
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "skipping symbol");
                report.failures.push(SkippedSymbol {
                    symbol,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(report)
}

/// Deterministic BLAKE3 hash over every symbol's bars.
///
/// Symbols are hashed in sorted order so the hash does not depend on load
/// or thread scheduling order.
pub fn dataset_hash<'a, I>(series: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a [Bar])>,
{
    let mut sorted: Vec<(&str, &[Bar])> = series.into_iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let mut hasher = blake3::Hasher::new();
    for (symbol, bars) in sorted {
        hasher.update(symbol.as_bytes());
        for bar in bars {
            hasher.update(bar.date.to_string().as_bytes());
            hasher.update(&bar.open.to_le_bytes());
            hasher.update(&bar.high.to_le_bytes());
            hasher.update(&bar.low.to_le_bytes());
            hasher.update(&bar.close.to_le_bytes());
            hasher.update(&bar.volume.to_le_bytes());
        }
    }
    hasher.finalize().to_hex().to_string()
}
