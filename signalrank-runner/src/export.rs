//! Export of a screen run: JSON universe with manifest, CSV of the top-N.
//!
//! Layout under the output directory:
//! - `{horizon}/{date}/universe.json`: manifest plus the full scored universe
//! - `{horizon}/{date}/top.csv`: the top-N slice with report columns
//!
//! The JSON carries a `schema_version`; newer versions are rejected on load.
//! Figures are rounded only here (score 1 dp, expected return 2 dp,
//! volatility 4 dp); ranking always uses unrounded scores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use signalrank_core::domain::{Horizon, ScoredEntry, ScoredUniverse};

use crate::screen::{ScreenOutcome, SkippedSymbol};

pub const SCHEMA_VERSION: u32 = 1;
pub const UNIVERSE_FILE: &str = "universe.json";
pub const TOP_FILE: &str = "top.csv";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("unsupported schema version {found} (max supported: {max})")]
    UnsupportedSchema { found: u32, max: u32 },
}

/// Provenance of one screen run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenManifest {
    pub schema_version: u32,
    pub horizon: Horizon,
    pub generated_at: DateTime<Utc>,
    pub scored: usize,
    pub top: usize,
    pub skipped: Vec<SkippedSymbol>,
    pub dataset_hash: String,
}

/// The persisted JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenReport {
    pub manifest: ScreenManifest,
    pub universe: ScoredUniverse,
}

impl ScreenReport {
    pub fn new(outcome: &ScreenOutcome, generated_at: DateTime<Utc>) -> Self {
        Self {
            manifest: ScreenManifest {
                schema_version: SCHEMA_VERSION,
                horizon: outcome.horizon(),
                generated_at,
                scored: outcome.universe.len(),
                top: outcome.universe.top.len(),
                skipped: outcome.skipped.clone(),
                dataset_hash: outcome.dataset_hash.clone(),
            },
            universe: outcome.universe.clone(),
        }
    }
}

/// Round to `dp` decimal places.
pub fn round_to(value: f64, dp: i32) -> f64 {
    let factor = 10f64.powi(dp);
    (value * factor).round() / factor
}

fn opt(value: Option<f64>, dp: i32) -> String {
    value.map(|v| round_to(v, dp).to_string()).unwrap_or_default()
}

pub fn export_json(report: &ScreenReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Parse a persisted report, rejecting newer schema versions.
pub fn import_json(json: &str) -> Result<ScreenReport, ExportError> {
    let report: ScreenReport = serde_json::from_str(json)?;
    if report.manifest.schema_version > SCHEMA_VERSION {
        return Err(ExportError::UnsupportedSchema {
            found: report.manifest.schema_version,
            max: SCHEMA_VERSION,
        });
    }
    Ok(report)
}

/// Top-N table as CSV, one row per entry in rank order.
pub fn export_top_csv(entries: &[ScoredEntry]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "rank",
        "symbol",
        "score",
        "last_price",
        "target",
        "target_low",
        "target_high",
        "expected_return_pct",
        "volatility",
        "risk",
        "sector",
        "recommendation",
        "rsi",
        "macd_signal",
        "trend",
        "volume",
        "vol_avg_20",
        "bb_pos",
        "rationale",
    ])?;

    for (i, e) in entries.iter().enumerate() {
        let s = &e.signals;
        wtr.write_record([
            (i + 1).to_string(),
            e.symbol.clone(),
            round_to(e.score, 1).to_string(),
            opt(e.last_price, 2),
            opt(e.target, 2),
            opt(e.target_low, 2),
            opt(e.target_high, 2),
            opt(e.expected_return_pct, 2),
            round_to(e.volatility, 4).to_string(),
            e.risk.to_string(),
            e.sector.clone(),
            s.recommendation.map(|r| r.to_string()).unwrap_or_default(),
            opt(s.rsi, 2),
            s.macd_signal.to_string(),
            s.trend.to_string(),
            opt(s.volume, 0),
            opt(s.vol_avg_20, 0),
            opt(s.bb_pos, 4),
            e.rationale.clone(),
        ])?;
    }

    let data = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8(data)?)
}

fn write_file(path: &Path, content: &str) -> Result<(), ExportError> {
    std::fs::write(path, content).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Write the export for `outcome` stamped with `generated_at`.
///
/// Returns the run directory.
pub fn export_screen_at(
    outcome: &ScreenOutcome,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<PathBuf, ExportError> {
    let run_dir = output_dir
        .join(outcome.horizon().as_str())
        .join(generated_at.date_naive().to_string());
    std::fs::create_dir_all(&run_dir).map_err(|source| ExportError::Io {
        path: run_dir.display().to_string(),
        source,
    })?;

    let report = ScreenReport::new(outcome, generated_at);
    write_file(&run_dir.join(UNIVERSE_FILE), &export_json(&report)?)?;
    write_file(&run_dir.join(TOP_FILE), &export_top_csv(&outcome.universe.top)?)?;

    info!(dir = %run_dir.display(), "wrote screen export");
    Ok(run_dir)
}

pub fn export_screen(outcome: &ScreenOutcome, output_dir: &Path) -> Result<PathBuf, ExportError> {
    export_screen_at(outcome, output_dir, Utc::now())
}

/// Load the report from a run directory written by [`export_screen`].
pub fn load_report(run_dir: &Path) -> Result<ScreenReport, ExportError> {
    let path = run_dir.join(UNIVERSE_FILE);
    let json = std::fs::read_to_string(&path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    import_json(&json)
}
