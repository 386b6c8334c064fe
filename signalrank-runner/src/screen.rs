//! Universe screening: per-symbol analysis with failure isolation, then scoring.
//!
//! Symbols are independent, so the analysis step runs on rayon when
//! `parallel` is set. Output order always equals input order, which keeps the
//! stable tie order of the ranking independent of thread scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use signalrank_core::domain::{Horizon, ScoredUniverse};
use signalrank_core::{analyze, ScoringEngine, SymbolAnalysis};

use crate::data_loader::{dataset_hash, LoadReport, SymbolFrame};

/// A symbol left out of the scored universe, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: String,
}

/// Scored universe plus the symbols that were dropped on the way.
#[derive(Debug, Clone)]
pub struct ScreenOutcome {
    pub universe: ScoredUniverse,
    pub skipped: Vec<SkippedSymbol>,
    /// BLAKE3 hash over the bars of every scored symbol.
    pub dataset_hash: String,
}

impl ScreenOutcome {
    pub fn horizon(&self) -> Horizon {
        self.universe.horizon
    }
}

fn analyze_one(input: &SymbolFrame) -> Result<SymbolAnalysis, SkippedSymbol> {
    analyze(input.symbol.clone(), &input.frame).map_err(|e| SkippedSymbol {
        symbol: input.symbol.clone(),
        reason: e.to_string(),
    })
}

/// Analyze and score every input frame. A symbol whose frame cannot be
/// analyzed is dropped and reported in `skipped`; it never stops the others.
pub fn screen_universe(
    inputs: &[SymbolFrame],
    horizon: Horizon,
    engine: &ScoringEngine,
    parallel: bool,
) -> ScreenOutcome {
    let results: Vec<Result<SymbolAnalysis, SkippedSymbol>> = if parallel {
        inputs.par_iter().map(analyze_one).collect()
    } else {
        inputs.iter().map(analyze_one).collect()
    };

    let mut analyses = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for result in results {
        match result {
            Ok(a) => analyses.push(a),
            Err(s) => {
                warn!(symbol = %s.symbol, reason = %s.reason, "dropping symbol from universe");
                skipped.push(s);
            }
        }
    }

    let hash = dataset_hash(
        analyses
            .iter()
            .map(|a| (a.symbol.as_str(), a.frame.bars.as_slice())),
    );
    let universe = engine.score(&analyses, horizon);
    info!(
        horizon = %horizon,
        scored = universe.len(),
        top = universe.top.len(),
        skipped = skipped.len(),
        "screen complete"
    );

    ScreenOutcome {
        universe,
        skipped,
        dataset_hash: hash,
    }
}

/// Screen a load report: load failures are carried into `skipped` ahead of
/// analysis failures.
pub fn screen_loaded(
    report: LoadReport,
    horizon: Horizon,
    engine: &ScoringEngine,
    parallel: bool,
) -> ScreenOutcome {
    let mut outcome = screen_universe(&report.loaded, horizon, engine, parallel);
    let mut skipped = report.failures;
    skipped.append(&mut outcome.skipped);
    outcome.skipped = skipped;
    outcome
}
