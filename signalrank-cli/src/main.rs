//! SignalRank CLI: screen a universe of price files, or inspect one symbol.
//!
//! Commands:
//! - `screen`: score every symbol for a horizon, print the top-N, write the export
//! - `inspect`: print the latest signal snapshot of one symbol as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use signalrank_core::data::{SectorMap, Universe};
use signalrank_core::domain::{Horizon, ScoredUniverse};
use signalrank_core::{analyze, ScoringEngine};
use signalrank_runner::data_loader::load_symbol;
use signalrank_runner::{export_screen, load_universe, screen_loaded, ScreenConfig};

#[derive(Parser)]
#[command(
    name = "signalrank",
    about = "SignalRank CLI: technical screening and ranking across horizons"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score every symbol and print the horizon's top-N.
    Screen {
        /// Path to a TOML screen config. Flags below override it.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory of {SYMBOL}.csv / {SYMBOL}.parquet price files.
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Sector universe TOML; also restricts the symbols screened.
        #[arg(long)]
        universe: Option<PathBuf>,

        /// Horizon: daily, weekly, monthly, quarterly, biquarterly, yearly.
        #[arg(long)]
        mode: Option<Horizon>,

        /// Output directory for universe.json and top.csv.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Analyze symbols on the current thread only.
        #[arg(long, default_value_t = false)]
        sequential: bool,
    },
    /// Print the latest signal snapshot of one symbol as JSON.
    Inspect {
        /// Symbol (file stem in the data directory).
        symbol: String,

        /// Directory of price files. Defaults to ./data.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Screen {
            config,
            data_dir,
            universe,
            mode,
            output_dir,
            sequential,
        } => {
            let mut cfg = match config {
                Some(path) => ScreenConfig::from_file(&path)?,
                None => ScreenConfig::default(),
            };
            if let Some(dir) = data_dir {
                cfg.screen.data_dir = dir;
            }
            if let Some(path) = universe {
                cfg.screen.universe = Some(path);
            }
            if let Some(horizon) = mode {
                cfg.screen.horizon = horizon;
            }
            if let Some(dir) = output_dir {
                cfg.screen.output_dir = dir;
            }
            if sequential {
                cfg.screen.parallel = false;
            }
            run_screen(&cfg)
        }
        Commands::Inspect { symbol, data_dir } => run_inspect(&symbol, &data_dir),
    }
}

fn run_screen(cfg: &ScreenConfig) -> Result<()> {
    let section = &cfg.screen;
    let universe = section
        .universe
        .as_deref()
        .map(Universe::from_file)
        .transpose()
        .context("failed to load universe")?;

    let tickers = universe.as_ref().map(|u| u.all_tickers());
    let report = load_universe(&section.data_dir, tickers.as_deref())
        .with_context(|| format!("failed to load prices from {}", section.data_dir.display()))?;
    info!(
        requested = report.requested(),
        loaded = report.loaded.len(),
        horizon = %section.horizon,
        "starting screen"
    );

    let sectors = universe.as_ref().map(SectorMap::from).unwrap_or_default();
    let engine = ScoringEngine::new(cfg.scoring(), sectors);
    let outcome = screen_loaded(report, section.horizon, &engine, section.parallel);

    print_top(&outcome.universe);
    for skipped in &outcome.skipped {
        eprintln!("Skipped {}: {}", skipped.symbol, skipped.reason);
    }

    let run_dir = export_screen(&outcome, &section.output_dir).context("failed to write export")?;
    println!();
    println!("Export saved to: {}", run_dir.display());
    Ok(())
}

fn run_inspect(symbol: &str, data_dir: &Path) -> Result<()> {
    let df = load_symbol(data_dir, symbol)?;
    let analysis = analyze(symbol, &df).with_context(|| format!("failed to analyze {symbol}"))?;
    println!("{}", serde_json::to_string_pretty(&analysis.signals)?);
    Ok(())
}

fn fmt_opt(value: Option<f64>, dp: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.dp$}"))
}

fn print_top(universe: &ScoredUniverse) {
    println!();
    println!(
        "=== Top {} of {} ({}) ===",
        universe.top.len(),
        universe.len(),
        universe.horizon
    );
    println!(
        "{:<4} {:<14} {:>6} {:<11} {:>10} {:>10} {:>8} {:>8} {:<6} {:<14} Rationale",
        "#", "Symbol", "Score", "Signal", "Price", "Target", "Exp%", "Vol", "Risk", "Sector"
    );
    println!("{}", "-".repeat(120));
    for (i, e) in universe.top.iter().enumerate() {
        let rec = e
            .signals
            .recommendation
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<4} {:<14} {:>6.1} {:<11} {:>10} {:>10} {:>8} {:>8.4} {:<6} {:<14} {}",
            i + 1,
            e.symbol,
            e.score,
            rec,
            fmt_opt(e.last_price, 2),
            fmt_opt(e.target, 2),
            fmt_opt(e.expected_return_pct, 2),
            e.volatility,
            e.risk,
            e.sector,
            e.rationale
        );
    }
}
