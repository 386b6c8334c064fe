//! Criterion benchmarks for the per-symbol hot paths.
//!
//! Benchmarks:
//! 1. Indicator frame computation over growing histories
//! 2. Single-symbol scoring (snapshot, volatility, target band)
//! 3. Universe scoring and ranking

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use signalrank_core::domain::{Bar, Horizon};
use signalrank_core::{analyze_bars, IndicatorFrame, ScoringEngine};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000.0 + (i % 500) as f64 * 1000.0,
            }
        })
        .collect()
}

// ── 1. Indicator Frame ───────────────────────────────────────────────

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_frame");
    for n in [250, 1000, 5000] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| IndicatorFrame::compute(black_box(bars)))
        });
    }
    group.finish();
}

// ── 2. Single Symbol ─────────────────────────────────────────────────

fn bench_score_symbol(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let analysis = analyze_bars("BENCH", &make_bars(1000));
    c.bench_function("score_symbol_yearly", |b| {
        b.iter(|| engine.score_symbol(black_box(&analysis), Horizon::Yearly))
    });
}

// ── 3. Universe ──────────────────────────────────────────────────────

fn bench_universe(c: &mut Criterion) {
    let engine = ScoringEngine::default();
    let analyses: Vec<_> = (0..200)
        .map(|i| analyze_bars(format!("S{i}"), &make_bars(300 + i)))
        .collect();
    c.bench_function("score_universe_200", |b| {
        b.iter(|| engine.score(black_box(&analyses), Horizon::Monthly))
    });
}

criterion_group!(benches, bench_frame, bench_score_symbol, bench_universe);
criterion_main!(benches);
