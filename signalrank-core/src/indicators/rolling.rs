//! Trailing-window helpers shared by the rolling indicators.
//!
//! Semantics follow a "minimum observations" rule: a window produces a value
//! only when it holds at least `min_periods` finite inputs; NaN inputs are
//! skipped rather than poisoning the window. Setting `min_periods == window`
//! gives the strict full-window behaviour (any NaN in the window → NaN).

/// Apply `reduce` to the finite values of each trailing window.
pub fn rolling_apply<F>(values: &[f64], window: usize, min_periods: usize, reduce: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window == 0 {
        return result;
    }
    let min_periods = min_periods.max(1);
    let mut buf = Vec::with_capacity(window);

    for i in 0..n {
        let start = (i + 1).saturating_sub(window);
        buf.clear();
        buf.extend(values[start..=i].iter().copied().filter(|v| v.is_finite()));
        if buf.len() >= min_periods {
            result[i] = reduce(&buf);
        }
    }

    result
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divide by N).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Sample standard deviation (divide by N-1). Undefined below two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
