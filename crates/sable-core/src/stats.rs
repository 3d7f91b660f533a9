//! Statistical primitives shared by the scorers.
//!
//! Conventions, applied uniformly across the pipeline:
//! - standard deviation is the sample estimator (N-1 denominator);
//! - ties receive the average of the ranks they span;
//! - quantiles interpolate linearly between order statistics;
//! - degenerate inputs (too few points, zero variance) yield `None`, and the
//!   caller decides the policy. No function here manufactures a sentinel.

/// Variance below this threshold is treated as zero when guarding divisions.
pub const MIN_STD_THRESHOLD: f64 = 1e-10;

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator). `None` below two points.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Pearson correlation coefficient.
///
/// `None` when fewer than two pairs are supplied or either side has zero
/// variance; the caller maps that to a skip or a zero as its contract
/// requires.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }

    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= MIN_STD_THRESHOLD || var_y <= MIN_STD_THRESHOLD {
        return None;
    }
    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// Ranks of `values` starting at 0, with ties assigned their average rank.
pub fn ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut indexed: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut out = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j < n && (indexed[j].1 - indexed[i].1).abs() < f64::EPSILON {
            j += 1;
        }
        let avg_rank = (i + j - 1) as f64 / 2.0;
        for k in i..j {
            out[indexed[k].0] = avg_rank;
        }
        i = j;
    }
    out
}

/// Spearman rank correlation: Pearson correlation of average-tie ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    pearson(&ranks(&x[..n]), &ranks(&y[..n]))
}

/// Quantile `q` in `[0, 1]` of an ascending-sorted slice, interpolating
/// linearly between order statistics. `None` for an empty slice.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
