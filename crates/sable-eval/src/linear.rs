//! Linear factor screening: IC, rank IC, monotonicity, stability.

use sable_core::{FactorMatrix, LinearConfig, TargetSeries, stats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Linear-stage metrics for one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScore {
    /// Pearson correlation of factor values and forward returns.
    pub ic: f64,
    /// Pearson correlation of their ranks (Spearman).
    pub rank_ic: f64,
    /// Quantile-bucket monotonicity in `[0, 1]`.
    pub monotonicity: f64,
    /// Rolling-IC stability in `[0, 1]`.
    pub stability: f64,
}

impl LinearScore {
    /// Fixed-weight linear composite:
    /// `|ic|*0.4 + |rank_ic|*0.3 + monotonicity*0.2 + stability*0.1`.
    pub fn composite(&self) -> f64 {
        self.ic.abs() * 0.4
            + self.rank_ic.abs() * 0.3
            + self.monotonicity * 0.2
            + self.stability * 0.1
    }
}

/// Scores every factor column against the target.
///
/// Pairs are aligned on jointly non-null indices. A factor with fewer than
/// `config.min_samples` aligned pairs is skipped entirely — absent from the
/// output, not scored as zero. Degenerate correlations (zero variance) map
/// to 0 per the scorer contract. Output order follows matrix column order.
pub fn screen(
    matrix: &FactorMatrix,
    target: &TargetSeries,
    config: &LinearConfig,
) -> Vec<(String, LinearScore)> {
    let mut out = Vec::new();

    for column in matrix.columns() {
        let (xs, ys) = align(column.values(), &target.values);
        if xs.len() < config.min_samples {
            debug!(
                factor = column.name(),
                aligned = xs.len(),
                required = config.min_samples,
                "skipping factor: insufficient aligned samples"
            );
            continue;
        }

        let score = LinearScore {
            ic: stats::pearson(&xs, &ys).unwrap_or(0.0),
            rank_ic: stats::spearman(&xs, &ys).unwrap_or(0.0),
            monotonicity: monotonicity(&xs, &ys, config),
            stability: stability(&xs, &ys, config),
        };
        out.push((column.name().to_string(), score));
    }

    out
}

/// Extracts the jointly non-null (factor, target) pairs in index order.
fn align(factor: &[Option<f64>], target: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (f, t) in factor.iter().zip(target) {
        if let (Some(f), Some(t)) = (f, t) {
            if f.is_finite() && t.is_finite() {
                xs.push(*f);
                ys.push(*t);
            }
        }
    }
    (xs, ys)
}

/// Quantile-bucket monotonicity.
///
/// Factor values are cut into `config.buckets` equal-frequency buckets
/// (duplicate quantile edges collapse); the score is the larger count of
/// consecutive non-decreasing or non-increasing bucket-mean transitions over
/// `bucket_count - 1`. Fewer than `config.min_buckets` surviving buckets
/// scores 0.
fn monotonicity(xs: &[f64], ys: &[f64], config: &LinearConfig) -> f64 {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Interior quantile edges; equal edges collapse into one.
    let mut edges: Vec<f64> = Vec::with_capacity(config.buckets - 1);
    for i in 1..config.buckets {
        let q = i as f64 / config.buckets as f64;
        if let Some(edge) = stats::quantile_sorted(&sorted, q) {
            if edges.last().is_none_or(|last| edge > *last) {
                edges.push(edge);
            }
        }
    }

    // Right-closed buckets: a value equal to an edge falls below it.
    let mut sums = vec![0.0; edges.len() + 1];
    let mut counts = vec![0usize; edges.len() + 1];
    for (&x, &y) in xs.iter().zip(ys) {
        let bucket = edges.iter().filter(|&&e| x > e).count();
        sums[bucket] += y;
        counts[bucket] += 1;
    }

    let means: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .filter(|&(_, &c)| c > 0)
        .map(|(&s, &c)| s / c as f64)
        .collect();

    if means.len() < config.min_buckets {
        return 0.0;
    }

    let mut non_decreasing = 0usize;
    let mut non_increasing = 0usize;
    for pair in means.windows(2) {
        if pair[1] >= pair[0] {
            non_decreasing += 1;
        }
        if pair[1] <= pair[0] {
            non_increasing += 1;
        }
    }

    non_decreasing.max(non_increasing) as f64 / (means.len() - 1) as f64
}

/// Rolling-IC stability.
///
/// ICs are computed over every width-`stability_window` window (step 1) of
/// the aligned pairs; the score is
/// `clamp(1 - std(ics) / (|mean(ics)| + eps), 0, 1)`. Fewer than
/// `config.min_stability_windows` finite window ICs scores 0 — insufficient
/// evidence, not undefined.
fn stability(xs: &[f64], ys: &[f64], config: &LinearConfig) -> f64 {
    let window = config.stability_window;
    if xs.len() <= window {
        return 0.0;
    }

    let mut ics = Vec::with_capacity(xs.len() - window);
    for end in window..xs.len() {
        let start = end - window;
        if let Some(ic) = stats::pearson(&xs[start..end], &ys[start..end]) {
            ics.push(ic);
        }
    }

    if ics.len() < config.min_stability_windows {
        return 0.0;
    }

    let mean = stats::mean(&ics).unwrap_or(0.0);
    let std = stats::sample_std(&ics).unwrap_or(0.0);
    (1.0 - std / (mean.abs() + config.stability_epsilon)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn matrix_with(name: &str, values: Vec<Option<f64>>) -> FactorMatrix {
        let mut matrix = FactorMatrix::new(values.len());
        matrix.insert(name, values).unwrap();
        matrix
    }

    fn target_from(values: Vec<Option<f64>>) -> TargetSeries {
        TargetSeries { horizon: 1, values }
    }

    #[test]
    fn test_perfectly_predictive_factor() {
        // Factor is a strictly increasing function of the target.
        let n = 200;
        let factor: Vec<Option<f64>> = (0..n).map(|i| Some(i as f64)).collect();
        let target: Vec<Option<f64>> = (0..n).map(|i| Some(i as f64 * 0.001)).collect();

        let matrix = matrix_with("perfect", factor);
        let scores = screen(&matrix, &target_from(target), &LinearConfig::default());
        assert_eq!(scores.len(), 1);

        let (_, score) = &scores[0];
        assert_relative_eq!(score.ic, 1.0, epsilon = 1e-9);
        assert_relative_eq!(score.rank_ic, 1.0, epsilon = 1e-9);
        assert_relative_eq!(score.monotonicity, 1.0);
        assert!(score.stability > 0.0);
    }

    #[test]
    fn test_insufficient_samples_skips_factor() {
        let factor: Vec<Option<f64>> = (0..200)
            .map(|i| if i < 190 { None } else { Some(i as f64) })
            .collect();
        let target: Vec<Option<f64>> = (0..200).map(|i| Some(i as f64)).collect();

        let matrix = matrix_with("sparse", factor);
        let scores = screen(&matrix, &target_from(target), &LinearConfig::default());
        assert!(scores.is_empty());
    }

    #[test]
    fn test_constant_factor_scores_zero_ic() {
        let factor: Vec<Option<f64>> = vec![Some(7.0); 100];
        let target: Vec<Option<f64>> = (0..100).map(|i| Some((i as f64).sin())).collect();

        let matrix = matrix_with("constant", factor);
        let scores = screen(&matrix, &target_from(target), &LinearConfig::default());
        let (_, score) = &scores[0];
        // Zero variance: correlations map to 0, never NaN.
        assert_relative_eq!(score.ic, 0.0);
        assert_relative_eq!(score.rank_ic, 0.0);
        assert_relative_eq!(score.monotonicity, 0.0);
    }

    #[test]
    fn test_monotonicity_range() {
        let n = 150;
        let xs: Vec<f64> = (0..n).map(|i| (i as f64 * 0.77).sin()).collect();
        let ys: Vec<f64> = (0..n).map(|i| (i as f64 * 0.31).cos()).collect();
        let m = monotonicity(&xs, &ys, &LinearConfig::default());
        assert!((0.0..=1.0).contains(&m));
    }

    #[test]
    fn test_monotonicity_perfectly_decreasing() {
        let xs: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let ys: Vec<f64> = (0..100).map(|i| -(i as f64)).collect();
        assert_relative_eq!(monotonicity(&xs, &ys, &LinearConfig::default()), 1.0);
    }

    #[test]
    fn test_stability_short_history_is_zero() {
        let xs: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let ys = xs.clone();
        assert_relative_eq!(stability(&xs, &ys, &LinearConfig::default()), 0.0);
    }

    #[test]
    fn test_screen_is_deterministic() {
        let n = 120;
        let factor: Vec<Option<f64>> = (0..n).map(|i| Some((i as f64 * 0.3).sin())).collect();
        let target: Vec<Option<f64>> = (0..n).map(|i| Some((i as f64 * 0.2).cos())).collect();
        let matrix = matrix_with("wave", factor);
        let target = target_from(target);

        let first = screen(&matrix, &target, &LinearConfig::default());
        let second = screen(&matrix, &target, &LinearConfig::default());
        assert_eq!(first, second);
    }
}
