//! Greedy decorrelated factor selection.

use sable_core::{FactorMatrix, FactorScore, SelectConfig, SelectedFactorSet, stats};
use tracing::debug;

/// Walks the ranked scores best-first, admitting each factor whose absolute
/// correlation with every already-admitted factor stays below
/// `config.corr_threshold`, until `config.max_factors` are admitted.
///
/// Interaction terms are reported in the ranking but never selected, and a
/// scored name with no matrix column (nothing to correlate against) is
/// skipped rather than trusted blindly. Correlations are Pearson over the
/// jointly non-null rows of the two raw columns; a degenerate correlation
/// counts as 0 (no evidence of redundancy) and never blocks admission.
pub fn select(
    ranked: &[FactorScore],
    matrix: &FactorMatrix,
    horizon: usize,
    config: &SelectConfig,
) -> SelectedFactorSet {
    let mut factors: Vec<String> = Vec::new();
    let mut admitted: Vec<&[Option<f64>]> = Vec::new();

    for score in ranked {
        if factors.len() >= config.max_factors {
            break;
        }
        if score.interaction {
            continue;
        }
        let Some(candidate) = matrix.column(&score.factor_name) else {
            debug!(
                factor = score.factor_name.as_str(),
                "skipping scored factor with no matrix column"
            );
            continue;
        };

        let correlated = admitted
            .iter()
            .any(|kept| paired_correlation(candidate, kept).abs() >= config.corr_threshold);
        if correlated {
            continue;
        }

        factors.push(score.factor_name.clone());
        admitted.push(candidate);
    }

    SelectedFactorSet { horizon, factors }
}

/// Pearson correlation over the jointly non-null rows, 0 when degenerate.
pub fn paired_correlation(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for (x, y) in a.iter().zip(b) {
        if let (Some(x), Some(y)) = (x, y) {
            xs.push(*x);
            ys.push(*y);
        }
    }
    stats::pearson(&xs, &ys).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(name: &str, final_score: f64, interaction: bool) -> FactorScore {
        FactorScore {
            factor_name: name.to_string(),
            ic: 0.0,
            rank_ic: 0.0,
            monotonicity: 0.0,
            stability: 0.0,
            model_importance: 0.0,
            linear_weight: 0.8,
            model_weight: 0.2,
            final_score,
            interaction,
        }
    }

    fn matrix() -> FactorMatrix {
        let n = 50;
        let mut matrix = FactorMatrix::new(n);
        let base: Vec<Option<f64>> = (0..n).map(|i| Some(i as f64)).collect();
        // Perfectly correlated with base.
        let shadow: Vec<Option<f64>> = (0..n).map(|i| Some(2.0 * i as f64 + 1.0)).collect();
        let independent: Vec<Option<f64>> = (0..n).map(|i| Some((i as f64 * 2.3).sin())).collect();
        matrix.insert("base", base).unwrap();
        matrix.insert("shadow", shadow).unwrap();
        matrix.insert("independent", independent).unwrap();
        matrix
    }

    #[test]
    fn test_correlated_runner_up_is_rejected() {
        let ranked = vec![
            scored("base", 0.9, false),
            scored("shadow", 0.8, false),
            scored("independent", 0.7, false),
        ];
        let set = select(&ranked, &matrix(), 5, &SelectConfig::default());

        assert_eq!(set.horizon, 5);
        assert_eq!(set.factors, vec!["base", "independent"]);
    }

    #[test]
    fn test_max_factors_caps_selection() {
        let ranked = vec![
            scored("base", 0.9, false),
            scored("independent", 0.7, false),
        ];
        let config = SelectConfig {
            max_factors: 1,
            ..SelectConfig::default()
        };
        let set = select(&ranked, &matrix(), 1, &config);
        assert_eq!(set.factors, vec!["base"]);
    }

    #[test]
    fn test_interactions_and_unknown_names_are_skipped() {
        let ranked = vec![
            scored("base_x_shadow", 0.95, true),
            scored("not_in_matrix", 0.9, false),
            scored("base", 0.8, false),
        ];
        let set = select(&ranked, &matrix(), 1, &SelectConfig::default());
        assert_eq!(set.factors, vec!["base"]);
    }

    #[test]
    fn test_paired_correlation_uses_joint_rows() {
        // Offset warmups: only the overlap is compared.
        let a = vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let b = vec![Some(9.0), Some(2.0), Some(4.0), Some(6.0), None];
        let corr = paired_correlation(&a, &b);
        assert!((corr - 1.0).abs() < 1e-12);

        // No overlap at all: no evidence, correlation 0.
        let c = vec![Some(1.0), None, None];
        let d = vec![None, Some(1.0), Some(2.0)];
        assert_eq!(paired_correlation(&c, &d), 0.0);
    }

    #[test]
    fn test_empty_ranking_selects_nothing() {
        let set = select(&[], &matrix(), 20, &SelectConfig::default());
        assert!(set.is_empty());
        assert_eq!(set.horizon, 20);
    }
}
