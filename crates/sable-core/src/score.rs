//! Score records produced by the evaluation stages.

use serde::{Deserialize, Serialize};

/// The complete evaluation record for one factor at one horizon.
///
/// `final_score` is a deterministic function of the other fields: the fixed
/// linear weighting blended with the model importance under the adaptive
/// weights recorded on the struct. No hidden randomness enters beyond the
/// model scorer's configured seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Unique factor name (matrix column name, or `a_x_b` for interactions).
    pub factor_name: String,
    /// Pearson information coefficient against the forward return.
    pub ic: f64,
    /// Spearman (rank) information coefficient.
    pub rank_ic: f64,
    /// Quantile-bucket monotonicity in `[0, 1]`.
    pub monotonicity: f64,
    /// Rolling-IC temporal stability in `[0, 1]`.
    pub stability: f64,
    /// Model-based component in `[0, 1]` (importance, or down-weighted
    /// interaction R²).
    pub model_importance: f64,
    /// Weight applied to the linear component.
    pub linear_weight: f64,
    /// Weight applied to the model component.
    pub model_weight: f64,
    /// Blended ranking score.
    pub final_score: f64,
    /// True for pairwise interaction terms, which are reported but never
    /// selected.
    pub interaction: bool,
}

/// The ordered, decorrelated set of factors chosen for one horizon.
///
/// Built once per run from the ranked score list; pairwise absolute
/// correlation between any two members is below the configured threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFactorSet {
    /// The horizon the selection was made for.
    pub horizon: usize,
    /// Selected factor names, best first.
    pub factors: Vec<String>,
}

impl SelectedFactorSet {
    /// Number of selected factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Whether a factor was selected.
    pub fn contains(&self, name: &str) -> bool {
        self.factors.iter().any(|f| f == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_set_contains() {
        let set = SelectedFactorSet {
            horizon: 5,
            factors: vec!["momentum_20".to_string(), "rsi_14".to_string()],
        };
        assert_eq!(set.len(), 2);
        assert!(set.contains("rsi_14"));
        assert!(!set.contains("macd"));
    }
}
