//! Pipeline configuration.
//!
//! One explicit configuration object is threaded through the whole run; the
//! computation itself holds no global state, so independent instruments can
//! be evaluated in parallel by the caller with per-run configs (including
//! per-run model seeds).

use serde::{Deserialize, Serialize};

/// Which factor families the bank computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorFamilies {
    /// Momentum and reversal lookbacks.
    pub momentum: bool,
    /// Rolling return volatility and volatility ratios.
    pub volatility: bool,
    /// Moving-average distances and Bollinger bands.
    pub moving_average: bool,
    /// RSI and MACD.
    pub oscillator: bool,
    /// Volume ratios and return/volume correlation.
    pub volume: bool,
    /// ATR and rolling price position.
    pub range: bool,
}

impl Default for FactorFamilies {
    fn default() -> Self {
        Self {
            momentum: true,
            volatility: true,
            moving_average: true,
            oscillator: true,
            volume: true,
            range: true,
        }
    }
}

/// Tuning for the linear scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinearConfig {
    /// Minimum aligned (factor, target) pairs; below this the factor is
    /// skipped, not scored as zero.
    pub min_samples: usize,
    /// Number of equal-frequency buckets for the monotonicity test.
    pub buckets: usize,
    /// Minimum buckets surviving edge collapse; fewer scores 0.
    pub min_buckets: usize,
    /// Width of the rolling IC window for the stability test.
    pub stability_window: usize,
    /// Minimum finite rolling ICs; fewer scores 0 (insufficient evidence).
    pub min_stability_windows: usize,
    /// Denominator guard in the stability ratio.
    pub stability_epsilon: f64,
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            min_samples: 30,
            buckets: 5,
            min_buckets: 3,
            stability_window: 60, // ~3 months of daily data
            min_stability_windows: 5,
            stability_epsilon: 1e-3,
        }
    }
}

/// Tuning for the model scorer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Seed for the forest's bootstrap sampling. Fixed per run, so repeated
    /// runs on identical input reproduce identical importances.
    pub seed: u64,
    /// Trees in the full-matrix forest.
    pub trees: usize,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum samples to attempt a split.
    pub min_split: usize,
    /// Minimum target-aligned rows; below this the scorer returns an empty
    /// result and the pipeline falls back to linear-only scoring.
    pub min_samples: usize,
    /// Factors (by importance) given a standalone single-factor fit.
    pub top_k: usize,
    /// Top factors considered for pairwise interaction terms.
    pub interaction_span: usize,
    /// Trees in each single-factor fit.
    pub single_trees: usize,
    /// Trees in each interaction fit.
    pub interaction_trees: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            trees: 100,
            max_depth: 10,
            min_split: 2,
            min_samples: 50,
            top_k: 10,
            interaction_span: 6,
            single_trees: 50,
            interaction_trees: 30,
        }
    }
}

/// Tuning for the greedy factor selector.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Maximum factors admitted.
    pub max_factors: usize,
    /// Absolute pairwise correlation cap between admitted factors.
    pub corr_threshold: f64,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            max_factors: 12,
            corr_threshold: 0.7,
        }
    }
}

/// Complete configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Forward-return horizons, in trading days.
    pub horizons: Vec<usize>,
    /// Enabled factor families.
    pub families: FactorFamilies,
    /// Linear scorer tuning.
    pub linear: LinearConfig,
    /// Model scorer tuning.
    pub model: ModelConfig,
    /// Selector tuning.
    pub select: SelectConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            horizons: vec![1, 5, 20],
            families: FactorFamilies::default(),
            linear: LinearConfig::default(),
            model: ModelConfig::default(),
            select: SelectConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.horizons, vec![1, 5, 20]);
        assert_eq!(config.select.max_factors, 12);
        assert!(config.select.corr_threshold > 0.0 && config.select.corr_threshold < 1.0);
        assert_eq!(config.model.seed, 42);
        assert!(config.families.momentum);
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.horizons, config.horizons);
        assert_eq!(back.model.seed, config.model.seed);
    }
}
