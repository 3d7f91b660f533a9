//! Model-based factor scoring on top of [`RandomForest`].
//!
//! One forest over the whole matrix yields normalized importances; the
//! top-importance factors then get single-factor refits (explained variance
//! per factor) and pairwise interaction fits on product columns.

use ndarray::{Array1, Array2};
use sable_core::{FactorMatrix, ModelConfig, TargetSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::forest::{ForestConfig, RandomForest};

/// Model-stage metrics for one factor or interaction term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    /// Normalized forest importance. Zero for interaction terms.
    pub importance: f64,
    /// In-sample R² of a forest fit on this term alone, clamped at 0.
    /// Zero for factors outside the top-importance refit set.
    pub single_r2: f64,
    /// Whether this is a pairwise product term rather than a raw factor.
    pub interaction: bool,
}

impl ModelScore {
    /// Contribution to the blended final score: raw factors contribute their
    /// importance, interaction terms a discounted single-fit R².
    pub fn component(&self) -> f64 {
        if self.interaction {
            0.8 * self.single_r2
        } else {
            self.importance
        }
    }
}

/// Scores the matrix with a seeded random forest.
///
/// Rows are restricted to indices where the target is defined; remaining
/// factor nulls are imputed as 0. With fewer than `config.min_samples` usable
/// rows, or when the fit itself is degenerate, the model stage yields no
/// scores and the caller falls back to linear-only blending.
pub fn score(
    matrix: &FactorMatrix,
    target: &TargetSeries,
    config: &ModelConfig,
) -> Vec<(String, ModelScore)> {
    let rows: Vec<usize> = target
        .values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.filter(|t| t.is_finite()).map(|_| i))
        .collect();

    if rows.len() < config.min_samples || matrix.width() == 0 {
        debug!(
            horizon = target.horizon,
            usable = rows.len(),
            required = config.min_samples,
            "skipping model stage: insufficient target samples"
        );
        return Vec::new();
    }

    let names: Vec<String> = matrix.names().map(str::to_string).collect();
    let x = design_matrix(matrix, &rows);
    let y = Array1::from_iter(rows.iter().map(|&i| target.values[i].unwrap_or(0.0)));

    let full_config = ForestConfig {
        trees: config.trees,
        max_depth: config.max_depth,
        min_split: config.min_split,
        seed: config.seed,
    };
    let forest = match RandomForest::fit(&x, &y, &full_config) {
        Ok(forest) => forest,
        Err(error) => {
            warn!(horizon = target.horizon, %error, "model stage fit failed");
            return Vec::new();
        }
    };

    let importances = forest.importances();
    let mut out: Vec<(String, ModelScore)> = names
        .iter()
        .zip(importances)
        .map(|(name, &importance)| {
            (
                name.clone(),
                ModelScore {
                    importance,
                    single_r2: 0.0,
                    interaction: false,
                },
            )
        })
        .collect();

    // Factor indices ranked by importance, ties kept in matrix order.
    let mut ranked: Vec<usize> = (0..names.len()).collect();
    ranked.sort_by(|&a, &b| {
        importances[b]
            .partial_cmp(&importances[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top: Vec<usize> = ranked.into_iter().take(config.top_k).collect();

    let single_config = ForestConfig {
        trees: config.single_trees,
        ..full_config
    };
    for &index in &top {
        let column = x.column(index).insert_axis(ndarray::Axis(1)).to_owned();
        match RandomForest::fit(&column, &y, &single_config) {
            Ok(single) => {
                out[index].1.single_r2 = single.r2(&column, &y).max(0.0);
            }
            Err(error) => {
                debug!(factor = names[index].as_str(), %error, "single-factor fit failed");
            }
        }
    }

    let interaction_config = ForestConfig {
        trees: config.interaction_trees,
        ..full_config
    };
    let span = &top[..top.len().min(config.interaction_span)];
    for (pos, &a) in span.iter().enumerate() {
        for &b in &span[pos + 1..] {
            let product = Array2::from_shape_fn((rows.len(), 1), |(r, _)| {
                x[(r, a)] * x[(r, b)]
            });
            let Ok(fitted) = RandomForest::fit(&product, &y, &interaction_config) else {
                continue;
            };
            out.push((
                format!("{}_x_{}", names[a], names[b]),
                ModelScore {
                    importance: 0.0,
                    single_r2: fitted.r2(&product, &y).max(0.0),
                    interaction: true,
                },
            ));
        }
    }

    out
}

/// Dense design matrix over the selected rows, nulls imputed as 0.
fn design_matrix(matrix: &FactorMatrix, rows: &[usize]) -> Array2<f64> {
    let mut x = Array2::zeros((rows.len(), matrix.width()));
    for (c, column) in matrix.columns().iter().enumerate() {
        let values = column.values();
        for (r, &i) in rows.iter().enumerate() {
            if let Some(v) = values[i] {
                if v.is_finite() {
                    x[(r, c)] = v;
                }
            }
        }
    }
    x
}
