//! Adaptive blending of linear and model scores.

use sable_core::FactorScore;
use sable_eval::{LinearScore, ModelScore};

/// Weights when the model component carries real signal.
const MODEL_LED: (f64, f64) = (0.4, 0.6);
/// Weights when the model component is weak or absent.
const LINEAR_LED: (f64, f64) = (0.8, 0.2);
/// Model component above this switches to model-led weighting.
const MODEL_SIGNAL_THRESHOLD: f64 = 0.1;

/// Merges both scorer outputs into one ranked list.
///
/// The union of names is taken: linear-scored factors in matrix order first,
/// then model-only terms (interactions) in the order the model scorer emitted
/// them. A side that did not score a name contributes 0. Per factor, weights
/// adapt to the model component's strength, and the result is sorted by
/// `final_score` descending with a stable sort, so equal scores keep their
/// column order.
pub fn combine(
    linear: &[(String, LinearScore)],
    model: &[(String, ModelScore)],
) -> Vec<FactorScore> {
    let mut out: Vec<FactorScore> = linear
        .iter()
        .map(|(name, score)| {
            let model_score = model
                .iter()
                .find(|(model_name, _)| model_name == name)
                .map(|(_, s)| *s);
            blend(name, Some(*score), model_score)
        })
        .collect();

    for (name, score) in model {
        if linear.iter().any(|(linear_name, _)| linear_name == name) {
            continue;
        }
        out.push(blend(name, None, Some(*score)));
    }

    out.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}

fn blend(name: &str, linear: Option<LinearScore>, model: Option<ModelScore>) -> FactorScore {
    let linear_component = linear.map_or(0.0, |s| s.composite());
    let model_component = model.map_or(0.0, |s| s.component());

    let (linear_weight, model_weight) = if model_component > MODEL_SIGNAL_THRESHOLD {
        MODEL_LED
    } else {
        LINEAR_LED
    };

    FactorScore {
        factor_name: name.to_string(),
        ic: linear.map_or(0.0, |s| s.ic),
        rank_ic: linear.map_or(0.0, |s| s.rank_ic),
        monotonicity: linear.map_or(0.0, |s| s.monotonicity),
        stability: linear.map_or(0.0, |s| s.stability),
        model_importance: model_component,
        linear_weight,
        model_weight,
        final_score: linear_weight * linear_component + model_weight * model_component,
        interaction: model.is_some_and(|s| s.interaction),
    }
}
