//! End-to-end evaluation pipeline.
//!
//! One [`Pipeline::run`] call takes a raw bar sequence through validation,
//! factor computation, both scoring stages, blending, and selection, and
//! returns one [`HorizonReport`] per configured horizon. The run is
//! deterministic: identical bars and configuration (including the model
//! seed) reproduce identical reports.

use sable_core::{
    FactorScore, FundamentalSnapshot, PipelineConfig, PriceBar, Result, SelectedFactorSet,
};
use sable_eval::{linear, model, targets};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The full evaluation output for one forward-return horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonReport {
    /// The horizon, in trading days.
    pub horizon: usize,
    /// Every scored factor and interaction term, best first.
    pub scores: Vec<FactorScore>,
    /// The decorrelated subset admitted for this horizon.
    pub selected: SelectedFactorSet,
}

/// The factor evaluation pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given configuration.
    pub const fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with.
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the full evaluation over one instrument's history.
    ///
    /// When the model stage declines to score (too little history, or a
    /// degenerate fit), blending proceeds linear-only rather than failing
    /// the run.
    ///
    /// # Errors
    ///
    /// Validation errors from [`SeriesTable::validate`]: too few bars for
    /// the enabled factor families, out-of-order or duplicate dates, or
    /// malformed bar fields.
    ///
    /// [`SeriesTable::validate`]: sable_core::SeriesTable::validate
    pub fn run(
        &self,
        bars: Vec<PriceBar>,
        fundamentals: Option<&FundamentalSnapshot>,
    ) -> Result<Vec<HorizonReport>> {
        let bank = sable_factors::build_bank(&self.config.families);
        let window = sable_factors::minimum_window(&bank);
        let series = sable_core::SeriesTable::validate(bars, window)?;

        let matrix = sable_factors::compute_matrix(&series, &bank, fundamentals);
        info!(
            bars = series.len(),
            factors = matrix.width(),
            "factor matrix computed"
        );

        let mut reports = Vec::with_capacity(self.config.horizons.len());
        for &horizon in &self.config.horizons {
            let target = targets::build_target(&series, horizon);
            let linear_scores = linear::screen(&matrix, &target, &self.config.linear);
            let model_scores = model::score(&matrix, &target, &self.config.model);

            let scores = sable_select::combine(&linear_scores, &model_scores);
            let selected = sable_select::select(&scores, &matrix, horizon, &self.config.select);
            info!(
                horizon,
                scored = scores.len(),
                selected = selected.len(),
                "horizon evaluated"
            );
            reports.push(HorizonReport {
                horizon,
                scores,
                selected,
            });
        }

        Ok(reports)
    }
}
