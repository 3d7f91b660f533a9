#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # sable
//!
//! Factor engineering and effectiveness evaluation for daily bar data.
//!
//! sable is an umbrella crate that re-exports the sable sub-crates and adds
//! the [`Pipeline`] that wires them together: validate a bar series, compute
//! a bank of windowed technical factors, score each factor's predictive
//! power against forward returns, blend the scores, and greedily pick a
//! decorrelated subset per horizon.
//!
//! ## Quick start
//!
//! ```ignore
//! use sable::{Pipeline, PipelineConfig};
//!
//! # fn main() -> sable::Result<()> {
//! let bars = load_daily_bars("600000.SH")?;
//! let reports = Pipeline::new(PipelineConfig::default()).run(bars, None)?;
//!
//! for report in &reports {
//!     println!("h={}: {:?}", report.horizon, report.selected.factors);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate organization
//!
//! - [`core`] - Validated series, factor matrix, score records, statistics
//! - [`factors`] - The factor bank (momentum, volatility, oscillators, ...)
//! - [`eval`] - Linear and model-based factor scoring
//! - [`select`] - Score blending and decorrelated selection
//!
//! ## Architecture
//!
//! The pipeline is a straight line through the sub-crates:
//!
//! 1. **Series validation** rejects short, unordered, or malformed history
//! 2. **The factor bank** turns the series into a nullable factor matrix
//! 3. **Scorers** measure each factor against forward returns (IC, rank IC,
//!    monotonicity, stability, forest importance)
//! 4. **Blending and selection** rank the factors and admit a decorrelated
//!    subset per horizon

/// Version information for the sable crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;

/// Core types and statistics.
///
/// Re-exports [`sable_core`]: the validated [`SeriesTable`], the
/// [`FactorMatrix`], score records, configuration, the error taxonomy, and
/// the shared statistical primitives.
pub mod core {
    pub use sable_core::*;
}

/// Factor implementations.
///
/// Re-exports [`sable_factors`]: the [`Factor`] trait, the family registry,
/// and matrix assembly. Factors are pure functions of the window ending at
/// the current bar and never look ahead.
pub mod factors {
    pub use sable_factors::*;
}

/// Factor effectiveness scoring.
///
/// Re-exports [`sable_eval`]: forward-return targets, the linear scorer
/// (IC, rank IC, monotonicity, stability), and the model scorer built on a
/// seeded random forest.
pub mod eval {
    pub use sable_eval::*;
}

/// Score blending and factor selection.
///
/// Re-exports [`sable_select`]: adaptive blending of linear and model scores
/// into one ranking, and greedy correlation-capped selection over it.
pub mod select {
    pub use sable_select::*;
}

// Top-level re-exports for convenience.
pub use pipeline::{HorizonReport, Pipeline};
pub use sable_core::{
    FactorMatrix, FactorScore, FundamentalSnapshot, PipelineConfig, PriceBar, Result, SableError,
    SelectedFactorSet, SeriesTable,
};
pub use sable_factors::Factor;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use sable::prelude::*;
/// ```
pub mod prelude {
    pub use crate::pipeline::{HorizonReport, Pipeline};
    pub use crate::{Factor, FactorScore, PipelineConfig, SelectedFactorSet};
    pub use crate::{Result, SableError};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_factor(_factor: &dyn Factor) {}
        let _result: Result<()> = Ok(());
        let _config = PipelineConfig::default();
    }
}
