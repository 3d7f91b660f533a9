//! Core types and statistics for the Sable factor pipeline.
//!
//! This crate provides the foundational pieces shared by every stage of the
//! pipeline: the validated price series, the factor matrix, score records,
//! the error taxonomy, and the statistical primitives (correlations, ranks,
//! quantiles) that the scorers are built on.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// The version of the sable-core crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod matrix;
pub mod score;
pub mod series;
pub mod stats;

pub use config::{
    FactorFamilies, LinearConfig, ModelConfig, PipelineConfig, SelectConfig,
};
pub use error::{Result, SableError};
pub use matrix::{FactorColumn, FactorMatrix, TargetSeries};
pub use score::{FactorScore, SelectedFactorSet};
pub use series::{FundamentalSnapshot, PriceBar, SeriesTable};
