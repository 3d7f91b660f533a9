//! Factor effectiveness scoring.
//!
//! Two scorers run over the same factor matrix and target:
//!
//! - [`linear`] computes per-factor IC, rank IC, quantile-bucket
//!   monotonicity, and rolling-IC stability;
//! - [`model`] fits a seeded random-forest regressor over the whole matrix
//!   and extracts normalized importances, single-factor R², and pairwise
//!   interaction scores.
//!
//! [`targets`] builds the forward-return series both scorers predict.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod forest;
pub mod linear;
pub mod model;
pub mod targets;

pub use forest::{ForestConfig, RandomForest};
pub use linear::LinearScore;
pub use model::ModelScore;
pub use targets::{build_target, build_targets};
