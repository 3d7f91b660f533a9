//! The `Factor` trait.

use sable_core::SeriesTable;

/// A stateless, windowed factor over a validated price series.
///
/// Implementations must be thread-safe (`Send + Sync`); the pipeline itself
/// is single-threaded, but callers may evaluate independent instruments on
/// separate threads.
///
/// # Contract
///
/// - `compute` returns exactly `series.len()` values;
/// - entry `t` depends only on bars `0..=t` (no look-ahead);
/// - the first `lookback() - 1` entries are null;
/// - a ratio with a degenerate denominator is null, never `inf`/`NaN`.
pub trait Factor: Send + Sync {
    /// Unique column name, e.g. `momentum_20`.
    fn name(&self) -> &str;

    /// Number of bars needed to produce the first non-null entry.
    fn lookback(&self) -> usize;

    /// Computes the factor column for the whole series.
    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>>;
}
