//! Error types for the Sable pipeline.
//!
//! The taxonomy distinguishes fatal data errors, which abort the run for a
//! single instrument, from recoverable conditions: a factor or scorer that
//! cannot produce a result is simply omitted from the output, and a failed
//! model fit degrades the run to linear-only scoring.

use thiserror::Error;

/// The main error type for Sable operations.
#[derive(Debug, Error)]
pub enum SableError {
    /// The input series is shorter than the minimum window required by the
    /// enabled factor bank.
    #[error("insufficient data: {actual} bars, need at least {required}")]
    InsufficientData {
        /// Minimum number of bars required.
        required: usize,
        /// Number of bars actually supplied.
        actual: usize,
    },

    /// A bar contains a non-finite or out-of-domain value in a required field.
    #[error("malformed bar at index {index}: field `{field}`")]
    MalformedRow {
        /// Position of the offending bar in the input sequence.
        index: usize,
        /// The field that failed coercion.
        field: &'static str,
    },

    /// Bar timestamps are not in ascending order.
    #[error("bars out of chronological order at index {index}")]
    OutOfOrder {
        /// Position of the first bar that breaks the ordering.
        index: usize,
    },

    /// Two bars share the same timestamp.
    #[error("duplicate timestamp at index {index}")]
    DuplicateTimestamp {
        /// Position of the second occurrence.
        index: usize,
    },

    /// A factor column did not match the series length.
    #[error("column `{name}` has length {actual}, expected {expected}")]
    ShapeMismatch {
        /// Name of the rejected column.
        name: String,
        /// Series length the column must match.
        expected: usize,
        /// Length the column actually had.
        actual: usize,
    },

    /// A factor name was inserted twice into the same matrix.
    #[error("duplicate factor column `{name}`")]
    DuplicateColumn {
        /// The repeated column name.
        name: String,
    },

    /// The tree-ensemble fit failed on degenerate input.
    #[error("model fit failed: {0}")]
    ModelFit(String),
}

/// A specialized Result type for Sable operations.
pub type Result<T> = std::result::Result<T, SableError>;
