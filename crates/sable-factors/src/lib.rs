//! The Sable factor bank.
//!
//! Every factor is a pure function of the window ending at index `t`: it
//! never reads past `t`, produces nulls until its minimum window is
//! satisfied, and always returns a column exactly as long as the input
//! series. Division by zero and degenerate windows yield nulls, never
//! infinities or sentinels.
//!
//! The bank is built from a [`FactorFamilies`](sable_core::FactorFamilies)
//! selection by [`registry::build_bank`] and assembled into a
//! [`FactorMatrix`](sable_core::FactorMatrix) by [`bank::compute_matrix`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bank;
pub mod factor;
pub mod fundamental;
pub mod ma;
pub mod momentum;
pub mod oscillator;
pub mod range;
pub mod registry;
pub mod volatility;
pub mod volume;

pub use bank::compute_matrix;
pub use factor::Factor;
pub use registry::{build_bank, minimum_window};
