//! Score blending and factor selection.
//!
//! [`combine`] merges the linear and model scorer outputs into one ranked
//! [`FactorScore`](sable_core::FactorScore) list under adaptive weights;
//! [`select`] then walks that ranking greedily, admitting each factor only if
//! it stays decorrelated from everything already admitted.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod combine;
pub mod select;

pub use combine::combine;
pub use select::{paired_correlation, select};
