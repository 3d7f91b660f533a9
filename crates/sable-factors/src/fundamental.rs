//! Broadcast columns for externally supplied fundamental and flow scalars.
//!
//! The pipeline never fetches or derives these values; the data-acquisition
//! collaborator resolves them and passes a [`FundamentalSnapshot`]. Each
//! supplied scalar becomes a constant-per-bar column so the scorers treat it
//! like any other factor.

use sable_core::FundamentalSnapshot;

/// Expands a snapshot into `(name, column)` pairs of series length `len`.
/// Absent scalars produce no column at all, rather than an all-null one.
pub fn broadcast_columns(
    snapshot: &FundamentalSnapshot,
    len: usize,
) -> Vec<(String, Vec<Option<f64>>)> {
    let fields = [
        ("pe_ratio", snapshot.pe_ratio),
        ("pb_ratio", snapshot.pb_ratio),
        ("net_inflow", snapshot.net_inflow),
        ("margin_balance", snapshot.margin_balance),
    ];

    fields
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name.to_string(), vec![Some(v); len])))
        .collect()
}
