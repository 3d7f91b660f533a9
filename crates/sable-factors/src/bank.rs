//! Matrix assembly with per-factor isolation.

use sable_core::{FactorMatrix, FundamentalSnapshot, SeriesTable};
use tracing::warn;

use crate::factor::Factor;
use crate::fundamental::broadcast_columns;

/// Computes every factor in the bank plus any supplied fundamental scalars
/// into one [`FactorMatrix`].
///
/// A factor that produces a wrong-length column (or collides on name) is
/// dropped with a warning; one bad factor never aborts the bank.
pub fn compute_matrix(
    series: &SeriesTable,
    bank: &[Box<dyn Factor>],
    fundamentals: Option<&FundamentalSnapshot>,
) -> FactorMatrix {
    let mut matrix = FactorMatrix::new(series.len());

    for factor in bank {
        let values = factor.compute(series);
        if let Err(err) = matrix.insert(factor.name(), values) {
            warn!(factor = factor.name(), %err, "dropping factor column");
        }
    }

    if let Some(snapshot) = fundamentals {
        for (name, values) in broadcast_columns(snapshot, series.len()) {
            if let Err(err) = matrix.insert(name.as_str(), values) {
                warn!(factor = %name, %err, "dropping fundamental column");
            }
        }
    }

    matrix
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::build_bank;
    use crate::test_support::series_from_closes;
    use sable_core::FactorFamilies;

    struct BrokenFactor;

    impl Factor for BrokenFactor {
        fn name(&self) -> &str {
            "broken"
        }

        fn lookback(&self) -> usize {
            1
        }

        fn compute(&self, _series: &SeriesTable) -> Vec<Option<f64>> {
            vec![Some(1.0)] // wrong length on purpose
        }
    }

    #[test]
    fn test_all_columns_match_series_length() {
        let closes: Vec<f64> = (0..150).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let series = series_from_closes(&closes);
        let bank = build_bank(&FactorFamilies::default());
        let matrix = compute_matrix(&series, &bank, None);

        assert_eq!(matrix.len(), series.len());
        assert_eq!(matrix.width(), bank.len());
        for column in matrix.columns() {
            assert_eq!(column.values().len(), series.len());
        }
    }

    #[test]
    fn test_leading_nulls_respect_lookback() {
        let closes: Vec<f64> = (0..150).map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0).collect();
        let series = series_from_closes(&closes);
        let bank = build_bank(&FactorFamilies::default());
        let matrix = compute_matrix(&series, &bank, None);

        for factor in &bank {
            let column = matrix.column(factor.name()).unwrap();
            for value in column.iter().take(factor.lookback() - 1) {
                assert!(
                    value.is_none(),
                    "{} must be null during its warmup",
                    factor.name()
                );
            }
        }
    }

    #[test]
    fn test_bad_factor_is_dropped_not_fatal() {
        let series = series_from_closes(&[100.0, 101.0, 102.0]);
        let bank: Vec<Box<dyn Factor>> = vec![Box::new(BrokenFactor)];
        let matrix = compute_matrix(&series, &bank, None);
        assert_eq!(matrix.width(), 0);
    }

    #[test]
    fn test_fundamentals_are_broadcast() {
        let series = series_from_closes(&[100.0, 101.0, 102.0]);
        let snapshot = FundamentalSnapshot {
            pe_ratio: Some(12.0),
            ..FundamentalSnapshot::default()
        };
        let matrix = compute_matrix(&series, &[], Some(&snapshot));
        assert_eq!(matrix.width(), 1);
        assert_eq!(matrix.column("pe_ratio").unwrap(), &[Some(12.0); 3]);
    }
}
