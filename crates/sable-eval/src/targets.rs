//! Forward-return target construction.

use sable_core::{SeriesTable, TargetSeries};

/// Builds the forward return at one horizon: `close[t+h]/close[t] - 1`,
/// null for the last `h` observations where the look-ahead is undefined.
pub fn build_target(series: &SeriesTable, horizon: usize) -> TargetSeries {
    let closes = series.closes();
    let n = closes.len();
    let values = (0..n)
        .map(|t| {
            if t + horizon >= n {
                return None;
            }
            Some(closes[t + horizon] / closes[t] - 1.0)
        })
        .collect();
    TargetSeries { horizon, values }
}

/// Builds one [`TargetSeries`] per requested horizon.
pub fn build_targets(series: &SeriesTable, horizons: &[usize]) -> Vec<TargetSeries> {
    horizons.iter().map(|&h| build_target(series, h)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use sable_core::PriceBar;

    fn series(closes: &[f64]) -> SeriesTable {
        let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
        let bars: Vec<PriceBar> = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + chrono::Days::new(i as u64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 100.0,
                amount: None,
            })
            .collect();
        SeriesTable::validate(bars, 1).unwrap()
    }

    #[test]
    fn test_forward_return_and_trailing_nulls() {
        let series = series(&[100.0, 110.0, 121.0, 133.1]);
        let target = build_target(&series, 2);

        assert_eq!(target.horizon, 2);
        assert_eq!(target.values.len(), 4);
        assert_relative_eq!(target.values[0].unwrap(), 0.21, epsilon = 1e-12);
        assert_relative_eq!(target.values[1].unwrap(), 133.1 / 110.0 - 1.0, epsilon = 1e-12);
        assert_eq!(target.values[2], None);
        assert_eq!(target.values[3], None);
    }

    #[test]
    fn test_horizon_longer_than_series_is_all_null() {
        let series = series(&[100.0, 101.0, 102.0]);
        let target = build_target(&series, 10);
        assert!(target.values.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_multiple_horizons() {
        let series = series(&[100.0; 30]);
        let targets = build_targets(&series, &[1, 5, 20]);
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[2].horizon, 20);
        assert_eq!(targets[2].values.iter().filter(|v| v.is_some()).count(), 10);
    }
}
