//! Return-volatility factors.
//!
//! Volatility is the sample standard deviation (N-1) of simple returns over
//! the window, matching the crate-wide convention in `sable_core::stats`.

use sable_core::{SeriesTable, stats};

use crate::factor::Factor;

fn rolling_return_std(series: &SeriesTable, window: usize) -> Vec<Option<f64>> {
    let returns = series.simple_returns();
    let n = returns.len();
    (0..n)
        .map(|t| {
            if t < window {
                return None;
            }
            // Window of `window` returns ending at t; index 0 is the only
            // null return and t >= window keeps it out of range.
            let slice: Vec<f64> = returns[t + 1 - window..=t]
                .iter()
                .map(|r| r.unwrap_or(f64::NAN))
                .collect();
            if slice.iter().any(|v| !v.is_finite()) {
                return None;
            }
            stats::sample_std(&slice)
        })
        .collect()
}

/// Rolling standard deviation of simple returns over `period` days.
#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    name: String,
}

impl Volatility {
    /// Creates a volatility factor named `volatility_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Factor for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        rolling_return_std(series, self.period)
    }
}

/// Short-window volatility relative to the 60-day baseline.
///
/// Null while either window is unsatisfied or the baseline volatility is
/// degenerate (a flat series divides by zero nowhere in this crate).
#[derive(Debug, Clone)]
pub struct VolatilityRatio {
    period: usize,
    baseline: usize,
    name: String,
}

impl VolatilityRatio {
    /// Creates a ratio factor named `vol_ratio_{period}` against `baseline`.
    pub fn new(period: usize, baseline: usize) -> Self {
        Self {
            period,
            baseline,
            name: format!("vol_ratio_{period}"),
        }
    }
}

impl Factor for VolatilityRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.max(self.baseline) + 1
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let short = rolling_return_std(series, self.period);
        let long = rolling_return_std(series, self.baseline);
        short
            .into_iter()
            .zip(long)
            .map(|(s, l)| match (s, l) {
                (Some(s), Some(l)) if l > stats::MIN_STD_THRESHOLD => Some(s / l),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series_from_closes;
    use approx::assert_relative_eq;

    #[test]
    fn test_volatility_window_and_nulls() {
        // Returns alternate +10% / ~-9.09%, so a 2-return window has
        // positive spread.
        let series = series_from_closes(&[100.0, 110.0, 100.0, 110.0, 100.0]);
        let factor = Volatility::new(2);
        let values = factor.compute(&series);

        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        assert!(values[2].unwrap() > 0.0);
        assert_eq!(values.len(), 5);
    }

    #[test]
    fn test_flat_series_has_zero_volatility() {
        let series = series_from_closes(&[50.0; 10]);
        let values = Volatility::new(5).compute(&series);
        assert_relative_eq!(values[9].unwrap(), 0.0);
    }

    #[test]
    fn test_ratio_null_on_flat_baseline() {
        // Flat series: baseline volatility is exactly zero, so the ratio
        // must be null rather than infinite.
        let series = series_from_closes(&[50.0; 20]);
        let values = VolatilityRatio::new(5, 10).compute(&series);
        assert!(values.iter().all(|v| v.is_none()));
    }

    #[test]
    fn test_ratio_of_identical_windows_is_one() {
        let closes: Vec<f64> = (0..30)
            .map(|i| 100.0 * if i % 2 == 0 { 1.0 } else { 1.05 })
            .collect();
        let series = series_from_closes(&closes);
        let values = VolatilityRatio::new(10, 10).compute(&series);
        assert_relative_eq!(values[29].unwrap(), 1.0, epsilon = 1e-9);
    }
}
