//! Moving-average distance and Bollinger-band factors.

use sable_core::{SeriesTable, stats};

use crate::factor::Factor;

/// Exponential moving average with `alpha = 2 / (period + 1)`, seeded with
/// the first value. Defined from index 0; callers null out the warmup.
pub(crate) fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut state = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(state);
    for &v in &values[1..] {
        state = alpha * v + (1.0 - alpha) * state;
        out.push(state);
    }
    out
}

fn rolling_mean(values: &[f64], window: usize, t: usize) -> Option<f64> {
    if t + 1 < window {
        return None;
    }
    stats::mean(&values[t + 1 - window..=t])
}

/// Distance of the close from its simple moving average: `(close - MA) / MA`.
#[derive(Debug, Clone)]
pub struct SmaDistance {
    period: usize,
    name: String,
}

impl SmaDistance {
    /// Creates a factor named `sma_dist_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("sma_dist_{period}"),
        }
    }
}

impl Factor for SmaDistance {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        (0..closes.len())
            .map(|t| {
                let ma = rolling_mean(&closes, self.period, t)?;
                Some((closes[t] - ma) / ma)
            })
            .collect()
    }
}

/// Distance of the close from its exponential moving average.
///
/// The EMA recurrence is seeded at the first bar; the first `period - 1`
/// entries are reported as null so the warmup never leaks into scoring.
#[derive(Debug, Clone)]
pub struct EmaDistance {
    period: usize,
    name: String,
}

impl EmaDistance {
    /// Creates a factor named `ema_dist_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("ema_dist_{period}"),
        }
    }
}

impl Factor for EmaDistance {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        let ema = ema(&closes, self.period);
        (0..closes.len())
            .map(|t| {
                if t + 1 < self.period {
                    return None;
                }
                Some((closes[t] - ema[t]) / ema[t])
            })
            .collect()
    }
}

const BOLLINGER_WIDTH: f64 = 2.0;

/// Bollinger bandwidth: `(upper - lower) / MA` with ±2σ bands over 20 days.
#[derive(Debug, Clone)]
pub struct BollingerBandwidth {
    period: usize,
    name: String,
}

impl BollingerBandwidth {
    /// Creates a factor named `boll_bandwidth_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("boll_bandwidth_{period}"),
        }
    }
}

impl Factor for BollingerBandwidth {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        (0..closes.len())
            .map(|t| {
                if t + 1 < self.period {
                    return None;
                }
                let window = &closes[t + 1 - self.period..=t];
                let ma = stats::mean(window)?;
                let std = stats::sample_std(window)?;
                Some(2.0 * BOLLINGER_WIDTH * std / ma)
            })
            .collect()
    }
}

/// Position of the close inside its Bollinger band, clipped to `[0, 1]`.
///
/// A degenerate band (zero width) is null; a close outside the band clips
/// rather than propagating out-of-range values.
#[derive(Debug, Clone)]
pub struct BollingerPosition {
    period: usize,
    name: String,
}

impl BollingerPosition {
    /// Creates a factor named `boll_position_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("boll_position_{period}"),
        }
    }
}

impl Factor for BollingerPosition {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        (0..closes.len())
            .map(|t| {
                if t + 1 < self.period {
                    return None;
                }
                let window = &closes[t + 1 - self.period..=t];
                let ma = stats::mean(window)?;
                let std = stats::sample_std(window)?;
                let lower = ma - BOLLINGER_WIDTH * std;
                let width = 2.0 * BOLLINGER_WIDTH * std;
                if width <= stats::MIN_STD_THRESHOLD {
                    return None;
                }
                Some(((closes[t] - lower) / width).clamp(0.0, 1.0))
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
    fn test_sma_distance() {
        let series = series_from_closes(&[100.0, 110.0, 120.0]);
        let values = SmaDistance::new(3).compute(&series);
        assert_eq!(values[0], None);
        assert_eq!(values[1], None);
        // MA = 110, close = 120.
        assert_relative_eq!(values[2].unwrap(), 10.0 / 110.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ema_seed_and_recurrence() {
        let values = ema(&[10.0, 20.0], 3);
        assert_relative_eq!(values[0], 10.0);
        // alpha = 0.5 for period 3.
        assert_relative_eq!(values[1], 15.0);
    }

    #[test]
    fn test_ema_distance_nulls_warmup() {
        let series = series_from_closes(&[100.0; 15]);
        let values = EmaDistance::new(12).compute(&series);
        assert!(values[..11].iter().all(|v| v.is_none()));
        assert_relative_eq!(values[11].unwrap(), 0.0);
    }

    #[test]
    fn test_bollinger_position_clips_and_nulls() {
        // Flat window: zero-width band must be null, not a division blowup.
        let series = series_from_closes(&[100.0; 25]);
        let position = BollingerPosition::new(20).compute(&series);
        assert!(position.iter().all(|v| v.is_none()));

        let bandwidth = BollingerBandwidth::new(20).compute(&series);
        assert_relative_eq!(bandwidth[24].unwrap(), 0.0);
    }

    #[test]
    fn test_bollinger_position_in_unit_interval() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64).sin() * 5.0).collect();
        let series = series_from_closes(&closes);
        let values = BollingerPosition::new(20).compute(&series);
        for v in values.into_iter().flatten() {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
