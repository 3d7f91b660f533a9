//! Range-based factors: true range and rolling price position.

use sable_core::{SeriesTable, stats};

use crate::factor::Factor;

/// True range per bar: `max(high - low, |high - prev close|, |low - prev close|)`.
/// Null at index 0 (no previous close).
fn true_ranges(series: &SeriesTable) -> Vec<Option<f64>> {
    let bars = series.bars();
    (0..bars.len())
        .map(|t| {
            if t == 0 {
                return None;
            }
            let prev_close = bars[t - 1].close;
            let bar = &bars[t];
            Some(
                (bar.high - bar.low)
                    .max((bar.high - prev_close).abs())
                    .max((bar.low - prev_close).abs()),
            )
        })
        .collect()
}

/// Average True Range: simple rolling mean of the true range.
///
/// Simple-mean smoothing, not Wilder; the convention is fixed here rather
/// than varying by call site.
#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    /// Creates a factor named `atr_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("atr_{period}"),
        }
    }
}

impl Factor for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let tr = true_ranges(series);
        (0..tr.len())
            .map(|t| {
                if t < self.period {
                    return None;
                }
                let window: Vec<f64> = tr[t + 1 - self.period..=t].iter().flatten().copied().collect();
                if window.len() < self.period {
                    return None;
                }
                stats::mean(&window)
            })
            .collect()
    }
}

/// ATR normalized by the close, in percent. Scale-free across instruments.
#[derive(Debug, Clone)]
pub struct Natr {
    inner: Atr,
    name: String,
}

impl Natr {
    /// Creates a factor named `natr_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            inner: Atr::new(period),
            name: format!("natr_{period}"),
        }
    }
}

impl Factor for Natr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.inner.lookback()
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        self.inner
            .compute(series)
            .into_iter()
            .zip(closes)
            .map(|(atr, close)| atr.map(|a| 100.0 * a / close))
            .collect()
    }
}

/// Position of the close inside the rolling high/low range, clipped to `[0, 1]`.
///
/// Null when the range is degenerate (all bars identical over the window).
#[derive(Debug, Clone)]
pub struct PricePosition {
    period: usize,
    name: String,
}

impl PricePosition {
    /// Creates a factor named `price_position_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("price_position_{period}"),
        }
    }
}

impl Factor for PricePosition {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let highs = series.highs();
        let lows = series.lows();
        let closes = series.closes();
        (0..closes.len())
            .map(|t| {
                if t + 1 < self.period {
                    return None;
                }
                let window = t + 1 - self.period..=t;
                let high_max = highs[window.clone()].iter().copied().fold(f64::MIN, f64::max);
                let low_min = lows[window].iter().copied().fold(f64::MAX, f64::min);
                let range = high_max - low_min;
                if range <= stats::MIN_STD_THRESHOLD {
                    return None;
                }
                Some(((closes[t] - low_min) / range).clamp(0.0, 1.0))
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
    fn test_atr_nulls_and_positive() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let values = Atr::new(14).compute(&series);
        assert!(values[..14].iter().all(|v| v.is_none()));
        assert!(values[14].unwrap() > 0.0);
    }

    #[test]
    fn test_natr_scales_by_close() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let atr = Atr::new(14).compute(&series);
        let natr = Natr::new(14).compute(&series);
        assert_relative_eq!(
            natr[15].unwrap(),
            100.0 * atr[15].unwrap() / closes[15],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_price_position_uptrend_near_top() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let series = series_from_closes(&closes);
        let values = PricePosition::new(20).compute(&series);
        // In a steady uptrend the close sits near the top of its range.
        assert!(values[29].unwrap() > 0.9);
    }

    #[test]
    fn test_price_position_bounds() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.9).cos() * 8.0)
            .collect();
        let series = series_from_closes(&closes);
        for v in PricePosition::new(20).compute(&series).into_iter().flatten() {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
