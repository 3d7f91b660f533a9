//! Momentum and reversal factors.

use sable_core::SeriesTable;

use crate::factor::Factor;

/// Trailing return over `period` bars: `(close[t] - close[t-k]) / close[t-k]`.
#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    name: String,
}

impl Momentum {
    /// Creates a momentum factor named `momentum_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("momentum_{period}"),
        }
    }
}

impl Factor for Momentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        (0..closes.len())
            .map(|t| {
                if t < self.period {
                    return None;
                }
                let base = closes[t - self.period];
                Some((closes[t] - base) / base)
            })
            .collect()
    }
}

/// The negation of [`Momentum`]: high recent losers score high.
#[derive(Debug, Clone)]
pub struct Reversal {
    inner: Momentum,
    name: String,
}

impl Reversal {
    /// Creates a reversal factor named `reversal_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            inner: Momentum::new(period),
            name: format!("reversal_{period}"),
        }
    }
}

impl Factor for Reversal {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.inner.lookback()
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        self.inner
            .compute(series)
            .into_iter()
            .map(|v| v.map(|m| -m))
            .collect()
    }
}
