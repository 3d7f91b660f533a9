//! Validated daily price series.
//!
//! A [`SeriesTable`] is the single entry point for market data into the
//! pipeline. It is constructed once from an externally fetched sequence of
//! bars, checked for chronology and numeric sanity, and then treated as
//! immutable for the duration of factor computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SableError};

/// A single daily OHLCV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date.
    pub date: NaiveDate,
    /// Opening price.
    pub open: f64,
    /// Intraday high.
    pub high: f64,
    /// Intraday low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume (shares or contracts).
    pub volume: f64,
    /// Traded amount (currency), when the venue reports it.
    pub amount: Option<f64>,
}

impl PriceBar {
    /// Returns the first required field holding a non-coercible value, if any.
    ///
    /// Close must be strictly positive and volume non-negative; every price
    /// field must be finite.
    fn malformed_field(&self) -> Option<&'static str> {
        if !self.open.is_finite() {
            return Some("open");
        }
        if !self.high.is_finite() {
            return Some("high");
        }
        if !self.low.is_finite() {
            return Some("low");
        }
        if !self.close.is_finite() || self.close <= 0.0 {
            return Some("close");
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Some("volume");
        }
        None
    }

    /// True when the OHLC fields are internally consistent:
    /// `high >= max(open, close)` and `low <= min(open, close)`.
    fn ohlc_consistent(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}

/// An immutable, validated sequence of daily bars for one instrument.
#[derive(Debug, Clone)]
pub struct SeriesTable {
    bars: Vec<PriceBar>,
}

impl SeriesTable {
    /// Validates a raw bar sequence and wraps it as a `SeriesTable`.
    ///
    /// `minimum_window` is the largest lookback used by any enabled factor;
    /// the series must be at least that long for the factor bank to produce
    /// a single fully populated row.
    ///
    /// # Errors
    ///
    /// - [`SableError::InsufficientData`] if fewer than `minimum_window` bars
    ///   are supplied.
    /// - [`SableError::MalformedRow`] if a required numeric field is
    ///   non-finite or out of domain.
    /// - [`SableError::OutOfOrder`] / [`SableError::DuplicateTimestamp`] if
    ///   dates are not strictly increasing.
    ///
    /// OHLC consistency violations (`high` below the body, `low` above it)
    /// are logged as warnings, not corrected and not fatal.
    pub fn validate(bars: Vec<PriceBar>, minimum_window: usize) -> Result<Self> {
        if bars.len() < minimum_window {
            return Err(SableError::InsufficientData {
                required: minimum_window,
                actual: bars.len(),
            });
        }

        let mut inconsistent = 0usize;
        for (index, bar) in bars.iter().enumerate() {
            if let Some(field) = bar.malformed_field() {
                return Err(SableError::MalformedRow { index, field });
            }
            if index > 0 {
                let prev = bars[index - 1].date;
                if bar.date == prev {
                    return Err(SableError::DuplicateTimestamp { index });
                }
                if bar.date < prev {
                    return Err(SableError::OutOfOrder { index });
                }
            }
            if !bar.ohlc_consistent() {
                inconsistent += 1;
            }
        }

        if inconsistent > 0 {
            warn!(
                bars = bars.len(),
                inconsistent, "series contains OHLC consistency violations"
            );
        }

        Ok(Self { bars })
    }

    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The validated bars, in chronological order.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Closing prices in chronological order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Intraday highs in chronological order.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Intraday lows in chronological order.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Traded volumes in chronological order.
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Simple returns `close[t]/close[t-1] - 1`, null at index 0.
    ///
    /// Validation guarantees strictly positive closes, so the ratio is
    /// always defined past the first bar.
    pub fn simple_returns(&self) -> Vec<Option<f64>> {
        let mut out = Vec::with_capacity(self.bars.len());
        out.push(None);
        for w in self.bars.windows(2) {
            out.push(Some(w[1].close / w[0].close - 1.0));
        }
        out
    }
}

/// Already-resolved fundamental and flow scalars for one instrument.
///
/// These are supplied by the external data-acquisition collaborator and
/// broadcast as constant columns by the factor bank; the pipeline never
/// computes or fetches them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    /// Price-to-earnings ratio.
    pub pe_ratio: Option<f64>,
    /// Price-to-book ratio.
    pub pb_ratio: Option<f64>,
    /// Net main-capital inflow.
    pub net_inflow: Option<f64>,
    /// Outstanding margin balance.
    pub margin_balance: Option<f64>,
}
