//! Oscillator factors: RSI and the MACD family.

use sable_core::SeriesTable;

use crate::factor::Factor;
use crate::ma::ema;

/// Relative Strength Index with Wilder smoothing.
///
/// The average gain/loss is seeded with the simple mean of the first
/// `period` moves and then updated as `(prev * (period - 1) + current) /
/// period`. A zero rolling average loss yields RSI = 100 by definition,
/// never `inf` or `NaN`; all non-null outputs lie in `[0, 100]`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    /// Creates an RSI factor named `rsi_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }

    fn value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss <= 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    }
}

impl Factor for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        let n = closes.len();
        let p = self.period;
        let mut out = vec![None; n];
        if n <= p {
            return out;
        }

        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for t in 1..=p {
            let change = closes[t] - closes[t - 1];
            avg_gain += change.max(0.0);
            avg_loss += (-change).max(0.0);
        }
        avg_gain /= p as f64;
        avg_loss /= p as f64;
        out[p] = Some(Self::value(avg_gain, avg_loss));

        for t in p + 1..n {
            let change = closes[t] - closes[t - 1];
            avg_gain = (avg_gain * (p as f64 - 1.0) + change.max(0.0)) / p as f64;
            avg_loss = (avg_loss * (p as f64 - 1.0) + (-change).max(0.0)) / p as f64;
            out[t] = Some(Self::value(avg_gain, avg_loss));
        }
        out
    }
}

const MACD_FAST: usize = 12;
const MACD_SLOW: usize = 26;
const MACD_SIGNAL: usize = 9;

/// Which MACD series a [`Macd`] factor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    /// `EMA12 - EMA26`.
    Line,
    /// EMA9 of the MACD line.
    Signal,
    /// Line minus signal.
    Histogram,
}

/// MACD line, signal, or histogram over the standard 12/26/9 parameters.
#[derive(Debug, Clone)]
pub struct Macd {
    output: MacdOutput,
    name: String,
}

impl Macd {
    /// Creates a MACD factor named `macd`, `macd_signal`, or `macd_hist`.
    pub fn new(output: MacdOutput) -> Self {
        let name = match output {
            MacdOutput::Line => "macd",
            MacdOutput::Signal => "macd_signal",
            MacdOutput::Histogram => "macd_hist",
        };
        Self {
            output,
            name: name.to_string(),
        }
    }
}

impl Factor for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        match self.output {
            MacdOutput::Line => MACD_SLOW,
            MacdOutput::Signal | MacdOutput::Histogram => MACD_SLOW + MACD_SIGNAL - 1,
        }
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let closes = series.closes();
        let n = closes.len();
        let fast = ema(&closes, MACD_FAST);
        let slow = ema(&closes, MACD_SLOW);
        let line: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = ema(&line, MACD_SIGNAL);

        let warmup = self.lookback() - 1;
        (0..n)
            .map(|t| {
                if t < warmup {
                    return None;
                }
                Some(match self.output {
                    MacdOutput::Line => line[t],
                    MacdOutput::Signal => signal[t],
                    MacdOutput::Histogram => line[t] - signal[t],
                })
            })
            .collect()
    }
}
