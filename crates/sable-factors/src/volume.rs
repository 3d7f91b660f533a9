//! Volume-based factors.

use sable_core::{SeriesTable, stats};

use crate::factor::Factor;

/// Volume relative to its own rolling mean: `volume / mean(volume, period)`.
///
/// Null while the window is unsatisfied or the mean volume is zero (a halted
/// stretch carries no ratio information).
#[derive(Debug, Clone)]
pub struct VolumeRatio {
    period: usize,
    name: String,
}

impl VolumeRatio {
    /// Creates a factor named `volume_ratio_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("volume_ratio_{period}"),
        }
    }
}

impl Factor for VolumeRatio {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let volumes = series.volumes();
        (0..volumes.len())
            .map(|t| {
                if t + 1 < self.period {
                    return None;
                }
                let mean = stats::mean(&volumes[t + 1 - self.period..=t])?;
                if mean <= 0.0 {
                    return None;
                }
                Some(volumes[t] / mean)
            })
            .collect()
    }
}

/// Rolling Pearson correlation between simple returns and volume changes.
///
/// Requires a full window of defined pairs and non-degenerate variance on
/// both sides; otherwise null. A constant-volume stretch therefore yields
/// an all-null column rather than a fabricated zero correlation.
#[derive(Debug, Clone)]
pub struct VolumePriceCorr {
    period: usize,
    name: String,
}

impl VolumePriceCorr {
    /// Creates a factor named `volume_price_corr_{period}`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("volume_price_corr_{period}"),
        }
    }
}

impl Factor for VolumePriceCorr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period + 1
    }

    fn compute(&self, series: &SeriesTable) -> Vec<Option<f64>> {
        let returns = series.simple_returns();
        let volumes = series.volumes();
        let n = volumes.len();

        // Volume change, null at index 0 and across zero-volume bars.
        let volume_changes: Vec<Option<f64>> = (0..n)
            .map(|t| {
                if t == 0 || volumes[t - 1] <= 0.0 {
                    return None;
                }
                Some(volumes[t] / volumes[t - 1] - 1.0)
            })
            .collect();

        (0..n)
            .map(|t| {
                if t < self.period {
                    return None;
                }
                let mut xs = Vec::with_capacity(self.period);
                let mut ys = Vec::with_capacity(self.period);
                for i in t + 1 - self.period..=t {
                    match (returns[i], volume_changes[i]) {
                        (Some(r), Some(v)) => {
                            xs.push(r);
                            ys.push(v);
                        }
                        _ => return None,
                    }
                }
                stats::pearson(&xs, &ys)
            })
            .collect()
    }
}
