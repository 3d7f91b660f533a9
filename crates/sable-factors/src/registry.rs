//! Bank construction from a family selection.
//!
//! The parameter grids below are the single source of truth for which
//! factors exist; the same moving-average or oscillator logic is never
//! reimplemented elsewhere with different parameters.

use sable_core::FactorFamilies;

use crate::factor::Factor;
use crate::ma::{BollingerBandwidth, BollingerPosition, EmaDistance, SmaDistance};
use crate::momentum::{Momentum, Reversal};
use crate::oscillator::{Macd, MacdOutput, Rsi};
use crate::range::{Atr, Natr, PricePosition};
use crate::volatility::{Volatility, VolatilityRatio};
use crate::volume::{VolumePriceCorr, VolumeRatio};

/// Momentum/reversal lookbacks, in trading days.
pub const MOMENTUM_PERIODS: [usize; 6] = [1, 3, 5, 10, 20, 60];
/// Return-volatility windows.
pub const VOLATILITY_PERIODS: [usize; 4] = [5, 10, 20, 60];
/// Short windows compared against the volatility baseline.
pub const VOLATILITY_RATIO_PERIODS: [usize; 3] = [5, 10, 20];
/// Baseline window for volatility ratios.
pub const VOLATILITY_BASELINE: usize = 60;
/// Simple moving-average windows.
pub const SMA_PERIODS: [usize; 4] = [5, 10, 20, 60];
/// Exponential moving-average windows.
pub const EMA_PERIODS: [usize; 2] = [12, 26];
/// RSI period.
pub const RSI_PERIOD: usize = 14;
/// Bollinger-band window.
pub const BOLLINGER_PERIOD: usize = 20;
/// Volume-factor windows.
pub const VOLUME_PERIODS: [usize; 2] = [5, 20];
/// ATR period.
pub const ATR_PERIOD: usize = 14;
/// Rolling price-position windows.
pub const PRICE_POSITION_PERIODS: [usize; 3] = [20, 60, 120];

/// Builds the factor bank for the enabled families, in a fixed order.
///
/// The order is deterministic and becomes the matrix column order, which in
/// turn is the tie-break order for equal final scores.
pub fn build_bank(families: &FactorFamilies) -> Vec<Box<dyn Factor>> {
    let mut bank: Vec<Box<dyn Factor>> = Vec::new();

    if families.momentum {
        for period in MOMENTUM_PERIODS {
            bank.push(Box::new(Momentum::new(period)));
        }
        for period in MOMENTUM_PERIODS {
            bank.push(Box::new(Reversal::new(period)));
        }
    }

    if families.volatility {
        for period in VOLATILITY_PERIODS {
            bank.push(Box::new(Volatility::new(period)));
        }
        for period in VOLATILITY_RATIO_PERIODS {
            bank.push(Box::new(VolatilityRatio::new(period, VOLATILITY_BASELINE)));
        }
    }

    if families.moving_average {
        for period in SMA_PERIODS {
            bank.push(Box::new(SmaDistance::new(period)));
        }
        for period in EMA_PERIODS {
            bank.push(Box::new(EmaDistance::new(period)));
        }
        bank.push(Box::new(BollingerBandwidth::new(BOLLINGER_PERIOD)));
        bank.push(Box::new(BollingerPosition::new(BOLLINGER_PERIOD)));
    }

    if families.oscillator {
        bank.push(Box::new(Rsi::new(RSI_PERIOD)));
        bank.push(Box::new(Macd::new(MacdOutput::Line)));
        bank.push(Box::new(Macd::new(MacdOutput::Signal)));
        bank.push(Box::new(Macd::new(MacdOutput::Histogram)));
    }

    if families.volume {
        for period in VOLUME_PERIODS {
            bank.push(Box::new(VolumeRatio::new(period)));
        }
        for period in VOLUME_PERIODS {
            bank.push(Box::new(VolumePriceCorr::new(period)));
        }
    }

    if families.range {
        bank.push(Box::new(Atr::new(ATR_PERIOD)));
        bank.push(Box::new(Natr::new(ATR_PERIOD)));
        for period in PRICE_POSITION_PERIODS {
            bank.push(Box::new(PricePosition::new(period)));
        }
    }

    bank
}

/// The largest lookback of any factor in the bank: the minimum series length
/// the validator enforces.
pub fn minimum_window(bank: &[Box<dyn Factor>]) -> usize {
    bank.iter().map(|f| f.lookback()).max().unwrap_or(0)
}
