//! Technical indicator implementations.
//!
//! Every indicator produces a column aligned 1:1 with the input bars, with
//! `None` inside its warm-up window.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{BollingerBands, BollingerColumns};
pub use ema::Ema;
pub use macd::{Macd, MacdColumns};
pub use rsi::Rsi;
pub use sma::Sma;

use crate::types::{AnnotatedPoint, AnnotatedSeries, IndicatorSet, Series};

/// The fixed indicator set attached to every series.
pub struct IndicatorCalculator {
    rsi: Rsi,
    macd: Macd,
    bollinger: BollingerBands,
    sma_short: Sma,
    sma_long: Sma,
}

impl Default for IndicatorCalculator {
    fn default() -> Self {
        Self {
            rsi: Rsi::default(),
            macd: Macd::default(),
            bollinger: BollingerBands::default(),
            sma_short: Sma::new(20),
            sma_long: Sma::new(50),
        }
    }
}

impl IndicatorCalculator {
    /// Annotate a copy of `series` with indicator values.
    pub fn compute(&self, series: &Series) -> AnnotatedSeries {
        let closes = series.closes();

        let rsi = self.rsi.calculate(&closes);
        let macd = self.macd.calculate(&closes);
        let bands = self.bollinger.calculate(&closes);
        let sma_short = self.sma_short.calculate(&closes);
        let sma_long = self.sma_long.calculate(&closes);

        let points = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| AnnotatedPoint {
                bar: bar.clone(),
                indicators: IndicatorSet {
                    rsi: rsi[i],
                    macd: macd.line[i],
                    macd_signal: macd.signal[i],
                    macd_histogram: macd.histogram[i],
                    bb_upper: bands.upper[i],
                    bb_middle: bands.middle[i],
                    bb_lower: bands.lower[i],
                    sma_short: sma_short[i],
                    sma_long: sma_long[i],
                },
            })
            .collect();

        AnnotatedSeries { points }
    }
}

/// Annotate `series` with the default indicator set.
pub fn compute_indicators(series: &Series) -> AnnotatedSeries {
    IndicatorCalculator::default().compute(series)
}
