//! Trading signals service module.
//!
//! Provides technical indicator calculations, rule-based scoring of the
//! latest bar, and classification of scores into signal labels.

pub mod classifier;
pub mod indicators;
pub mod scorer;

pub use classifier::{classify, classify_result};
pub use indicators::{compute_indicators, IndicatorCalculator};
pub use scorer::{score, MIN_HISTORY};

use crate::types::{AnnotatedSeries, Series, Signal};

/// Run indicators, scoring, and classification on one series.
///
/// Pure: the same series always yields the same signal and annotation.
pub fn evaluate_series(series: &Series) -> (Signal, AnnotatedSeries) {
    let annotated = compute_indicators(series);
    let signal = classify_result(score(&annotated));
    (signal, annotated)
}
