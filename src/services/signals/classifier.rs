//! Score to label mapping.

use crate::types::{ScoreResult, Signal, SignalLabel};

/// Label for an integer score. Total over `i32`.
pub fn classify(score: i32) -> SignalLabel {
    SignalLabel::from_score(score)
}

/// Wrap a score result into a signal. Unscored results read NEUTRAL.
pub fn classify_result(result: ScoreResult) -> Signal {
    let label = match result.score {
        Some(score) => classify(score),
        None => SignalLabel::Neutral,
    };
    Signal { label, result }
}
