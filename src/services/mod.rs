pub mod evaluator;
pub mod refresh;
pub mod signals;

pub use evaluator::SignalEvaluator;
pub use signals::{evaluate_series, IndicatorCalculator};
