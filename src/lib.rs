//! Quotex Signals - multi-timeframe technical indicator scoring

pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use services::{evaluate_series, SignalEvaluator};
pub use sources::{SeriesProvider, YahooFinanceClient};
pub use types::*;
