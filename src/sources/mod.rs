//! Market data providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::types::{BarInterval, Lookback, Series};
use std::future::Future;

/// Source of historical bar series.
///
/// Implementations may be slow or fail; callers treat any error as the
/// series being unavailable for that request.
pub trait SeriesProvider: Send + Sync {
    fn fetch_series(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: BarInterval,
    ) -> impl Future<Output = Result<Series>> + Send;
}
