//! Multi-timeframe evaluation.
//!
//! Fetches one series per configured timeframe and runs the indicator,
//! scoring and classification pipeline on each. A failing timeframe becomes
//! an ERROR entry and never interrupts the others.

use crate::error::{AppError, Result};
use crate::services::signals::evaluate_series;
use crate::sources::SeriesProvider;
use crate::types::{AnnotatedSeries, Signal, TimeframeConfig, TimeframeEntry, TimeframeReport};
use futures_util::future::join_all;
use tracing::{debug, info, warn};

/// Evaluates an instrument across timeframes using a series provider.
pub struct SignalEvaluator<P> {
    provider: P,
}

impl<P: SeriesProvider> SignalEvaluator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Evaluate each timeframe in order, one after another.
    ///
    /// Returns `AppError::Configuration` before any fetch if a timeframe is
    /// invalid. Otherwise the report has exactly one entry per config.
    pub async fn evaluate(
        &self,
        symbol: &str,
        configs: &[TimeframeConfig],
    ) -> Result<TimeframeReport> {
        validate_request(symbol, configs)?;

        let mut entries = Vec::with_capacity(configs.len());
        for config in configs {
            entries.push(self.evaluate_timeframe(symbol, config).await);
        }

        Ok(build_report(symbol, entries))
    }

    /// Same result as [`evaluate`](Self::evaluate), with the per-timeframe
    /// pipelines polled concurrently.
    pub async fn evaluate_concurrent(
        &self,
        symbol: &str,
        configs: &[TimeframeConfig],
    ) -> Result<TimeframeReport> {
        validate_request(symbol, configs)?;

        let entries = join_all(
            configs
                .iter()
                .map(|config| self.evaluate_timeframe(symbol, config)),
        )
        .await;

        Ok(build_report(symbol, entries))
    }

    async fn evaluate_timeframe(&self, symbol: &str, config: &TimeframeConfig) -> TimeframeEntry {
        let fetched = self
            .provider
            .fetch_series(symbol, config.lookback, config.interval)
            .await
            .and_then(|series| {
                if series.is_empty() {
                    Err(AppError::DataUnavailable("Empty series returned".to_string()))
                } else {
                    Ok(series)
                }
            });

        let series = match fetched {
            Ok(series) if config.needs_resample() => series.resample(config.bar_ms),
            Ok(series) => series,
            Err(e) => {
                warn!("{} {}: {}", symbol, config.id, e);
                return TimeframeEntry {
                    timeframe: config.id.clone(),
                    signal: Signal::error(e.to_string()),
                    series: AnnotatedSeries::default(),
                };
            }
        };

        let (signal, annotated) = evaluate_series(&series);

        debug!(
            "{} {}: {} bars, score {:?} -> {}",
            symbol,
            config.id,
            annotated.len(),
            signal.result.score,
            signal.label
        );

        TimeframeEntry {
            timeframe: config.id.clone(),
            signal,
            series: annotated,
        }
    }
}

fn validate_request(symbol: &str, configs: &[TimeframeConfig]) -> Result<()> {
    if symbol.trim().is_empty() {
        return Err(AppError::Configuration("symbol is empty".to_string()));
    }
    if configs.is_empty() {
        return Err(AppError::Configuration("no timeframes configured".to_string()));
    }
    configs.iter().try_for_each(TimeframeConfig::validate)
}

fn build_report(symbol: &str, entries: Vec<TimeframeEntry>) -> TimeframeReport {
    let report = TimeframeReport {
        symbol: symbol.to_string(),
        entries,
    };

    info!(
        "Evaluated {} across {} timeframes ({} errors)",
        symbol,
        report.len(),
        report.error_count()
    );

    report
}
