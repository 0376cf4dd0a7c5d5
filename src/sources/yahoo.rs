//! Yahoo Finance API client for historical bar data.
//!
//! Provides intraday and daily OHLC series for stocks, ETFs, FX pairs
//! (e.g. `EURUSD=X`) and crypto pairs (e.g. `BTC-USD`).
//! Uses the unofficial Yahoo Finance chart API (no API key).

use crate::error::{AppError, Result};
use crate::sources::SeriesProvider;
use crate::types::{BarInterval, Lookback, OhlcPoint, Series};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Symbols are already in Yahoo format (VOD.L, EURUSD=X, BTC-USD) and some
/// suffixes are case-sensitive, so only surrounding whitespace is removed.
fn normalize_yahoo_symbol(symbol: &str) -> &str {
    symbol.trim()
}

/// Yahoo's token for a bar interval.
fn yahoo_interval(interval: BarInterval) -> &'static str {
    match interval {
        BarInterval::OneHour => "60m",
        other => other.as_str(),
    }
}

/// Turn a chart response into a validated series.
///
/// Rows with any missing price are dropped; Yahoo pads gaps with nulls.
fn parse_chart(data: YahooChartResponse) -> Result<Series> {
    if let Some(error) = data.chart.error {
        return Err(AppError::ExternalApi(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let result = data
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| AppError::DataUnavailable("No results in response".to_string()))?;

    let timestamps = result.timestamp.unwrap_or_default();

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| AppError::DataUnavailable("No quote data in response".to_string()))?;

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let bars: Vec<OhlcPoint> = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &timestamp)| {
            let open = opens.get(i).copied().flatten()?;
            let high = highs.get(i).copied().flatten()?;
            let low = lows.get(i).copied().flatten()?;
            let close = closes.get(i).copied().flatten()?;
            let volume = volumes.get(i).copied().flatten().map(|v| v as f64);

            Some(OhlcPoint {
                time: timestamp * 1000, // Convert to milliseconds
                open,
                high,
                low,
                close,
                volume,
            })
        })
        .collect();

    if bars.is_empty() {
        return Err(AppError::DataUnavailable("Empty series returned".to_string()));
    }

    Series::new(bars)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client with a request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    fn chart_url(&self, symbol: &str, lookback: Lookback, interval: BarInterval) -> String {
        format!(
            "{}/{}?range={}&interval={}&includePrePost=false",
            self.base_url,
            normalize_yahoo_symbol(symbol),
            lookback.as_str(),
            yahoo_interval(interval)
        )
    }

    /// Fetch historical bars for a symbol.
    pub async fn get_historical_data(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: BarInterval,
    ) -> Result<Series> {
        let url = self.chart_url(symbol, lookback, interval);

        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!("API error: {}", response.status())));
        }

        let data: YahooChartResponse = response.json().await?;
        let series = parse_chart(data)?;

        debug!("Yahoo returned {} bars for {}", series.len(), symbol);

        Ok(series)
    }
}

impl SeriesProvider for YahooFinanceClient {
    async fn fetch_series(
        &self,
        symbol: &str,
        lookback: Lookback,
        interval: BarInterval,
    ) -> Result<Series> {
        self.get_historical_data(symbol, lookback, interval).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Series> {
        let data: YahooChartResponse = serde_json::from_str(json).unwrap();
        parse_chart(data)
    }

    // =========================================================================
    // normalize_yahoo_symbol Tests
    // =========================================================================

    #[test]
    fn test_normalize_yahoo_symbol() {
        assert_eq!(normalize_yahoo_symbol(" BTC-USD "), "BTC-USD");
        assert_eq!(normalize_yahoo_symbol("EURUSD=X"), "EURUSD=X");
    }

    #[test]
    fn test_normalize_keeps_exchange_suffix() {
        for symbol in ["VOD.L", "7203.T", "BMW.DE", "BRK.B"] {
            assert_eq!(normalize_yahoo_symbol(symbol), symbol);
        }
    }

    #[test]
    fn test_yahoo_interval_tokens() {
        assert_eq!(yahoo_interval(BarInterval::OneHour), "60m");
        assert_eq!(yahoo_interval(BarInterval::FifteenMinutes), "15m");
        assert_eq!(yahoo_interval(BarInterval::OneDay), "1d");
    }

    #[test]
    fn test_chart_url() {
        let client = YahooFinanceClient::new(Duration::from_secs(5)).unwrap();
        let url = client.chart_url("EURUSD=X", Lookback::FiveDays, BarInterval::FiveMinutes);
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/EURUSD=X?range=5d&interval=5m&includePrePost=false"
        );
    }

    #[test]
    fn test_chart_url_passes_exchange_symbols_through() {
        let client = YahooFinanceClient::new(Duration::from_secs(5)).unwrap();
        let url = client.chart_url("VOD.L", Lookback::FiveDays, BarInterval::FiveMinutes);
        assert!(url.contains("/chart/VOD.L?range=5d&interval=5m"), "got {}", url);

        let url = client.chart_url(" 7203.T ", Lookback::OneMonth, BarInterval::OneHour);
        assert!(url.contains("/chart/7203.T?range=1mo&interval=60m"), "got {}", url);
    }

    // =========================================================================
    // parse_chart Tests
    // =========================================================================

    #[test]
    fn test_parse_chart_builds_series() {
        let series = parse(
            r#"{"chart": {"result": [{
                "meta": {"symbol": "AAPL"},
                "timestamp": [1700000000, 1700000060],
                "indicators": {"quote": [{
                    "open": [150.0, 151.0],
                    "high": [155.0, 156.0],
                    "low": [148.0, 149.0],
                    "close": [153.0, 154.0],
                    "volume": [500, null]
                }]}
            }], "error": null}}"#,
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        let first = &series.bars()[0];
        assert_eq!(first.time, 1_700_000_000_000);
        assert_eq!(first.close, 153.0);
        assert_eq!(first.volume, Some(500.0));
        assert_eq!(series.bars()[1].volume, None);
    }

    #[test]
    fn test_parse_chart_drops_null_rows() {
        let series = parse(
            r#"{"chart": {"result": [{
                "timestamp": [1, 2, 3],
                "indicators": {"quote": [{
                    "open": [1.0, null, 1.2],
                    "high": [1.1, null, 1.3],
                    "low": [0.9, null, 1.1],
                    "close": [1.05, null, 1.25]
                }]}
            }], "error": null}}"#,
        )
        .unwrap();

        let times: Vec<i64> = series.bars().iter().map(|b| b.time).collect();
        assert_eq!(times, vec![1000, 3000]);
    }

    #[test]
    fn test_parse_chart_api_error() {
        let err = parse(
            r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ExternalApi(_)));
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_parse_chart_empty_result() {
        let err = parse(
            r#"{"chart": {"result": [{
                "indicators": {"quote": [{}]}
            }], "error": null}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }

    #[test]
    fn test_parse_chart_missing_quote() {
        let err = parse(
            r#"{"chart": {"result": [{
                "timestamp": [1],
                "indicators": {"quote": []}
            }], "error": null}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("No quote data"));
    }

    #[test]
    fn test_parse_chart_rejects_unordered_timestamps() {
        let err = parse(
            r#"{"chart": {"result": [{
                "timestamp": [2, 1],
                "indicators": {"quote": [{
                    "open": [1.0, 1.0], "high": [1.0, 1.0],
                    "low": [1.0, 1.0], "close": [1.0, 1.0]
                }]}
            }], "error": null}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::DataUnavailable(_)));
    }
}
