use crate::error::{AppError, Result};
use crate::types::TimeframeConfig;
use chrono::{FixedOffset, Offset, Utc};
use std::env;
use std::time::Duration;

/// Timezone used when printing report timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayTimezone {
    #[default]
    Utc,
    Est,
    Pst,
    Gmt,
    Cet,
    Jst,
}

impl DisplayTimezone {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "UTC" => Some(Self::Utc),
            "EST" => Some(Self::Est),
            "PST" => Some(Self::Pst),
            "GMT" => Some(Self::Gmt),
            "CET" => Some(Self::Cet),
            "JST" => Some(Self::Jst),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utc => "UTC",
            Self::Est => "EST",
            Self::Pst => "PST",
            Self::Gmt => "GMT",
            Self::Cet => "CET",
            Self::Jst => "JST",
        }
    }

    /// Fixed (standard time) offset for this zone.
    pub fn offset(&self) -> FixedOffset {
        let hours = match self {
            Self::Utc | Self::Gmt => 0,
            Self::Est => -5,
            Self::Pst => -8,
            Self::Cet => 1,
            Self::Jst => 9,
        };
        FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| Utc.fix())
    }
}

/// How the binary prints reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instrument symbol in provider format (e.g. EURUSD=X, BTC-USD).
    pub symbol: String,
    /// Timeframes to evaluate, in report order.
    pub timeframes: Vec<TimeframeConfig>,
    pub display_timezone: DisplayTimezone,
    /// Re-evaluate periodically instead of exiting after one report.
    pub auto_refresh: bool,
    pub refresh_interval: Duration,
    /// Timeout for each provider request.
    pub request_timeout: Duration,
    /// Poll the per-timeframe pipelines concurrently.
    pub concurrent: bool,
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            symbol: "EURUSD=X".to_string(),
            timeframes: TimeframeConfig::defaults(),
            display_timezone: DisplayTimezone::Utc,
            auto_refresh: true,
            refresh_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(30),
            concurrent: false,
            output_format: OutputFormat::Text,
        }
    }
}

fn parse_bool(v: &str) -> bool {
    v == "true" || v == "1"
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeframes = match lookup("TIMEFRAMES") {
            Some(list) => TimeframeConfig::parse_list(&list)?,
            None => defaults.timeframes,
        };

        let display_timezone = match lookup("DISPLAY_TIMEZONE") {
            Some(tz) => DisplayTimezone::from_str(&tz).ok_or_else(|| {
                AppError::Configuration(format!("unknown display timezone '{}'", tz))
            })?,
            None => defaults.display_timezone,
        };

        let output_format = match lookup("OUTPUT_FORMAT") {
            Some(format) => OutputFormat::from_str(&format).ok_or_else(|| {
                AppError::Configuration(format!("unknown output format '{}'", format))
            })?,
            None => defaults.output_format,
        };

        Ok(Self {
            symbol: lookup("SYMBOL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.symbol),
            timeframes,
            display_timezone,
            auto_refresh: lookup("AUTO_REFRESH")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.auto_refresh),
            refresh_interval: lookup("REFRESH_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            request_timeout: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            concurrent: lookup("CONCURRENT_TIMEFRAMES")
                .map(|v| parse_bool(&v))
                .unwrap_or(defaults.concurrent),
            output_format,
        })
    }
}
