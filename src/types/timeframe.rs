use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// How far back to request history from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lookback {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Lookback {
    /// Get the lookback from a provider token.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(Lookback::OneDay),
            "5d" => Some(Lookback::FiveDays),
            "1mo" => Some(Lookback::OneMonth),
            "3mo" => Some(Lookback::ThreeMonths),
            "6mo" => Some(Lookback::SixMonths),
            "1y" => Some(Lookback::OneYear),
            _ => None,
        }
    }

    /// Provider token for this lookback.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lookback::OneDay => "1d",
            Lookback::FiveDays => "5d",
            Lookback::OneMonth => "1mo",
            Lookback::ThreeMonths => "3mo",
            Lookback::SixMonths => "6mo",
            Lookback::OneYear => "1y",
        }
    }

    /// Approximate span in milliseconds (months are 30 days).
    pub fn duration_ms(&self) -> i64 {
        match self {
            Lookback::OneDay => DAY_MS,
            Lookback::FiveDays => 5 * DAY_MS,
            Lookback::OneMonth => 30 * DAY_MS,
            Lookback::ThreeMonths => 90 * DAY_MS,
            Lookback::SixMonths => 180 * DAY_MS,
            Lookback::OneYear => 365 * DAY_MS,
        }
    }
}

/// Bar resolution requested from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BarInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h", alias = "60m")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl BarInterval {
    /// Get the interval from a provider token.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1m" => Some(BarInterval::OneMinute),
            "5m" => Some(BarInterval::FiveMinutes),
            "15m" => Some(BarInterval::FifteenMinutes),
            "30m" => Some(BarInterval::ThirtyMinutes),
            "1h" | "60m" => Some(BarInterval::OneHour),
            "1d" => Some(BarInterval::OneDay),
            _ => None,
        }
    }

    /// Provider token for this interval.
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::OneMinute => "1m",
            BarInterval::FiveMinutes => "5m",
            BarInterval::FifteenMinutes => "15m",
            BarInterval::ThirtyMinutes => "30m",
            BarInterval::OneHour => "1h",
            BarInterval::OneDay => "1d",
        }
    }

    /// Bar length in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        match self {
            BarInterval::OneMinute => MINUTE_MS,
            BarInterval::FiveMinutes => 5 * MINUTE_MS,
            BarInterval::FifteenMinutes => 15 * MINUTE_MS,
            BarInterval::ThirtyMinutes => 30 * MINUTE_MS,
            BarInterval::OneHour => HOUR_MS,
            BarInterval::OneDay => DAY_MS,
        }
    }

    /// Longest lookback the provider retains at this resolution.
    pub fn max_lookback(&self) -> Lookback {
        match self {
            BarInterval::OneMinute => Lookback::FiveDays,
            BarInterval::FiveMinutes
            | BarInterval::FifteenMinutes
            | BarInterval::ThirtyMinutes => Lookback::OneMonth,
            BarInterval::OneHour | BarInterval::OneDay => Lookback::OneYear,
        }
    }
}

/// Retrieval and bar settings for one evaluated timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeConfig {
    /// Identifier shown in reports (e.g. "15m").
    pub id: String,
    pub lookback: Lookback,
    pub interval: BarInterval,
    /// Length of the evaluated bars. Larger than the interval means the
    /// fetched bars are resampled.
    pub bar_ms: i64,
}

impl TimeframeConfig {
    /// Timeframe fetched and evaluated at the provider's native resolution.
    pub fn new(id: impl Into<String>, lookback: Lookback, interval: BarInterval) -> Self {
        Self {
            id: id.into(),
            lookback,
            interval,
            bar_ms: interval.duration_ms(),
        }
    }

    /// Timeframe built by resampling provider bars into `bar_ms` buckets.
    pub fn resampled(
        id: impl Into<String>,
        lookback: Lookback,
        interval: BarInterval,
        bar_ms: i64,
    ) -> Self {
        Self {
            id: id.into(),
            lookback,
            interval,
            bar_ms,
        }
    }

    /// Look up a built-in timeframe by identifier.
    pub fn preset(id: &str) -> Option<Self> {
        let config = match id {
            "1m" => Self::new("1m", Lookback::OneDay, BarInterval::OneMinute),
            "5m" => Self::new("5m", Lookback::FiveDays, BarInterval::FiveMinutes),
            "15m" => Self::new("15m", Lookback::FiveDays, BarInterval::FifteenMinutes),
            "30m" => Self::new("30m", Lookback::OneMonth, BarInterval::ThirtyMinutes),
            "1h" => Self::new("1h", Lookback::OneMonth, BarInterval::OneHour),
            "4h" => Self::resampled("4h", Lookback::ThreeMonths, BarInterval::OneHour, 4 * HOUR_MS),
            "1d" => Self::new("1d", Lookback::OneYear, BarInterval::OneDay),
            _ => return None,
        };
        Some(config)
    }

    /// The default evaluation set: 1m, 5m, 15m, 1h.
    pub fn defaults() -> Vec<Self> {
        ["1m", "5m", "15m", "1h"]
            .iter()
            .filter_map(|id| Self::preset(id))
            .collect()
    }

    /// Parse a comma-separated list of preset identifiers, keeping order.
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        let configs = list
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| {
                Self::preset(id).ok_or_else(|| {
                    AppError::Configuration(format!("unknown timeframe '{}'", id))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if configs.is_empty() {
            return Err(AppError::Configuration("no timeframes configured".to_string()));
        }
        Ok(configs)
    }

    /// Whether fetched bars must be aggregated before evaluation.
    pub fn needs_resample(&self) -> bool {
        self.bar_ms != self.interval.duration_ms()
    }

    /// Check the id and the lookback/interval/bar pairing.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AppError::Configuration("timeframe id is empty".to_string()));
        }

        let interval_ms = self.interval.duration_ms();
        if self.bar_ms <= 0 || self.bar_ms % interval_ms != 0 {
            return Err(AppError::Configuration(format!(
                "timeframe '{}': bar length {}ms is not a multiple of the {} interval",
                self.id,
                self.bar_ms,
                self.interval.as_str()
            )));
        }

        if self.lookback.duration_ms() < self.bar_ms {
            return Err(AppError::Configuration(format!(
                "timeframe '{}': lookback {} is shorter than one bar",
                self.id,
                self.lookback.as_str()
            )));
        }

        if self.lookback > self.interval.max_lookback() {
            return Err(AppError::Configuration(format!(
                "timeframe '{}': {} bars are not available for a {} lookback (max {})",
                self.id,
                self.interval.as_str(),
                self.lookback.as_str(),
                self.interval.max_lookback().as_str()
            )));
        }

        Ok(())
    }
}
