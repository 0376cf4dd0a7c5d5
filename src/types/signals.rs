use crate::types::OhlcPoint;
use serde::{Deserialize, Serialize};

/// Reason recorded when a series is too short to score.
pub const INSUFFICIENT_DATA: &str = "Insufficient data";

/// Derived indicator values for one bar.
///
/// `None` means the indicator is still inside its warm-up window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_lower: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
}

/// A bar together with its indicator values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPoint {
    #[serde(flatten)]
    pub bar: OhlcPoint,
    #[serde(flatten)]
    pub indicators: IndicatorSet,
}

/// Series with one `IndicatorSet` aligned to every bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotatedSeries {
    pub points: Vec<AnnotatedPoint>,
}

impl AnnotatedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&AnnotatedPoint> {
        self.points.last()
    }
}

/// Integer score plus the reasons of every rule that fired, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// `None` when the series was too short to score.
    pub score: Option<i32>,
    pub reasons: Vec<String>,
}

impl ScoreResult {
    /// Sentinel for series below the minimum history.
    pub fn insufficient() -> Self {
        Self {
            score: None,
            reasons: vec![INSUFFICIENT_DATA.to_string()],
        }
    }
}

/// Discrete trading signal label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalLabel {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
    /// Out-of-band: the series for this timeframe could not be obtained.
    Error,
}

impl SignalLabel {
    /// Map an integer score onto a label.
    ///
    /// `>= 4` strong buy, `[2, 4)` buy, `(-2, 2)` neutral, `(-4, -2]` sell,
    /// `<= -4` strong sell.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 4 => SignalLabel::StrongBuy,
            s if s >= 2 => SignalLabel::Buy,
            s if s <= -4 => SignalLabel::StrongSell,
            s if s <= -2 => SignalLabel::Sell,
            _ => SignalLabel::Neutral,
        }
    }

    /// Get display label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            SignalLabel::StrongBuy => "STRONG BUY",
            SignalLabel::Buy => "BUY",
            SignalLabel::Neutral => "NEUTRAL",
            SignalLabel::Sell => "SELL",
            SignalLabel::StrongSell => "STRONG SELL",
            SignalLabel::Error => "ERROR",
        }
    }

    pub fn is_bullish(&self) -> bool {
        matches!(self, SignalLabel::StrongBuy | SignalLabel::Buy)
    }

    pub fn is_bearish(&self) -> bool {
        matches!(self, SignalLabel::StrongSell | SignalLabel::Sell)
    }
}

impl std::fmt::Display for SignalLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A label together with the score that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub label: SignalLabel,
    pub result: ScoreResult,
}

impl Signal {
    /// ERROR signal carrying the failure reason.
    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            label: SignalLabel::Error,
            result: ScoreResult {
                score: None,
                reasons: vec![reason.into()],
            },
        }
    }

    pub fn reasons(&self) -> &[String] {
        &self.result.reasons
    }
}

/// Outcome for one configured timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeEntry {
    pub timeframe: String,
    pub signal: Signal,
    /// Empty when the signal is ERROR.
    pub series: AnnotatedSeries,
}

/// Per-timeframe signals for one instrument, in configured order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeframeReport {
    pub symbol: String,
    pub entries: Vec<TimeframeEntry>,
}

impl TimeframeReport {
    /// First entry for a timeframe id.
    pub fn get(&self, timeframe: &str) -> Option<&TimeframeEntry> {
        self.entries.iter().find(|e| e.timeframe == timeframe)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries that failed to evaluate.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.signal.label == SignalLabel::Error)
            .count()
    }
}
