//! Weighted rule scoring of the latest annotated bar.

use crate::types::{AnnotatedSeries, IndicatorSet, OhlcPoint, ScoreResult};

/// Bars required before a series is scored. SMA(50) needs this many.
pub const MIN_HISTORY: usize = 50;

/// One outcome of a rule: fires when `when` holds for the latest bar.
struct Branch {
    when: fn(&OhlcPoint, &IndicatorSet) -> bool,
    delta: i32,
    reason: &'static str,
}

/// Rules in evaluation order. Within a rule the first matching branch
/// fires and the rest are skipped; a rule with no match contributes nothing.
const RULES: [&[Branch]; 4] = [
    &[
        Branch { when: rsi_oversold, delta: 2, reason: "RSI oversold" },
        Branch { when: rsi_overbought, delta: -2, reason: "RSI overbought" },
    ],
    // No neutral branch: equal lines, or an undefined value, read bearish.
    &[
        Branch { when: macd_bullish, delta: 2, reason: "MACD bullish" },
        Branch { when: always, delta: -2, reason: "MACD bearish" },
    ],
    &[
        Branch { when: below_lower_band, delta: 1, reason: "Price below lower BB" },
        Branch { when: above_upper_band, delta: -1, reason: "Price above upper BB" },
    ],
    &[
        Branch { when: above_moving_averages, delta: 2, reason: "Price above MAs" },
        Branch { when: below_moving_averages, delta: -2, reason: "Price below MAs" },
    ],
];

// Comparisons against an undefined value are false.
fn lt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a < b)
}

fn gt(a: Option<f64>, b: Option<f64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a > b)
}

fn rsi_oversold(_: &OhlcPoint, ind: &IndicatorSet) -> bool {
    lt(ind.rsi, Some(30.0))
}

fn rsi_overbought(_: &OhlcPoint, ind: &IndicatorSet) -> bool {
    gt(ind.rsi, Some(70.0))
}

fn macd_bullish(_: &OhlcPoint, ind: &IndicatorSet) -> bool {
    gt(ind.macd, ind.macd_signal)
}

fn always(_: &OhlcPoint, _: &IndicatorSet) -> bool {
    true
}

fn below_lower_band(bar: &OhlcPoint, ind: &IndicatorSet) -> bool {
    lt(Some(bar.close), ind.bb_lower)
}

fn above_upper_band(bar: &OhlcPoint, ind: &IndicatorSet) -> bool {
    gt(Some(bar.close), ind.bb_upper)
}

fn above_moving_averages(bar: &OhlcPoint, ind: &IndicatorSet) -> bool {
    gt(Some(bar.close), ind.sma_short) && gt(ind.sma_short, ind.sma_long)
}

fn below_moving_averages(bar: &OhlcPoint, ind: &IndicatorSet) -> bool {
    lt(Some(bar.close), ind.sma_short) && lt(ind.sma_short, ind.sma_long)
}

/// Score the most recent bar of `series`.
///
/// Series shorter than [`MIN_HISTORY`] get the insufficient-data sentinel
/// regardless of which indicators are already defined.
pub fn score(series: &AnnotatedSeries) -> ScoreResult {
    let latest = match series.latest() {
        Some(latest) if series.len() >= MIN_HISTORY => latest,
        _ => return ScoreResult::insufficient(),
    };

    let mut total = 0;
    let mut reasons = Vec::new();

    for rule in RULES.iter() {
        if let Some(branch) = rule
            .iter()
            .find(|b| (b.when)(&latest.bar, &latest.indicators))
        {
            total += branch.delta;
            reasons.push(branch.reason.to_string());
        }
    }

    ScoreResult {
        score: Some(total),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnnotatedPoint;

    fn point(close: f64, indicators: IndicatorSet) -> AnnotatedPoint {
        AnnotatedPoint {
            bar: OhlcPoint {
                time: 0,
                open: close,
                high: close,
                low: close,
                close,
                volume: None,
            },
            indicators,
        }
    }

    /// `len` bars whose last bar carries `latest` indicators.
    fn series_with_latest(len: usize, close: f64, latest: IndicatorSet) -> AnnotatedSeries {
        let mut points: Vec<AnnotatedPoint> = (0..len.saturating_sub(1))
            .map(|_| point(close, IndicatorSet::default()))
            .collect();
        points.push(point(close, latest));
        for (i, p) in points.iter_mut().enumerate() {
            p.bar.time = i as i64 * 60_000;
        }
        AnnotatedSeries { points }
    }

    /// Indicators that trigger no rule except the mandatory MACD one.
    fn quiet() -> IndicatorSet {
        IndicatorSet {
            rsi: Some(50.0),
            macd: Some(1.0),
            macd_signal: Some(0.5),
            macd_histogram: Some(0.5),
            bb_upper: Some(110.0),
            bb_middle: Some(100.0),
            bb_lower: Some(90.0),
            sma_short: Some(100.0),
            sma_long: Some(100.0),
        }
    }

    #[test]
    fn test_short_series_is_insufficient() {
        let bullish = IndicatorSet {
            rsi: Some(10.0),
            ..quiet()
        };
        for len in [0, 1, 20, 49] {
            let result = score(&series_with_latest(len, 100.0, bullish));
            assert_eq!(result, ScoreResult::insufficient(), "len {}", len);
        }
    }

    #[test]
    fn test_fifty_bars_are_scored() {
        let result = score(&series_with_latest(50, 100.0, quiet()));
        assert_eq!(result.score, Some(2));
        assert_eq!(result.reasons, vec!["MACD bullish"]);
    }

    #[test]
    fn test_all_bullish_rules_fire_in_order() {
        let ind = IndicatorSet {
            rsi: Some(25.0),
            macd: Some(1.0),
            macd_signal: Some(0.5),
            bb_lower: Some(101.0),
            sma_short: Some(95.0),
            sma_long: Some(90.0),
            ..quiet()
        };
        let result = score(&series_with_latest(60, 100.0, ind));
        assert_eq!(result.score, Some(7));
        assert_eq!(
            result.reasons,
            vec!["RSI oversold", "MACD bullish", "Price below lower BB", "Price above MAs"]
        );
    }

    #[test]
    fn test_all_bearish_rules_fire_in_order() {
        let ind = IndicatorSet {
            rsi: Some(80.0),
            macd: Some(-1.0),
            macd_signal: Some(0.0),
            bb_upper: Some(99.0),
            sma_short: Some(105.0),
            sma_long: Some(110.0),
            ..quiet()
        };
        let result = score(&series_with_latest(60, 100.0, ind));
        assert_eq!(result.score, Some(-7));
        assert_eq!(
            result.reasons,
            vec!["RSI overbought", "MACD bearish", "Price above upper BB", "Price below MAs"]
        );
    }

    #[test]
    fn test_macd_equality_is_bearish() {
        let ind = IndicatorSet {
            macd: Some(0.25),
            macd_signal: Some(0.25),
            ..quiet()
        };
        let result = score(&series_with_latest(50, 100.0, ind));
        assert_eq!(result.score, Some(-2));
        assert_eq!(result.reasons, vec!["MACD bearish"]);
    }

    #[test]
    fn test_rsi_thresholds_are_exclusive() {
        for rsi in [30.0, 70.0] {
            let ind = IndicatorSet {
                rsi: Some(rsi),
                ..quiet()
            };
            let result = score(&series_with_latest(50, 100.0, ind));
            assert_eq!(result.reasons, vec!["MACD bullish"], "rsi {}", rsi);
        }
    }

    #[test]
    fn test_band_touch_does_not_fire() {
        let ind = IndicatorSet {
            bb_lower: Some(100.0),
            ..quiet()
        };
        let result = score(&series_with_latest(50, 100.0, ind));
        assert_eq!(result.score, Some(2));
    }

    #[test]
    fn test_moving_average_ordering_is_strict() {
        // close > sma20 but sma20 == sma50
        let ind = IndicatorSet {
            sma_short: Some(95.0),
            sma_long: Some(95.0),
            ..quiet()
        };
        let result = score(&series_with_latest(50, 100.0, ind));
        assert!(!result.reasons.iter().any(|r| r.contains("MAs")));

        // close above sma20, sma20 below sma50
        let ind = IndicatorSet {
            sma_short: Some(95.0),
            sma_long: Some(98.0),
            ..quiet()
        };
        let result = score(&series_with_latest(50, 100.0, ind));
        assert!(!result.reasons.iter().any(|r| r.contains("MAs")));
    }

    #[test]
    fn test_undefined_values_do_not_fire() {
        let ind = IndicatorSet::default();
        let result = score(&series_with_latest(50, 100.0, ind));
        assert_eq!(result.score, Some(-2));
        assert_eq!(result.reasons, vec!["MACD bearish"]);
    }
}
