use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// OHLC (Open, High, Low, Close) data point.
///
/// `time` is the bar's opening timestamp in Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl OhlcPoint {
    fn is_well_formed(&self) -> bool {
        let prices = [self.open, self.high, self.low, self.close];
        let prices_ok = prices.iter().all(|p| p.is_finite() && *p > 0.0);
        let volume_ok = self.volume.map_or(true, |v| v.is_finite() && v >= 0.0);
        prices_ok && volume_ok
    }
}

/// Ordered sequence of bars for one timeframe.
///
/// Timestamps are strictly increasing. Gaps are allowed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OhlcPoint>", into = "Vec<OhlcPoint>")]
pub struct Series {
    bars: Vec<OhlcPoint>,
}

impl TryFrom<Vec<OhlcPoint>> for Series {
    type Error = AppError;

    fn try_from(bars: Vec<OhlcPoint>) -> Result<Self> {
        Series::new(bars)
    }
}

impl From<Series> for Vec<OhlcPoint> {
    fn from(series: Series) -> Self {
        series.bars
    }
}

impl Series {
    /// Build a series, rejecting malformed or out-of-order bars.
    pub fn new(bars: Vec<OhlcPoint>) -> Result<Self> {
        for (i, bar) in bars.iter().enumerate() {
            if !bar.is_well_formed() {
                return Err(AppError::DataUnavailable(format!(
                    "malformed bar at {} (index {})",
                    bar.time, i
                )));
            }
        }

        if let Some(pos) = bars.windows(2).position(|w| w[1].time <= w[0].time) {
            return Err(AppError::DataUnavailable(format!(
                "timestamps not strictly increasing at index {} ({} after {})",
                pos + 1,
                bars[pos + 1].time,
                bars[pos].time
            )));
        }

        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[OhlcPoint] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in bar order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Aggregate bars into epoch-aligned buckets of `bucket_ms` milliseconds.
    ///
    /// Each bucket opens at the first bar's open, closes at the last bar's
    /// close, and spans the extreme high/low. Volume is summed when any
    /// contributing bar reports one.
    pub fn resample(&self, bucket_ms: i64) -> Series {
        if bucket_ms <= 0 {
            return self.clone();
        }

        let mut buckets: Vec<OhlcPoint> = Vec::new();
        for bar in &self.bars {
            let bucket_time = bar.time.div_euclid(bucket_ms) * bucket_ms;

            if let Some(last) = buckets.last_mut() {
                if last.time == bucket_time {
                    last.high = last.high.max(bar.high);
                    last.low = last.low.min(bar.low);
                    last.close = bar.close;
                    last.volume = match (last.volume, bar.volume) {
                        (Some(a), Some(b)) => Some(a + b),
                        (a, b) => a.or(b),
                    };
                    continue;
                }
            }

            buckets.push(OhlcPoint {
                time: bucket_time,
                ..bar.clone()
            });
        }

        // Bucket times inherit the strict ordering of the source bars.
        Series { bars: buckets }
    }
}
