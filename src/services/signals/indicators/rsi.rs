//! Relative Strength Index (RSI) indicator.

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30: Oversold (potential buy signal)
/// - Above 70: Overbought (potential sell signal)
///
/// Uses Wilder smoothing seeded with the simple average of the first
/// `period` close-to-close changes, so the first `period` bars are undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            return 100.0;
        }
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    }

    /// RSI column aligned with `closes`.
    pub fn calculate(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        if self.period == 0 || closes.len() < self.min_periods() {
            return out;
        }

        let mut gains = Vec::with_capacity(closes.len() - 1);
        let mut losses = Vec::with_capacity(closes.len() - 1);

        for w in closes.windows(2) {
            let change = w[1] - w[0];
            if change > 0.0 {
                gains.push(change);
                losses.push(0.0);
            } else {
                gains.push(0.0);
                losses.push(-change);
            }
        }

        let period = self.period as f64;

        // Calculate initial averages
        let mut avg_gain = gains[..self.period].iter().sum::<f64>() / period;
        let mut avg_loss = losses[..self.period].iter().sum::<f64>() / period;
        out[self.period] = Some(Self::rsi_from_averages(avg_gain, avg_loss));

        // gains[i] is the change into bar i + 1
        for i in self.period..gains.len() {
            avg_gain = (avg_gain * (period - 1.0) + gains[i]) / period;
            avg_loss = (avg_loss * (period - 1.0) + losses[i]) / period;
            out[i + 1] = Some(Self::rsi_from_averages(avg_gain, avg_loss));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uptrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64 * 1.5).collect()
    }

    fn downtrend(count: usize) -> Vec<f64> {
        (0..count).map(|i| 200.0 - i as f64 * 1.5).collect()
    }

    #[test]
    fn test_rsi_min_periods() {
        assert_eq!(Rsi::default().min_periods(), 15);
        assert_eq!(Rsi::new(7).min_periods(), 8);
    }

    #[test]
    fn test_rsi_undefined_for_first_fourteen_bars() {
        let out = Rsi::default().calculate(&uptrend(30));
        assert!(out[..14].iter().all(Option::is_none));
        assert!(out[14].is_some());
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let out = Rsi::default().calculate(&uptrend(14));
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn test_rsi_pure_uptrend_is_100() {
        let out = Rsi::default().calculate(&uptrend(50));
        assert_eq!(out[49], Some(100.0));
    }

    #[test]
    fn test_rsi_downtrend_low_value() {
        let out = Rsi::default().calculate(&downtrend(50));
        let value = out[49].unwrap();
        assert!(value < 1e-9, "RSI in pure downtrend should be 0, got {}", value);
    }

    #[test]
    fn test_rsi_alternating_is_midrange() {
        let closes: Vec<f64> = (0..60)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        let out = Rsi::default().calculate(&closes);
        for value in out.iter().flatten() {
            assert!(*value > 30.0 && *value < 70.0, "got {}", value);
        }
    }

    #[test]
    fn test_rsi_seed_value() {
        // 7 gains of 2 and 7 losses of 1 over the first 14 changes.
        let mut closes = vec![100.0];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let out = Rsi::default().calculate(&closes);
        // avg gain 1.0, avg loss 0.5 -> RS 2 -> RSI 66.67
        let value = out[14].unwrap();
        assert!((value - 200.0 / 3.0).abs() < 1e-9, "got {}", value);
    }

    #[test]
    fn test_rsi_value_range() {
        let closes: Vec<f64> = (0..80).map(|i| 100.0 + ((i * 7) % 11) as f64).collect();
        let out = Rsi::new(7).calculate(&closes);
        for value in out.iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
    }
}
