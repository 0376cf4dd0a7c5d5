//! Exponential Moving Average (EMA).

/// EMA (Exponential Moving Average).
///
/// Like SMA but gives more weight to recent prices. The first value is the
/// SMA of the first `period` inputs, so the column is undefined for the
/// first `period - 1` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ema {
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Minimum number of inputs before a value is produced.
    pub fn min_periods(&self) -> usize {
        self.period
    }

    /// Smoothing factor `2 / (period + 1)`.
    fn multiplier(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    /// EMA column aligned with `values`.
    pub fn calculate(&self, values: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; values.len()];
        if self.period == 0 || values.len() < self.min_periods() {
            return out;
        }

        let multiplier = self.multiplier();

        // First EMA is SMA
        let mut ema = values[..self.period].iter().sum::<f64>() / self.period as f64;
        out[self.period - 1] = Some(ema);

        for (i, value) in values.iter().enumerate().skip(self.period) {
            ema = (value - ema) * multiplier + ema;
            out[i] = Some(ema);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_with_sma() {
        let ema = Ema::new(3);
        let values = [1.0, 2.0, 3.0, 4.0];
        let out = ema.calculate(&values);

        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        // (4 - 2) * 0.5 + 2
        assert_eq!(out[3], Some(3.0));
    }

    #[test]
    fn test_ema_insufficient_data() {
        let ema = Ema::new(12);
        let out = ema.calculate(&[1.0; 11]);
        assert_eq!(out.len(), 11);
        assert!(out.iter().all(Option::is_none));
    }

    #[test]
    fn test_ema_constant_input() {
        let ema = Ema::new(5);
        let out = ema.calculate(&[7.5; 20]);
        for value in out.iter().skip(4) {
            assert!((value.unwrap() - 7.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_ema_tracks_trend() {
        let ema = Ema::new(10);
        let values: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let out = ema.calculate(&values);
        let last = out.last().unwrap().unwrap();
        // Lags below the latest value in an uptrend.
        assert!(last < 139.0 && last > 130.0, "got {}", last);
    }
}
