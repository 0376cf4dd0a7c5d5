//! Bollinger Bands indicator.

/// Bollinger Bands indicator.
///
/// Consists of:
/// - Middle band: SMA(20)
/// - Upper band: SMA + 2 * StdDev
/// - Lower band: SMA - 2 * StdDev
///
/// The standard deviation is the population deviation of the same window.
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new(20, 2.0)
    }
}

/// Band columns aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerColumns {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

impl BollingerBands {
    pub fn new(period: usize, std_dev_multiplier: f64) -> Self {
        Self {
            period,
            std_dev_multiplier,
        }
    }

    pub fn min_periods(&self) -> usize {
        self.period
    }

    /// Calculate standard deviation.
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let variance: f64 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    pub fn calculate(&self, closes: &[f64]) -> BollingerColumns {
        let n = closes.len();
        let mut columns = BollingerColumns {
            upper: vec![None; n],
            middle: vec![None; n],
            lower: vec![None; n],
        };

        if self.period == 0 || n < self.min_periods() {
            return columns;
        }

        for i in (self.period - 1)..n {
            let window = &closes[i + 1 - self.period..=i];
            let middle = window.iter().sum::<f64>() / self.period as f64;
            let band = self.std_dev_multiplier * Self::std_dev(window, middle);

            columns.middle[i] = Some(middle);
            columns.upper[i] = Some(middle + band);
            columns.lower[i] = Some(middle - band);
        }

        columns
    }
}
