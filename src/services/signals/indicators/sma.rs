//! Simple Moving Average (SMA) indicator.

/// SMA (Simple Moving Average) indicator.
///
/// Calculates the average close over a trailing window. Undefined for the
/// first `period - 1` bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sma {
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn min_periods(&self) -> usize {
        self.period
    }

    /// SMA column aligned with `values`.
    pub fn calculate(&self, values: &[f64]) -> Vec<Option<f64>> {
        if self.period == 0 || values.len() < self.min_periods() {
            return vec![None; values.len()];
        }

        (0..values.len())
            .map(|i| {
                if i + 1 < self.period {
                    return None;
                }
                let window = &values[i + 1 - self.period..=i];
                Some(window.iter().sum::<f64>() / self.period as f64)
            })
            .collect()
    }
}
