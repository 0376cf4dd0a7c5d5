//! MACD (Moving Average Convergence Divergence) indicator.

use super::ema::Ema;

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
/// - Histogram = MACD Line - Signal Line
///
/// All three columns stay undefined until the signal line is seeded, i.e.
/// for the first `slow + signal - 2` bars (33 with the defaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

/// MACD columns aligned with the input closes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdColumns {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
            signal_period,
        }
    }

    /// Number of bars before the first defined value. The signal EMA runs
    /// over the MACD line, which starts once the slow EMA is seeded.
    pub fn min_periods(&self) -> usize {
        let slow = Ema::new(self.slow_period.max(self.fast_period));
        let signal = Ema::new(self.signal_period);
        (slow.min_periods() + signal.min_periods()).saturating_sub(1)
    }

    pub fn calculate(&self, closes: &[f64]) -> MacdColumns {
        let n = closes.len();
        let mut columns = MacdColumns {
            line: vec![None; n],
            signal: vec![None; n],
            histogram: vec![None; n],
        };

        if self.signal_period == 0 || n < self.min_periods() {
            return columns;
        }

        let fast_ema = Ema::new(self.fast_period).calculate(closes);
        let slow_ema = Ema::new(self.slow_period).calculate(closes);

        // Raw MACD line wherever both EMAs exist, with the index it starts at
        let raw: Vec<(usize, f64)> = fast_ema
            .iter()
            .zip(slow_ema.iter())
            .enumerate()
            .filter_map(|(i, (f, s))| Some((i, (*f)? - (*s)?)))
            .collect();

        let Some(&(start, _)) = raw.first() else {
            return columns;
        };

        let raw_values: Vec<f64> = raw.iter().map(|(_, v)| *v).collect();
        let signal_line = Ema::new(self.signal_period).calculate(&raw_values);

        for (offset, signal) in signal_line.into_iter().enumerate() {
            let Some(signal) = signal else { continue };
            let i = start + offset;
            let line = raw_values[offset];
            columns.line[i] = Some(line);
            columns.signal[i] = Some(signal);
            columns.histogram[i] = Some(line - signal);
        }

        columns
    }
}
