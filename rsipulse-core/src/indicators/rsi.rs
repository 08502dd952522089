//! Relative Strength Index (RSI).
//!
//! Windowed form: average gain and average loss are trailing simple means
//! over the last `period` deltas (not Wilder smoothing).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: avg_loss == 0 with gains → RSI = 100; a perfectly flat
//! window (0/0) is undefined and stays `None`.

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Compute RSI for every position of the close column.
    ///
    /// Output is position-aligned with the input. Positions `0..period`
    /// are always `None` (not enough deltas); the value at position `i`
    /// depends only on the `period` deltas ending at `i`.
    pub fn compute(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let n = closes.len();
        let mut out = vec![None; n];
        if n < self.period + 1 {
            return out;
        }

        // gains[j] / losses[j] hold the delta into position j + 1.
        let mut gains = Vec::with_capacity(n - 1);
        let mut losses = Vec::with_capacity(n - 1);
        for i in 1..n {
            let delta = closes[i] - closes[i - 1];
            gains.push(delta.max(0.0));
            losses.push((-delta).max(0.0));
        }

        let p = self.period;
        for i in p..n {
            let avg_gain = gains[i - p..i].iter().sum::<f64>() / p as f64;
            let avg_loss = losses[i - p..i].iter().sum::<f64>() / p as f64;
            out[i] = rsi_value(avg_gain, avg_loss);
        }

        out
    }

    /// The most recent defined RSI value, or `None` when no position
    /// has one (input shorter than `period + 1`, or all windows flat).
    pub fn latest(&self, closes: &[f64]) -> Option<f64> {
        self.compute(closes).into_iter().flatten().last()
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        None // flat window, relative strength is 0/0
    } else if avg_loss == 0.0 {
        Some(100.0)
    } else {
        Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
    }
}
