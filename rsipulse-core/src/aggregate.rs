//! Portfolio aggregation: pure functions over a cycle's readings.
//!
//! Readings in, snapshot out. No I/O, no mutation; calling twice with
//! the same slice produces identical snapshots.

use crate::domain::{AggregateSnapshot, AlertTag, MarketSignal, TickerReading};

/// Aggregate one cycle's per-ticker readings into a portfolio snapshot.
///
/// Each mean covers the defined values only; a ticker with missing data
/// simply does not contribute. When nothing contributed, the mean is
/// `None` and both the tag and the signal fall back to Neutral.
pub fn aggregate(readings: &[TickerReading]) -> AggregateSnapshot {
    let fast_rsi = mean_defined(readings.iter().map(|r| r.fast_rsi));
    let slow_rsi = mean_defined(readings.iter().map(|r| r.slow_rsi));
    let avg_price = mean_defined(readings.iter().map(|r| r.last_price));

    AggregateSnapshot {
        fast_rsi,
        slow_rsi,
        avg_price,
        alert: AlertTag::classify(fast_rsi, slow_rsi),
        signal: MarketSignal::derive(fast_rsi, slow_rsi),
    }
}

/// Arithmetic mean over the `Some` values, `None` when there are none.
pub fn mean_defined(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.flatten() {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
