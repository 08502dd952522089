//! Bounded rolling history of aggregate snapshots.
//!
//! Three parallel columns (fast RSI, slow RSI, average price), one entry
//! per refresh cycle, oldest dropped first once the capacity is reached.
//! Undefined snapshot fields are stored as `None` so positions keep
//! matching cycles. This is the only state carried between cycles and it
//! is owned by the session, never shared globally.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::AggregateSnapshot;

/// Default number of refresh cycles retained.
pub const MAX_HISTORY: usize = 100;

/// Read-only, index-aligned copy of the history columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub fast_rsi: Vec<Option<f64>>,
    pub slow_rsi: Vec<Option<f64>>,
    pub avg_price: Vec<Option<f64>>,
}

impl HistorySnapshot {
    pub fn len(&self) -> usize {
        self.fast_rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fast_rsi.is_empty()
    }
}

/// Bounded FIFO store of per-cycle aggregate figures.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    capacity: usize,
    fast_rsi: VecDeque<Option<f64>>,
    slow_rsi: VecDeque<Option<f64>>,
    avg_price: VecDeque<Option<f64>>,
    cleared: bool,
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "history capacity must be >= 1");
        Self {
            capacity,
            fast_rsi: VecDeque::with_capacity(capacity),
            slow_rsi: VecDeque::with_capacity(capacity),
            avg_price: VecDeque::with_capacity(capacity),
            cleared: false,
        }
    }

    /// Append one cycle's figures, evicting the oldest entry when full.
    ///
    /// Undefined fields are appended as `None`; a data-less cycle still
    /// occupies one position.
    pub fn push(&mut self, snap: &AggregateSnapshot) {
        if self.fast_rsi.len() == self.capacity {
            self.fast_rsi.pop_front();
            self.slow_rsi.pop_front();
            self.avg_price.pop_front();
        }
        self.fast_rsi.push_back(snap.fast_rsi);
        self.slow_rsi.push_back(snap.slow_rsi);
        self.avg_price.push_back(snap.avg_price);
    }

    /// Empty all columns and arm the cleared notice.
    pub fn reset(&mut self) {
        self.fast_rsi.clear();
        self.slow_rsi.clear();
        self.avg_price.clear();
        self.cleared = true;
    }

    /// One-shot cleared notice: true exactly once after a `reset`.
    pub fn take_cleared(&mut self) -> bool {
        std::mem::take(&mut self.cleared)
    }

    /// Owned, index-aligned copy of all three columns for rendering.
    pub fn snapshot_all(&self) -> HistorySnapshot {
        HistorySnapshot {
            fast_rsi: self.fast_rsi.iter().copied().collect(),
            slow_rsi: self.slow_rsi.iter().copied().collect(),
            avg_price: self.avg_price.iter().copied().collect(),
        }
    }

    /// Number of cycles currently stored. All columns share this length.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.fast_rsi.len(), self.slow_rsi.len());
        debug_assert_eq!(self.fast_rsi.len(), self.avg_price.len());
        self.fast_rsi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fast_rsi.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new(MAX_HISTORY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AggregateSnapshot, AlertTag, MarketSignal};

    fn snap(fast: Option<f64>, slow: Option<f64>, price: Option<f64>) -> AggregateSnapshot {
        AggregateSnapshot {
            fast_rsi: fast,
            slow_rsi: slow,
            avg_price: price,
            alert: AlertTag::Neutral,
            signal: MarketSignal::Neutral,
        }
    }

    #[test]
    fn columns_stay_aligned_and_bounded() {
        let mut history = RollingHistory::new(4);
        for i in 0..10 {
            history.push(&snap(Some(i as f64), Some(i as f64 + 0.5), Some(100.0 + i as f64)));
            assert!(history.len() <= 4);
            let view = history.snapshot_all();
            assert_eq!(view.fast_rsi.len(), view.slow_rsi.len());
            assert_eq!(view.fast_rsi.len(), view.avg_price.len());
        }
    }

    #[test]
    fn eviction_is_fifo_beyond_capacity() {
        let mut history = RollingHistory::new(100);
        for i in 1..=105 {
            history.push(&snap(Some(i as f64), Some(i as f64), Some(i as f64)));
        }
        assert_eq!(history.len(), 100);
        let view = history.snapshot_all();
        // Pushes 1..=5 were evicted; 6..=105 remain in order.
        assert_eq!(view.fast_rsi.first(), Some(&Some(6.0)));
        assert_eq!(view.fast_rsi.last(), Some(&Some(105.0)));
        for (offset, value) in view.avg_price.iter().enumerate() {
            assert_eq!(*value, Some(6.0 + offset as f64));
        }
    }

    #[test]
    fn undefined_fields_occupy_a_position() {
        let mut history = RollingHistory::new(10);
        history.push(&snap(Some(55.0), Some(52.0), Some(410.0)));
        history.push(&AggregateSnapshot::undefined());
        history.push(&snap(Some(57.0), Some(53.0), Some(412.0)));
        assert_eq!(history.len(), 3);
        let view = history.snapshot_all();
        assert_eq!(view.fast_rsi[1], None);
        assert_eq!(view.avg_price[1], None);
        assert_eq!(view.fast_rsi[2], Some(57.0));
    }

    #[test]
    fn reset_empties_and_arms_cleared_once() {
        let mut history = RollingHistory::new(10);
        history.push(&snap(Some(50.0), Some(50.0), Some(100.0)));
        assert!(!history.take_cleared());

        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
        assert!(history.take_cleared());
        assert!(!history.take_cleared());
    }

    #[test]
    fn push_after_reset_starts_fresh() {
        let mut history = RollingHistory::new(3);
        for i in 0..3 {
            history.push(&snap(Some(i as f64), None, None));
        }
        history.reset();
        history.push(&snap(Some(9.0), None, None));
        assert_eq!(history.len(), 1);
        assert_eq!(history.snapshot_all().fast_rsi, vec![Some(9.0)]);
    }

    #[test]
    fn default_capacity_is_100() {
        assert_eq!(RollingHistory::default().capacity(), MAX_HISTORY);
        assert_eq!(MAX_HISTORY, 100);
    }
}
