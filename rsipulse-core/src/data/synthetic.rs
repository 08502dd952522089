//! Synthetic quote provider.
//!
//! Produces a seeded random walk per (symbol, interval) so the dashboard
//! runs offline. Given the same seed and fetch sequence, output is
//! identical run to run. Each fetch slides the window one bar forward,
//! so repeated refreshes show an evolving series.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::provider::{FetchError, QuoteProvider};
use crate::domain::{Interval, PricePoint, PriceSeries};

const DEFAULT_SEED: u64 = 42;

/// Deterministic random-walk quote provider for demos and offline use.
pub struct SyntheticQuotes {
    seed: u64,
    ticks: AtomicU64,
}

impl SyntheticQuotes {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ticks: AtomicU64::new(0),
        }
    }

    /// Derive a deterministic sub-seed for a (symbol, interval) stream.
    ///
    /// FNV-1a over the symbol and interval code, folded with the master
    /// seed. Hash-based derivation keeps streams independent of the
    /// order symbols are fetched in.
    fn sub_seed(&self, symbol: &str, interval: Interval) -> u64 {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in symbol.bytes().chain(interval.code().bytes()) {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash ^ self.seed.rotate_left(17)
    }
}

impl Default for SyntheticQuotes {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl QuoteProvider for SyntheticQuotes {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError> {
        let tick = self.ticks.fetch_add(1, Ordering::Relaxed);
        let mut rng = StdRng::seed_from_u64(self.sub_seed(symbol, interval));

        let bars = interval.bars_per_window();
        let total = bars + tick as usize;

        // Per-stream drift so RSI actually visits the overbought and
        // oversold regions instead of hovering at the midline.
        let drift = rng.gen_range(-0.0012..0.0012);
        let mut price: f64 = rng.gen_range(20.0..480.0);

        let mut closes = Vec::with_capacity(total);
        for _ in 0..total {
            let bar_return = drift + rng.gen_range(-0.004..0.004);
            price *= 1.0 + bar_return;
            // Floor at 1.0 to keep the walk positive
            price = price.max(1.0);
            closes.push(price);
        }

        let end = Utc::now();
        let step_secs = interval.step_secs();
        let points = closes[total - bars..]
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                ts: end - chrono::Duration::seconds(step_secs * (bars - 1 - i) as i64),
                close,
            })
            .collect();

        Ok(PriceSeries::new(symbol, interval, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_series() {
        let a = SyntheticQuotes::new(7);
        let b = SyntheticQuotes::new(7);

        let sa = a.fetch("SPY", Interval::M5).unwrap();
        let sb = b.fetch("SPY", Interval::M5).unwrap();
        assert_eq!(sa.closes(), sb.closes());
    }

    #[test]
    fn different_symbols_different_series() {
        let provider = SyntheticQuotes::new(7);

        let spy = provider.fetch("SPY", Interval::M5).unwrap();
        let qqq = provider.fetch("QQQ", Interval::M5).unwrap();
        assert_ne!(spy.closes(), qqq.closes());
    }

    #[test]
    fn window_matches_interval() {
        let provider = SyntheticQuotes::default();

        let series = provider.fetch("AAPL", Interval::M5).unwrap();
        assert_eq!(series.len(), Interval::M5.bars_per_window());

        let series = provider.fetch("AAPL", Interval::M15).unwrap();
        assert_eq!(series.len(), Interval::M15.bars_per_window());
    }

    #[test]
    fn timestamps_ascend_at_interval_spacing() {
        let provider = SyntheticQuotes::default();
        let series = provider.fetch("NVDA", Interval::M15).unwrap();

        for pair in series.points.windows(2) {
            let gap = pair[1].ts - pair[0].ts;
            assert_eq!(gap.num_seconds(), Interval::M15.step_secs());
        }
    }

    #[test]
    fn refetch_slides_the_window_forward() {
        let provider = SyntheticQuotes::new(7);
        let bars = Interval::M5.bars_per_window();

        let first = provider.fetch("SPY", Interval::M5).unwrap();
        let second = provider.fetch("SPY", Interval::M5).unwrap();

        assert_ne!(first.closes(), second.closes());
        assert_eq!(second.closes()[..bars - 1], first.closes()[1..]);
    }

    #[test]
    fn prices_stay_positive() {
        let provider = SyntheticQuotes::new(1234);
        for symbol in ["AAPL", "MSFT", "TSLA"] {
            let series = provider.fetch(symbol, Interval::M5).unwrap();
            assert!(series.closes().iter().all(|&c| c > 0.0));
        }
    }
}
