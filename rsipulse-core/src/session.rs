//! Refresh cycle orchestration.
//!
//! `Session` ties the validated config, the watchlist, and the rolling
//! history together and runs one refresh cycle at a time. A cycle never
//! aborts on a per-ticker fetch error: the failed ticker reads as
//! undefined, the error lands in the report, and the remaining tickers
//! proceed. Retry is the next scheduled refresh, not a loop here.

use chrono::{DateTime, Utc};

use crate::aggregate::aggregate;
use crate::config::{ConfigError, DashboardConfig};
use crate::data::{FetchError, QuoteProvider, Watchlist};
use crate::domain::{AggregateSnapshot, Interval, PriceSeries, TickerReading};
use crate::history::RollingHistory;
use crate::indicators::Rsi;

/// A fetch that failed within a cycle.
#[derive(Debug)]
pub struct FetchFailure {
    pub symbol: String,
    pub interval: Interval,
    pub error: FetchError,
}

/// Outcome of one refresh cycle.
#[derive(Debug)]
pub struct CycleReport {
    /// Per-ticker readings, in watchlist order.
    pub readings: Vec<TickerReading>,
    /// Portfolio-wide aggregate for this cycle.
    pub snapshot: AggregateSnapshot,
    /// Fetches that failed this cycle. Empty on a clean cycle.
    pub errors: Vec<FetchFailure>,
    pub completed_at: DateTime<Utc>,
}

impl CycleReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Dashboard session state: config, watchlist, and aggregate history.
pub struct Session {
    config: DashboardConfig,
    watchlist: Watchlist,
    history: RollingHistory,
}

impl Session {
    /// Create a session from a validated config and watchlist.
    ///
    /// Config violations are fatal here, before any fetch is attempted.
    pub fn new(config: DashboardConfig, watchlist: Watchlist) -> Result<Self, ConfigError> {
        config.validate()?;
        let history = RollingHistory::new(config.history_capacity);
        Ok(Self {
            config,
            watchlist,
            history,
        })
    }

    /// Run one refresh cycle against the provider.
    ///
    /// Fetches the fast and slow series per ticker in watchlist order,
    /// computes both RSI readings, aggregates, and appends the aggregate
    /// to history. The history row is appended even when every reading
    /// is undefined, so history rows stay aligned with cycles.
    pub fn run_cycle(&mut self, provider: &dyn QuoteProvider) -> CycleReport {
        let rsi = Rsi::new(self.config.rsi_period);
        let mut readings = Vec::with_capacity(self.watchlist.len());
        let mut errors = Vec::new();

        for symbol in self.watchlist.symbols() {
            let fast = fetch_series(provider, symbol, self.config.fast_interval, &mut errors);
            let slow = fetch_series(provider, symbol, self.config.slow_interval, &mut errors);

            let fast_rsi = fast.as_ref().and_then(|s| rsi.latest(&s.closes()));
            let slow_rsi = slow.as_ref().and_then(|s| rsi.latest(&s.closes()));
            let last_price = fast.as_ref().and_then(|s| s.last_close());

            readings.push(TickerReading {
                symbol: symbol.clone(),
                fast_rsi,
                slow_rsi,
                last_price,
            });
        }

        let snapshot = aggregate(&readings);
        self.history.push(&snapshot);

        CycleReport {
            readings,
            snapshot,
            errors,
            completed_at: Utc::now(),
        }
    }

    /// Drop all history rows and arm the one-shot cleared flag.
    pub fn clear_history(&mut self) {
        self.history.reset();
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn history(&self) -> &RollingHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut RollingHistory {
        &mut self.history
    }
}

fn fetch_series(
    provider: &dyn QuoteProvider,
    symbol: &str,
    interval: Interval,
    errors: &mut Vec<FetchFailure>,
) -> Option<PriceSeries> {
    match provider.fetch(symbol, interval) {
        Ok(series) => Some(series),
        Err(error) => {
            errors.push(FetchFailure {
                symbol: symbol.to_string(),
                interval,
                error,
            });
            None
        }
    }
}
