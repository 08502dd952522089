//! End-to-end tests of the refresh pipeline over scripted providers.
//!
//! Covers the full path: watchlist -> fetch -> RSI -> classification ->
//! aggregate -> history, including partial outages and recovery.

use std::sync::atomic::{AtomicU64, Ordering};

use rsipulse_core::config::DashboardConfig;
use rsipulse_core::data::{FetchError, QuoteProvider, SyntheticQuotes, Watchlist};
use rsipulse_core::domain::{AlertTag, Interval, MarketSignal, PricePoint, PriceSeries};
use rsipulse_core::session::Session;

fn walk(symbol: &str, interval: Interval, start: f64, delta: f64, n: usize) -> PriceSeries {
    let step = interval.step_secs();
    let points = (0..n)
        .map(|i| PricePoint {
            ts: chrono::DateTime::from_timestamp(1_710_000_000 + i as i64 * step, 0).unwrap(),
            close: start + delta * i as f64,
        })
        .collect();
    PriceSeries::new(symbol, interval, points)
}

fn session_with(config: DashboardConfig, symbols: &[&str]) -> Session {
    let watchlist = Watchlist::new(symbols.iter().copied()).unwrap();
    Session::new(config, watchlist).unwrap()
}

/// Serves a monotone walk per symbol: rising, falling, or flat.
struct TrendingFeed {
    falling: Vec<&'static str>,
    flat: Vec<&'static str>,
}

impl TrendingFeed {
    fn rising_only() -> Self {
        Self {
            falling: Vec::new(),
            flat: Vec::new(),
        }
    }
}

impl QuoteProvider for TrendingFeed {
    fn name(&self) -> &str {
        "trending"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError> {
        let series = if self.falling.contains(&symbol) {
            walk(symbol, interval, 180.0, -1.0, 40)
        } else if self.flat.contains(&symbol) {
            walk(symbol, interval, 100.0, 0.0, 40)
        } else {
            walk(symbol, interval, 100.0, 1.0, 40)
        };
        Ok(series)
    }
}

/// Fails the first N fetches, then serves a rising walk.
struct FlakyFeed {
    fails_remaining: AtomicU64,
}

impl FlakyFeed {
    fn new(failures: u64) -> Self {
        Self {
            fails_remaining: AtomicU64::new(failures),
        }
    }
}

impl QuoteProvider for FlakyFeed {
    fn name(&self) -> &str {
        "flaky"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError> {
        let remaining = self.fails_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fails_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(FetchError::NetworkUnreachable("scripted outage".into()));
        }
        Ok(walk(symbol, interval, 100.0, 1.0, 40))
    }
}

/// Rising on the fast timeframe, falling on the slow one.
struct SplitFeed;

impl QuoteProvider for SplitFeed {
    fn name(&self) -> &str {
        "split"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError> {
        let series = if interval == Interval::M5 {
            walk(symbol, interval, 100.0, 1.0, 40)
        } else {
            walk(symbol, interval, 180.0, -1.0, 40)
        };
        Ok(series)
    }
}

/// Always returns an empty (but valid) series.
struct EmptyFeed;

impl QuoteProvider for EmptyFeed {
    fn name(&self) -> &str {
        "empty"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError> {
        Ok(PriceSeries::empty(symbol, interval))
    }
}

#[test]
fn synthetic_session_fills_bounded_history() {
    let config = DashboardConfig {
        history_capacity: 3,
        ..DashboardConfig::default()
    };
    let mut session = session_with(config, &["AAPL", "MSFT", "NVDA"]);
    let provider = SyntheticQuotes::new(7);

    for _ in 0..5 {
        let report = session.run_cycle(&provider);
        assert!(report.is_clean());

        for reading in &report.readings {
            assert!(reading.last_price.is_some());
            let fast = reading.fast_rsi.unwrap();
            let slow = reading.slow_rsi.unwrap();
            assert!((0.0..=100.0).contains(&fast));
            assert!((0.0..=100.0).contains(&slow));
        }
        assert!(report.snapshot.avg_price.is_some());
    }

    let history = session.history().snapshot_all();
    assert_eq!(history.len(), 3);
    assert_eq!(history.fast_rsi.len(), history.slow_rsi.len());
    assert_eq!(history.fast_rsi.len(), history.avg_price.len());
}

#[test]
fn fetch_outage_recovers_on_the_next_cycle() {
    // Two symbols, two intervals each: exactly one full cycle of failures.
    let mut session = session_with(DashboardConfig::default(), &["SPY", "QQQ"]);
    let provider = FlakyFeed::new(4);

    let outage = session.run_cycle(&provider);
    assert_eq!(outage.errors.len(), 4);
    assert_eq!(outage.snapshot.fast_rsi, None);
    assert_eq!(outage.snapshot.signal, MarketSignal::Neutral);

    let recovered = session.run_cycle(&provider);
    assert!(recovered.is_clean());
    assert_eq!(recovered.snapshot.fast_rsi, Some(100.0));
    assert_eq!(recovered.snapshot.signal, MarketSignal::Bullish);

    // Both cycles appended a row; the outage row holds undefined values.
    let history = session.history().snapshot_all();
    assert_eq!(history.len(), 2);
    assert_eq!(history.fast_rsi[0], None);
    assert_eq!(history.fast_rsi[1], Some(100.0));
}

#[test]
fn empty_series_reads_undefined_without_errors() {
    let mut session = session_with(DashboardConfig::default(), &["SPY"]);

    let report = session.run_cycle(&EmptyFeed);

    assert!(report.is_clean());
    let reading = &report.readings[0];
    assert_eq!(reading.fast_rsi, None);
    assert_eq!(reading.slow_rsi, None);
    assert_eq!(reading.last_price, None);
    assert_eq!(report.snapshot.signal, MarketSignal::Neutral);
    assert_eq!(session.history().len(), 1);
}

#[test]
fn opposed_timeframes_flag_divergence() {
    let mut session = session_with(DashboardConfig::default(), &["SPY", "QQQ"]);

    let report = session.run_cycle(&SplitFeed);

    // Each ticker reads overbought fast, oversold slow.
    for reading in &report.readings {
        assert_eq!(reading.fast_rsi, Some(100.0));
        assert_eq!(reading.slow_rsi, Some(0.0));
        assert_eq!(reading.alert(), AlertTag::Neutral);
    }
    assert_eq!(report.snapshot.signal, MarketSignal::Divergent);
}

#[test]
fn mixed_portfolio_means_skip_undefined_readings() {
    let provider = TrendingFeed {
        falling: vec!["DOWN"],
        flat: vec!["FLAT"],
    };
    let mut session = session_with(DashboardConfig::default(), &["UP", "DOWN", "FLAT"]);

    let report = session.run_cycle(&provider);

    assert_eq!(report.readings[0].alert(), AlertTag::StrongLong);
    assert_eq!(report.readings[1].alert(), AlertTag::StrongShort);

    // A flat series has no defined RSI but still carries a price.
    let flat = &report.readings[2];
    assert_eq!(flat.fast_rsi, None);
    assert_eq!(flat.alert(), AlertTag::Neutral);
    assert!(flat.last_price.is_some());

    // Means run over the defined readings only: (100 + 0) / 2.
    assert_eq!(report.snapshot.fast_rsi, Some(50.0));
    assert_eq!(report.snapshot.slow_rsi, Some(50.0));
    assert_eq!(report.snapshot.alert, AlertTag::Neutral);
    assert_eq!(report.snapshot.signal, MarketSignal::Neutral);
}

#[test]
fn toml_config_drives_the_session() {
    let config = DashboardConfig::from_toml(
        r#"
        rsi_period = 7
        fast_interval = "1m"
        slow_interval = "30m"
        refresh_secs = 30
        history_capacity = 5
        "#,
    )
    .unwrap();
    assert_eq!(config.fast_interval, Interval::M1);
    assert_eq!(config.slow_interval, Interval::M30);

    let mut session = session_with(config, &["SPY"]);
    for _ in 0..7 {
        let report = session.run_cycle(&TrendingFeed::rising_only());
        assert_eq!(report.readings[0].fast_rsi, Some(100.0));
    }

    // Capacity from the config file bounds the history.
    assert_eq!(session.history().len(), 5);
}
