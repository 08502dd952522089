//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over intraday data sources (Yahoo
//! Finance, the synthetic generator) so the session can swap
//! implementations and tests can mock fetches.

use thiserror::Error;

use crate::domain::{Interval, PriceSeries};

/// Structured error types for quote fetches.
///
/// These are displayable in both CLI and TUI contexts. A fetch error is
/// ticker-level: the session records it and moves on, it never aborts a
/// refresh cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("fetch error: {0}")]
    Other(String),
}

/// Trait for intraday quote providers.
///
/// A successful fetch may return an empty series; that is valid "no
/// data in the window" output and maps to undefined readings, not an
/// error. There is no retry inside a fetch; the next refresh cycle is
/// the retry mechanism.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the close series for a symbol at the given granularity,
    /// covering the interval's default lookback window.
    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError>;
}
