//! Per-ticker cycle result.

use serde::{Deserialize, Serialize};

use super::snapshot::AlertTag;

/// One ticker's figures for a single refresh cycle.
///
/// `None` fields mean the data was missing or too short that cycle;
/// a failed fetch never carries a stale value forward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerReading {
    pub symbol: String,
    pub fast_rsi: Option<f64>,
    pub slow_rsi: Option<f64>,
    pub last_price: Option<f64>,
}

impl TickerReading {
    /// Reading for a ticker whose fetches failed or returned nothing.
    pub fn undefined(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            fast_rsi: None,
            slow_rsi: None,
            last_price: None,
        }
    }

    /// Alert classification of this reading's RSI pair.
    pub fn alert(&self) -> AlertTag {
        AlertTag::classify(self.fast_rsi, self.slow_rsi)
    }
}
