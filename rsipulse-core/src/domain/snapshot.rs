//! Alert tags, market signal, and the per-cycle aggregate snapshot.

use serde::{Deserialize, Serialize};

/// RSI level at or above which a timeframe counts as overbought.
pub const OVERBOUGHT: f64 = 70.0;
/// RSI level at or below which a timeframe counts as oversold.
pub const OVERSOLD: f64 = 30.0;
/// Midline separating bullish from bearish momentum.
pub const MIDLINE: f64 = 50.0;
/// Upper bound used by the divergence check.
pub const DIVERGENCE_HIGH: f64 = 60.0;
/// Lower bound used by the divergence check.
pub const DIVERGENCE_LOW: f64 = 40.0;

/// Per-ticker alert classification from a fast/slow RSI pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertTag {
    StrongLong,
    StrongShort,
    Neutral,
}

impl AlertTag {
    /// Classify a fast/slow RSI pair.
    ///
    /// StrongLong requires both timeframes at or above 70; StrongShort
    /// both at or below 30. Everything else, including an undefined value
    /// on either side, is Neutral. Boundaries are inclusive.
    pub fn classify(fast: Option<f64>, slow: Option<f64>) -> AlertTag {
        match (fast, slow) {
            (Some(f), Some(s)) if f >= OVERBOUGHT && s >= OVERBOUGHT => AlertTag::StrongLong,
            (Some(f), Some(s)) if f <= OVERSOLD && s <= OVERSOLD => AlertTag::StrongShort,
            _ => AlertTag::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlertTag::StrongLong => "Strong Long",
            AlertTag::StrongShort => "Strong Short",
            AlertTag::Neutral => "Neutral",
        }
    }
}

/// Portfolio-wide four-way signal from the mean fast/slow RSI pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSignal {
    Bullish,
    Bearish,
    Divergent,
    Neutral,
}

impl MarketSignal {
    /// Derive the signal from mean fast/slow RSI.
    ///
    /// Bullish: both strictly above 50. Bearish: both strictly below 50.
    /// Divergent: one timeframe above 60 while the other is below 40.
    /// Otherwise Neutral, including when either mean is undefined.
    pub fn derive(fast: Option<f64>, slow: Option<f64>) -> MarketSignal {
        let (f, s) = match (fast, slow) {
            (Some(f), Some(s)) => (f, s),
            _ => return MarketSignal::Neutral,
        };
        if f > MIDLINE && s > MIDLINE {
            MarketSignal::Bullish
        } else if f < MIDLINE && s < MIDLINE {
            MarketSignal::Bearish
        } else if (f > DIVERGENCE_HIGH && s < DIVERGENCE_LOW)
            || (f < DIVERGENCE_LOW && s > DIVERGENCE_HIGH)
        {
            MarketSignal::Divergent
        } else {
            MarketSignal::Neutral
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MarketSignal::Bullish => "BULLISH",
            MarketSignal::Bearish => "BEARISH",
            MarketSignal::Divergent => "DIVERGENT",
            MarketSignal::Neutral => "NEUTRAL",
        }
    }
}

/// One refresh cycle's portfolio-wide figures.
///
/// Means are over defined per-ticker values only; a mean is `None` when
/// no ticker contributed a value that cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateSnapshot {
    pub fast_rsi: Option<f64>,
    pub slow_rsi: Option<f64>,
    pub avg_price: Option<f64>,
    pub alert: AlertTag,
    pub signal: MarketSignal,
}

impl AggregateSnapshot {
    /// Snapshot for a cycle in which no ticker produced data.
    pub fn undefined() -> Self {
        Self {
            fast_rsi: None,
            slow_rsi: None,
            avg_price: None,
            alert: AlertTag::Neutral,
            signal: MarketSignal::Neutral,
        }
    }
}
