//! Domain types for RsiPulse.

pub mod reading;
pub mod series;
pub mod snapshot;

pub use reading::TickerReading;
pub use series::{Interval, PricePoint, PriceSeries};
pub use snapshot::{
    AggregateSnapshot, AlertTag, MarketSignal, DIVERGENCE_HIGH, DIVERGENCE_LOW, MIDLINE,
    OVERBOUGHT, OVERSOLD,
};
