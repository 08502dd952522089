//! Price series: the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sampling granularity of a price series.
///
/// Serializes to the wire codes Yahoo's chart API accepts (`"5m"`, `"15m"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    M1,
    #[serde(rename = "5m")]
    M5,
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "30m")]
    M30,
    #[serde(rename = "60m")]
    H1,
    #[serde(rename = "1d")]
    D1,
}

impl Interval {
    /// Wire code used in chart API URLs.
    pub fn code(self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "60m",
            Interval::D1 => "1d",
        }
    }

    /// Default lookback window requested for this granularity.
    ///
    /// Fine intervals fetch a short window (Yahoo caps 1m/5m history);
    /// coarser intervals fetch enough sessions to fill an RSI window.
    pub fn lookback(self) -> &'static str {
        match self {
            Interval::M1 | Interval::M5 => "1d",
            Interval::M15 | Interval::M30 => "5d",
            Interval::H1 => "1mo",
            Interval::D1 => "1y",
        }
    }

    /// Seconds between consecutive samples.
    pub fn step_secs(self) -> i64 {
        match self {
            Interval::M1 => 60,
            Interval::M5 => 300,
            Interval::M15 => 900,
            Interval::M30 => 1_800,
            Interval::H1 => 3_600,
            Interval::D1 => 86_400,
        }
    }

    /// Approximate sample count in one default lookback window
    /// (6.5-hour US sessions).
    pub fn bars_per_window(self) -> usize {
        match self {
            Interval::M1 => 390,
            Interval::M5 => 78,
            Interval::M15 => 130,
            Interval::M30 => 65,
            Interval::H1 => 147,
            Interval::D1 => 252,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One timestamped closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub ts: DateTime<Utc>,
    pub close: f64,
}

/// Ordered closing prices for one symbol at one granularity, oldest first.
///
/// A series may be empty (no data for the window); downstream computation
/// treats that as all-undefined, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub interval: Interval,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, interval: Interval, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            points,
        }
    }

    /// Empty series for a symbol (valid "no data" output).
    pub fn empty(symbol: impl Into<String>, interval: Interval) -> Self {
        Self::new(symbol, interval, Vec::new())
    }

    /// The close column, in series order.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent close, or `None` when the series is empty.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_series() -> PriceSeries {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
        let points = [100.0, 101.5, 99.75]
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                ts: base + chrono::Duration::seconds(i as i64 * 300),
                close,
            })
            .collect();
        PriceSeries::new("SPY", Interval::M5, points)
    }

    #[test]
    fn closes_preserve_order() {
        let series = sample_series();
        assert_eq!(series.closes(), vec![100.0, 101.5, 99.75]);
        assert_eq!(series.last_close(), Some(99.75));
    }

    #[test]
    fn empty_series_has_no_last_close() {
        let series = PriceSeries::empty("SPY", Interval::M5);
        assert!(series.is_empty());
        assert_eq!(series.last_close(), None);
    }

    #[test]
    fn interval_codes_roundtrip_through_serde() {
        for interval in [
            Interval::M1,
            Interval::M5,
            Interval::M15,
            Interval::M30,
            Interval::H1,
            Interval::D1,
        ] {
            let json = serde_json::to_string(&interval).unwrap();
            assert_eq!(json, format!("\"{}\"", interval.code()));
            let back: Interval = serde_json::from_str(&json).unwrap();
            assert_eq!(back, interval);
        }
    }

    #[test]
    fn series_serialization_roundtrip() {
        let series = sample_series();
        let json = serde_json::to_string(&series).unwrap();
        let deser: PriceSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.symbol, series.symbol);
        assert_eq!(deser.interval, series.interval);
        assert_eq!(deser.closes(), series.closes());
    }
}
