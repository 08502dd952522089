//! Yahoo Finance intraday quote provider.
//!
//! Fetches close series from Yahoo's v8 chart API at the configured
//! granularity (`interval=5m&range=1d` style queries). Yahoo Finance has
//! no official API and is subject to unannounced format changes.
//!
//! One request per fetch, no backoff loop: a failed ticker reads as
//! undefined for this cycle and the next scheduled refresh retries it.

use std::time::Duration;

use serde::Deserialize;

use super::provider::{FetchError, QuoteProvider};
use crate::domain::{Interval, PricePoint, PriceSeries};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Vec<Option<f64>>,
}

/// Yahoo Finance intraday provider.
pub struct YahooIntraday {
    client: reqwest::blocking::Client,
}

impl YahooIntraday {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the chart API URL for a symbol at a granularity.
    fn chart_url(symbol: &str, interval: Interval) -> String {
        format!(
            "https://query2.finance.yahoo.com/v8/finance/chart/{symbol}\
             ?interval={}&range={}",
            interval.code(),
            interval.lookback()
        )
    }

    /// Parse the chart API response into a price series.
    ///
    /// Rows whose close is null (halts, not-yet-final bars) are skipped.
    /// An otherwise-valid response with no rows parses to an empty
    /// series, which downstream treats as missing data for the cycle.
    fn parse_response(
        symbol: &str,
        interval: Interval,
        resp: ChartResponse,
    ) -> Result<PriceSeries, FetchError> {
        let result = resp.chart.result.ok_or_else(|| {
            if let Some(err) = resp.chart.error {
                if err.code == "Not Found" {
                    FetchError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    FetchError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                FetchError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::ResponseFormatChanged("result array is empty".into()))?;

        let timestamps = data.timestamp.unwrap_or_default();

        let quote = data
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::ResponseFormatChanged("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            let close = match quote.close.get(i).copied().flatten() {
                Some(c) => c,
                None => continue,
            };
            let ts = chrono::DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                FetchError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
            })?;
            points.push(PricePoint { ts, close });
        }

        Ok(PriceSeries::new(symbol, interval, points))
    }
}

impl Default for YahooIntraday {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteProvider for YahooIntraday {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(&self, symbol: &str, interval: Interval) -> Result<PriceSeries, FetchError> {
        let url = Self::chart_url(symbol, interval);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                FetchError::NetworkUnreachable(e.to_string())
            } else {
                FetchError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(FetchError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if !status.is_success() {
            return Err(FetchError::Other(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            FetchError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, interval, chart)
    }
}
