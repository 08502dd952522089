//! RsiPulse Core: RSI engine, classification, aggregation, and history.
//!
//! This crate contains the dashboard's engine:
//! - Domain types (price series, ticker readings, aggregate snapshots)
//! - Windowed-SMA RSI over close series at two timeframes
//! - Per-ticker alert tags and the portfolio-wide market signal
//! - Bounded rolling history of aggregate rows
//! - Quote providers (Yahoo intraday, seeded synthetic) and the watchlist
//! - Refresh cycle orchestration over a watchlist

pub mod aggregate;
pub mod config;
pub mod data;
pub mod domain;
pub mod history;
pub mod indicators;
pub mod session;
