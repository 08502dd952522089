//! Quote sources and the watchlist

pub mod provider;
pub mod synthetic;
pub mod watchlist;
pub mod yahoo;

pub use provider::{FetchError, QuoteProvider};
pub use synthetic::SyntheticQuotes;
pub use watchlist::{Watchlist, WatchlistError};
pub use yahoo::YahooIntraday;
