//! Watchlist: the ordered ticker list driving each refresh cycle.
//!
//! Plain-text format: one symbol per line. Lines are trimmed, blanks
//! skipped, symbols uppercased. Order is preserved and duplicates are
//! kept; a symbol listed twice is fetched and averaged twice.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchlistError {
    #[error("watchlist is empty, at least one ticker is required")]
    Empty,

    #[error("read watchlist file: {0}")]
    Io(#[from] std::io::Error),
}

/// Ordered, non-empty list of ticker symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Watchlist {
    symbols: Vec<String>,
}

impl Watchlist {
    /// Build from an explicit symbol list, uppercasing each entry.
    pub fn new(symbols: impl IntoIterator<Item = impl Into<String>>) -> Result<Self, WatchlistError> {
        let symbols: Vec<String> = symbols
            .into_iter()
            .map(|s| s.into().trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if symbols.is_empty() {
            return Err(WatchlistError::Empty);
        }
        Ok(Self { symbols })
    }

    /// Parse a one-symbol-per-line text block.
    pub fn parse(content: &str) -> Result<Self, WatchlistError> {
        Self::new(content.lines())
    }

    /// Load from a plain-text file.
    pub fn from_file(path: &Path) -> Result<Self, WatchlistError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Built-in fallback list for running without a watchlist file.
    pub fn default_demo() -> Self {
        Self {
            symbols: ["AAPL", "MSFT", "NVDA", "SPY", "TSLA"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_trims_uppercases_and_skips_blanks() {
        let list = Watchlist::parse("aapl\n\n  msft  \nNVDA\n\n").unwrap();
        assert_eq!(list.symbols(), &["AAPL", "MSFT", "NVDA"]);
    }

    #[test]
    fn parse_preserves_order_and_duplicates() {
        let list = Watchlist::parse("SPY\nQQQ\nSPY\n").unwrap();
        assert_eq!(list.symbols(), &["SPY", "QQQ", "SPY"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(Watchlist::parse(""), Err(WatchlistError::Empty)));
        assert!(matches!(
            Watchlist::parse("\n  \n\n"),
            Err(WatchlistError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Watchlist::from_file(Path::new("/nonexistent/watchlist.txt"));
        assert!(matches!(result, Err(WatchlistError::Io(_))));
    }

    #[test]
    fn file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "spy").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "tsla").unwrap();
        let list = Watchlist::from_file(file.path()).unwrap();
        assert_eq!(list.symbols(), &["SPY", "TSLA"]);
    }

    #[test]
    fn demo_list_is_non_empty() {
        assert!(!Watchlist::default_demo().is_empty());
    }
}
