//! Application state. Single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::time::Instant;

use chrono::NaiveDateTime;

use rsipulse_core::config::DashboardConfig;
use rsipulse_core::data::provider::FetchError;
use rsipulse_core::domain::reading::TickerReading;
use rsipulse_core::domain::series::Interval;
use rsipulse_core::domain::snapshot::AggregateSnapshot;
use rsipulse_core::history::HistorySnapshot;

use crate::worker::{WorkerCommand, WorkerResponse};

/// Which panel is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Overview,
    Charts,
    Help,
}

impl Panel {
    pub fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Charts => 1,
            Panel::Help => 2,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        match i {
            0 => Some(Panel::Overview),
            1 => Some(Panel::Charts),
            2 => Some(Panel::Help),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Overview => "Overview",
            Panel::Charts => "Charts",
            Panel::Help => "Help",
        }
    }

    pub fn next(self) -> Panel {
        Panel::from_index((self.index() + 1) % 3).unwrap()
    }

    pub fn prev(self) -> Panel {
        Panel::from_index((self.index() + 2) % 3).unwrap()
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_fetch(err: &FetchError) -> Self {
        match err {
            FetchError::NetworkUnreachable(_) | FetchError::RateLimited { .. } => {
                ErrorCategory::Network
            }
            FetchError::ResponseFormatChanged(_) | FetchError::SymbolNotFound { .. } => {
                ErrorCategory::Data
            }
            FetchError::Other(_) => ErrorCategory::Other,
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    // Navigation
    pub active_panel: Panel,
    pub running: bool,

    // Latest cycle results, replaced wholesale on every CycleDone
    pub readings: Vec<TickerReading>,
    pub snapshot: Option<AggregateSnapshot>,
    pub history: HistorySnapshot,
    pub cycle_count: u64,

    // Refresh scheduling
    pub last_refresh: Option<Instant>,
    pub refresh_in_flight: bool,
    pub paused: bool,
    pub refresh_secs: u64,

    // Static session parameters, shown in headers and help
    pub rsi_period: usize,
    pub fast_interval: Interval,
    pub slow_interval: Interval,
    pub provider_name: String,
    pub watch_symbols: Vec<String>,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        config: &DashboardConfig,
        provider_name: String,
        watch_symbols: Vec<String>,
    ) -> Self {
        Self {
            active_panel: Panel::Overview,
            running: true,
            readings: Vec::new(),
            snapshot: None,
            history: HistorySnapshot::default(),
            cycle_count: 0,
            last_refresh: None,
            refresh_in_flight: false,
            paused: false,
            refresh_secs: config.refresh_secs,
            rsi_period: config.rsi_period,
            fast_interval: config.fast_interval,
            slow_interval: config.slow_interval,
            provider_name,
            watch_symbols,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Ask the worker for a refresh cycle and mark it in flight.
    pub fn request_refresh(&mut self) {
        let _ = self.worker_tx.send(WorkerCommand::Refresh);
        self.refresh_in_flight = true;
        self.set_status("Refreshing...");
    }

    /// True when the refresh timer has elapsed and nothing is in flight.
    pub fn auto_refresh_due(&self) -> bool {
        if self.paused || self.refresh_in_flight {
            return false;
        }
        self.last_refresh
            .map_or(true, |t| t.elapsed().as_secs() >= self.refresh_secs)
    }

    /// Seconds remaining until the next automatic refresh.
    pub fn seconds_until_refresh(&self) -> Option<u64> {
        self.last_refresh
            .map(|t| self.refresh_secs.saturating_sub(t.elapsed().as_secs()))
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> AppState {
        let (tx, _rx) = std::sync::mpsc::channel();
        let (_tx2, rx2) = std::sync::mpsc::channel();
        AppState::new(
            tx,
            rx2,
            &DashboardConfig::default(),
            "synthetic".to_string(),
            vec!["AAPL".to_string(), "MSFT".to_string()],
        )
    }

    #[test]
    fn panel_cycle() {
        assert_eq!(Panel::Overview.next(), Panel::Charts);
        assert_eq!(Panel::Help.next(), Panel::Overview);
        assert_eq!(Panel::Overview.prev(), Panel::Help);
        assert_eq!(Panel::Charts.prev(), Panel::Overview);
    }

    #[test]
    fn panel_from_index() {
        for i in 0..3 {
            let p = Panel::from_index(i).unwrap();
            assert_eq!(p.index(), i);
        }
        assert!(Panel::from_index(3).is_none());
    }

    #[test]
    fn error_history_caps_at_50() {
        let mut app = test_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn first_refresh_is_due_immediately() {
        let mut app = test_app();
        assert!(app.auto_refresh_due());

        app.request_refresh();
        assert!(!app.auto_refresh_due());
    }

    #[test]
    fn pause_suppresses_auto_refresh() {
        let mut app = test_app();
        app.paused = true;
        assert!(!app.auto_refresh_due());
    }

    #[test]
    fn fetch_errors_map_to_categories() {
        assert_eq!(
            ErrorCategory::from_fetch(&FetchError::NetworkUnreachable("dns".into())),
            ErrorCategory::Network
        );
        assert_eq!(
            ErrorCategory::from_fetch(&FetchError::RateLimited { retry_after_secs: 60 }),
            ErrorCategory::Network
        );
        assert_eq!(
            ErrorCategory::from_fetch(&FetchError::SymbolNotFound { symbol: "ZZZZ".into() }),
            ErrorCategory::Data
        );
        assert_eq!(
            ErrorCategory::from_fetch(&FetchError::Other("boom".into())),
            ErrorCategory::Other
        );
    }
}
