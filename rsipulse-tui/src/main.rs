//! RsiPulse TUI: a three-panel RSI momentum dashboard.
//!
//! Panels:
//! 1. Overview: per-ticker RSI pairs, alert tags, and the portfolio aggregate
//! 2. Charts: rolling history of aggregate RSI and average price
//! 3. Help: keyboard shortcuts and the tag/signal legend
//!
//! Usage: `rsipulse-tui [--synthetic] [WATCHLIST_FILE]`. Reads `rsipulse.toml`
//! from the working directory when present.

mod app;
mod input;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use rsipulse_core::config::DashboardConfig;
use rsipulse_core::data::provider::QuoteProvider;
use rsipulse_core::data::synthetic::SyntheticQuotes;
use rsipulse_core::data::watchlist::Watchlist;
use rsipulse_core::data::yahoo::YahooIntraday;
use rsipulse_core::domain::snapshot::AggregateSnapshot;
use rsipulse_core::session::{CycleReport, Session};

use crate::app::{AppState, ErrorCategory};
use crate::worker::{WorkerCommand, WorkerResponse};

const CONFIG_FILE: &str = "rsipulse.toml";
const WATCHLIST_FILE: &str = "watchlist.txt";

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Command line: a --synthetic flag and an optional watchlist path.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let synthetic = args.iter().any(|a| a == "--synthetic");
    let watchlist_arg = args.iter().find(|a| !a.starts_with("--")).cloned();

    // Config from the working directory, defaults otherwise.
    let config = if Path::new(CONFIG_FILE).exists() {
        DashboardConfig::from_file(Path::new(CONFIG_FILE))
            .with_context(|| format!("failed to load {CONFIG_FILE}"))?
    } else {
        DashboardConfig::default()
    };

    // Watchlist: explicit path, watchlist.txt if present, demo set otherwise.
    let mut demo_watchlist = false;
    let watchlist = match watchlist_arg {
        Some(path) => Watchlist::from_file(Path::new(&path))
            .with_context(|| format!("failed to load watchlist {path}"))?,
        None if Path::new(WATCHLIST_FILE).exists() => {
            Watchlist::from_file(Path::new(WATCHLIST_FILE))
                .with_context(|| format!("failed to load {WATCHLIST_FILE}"))?
        }
        None => {
            demo_watchlist = true;
            Watchlist::default_demo()
        }
    };

    let provider: Box<dyn QuoteProvider> = if synthetic {
        Box::new(SyntheticQuotes::default())
    } else {
        Box::new(YahooIntraday::new())
    };
    let provider_name = provider.name().to_string();
    let watch_symbols = watchlist.symbols().to_vec();

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    // Build app state, then hand config and watchlist to the session.
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, &config, provider_name, watch_symbols);
    let session = Session::new(config, watchlist)?;
    let worker_handle = worker::spawn_worker(session, provider, cmd_rx, resp_tx);

    // First cycle starts immediately.
    app.request_refresh();
    if demo_watchlist {
        app.set_status("No watchlist given, using the demo set");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Shutdown worker
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            handle_worker_response(app, resp);
        }

        // 3. Kick the next cycle when the refresh timer elapses.
        if app.auto_refresh_due() {
            app.request_refresh();
        }

        // 4. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}

fn handle_worker_response(app: &mut AppState, resp: WorkerResponse) {
    match resp {
        WorkerResponse::CycleDone { report, history, cycle } => {
            app.refresh_in_flight = false;
            app.last_refresh = Some(Instant::now());
            app.cycle_count = cycle;
            app.history = history;

            let CycleReport { readings, snapshot, errors, .. } = *report;
            let error_count = errors.len();
            for failure in errors {
                app.push_error(
                    ErrorCategory::from_fetch(&failure.error),
                    failure.error.to_string(),
                    format!("{} {}", failure.symbol, failure.interval),
                );
            }
            app.readings = readings;
            app.snapshot = Some(snapshot);

            if error_count > 0 {
                app.set_warning(format!("Cycle {cycle}: {error_count} fetch errors"));
            } else if snapshot == AggregateSnapshot::undefined() {
                app.set_warning(format!("Cycle {cycle}: no usable data returned"));
            } else {
                let count = app.readings.len();
                app.set_status(format!("Cycle {cycle}: {count} tickers refreshed"));
            }
        }
        WorkerResponse::HistoryCleared { history } => {
            app.history = history;
            app.set_status("History cleared");
        }
    }
}
