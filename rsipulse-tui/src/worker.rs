//! Background worker thread. Network fetches and RSI evaluation run here
//! so the render loop never blocks on a slow quote endpoint.
//!
//! Communication with the TUI main thread is via `mpsc` channels.

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use rsipulse_core::data::provider::QuoteProvider;
use rsipulse_core::history::HistorySnapshot;
use rsipulse_core::session::{CycleReport, Session};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Run one full refresh cycle across the watchlist.
    Refresh,
    /// Drop all retained aggregate history.
    ClearHistory,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    CycleDone {
        report: Box<CycleReport>,
        history: HistorySnapshot,
        cycle: u64,
    },
    HistoryCleared {
        history: HistorySnapshot,
    },
}

/// Spawn the background worker thread.
///
/// The worker owns the [`Session`] and the quote provider; the UI only ever
/// sees snapshots sent back over the channel.
pub fn spawn_worker(
    session: Session,
    provider: Box<dyn QuoteProvider>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("rsipulse-worker".into())
        .spawn(move || {
            worker_loop(session, provider, rx, tx);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    mut session: Session,
    provider: Box<dyn QuoteProvider>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    let mut cycle: u64 = 0;

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Refresh) => {
                cycle += 1;
                handle_refresh(&mut session, provider.as_ref(), &tx, cycle);
            }
            Ok(WorkerCommand::ClearHistory) => {
                handle_clear(&mut session, &tx);
            }
        }
    }
}

fn handle_refresh(
    session: &mut Session,
    provider: &dyn QuoteProvider,
    tx: &Sender<WorkerResponse>,
    cycle: u64,
) {
    let report = session.run_cycle(provider);
    let history = session.history().snapshot_all();
    let _ = tx.send(WorkerResponse::CycleDone {
        report: Box::new(report),
        history,
        cycle,
    });
}

fn handle_clear(session: &mut Session, tx: &Sender<WorkerResponse>) {
    session.clear_history();
    if session.history_mut().take_cleared() {
        let history = session.history().snapshot_all();
        let _ = tx.send(WorkerResponse::HistoryCleared { history });
    }
}
