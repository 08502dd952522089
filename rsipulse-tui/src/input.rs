//! Keyboard input dispatch: overlays first, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};
use crate::worker::WorkerCommand;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys. Every action is global; the panels are display only.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('1') => app.active_panel = Panel::Overview,
        KeyCode::Char('2') => app.active_panel = Panel::Charts,
        KeyCode::Char('3') => app.active_panel = Panel::Help,
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
        }
        KeyCode::Char('r') => {
            if app.refresh_in_flight {
                app.set_warning("Refresh already in progress");
            } else {
                app.request_refresh();
            }
        }
        KeyCode::Char('c') => {
            let _ = app.worker_tx.send(WorkerCommand::ClearHistory);
        }
        KeyCode::Char('p') => {
            app.paused = !app.paused;
            if app.paused {
                app.set_warning("Auto refresh paused");
            } else {
                app.set_status("Auto refresh resumed");
            }
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}
