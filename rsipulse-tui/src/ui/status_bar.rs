//! Bottom status bar: key hints, refresh state, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    // Key hints
    spans.push(Span::styled(
        " 1:Overview 2:Charts 3:Help | r:refresh c:clear p:pause e:errors q:quit",
        theme::muted(),
    ));

    // Separator
    spans.push(Span::raw(" | "));

    // Refresh state
    if app.cycle_count > 0 {
        spans.push(Span::styled(format!("cycle {}", app.cycle_count), theme::accent()));
        spans.push(Span::raw(" "));
    }
    if app.refresh_in_flight {
        spans.push(Span::styled("refreshing", theme::accent()));
    } else if app.paused {
        spans.push(Span::styled("paused", theme::warning()));
    } else if let Some(secs) = app.seconds_until_refresh() {
        spans.push(Span::styled(format!("next in {secs}s"), theme::muted()));
    }

    // Status message
    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}
