//! Panel 3: keyboard shortcuts and a legend for tags and signals.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, _app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global Navigation");
    key(&mut lines, "1-3", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Dashboard Actions");
    key(&mut lines, "r", "Refresh all tickers now");
    key(&mut lines, "c", "Clear the aggregate history");
    key(&mut lines, "p", "Pause / resume automatic refresh");
    key(&mut lines, "e", "Open error history overlay");
    key(&mut lines, "j / k, Esc", "Scroll / close the error overlay");
    lines.push(Line::from(""));

    section(&mut lines, "Alert Tags");
    key(&mut lines, "Strong Long", "Both RSI readings at or above 70");
    key(&mut lines, "Strong Short", "Both RSI readings at or below 30");
    key(&mut lines, "Neutral", "Anything else, including missing data");
    lines.push(Line::from(""));

    section(&mut lines, "Portfolio Signals");
    key(&mut lines, "BULLISH", "Both timeframe means above 50");
    key(&mut lines, "BEARISH", "Both timeframe means below 50");
    key(&mut lines, "DIVERGENT", "Means split across 60 / 40 in opposite directions");
    key(&mut lines, "NEUTRAL", "Mixed or undefined means");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
