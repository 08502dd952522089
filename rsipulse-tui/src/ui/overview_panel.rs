//! Panel 1: the watchlist table. Per-ticker RSI pairs, alert tags, and the
//! portfolio aggregate row underneath.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = Vec::new();

    // Header: session parameters and the portfolio signal banner.
    lines.push(Line::from(vec![
        Span::styled(
            format!(
                "{} | RSI({}) {}/{} | ",
                app.provider_name, app.rsi_period, app.fast_interval, app.slow_interval
            ),
            theme::muted(),
        ),
        Span::styled(format!("{} tickers", app.watch_symbols.len()), theme::accent()),
    ]));

    if let Some(snap) = &app.snapshot {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", snap.signal.label()),
                theme::signal_style(snap.signal).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "mean fast {} / mean slow {}",
                    fmt_rsi(snap.fast_rsi),
                    fmt_rsi(snap.slow_rsi)
                ),
                theme::muted(),
            ),
        ]));
    }
    lines.push(Line::from(""));

    if app.readings.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Waiting for the first refresh cycle...",
            theme::muted(),
        )));
        lines.push(Line::from(Span::styled(
            format!("Watching: {}", app.watch_symbols.join(", ")),
            theme::muted(),
        )));
    } else {
        // Column headers
        let fast_hdr = format!("RSI {}", app.fast_interval.code());
        let slow_hdr = format!("RSI {}", app.slow_interval.code());
        lines.push(Line::from(Span::styled(
            format!(
                "{:>8} {:>12} {:>9} {:>9} {:>12}",
                "Symbol", "Price", fast_hdr, slow_hdr, "Alert"
            ),
            theme::accent_bold(),
        )));

        for reading in &app.readings {
            let alert = reading.alert();
            lines.push(Line::from(vec![
                Span::styled(format!("{:>8} ", truncate(&reading.symbol, 8)), Style::default()),
                Span::styled(format!("{:>12} ", fmt_price(reading.last_price)), Style::default()),
                Span::styled(
                    format!("{:>9} ", fmt_rsi(reading.fast_rsi)),
                    theme::rsi_style(reading.fast_rsi),
                ),
                Span::styled(
                    format!("{:>9} ", fmt_rsi(reading.slow_rsi)),
                    theme::rsi_style(reading.slow_rsi),
                ),
                Span::styled(format!("{:>12}", alert.label()), theme::alert_style(alert)),
            ]));
        }

        if let Some(snap) = &app.snapshot {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled(format!("{:>8} ", "ALL"), theme::accent_bold()),
                Span::styled(format!("{:>12} ", fmt_price(snap.avg_price)), theme::accent()),
                Span::styled(
                    format!("{:>9} ", fmt_rsi(snap.fast_rsi)),
                    theme::rsi_style(snap.fast_rsi),
                ),
                Span::styled(
                    format!("{:>9} ", fmt_rsi(snap.slow_rsi)),
                    theme::rsi_style(snap.slow_rsi),
                ),
                Span::styled(format!("{:>12}", snap.alert.label()), theme::alert_style(snap.alert)),
            ]));
        }
    }

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn fmt_rsi(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.1}"),
        None => "--".to_string(),
    }
}

fn fmt_price(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.2}"),
        None => "--".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}.", &s[..max - 1])
    }
}
