//! Panel 2: rolling history charts. Mean RSI pair on top, average price below.
//!
//! Undefined rows (failed cycles) are skipped point-wise, so the x axis stays
//! aligned with cycle numbers and gaps show up as gaps.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};

use rsipulse_core::domain::snapshot::{OVERBOUGHT, OVERSOLD};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.history.is_empty() {
        render_empty(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_rsi_chart(f, chunks[0], app);
    render_price_chart(f, chunks[1], app);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("No aggregate history yet.", theme::muted())),
        Line::from(""),
        Line::from(Span::styled(
            "History fills as refresh cycles complete. Press r to refresh now.",
            theme::muted(),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_rsi_chart(f: &mut Frame, area: Rect, app: &AppState) {
    let x_max = (app.history.len().saturating_sub(1) as f64).max(1.0);

    let fast: Vec<(f64, f64)> = defined_points(&app.history.fast_rsi);
    let slow: Vec<(f64, f64)> = defined_points(&app.history.slow_rsi);
    let overbought = [(0.0, OVERBOUGHT), (x_max, OVERBOUGHT)];
    let oversold = [(0.0, OVERSOLD), (x_max, OVERSOLD)];

    let datasets = vec![
        Dataset::default()
            .name("")
            .marker(symbols::Marker::Braille)
            .style(theme::muted())
            .graph_type(GraphType::Line)
            .data(&overbought),
        Dataset::default()
            .name("")
            .marker(symbols::Marker::Braille)
            .style(theme::muted())
            .graph_type(GraphType::Line)
            .data(&oversold),
        Dataset::default()
            .name(format!("fast {}", app.fast_interval.code()))
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::ACCENT))
            .graph_type(GraphType::Line)
            .data(&fast),
        Dataset::default()
            .name(format!("slow {}", app.slow_interval.code()))
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(theme::NEUTRAL))
            .graph_type(GraphType::Line)
            .data(&slow),
    ];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title(Span::styled("Cycles", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{}", app.history.len()), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("RSI", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, 100.0])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled("50", theme::muted()),
                    Span::styled("100", theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_price_chart(f: &mut Frame, area: Rect, app: &AppState) {
    let data = defined_points(&app.history.avg_price);
    if data.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("No defined average price yet.", theme::muted())),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let min_y = data.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max_y = data.iter().map(|&(_, y)| y).fold(f64::NEG_INFINITY, f64::max);

    let padding = ((max_y - min_y).abs() * 0.05).max(0.5);
    let y_min = min_y - padding;
    let y_max = max_y + padding;
    let x_max = (app.history.len().saturating_sub(1) as f64).max(1.0);

    let dataset = Dataset::default()
        .name("avg price")
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::POSITIVE))
        .graph_type(GraphType::Line)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Cycles", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::styled("0", theme::muted()),
                    Span::styled(format!("{}", app.history.len()), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Avg Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

/// Enumerate a history column into chart points, skipping undefined rows.
fn defined_points(column: &[Option<f64>]) -> Vec<(f64, f64)> {
    column
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i as f64, v)))
        .collect()
}
