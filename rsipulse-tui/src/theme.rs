//! Neon theme tokens for the RsiPulse TUI.
//!
//! One consistent palette: neon accents on the terminal's dark background.
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, chart lines, highlights)
//! - **Positive**: Neon green (overbought momentum, bullish states)
//! - **Negative**: Hot pink (oversold momentum, bearish states)
//! - **Warning**: Neon orange (divergence, paused refresh)
//! - **Neutral**: Cool purple (neutral tags and signals)
//! - **Muted**: Steel blue (hints, undefined values, secondary text)

use ratatui::style::{Color, Modifier, Style};

use rsipulse_core::domain::snapshot::{AlertTag, MarketSignal, OVERBOUGHT, OVERSOLD};

pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Style for a single RSI value: green at or above the overbought line,
/// pink at or below the oversold line, muted when undefined.
pub fn rsi_style(rsi: Option<f64>) -> Style {
    match rsi {
        None => muted(),
        Some(v) if v >= OVERBOUGHT => positive(),
        Some(v) if v <= OVERSOLD => negative(),
        Some(_) => Style::default(),
    }
}

/// Style for a per-ticker alert tag.
pub fn alert_style(tag: AlertTag) -> Style {
    match tag {
        AlertTag::StrongLong => positive().add_modifier(Modifier::BOLD),
        AlertTag::StrongShort => negative().add_modifier(Modifier::BOLD),
        AlertTag::Neutral => muted(),
    }
}

/// Style for the portfolio-wide signal.
pub fn signal_style(signal: MarketSignal) -> Style {
    match signal {
        MarketSignal::Bullish => positive(),
        MarketSignal::Bearish => negative(),
        MarketSignal::Divergent => warning(),
        MarketSignal::Neutral => neutral(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_style_tracks_thresholds() {
        assert_eq!(rsi_style(Some(70.0)), positive());
        assert_eq!(rsi_style(Some(30.0)), negative());
        assert_eq!(rsi_style(Some(50.0)), Style::default());
        assert_eq!(rsi_style(None), muted());
    }

    #[test]
    fn signal_styles_are_distinct() {
        assert_ne!(
            signal_style(MarketSignal::Bullish),
            signal_style(MarketSignal::Bearish)
        );
        assert_ne!(
            signal_style(MarketSignal::Divergent),
            signal_style(MarketSignal::Neutral)
        );
    }
}
