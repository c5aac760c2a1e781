//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::alert::AlertKind;

/// Central theme; change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── product page ───────────────────────────────────────────
    pub fn product_title_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn price_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn struck_price_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn badge_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    pub fn option_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn option_selected_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn image_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn heading_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── buttons ────────────────────────────────────────────────
    pub fn button_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_busy_style() -> Style {
        Style::default().fg(Color::Yellow).bg(Color::DarkGray)
    }

    pub fn button_done_style() -> Style {
        Style::default().fg(Color::Black).bg(Color::Green)
    }

    pub fn upgrade_style(hovered: bool) -> Style {
        let style = Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD);
        if hovered {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn bar_style() -> Style {
        Style::default().bg(Color::Rgb(24, 24, 32)).fg(Color::White)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn alert_style(kind: AlertKind) -> Style {
        match kind {
            AlertKind::Success => Style::default().bg(Color::Green).fg(Color::Black),
            AlertKind::Error => Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            AlertKind::Neutral => Style::default().bg(Color::Blue).fg(Color::White),
        }
    }
}
