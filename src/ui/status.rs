//! Bottom status line: the active alert, else a status message or key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::core::alert::{Alert, AlertKind};

use super::theme::Theme;

pub struct StatusLine<'a> {
    pub alert: Option<&'a Alert>,
    pub fallback: &'a str,
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.alert {
            Some(alert) => {
                let icon = match alert.kind {
                    AlertKind::Success => "✓",
                    AlertKind::Error => "✗",
                    AlertKind::Neutral => "•",
                };
                Line::from(Span::raw(format!(" {icon} {}", alert.message)))
            }
            None => Line::raw(format!(" {}", self.fallback)),
        };
        let style = self
            .alert
            .map_or_else(Theme::status_bar_style, |a| Theme::alert_style(a.kind));
        Paragraph::new(line).style(style).render(area, buf);
    }
}
