//! Popup overlay widgets for the settings menu and the cart view.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;
use crate::core::cart::CartSnapshot;
use crate::core::pricing::format_thousands;

fn popup_block(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
}

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 6;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Settings ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = if i == self.state.settings_selected {
                (
                    " ▸ ",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("   ", Style::default().fg(Color::White))
            };

            let label_col = format!("{prefix}{:<20}", item.label);
            let value = (item.value)(self.state);
            lines.push(Line::from(vec![
                Span::styled(label_col, style),
                Span::styled(format!("{value:>10}"), Style::default().fg(Color::Yellow)),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: cycle  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── cart popup ────────

/// Cart contents overlay.
pub struct CartPopup {
    pub cart: Option<CartSnapshot>,
}

impl Widget for CartPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self.cart.as_ref().map_or(0, |c| c.products.len());
        let height = (items.max(1) as u16) + 7;
        let popup = centered_fixed(56, height, area);
        Clear.render(popup, buf);

        let block = popup_block(" Cart ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = vec![Line::raw("")];

        match &self.cart {
            Some(cart) if !cart.products.is_empty() => {
                for line in &cart.products {
                    let variant = [line.color.as_deref(), line.size.as_deref()]
                        .into_iter()
                        .flatten()
                        .collect::<Vec<_>>()
                        .join(" / ");
                    let name = if line.name.is_empty() {
                        &line.base_product_id
                    } else {
                        &line.name
                    };
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {}× {name:<26}", line.quantity), Style::default().fg(Color::White)),
                        Span::styled(format!("{variant:<10}"), dim),
                        Span::styled(
                            format!("${:>9}", format_thousands(line.unit_price * f64::from(line.quantity))),
                            Style::default().fg(Color::Green),
                        ),
                    ]));
                }
                lines.push(Line::raw(""));
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {} item(s)", cart.item_count()),
                        dim,
                    ),
                    Span::styled(
                        format!("   Subtotal ${}", format_thousands(cart.subtotal())),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]));
            }
            _ => {
                lines.push(Line::from(Span::styled("  Your cart is empty", dim)));
                lines.push(Line::raw(""));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("  Esc/Enter: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_fixed(56, 8, area), Rect::new(0, 1, 30, 8));
        assert_eq!(centered_fixed(10, 4, area), Rect::new(10, 3, 10, 4));
    }
}
