//! The sticky purchase bar pinned to the top of the page viewport.
//!
//! The bar is drawn off-screen first and then copied into the frame, shifted
//! up by the slide-in offset, so the slide never disturbs the page below it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::state::AppState;
use crate::core::add_to_cart::ControlState;

use super::layout::AppLayout;
use super::page::price_spans;
use super::spinner;
use super::theme::Theme;

/// Rows taken by the bar, including its bottom border.
pub const BAR_HEIGHT: u16 = 3;

const ADD_LABEL: &str = "[ Add to Cart ]";
const UPGRADE_LABEL: &str = "[ Yes, let's upgrade ]";

/// Where the bar and its buttons land for the current frame.
#[derive(Debug, Clone, Copy)]
pub struct BarGeometry {
    pub bar: Rect,
    pub add: Option<Rect>,
    pub upgrade: Option<Rect>,
}

impl BarGeometry {
    /// `None` while the bar is hidden or the page has no room for it.
    pub fn compute(layout: &AppLayout, state: &AppState) -> Option<Self> {
        if !state.bar.visibility().is_shown() {
            return None;
        }
        let bar = layout.bar_slot?;
        let row = bar.y + 1;
        let mut right = bar.right().saturating_sub(2);

        let add = state.bar.shows_add_button().then(|| {
            let w = ADD_LABEL.chars().count() as u16;
            right = right.saturating_sub(w);
            Rect::new(right, row, w, 1)
        });
        let upgrade = state.product.active_upsell().map(|_| {
            let w = UPGRADE_LABEL.chars().count() as u16;
            right = right.saturating_sub(w + 2);
            Rect::new(right, row, w, 1)
        });

        Some(Self { bar, add, upgrade })
    }
}

pub struct StickyBar<'a> {
    pub state: &'a AppState,
    pub geometry: BarGeometry,
    /// Rows of the bar still above the viewport edge.
    pub hidden_rows: u16,
}

impl Widget for StickyBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bar = self.geometry.bar.intersection(area);
        if bar.is_empty() || self.hidden_rows >= bar.height {
            return;
        }

        let mut scratch = Buffer::empty(bar);
        self.draw(bar, &mut scratch);

        for dy in 0..bar.height - self.hidden_rows {
            for x in bar.left()..bar.right() {
                let Some(src) = scratch.cell((x, bar.y + self.hidden_rows + dy)) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut((x, bar.y + dy)) {
                    *dst = src.clone();
                }
            }
        }
    }
}

impl StickyBar<'_> {
    fn draw(&self, bar: Rect, buf: &mut Buffer) {
        let state = self.state;
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Theme::border_style())
            .style(Theme::bar_style());
        let inner = block.inner(bar);
        block.render(bar, buf);

        let selection = state.selection.get();
        let mut spans = vec![
            Span::styled(" ▣ ", Theme::image_style()),
            Span::styled(state.product.name.clone(), Theme::product_title_style()),
            Span::raw("  "),
        ];
        spans.extend(price_spans(&state.product.pricing));
        spans.push(Span::styled(format!("  {}", selection.label()), Theme::option_style()));
        if state.bar.is_in_cart() {
            spans.push(Span::styled("  ✓ In cart", Theme::button_done_style()));
        }
        Paragraph::new(vec![Line::raw(""), Line::from(spans)]).render(inner, buf);

        if let Some(rect) = self.geometry.upgrade {
            blank_row(rect, buf);
            buf.set_string(
                rect.x,
                rect.y,
                UPGRADE_LABEL,
                Theme::upgrade_style(state.bar.upgrade_hovered()),
            );
        }
        if let Some(rect) = self.geometry.add {
            let (label, style) = match state.bar.control.state() {
                ControlState::Pending => {
                    let busy = format!("{} Adding…", spinner::frame(state.tick));
                    let width = rect.width as usize;
                    (format!("{busy:^width$}"), Theme::button_busy_style())
                }
                _ => (ADD_LABEL.to_string(), Theme::button_style()),
            };
            blank_row(rect, buf);
            buf.set_string(rect.x, rect.y, label, style);
        }
    }
}

/// Blank out a one-row area before drawing a button over bar text.
fn blank_row(rect: Rect, buf: &mut Buffer) {
    for x in rect.left()..rect.right() {
        if let Some(cell) = buf.cell_mut((x, rect.y)) {
            cell.set_symbol(" ");
        }
    }
}
