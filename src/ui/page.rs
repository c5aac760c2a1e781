//! The scrollable product page.
//!
//! The page is laid out as a flat list of rows; the viewport shows the slice
//! starting at `scroll_top / row_height_px`.  [`PageContent`] also records
//! where the inline buttons ended up so the main loop can hit-test clicks.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::state::AppState;
use crate::core::add_to_cart::ControlState;
use crate::core::catalog::{Pricing, SizeChart};
use crate::core::pricing::{format_thousands, PriceDisplay};

use super::spinner;
use super::theme::Theme;

const HERO_ROWS: usize = 30;
const GALLERY_ROWS: usize = 14;

/// Horizontal extents (column offset, width) of the inline buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineButtons {
    pub row: usize,
    pub add: Option<(u16, u16)>,
    pub view_cart: Option<(u16, u16)>,
}

/// Rendered page rows plus the positions needed for hit-testing.
pub struct PageContent {
    pub lines: Vec<Line<'static>>,
    pub buttons: InlineButtons,
}

impl PageContent {
    pub fn build(state: &AppState, width: u16) -> Self {
        let product = &state.product;
        let selection = state.selection.get();
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", product.name),
            Theme::product_title_style(),
        )));
        let mut price = vec![Span::raw("  ")];
        price.extend(price_spans(&product.pricing));
        lines.push(Line::from(price));
        lines.push(Line::raw(""));

        lines.extend(image_frame(&product.images.main, HERO_ROWS, width));
        lines.push(Line::raw(""));

        // ── option pickers ──
        let colors = product.color_names();
        if !colors.is_empty() {
            lines.push(picker_line("Color", &colors, selection.color.as_deref()));
        }
        let sizes = product.size_labels();
        if !sizes.is_empty() {
            lines.push(picker_line("Size ", &sizes, selection.size.as_deref()));
        }
        lines.push(Line::raw(""));

        // ── inline buttons ──
        let row = lines.len();
        let (line, add, view_cart) = inline_buttons(state);
        lines.push(line);
        let buttons = InlineButtons {
            row,
            add,
            view_cart,
        };
        lines.push(Line::raw(""));

        // ── size charts ──
        for (title, chart) in [
            ("Size chart (in)", &product.options.sizes.inches),
            ("Size chart (cm)", &product.options.sizes.centimeters),
        ] {
            if chart.rows.is_empty() {
                continue;
            }
            lines.push(Line::from(Span::styled(format!("  {title}"), Theme::heading_style())));
            lines.extend(chart_lines(chart));
            lines.push(Line::raw(""));
        }

        // ── gallery ──
        if !product.images.gallery.is_empty() {
            lines.push(Line::from(Span::styled("  Gallery", Theme::heading_style())));
            for image in &product.images.gallery {
                lines.extend(image_frame(image, GALLERY_ROWS, width));
            }
            lines.push(Line::raw(""));
        }

        lines.push(Line::from(Span::styled(
            "  Free shipping over $100 · 30-day returns",
            Theme::dim_style(),
        )));
        lines.push(Line::raw(""));

        Self { lines, buttons }
    }

    pub fn row_count(&self) -> usize {
        self.lines.len()
    }
}

/// Sale price, struck base price and `-N%` badge; or just the base price.
pub fn price_spans(pricing: &Pricing) -> Vec<Span<'static>> {
    match PriceDisplay::of(pricing) {
        PriceDisplay::Sale {
            sale,
            base,
            discount_percentage,
        } => vec![
            Span::styled(format!("${}", format_thousands(sale)), Theme::price_style()),
            Span::raw(" "),
            Span::styled(format!("${}", format_thousands(base)), Theme::struck_price_style()),
            Span::raw(" "),
            Span::styled(format!(" -{discount_percentage}% "), Theme::badge_style()),
        ],
        PriceDisplay::Regular(price) => {
            vec![Span::styled(format!("${}", format_thousands(price)), Theme::price_style())]
        }
    }
}

fn picker_line(label: &str, options: &[String], chosen: Option<&str>) -> Line<'static> {
    let mut spans = vec![Span::styled(format!("  {label}: "), Theme::heading_style())];
    for option in options {
        let style = if Some(option.as_str()) == chosen {
            Theme::option_selected_style()
        } else {
            Theme::option_style()
        };
        spans.push(Span::styled(format!(" {option} "), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn inline_buttons(state: &AppState) -> (Line<'static>, Option<(u16, u16)>, Option<(u16, u16)>) {
    let indent = "  ";
    let x = indent.len() as u16;

    if state.inline.state() == ControlState::Added {
        let selection = state.selection.get();
        let count = state
            .cart
            .get()
            .and_then(|cart| {
                cart.products
                    .iter()
                    .find(|line| line.matches(&state.product.id, &selection))
                    .map(|line| line.quantity)
            })
            .unwrap_or(1);
        let label = format!("[ Added ({count}) - View Cart ]");
        let width = label.chars().count() as u16;
        let line = Line::from(vec![
            Span::raw(indent),
            Span::styled(label, Theme::button_done_style()),
        ]);
        return (line, None, Some((x, width)));
    }

    let (label, style) = match state.inline.state() {
        ControlState::Pending => (
            format!("[ {} Adding… ]", spinner::frame(state.tick)),
            Theme::button_busy_style(),
        ),
        _ => ("[ Add to Cart ]".to_string(), Theme::button_style()),
    };
    let width = label.chars().count() as u16;
    let mut spans = vec![Span::raw(indent), Span::styled(label, style)];
    if state.product.active_upsell().is_some() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[ Yes, let's upgrade ]", Theme::upgrade_style(false)));
    }
    (Line::from(spans), Some((x, width)), None)
}

fn chart_lines(chart: &SizeChart) -> Vec<Line<'static>> {
    let columns = chart.ordered_columns();
    let cell = |s: &str| format!("{s:<10}");

    let mut lines = Vec::with_capacity(chart.rows.len() + 1);
    let header: String = columns.iter().map(|c| cell(c.label.as_str())).collect();
    lines.push(Line::from(Span::styled(format!("  {header}"), Theme::dim_style())));
    for row in &chart.rows {
        let text: String = columns
            .iter()
            .map(|c| cell(row.get(&c.label).map_or("", String::as_str)))
            .collect();
        lines.push(Line::raw(format!("  {text}")));
    }
    lines
}

/// Placeholder box standing in for an image, labelled with its file name.
fn image_frame(path: &str, rows: usize, width: u16) -> Vec<Line<'static>> {
    let inner = usize::from(width.saturating_sub(6)).max(8);
    let name = path.rsplit('/').next().unwrap_or(path);
    let style = Theme::image_style();

    let mut lines = Vec::with_capacity(rows);
    lines.push(Line::from(Span::styled(format!("  ╭{}╮", "─".repeat(inner)), style)));
    for i in 1..rows.saturating_sub(1) {
        let body = if i == rows / 2 {
            format!("{name:^inner$}")
        } else {
            " ".repeat(inner)
        };
        lines.push(Line::from(Span::styled(format!("  │{body}│"), style)));
    }
    lines.push(Line::from(Span::styled(format!("  ╰{}╯", "─".repeat(inner)), style)));
    lines
}

/// Renders the visible slice of a [`PageContent`].
pub struct ProductPage<'a> {
    pub content: &'a PageContent,
    pub first_row: usize,
}

impl Widget for ProductPage<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let visible: Vec<Line> = self
            .content
            .lines
            .iter()
            .skip(self.first_row)
            .take(area.height as usize)
            .cloned()
            .collect();
        Paragraph::new(visible).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::shop::sample_product;
    use crate::config::AppConfig;

    #[test]
    fn buttons_sit_above_the_default_threshold() {
        let state = AppState::new(sample_product(), None, AppConfig::default());
        let content = PageContent::build(&state, 80);
        let row_px = state.config.row_height_px as usize;

        assert!(content.buttons.add.is_some());
        assert!((content.buttons.row + 1) * row_px < state.config.sticky_threshold_px as usize);
        assert!(content.row_count() * row_px > 2 * state.config.sticky_threshold_px as usize);
    }

    #[test]
    fn regular_price_has_no_badge() {
        let spans = price_spans(&Pricing {
            base_price: 1200.0,
            sale_price: 0.0,
            discount_percentage: 0,
        });
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "$1,200");
    }
}
