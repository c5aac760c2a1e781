//! Upsell flyout shown under the sticky bar's upgrade button.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::core::catalog::Upsell;
use crate::core::pricing::{format_thousands, upsell_headline, upsell_is_discounted, upsell_savings};

use super::theme::Theme;

const FLYOUT_WIDTH: u16 = 44;

pub struct UpsellFlyout<'a> {
    pub upsell: &'a Upsell,
    /// The upgrade button the flyout hangs from.
    pub anchor: Rect,
}

impl UpsellFlyout<'_> {
    /// Lines of body text (without the border).
    fn lines(&self) -> Vec<Line<'static>> {
        let upsell = self.upsell;
        let struck = upsell_is_discounted(&upsell.pricing);
        let name_width = usize::from(FLYOUT_WIDTH).saturating_sub(16);

        let mut lines = vec![
            Line::from(vec![
                Span::raw(" Complete the kit: "),
                Span::styled(upsell_headline(upsell), Theme::price_style()),
            ]),
            Line::from(Span::styled(
                format!(" ▣ {}", upsell.main_image.rsplit('/').next().unwrap_or_default()),
                Theme::image_style(),
            )),
            Line::raw(""),
        ];

        for product in &upsell.products {
            let price_style = if struck {
                Theme::struck_price_style()
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(vec![
                Span::raw(format!(" • {:<name_width$}", product.name)),
                Span::styled(format!("${}", format_thousands(product.base_price)), price_style),
            ]));
        }

        if let Some(saved) = upsell_savings(upsell) {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled(
                format!(" You Save ${}", format_thousands(saved)),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines
    }
}

impl Widget for UpsellFlyout<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let height = (lines.len() as u16 + 2).min(area.height);
        let width = FLYOUT_WIDTH.min(area.width);
        let x = self
            .anchor
            .right()
            .saturating_sub(width)
            .max(area.x)
            .min(area.right().saturating_sub(width));
        // Below the bar's bottom border.
        let y = (self.anchor.y + 2).min(area.bottom().saturating_sub(height));
        let popup = Rect::new(x, y, width, height);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Upgrade ")
            .title_style(Theme::heading_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta));
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::shop::sample_product;

    #[test]
    fn discounted_bundle_lists_savings() {
        let product = sample_product();
        let upsell = product.upsell.as_ref().unwrap();
        let flyout = UpsellFlyout {
            upsell,
            anchor: Rect::new(40, 1, 22, 1),
        };
        let text: Vec<String> = flyout.lines().iter().map(|l| l.to_string()).collect();

        assert!(text[0].contains("$129 (28% Off)"));
        assert!(text.iter().any(|l| l.contains("Merino Beanie") && l.contains("$45")));
        assert_eq!(text.last().unwrap().trim(), "You Save $51");
    }
}
