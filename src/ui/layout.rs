//! Screen regions and the row ↔ pixel mapping of the page viewport.
//!
//! The page scrolls in pixels but renders in terminal rows.  [`AppLayout`]
//! keeps both views of the viewport in one place: the regions to draw into,
//! the slot the sticky bar overlays, and which page row lands on which
//! screen line.

use ratatui::layout::{Constraint, Layout, Rect};

use super::sticky_bar::BAR_HEIGHT;

#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    /// Scrollable product page.
    pub page_area: Rect,
    /// Top rows of the page the sticky bar covers; `None` when the page is
    /// too short to hold it.
    pub bar_slot: Option<Rect>,
    /// Alert / key hint line.
    pub status_area: Rect,
}

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let [page_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
        let bar_slot = (page_area.height >= BAR_HEIGHT)
            .then(|| Rect::new(page_area.x, page_area.y, page_area.width, BAR_HEIGHT));

        Self {
            page_area,
            bar_slot,
            status_area,
        }
    }

    /// Viewport height in pixels.
    pub fn viewport_px(&self, row_px: u32) -> u32 {
        u32::from(self.page_area.height) * row_px
    }

    /// First page row visible at `scroll_top`.
    pub fn first_row(scroll_top: u32, row_px: u32) -> usize {
        (scroll_top / row_px.max(1)) as usize
    }

    /// Screen line showing page row `row`, if it is on screen.  When
    /// `bar_shown` the rows under the bar slot count as off screen.
    pub fn row_rect(&self, first_row: usize, row: usize, bar_shown: bool) -> Option<Rect> {
        let covered = match (bar_shown, self.bar_slot) {
            (true, Some(slot)) => usize::from(slot.height),
            _ => 0,
        };
        let visible = usize::from(self.page_area.height);
        if row < first_row + covered || row >= first_row + visible {
            return None;
        }
        let y = self.page_area.y + (row - first_row) as u16;
        Some(Rect::new(self.page_area.x, y, self.page_area.width, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_sits_below_the_page() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.page_area, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.bar_slot, Some(Rect::new(0, 0, 80, BAR_HEIGHT)));
        assert_eq!(layout.viewport_px(16), 23 * 16);
    }

    #[test]
    fn short_terminal_has_no_bar_slot() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 3));
        assert_eq!(layout.page_area.height, 2);
        assert!(layout.bar_slot.is_none());
    }

    #[test]
    fn rows_under_the_bar_are_not_on_screen() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 11));
        let first = AppLayout::first_row(160, 16);
        assert_eq!(first, 10);

        assert_eq!(layout.row_rect(first, 11, false), Some(Rect::new(0, 1, 80, 1)));
        assert_eq!(layout.row_rect(first, 11, true), None);
        assert_eq!(layout.row_rect(first, 13, true), Some(Rect::new(0, 3, 80, 1)));
        assert_eq!(layout.row_rect(first, 20, false), None);
        assert_eq!(layout.row_rect(first, 9, false), None);
    }
}
