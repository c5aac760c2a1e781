//! Input handling and store-event dispatch.
//!
//! Key and mouse events mutate [`AppState`]; store notifications
//! (`Scrolled`, `CartChanged`, `SelectionChanged`) are routed to the sticky
//! bar's explicit recompute functions.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use chrono::{DateTime, Local};
use ratatui::layout::{Position, Rect};

use crate::config::Action;
use crate::core::add_to_cart::{ControlKind, Press};
use crate::core::scroll::ScrollOffset;
use crate::core::selection::VariantSelection;

use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Rows moved per scroll step (arrow key or wheel notch).
const SCROLL_ROWS: u32 = 3;

// ── store events ────────────────────────────────────────────────

pub fn on_scrolled(state: &mut AppState, offset: ScrollOffset) {
    if state.bar.on_scroll(offset) && state.bar.visibility().is_shown() {
        state.bar_slide.start();
    }
}

/// Recompute visibility from the container's live offset.  Called right
/// after anything moves or resizes the page; queued `Scrolled` events can
/// trail the container and are never trusted over it.
pub fn sync_scroll(state: &mut AppState) {
    let offset = state.page.scroll_top();
    on_scrolled(state, offset);
}

/// Frame tick: advance animations and expire the current alert.
pub fn on_tick(state: &mut AppState, now: DateTime<Local>) {
    state.alerts.expire(now);
    state.bar_slide.tick();
    state.tick = state.tick.wrapping_add(1);
}

pub fn on_cart_changed(state: &mut AppState) {
    let cart = state.cart.get();
    let selection = state.selection.get();
    state.bar.on_cart_changed(cart.as_ref(), &selection);
}

pub fn on_selection_changed(state: &mut AppState) {
    let cart = state.cart.get();
    let selection = state.selection.get();
    state.bar.on_selection_changed(cart.as_ref(), &selection);
}

// ── keys ────────────────────────────────────────────────────────

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Product => handle_product_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::Cart => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                state.active_view = ActiveView::Product;
            }
        }
    }
}

fn handle_product_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Home => {
            state.page.scroll_to(0);
            sync_scroll(state);
            return;
        }
        KeyCode::End => {
            state.page.scroll_to(state.page.max_scroll_top());
            sync_scroll(state);
            return;
        }
        KeyCode::Esc => {
            state.bar.set_upgrade_hovered(false);
            return;
        }
        _ => {}
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };
    perform(state, action);
}

fn perform(state: &mut AppState, action: Action) {
    let step = i64::from(SCROLL_ROWS * state.config.row_height_px);
    let page = i64::from(state.page.viewport_height());

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::ScrollUp => scroll_by(state, -step),
        Action::ScrollDown => scroll_by(state, step),
        Action::PageUp => scroll_by(state, -page),
        Action::PageDown => scroll_by(state, page),
        Action::NextColor => {
            let colors = state.product.color_names();
            state.selection.replace_with(|s| s.with_next_color(&colors));
        }
        Action::NextSize => {
            let sizes = state.product.size_labels();
            state.selection.replace_with(|s| s.with_next_size(&sizes));
        }
        Action::ClearSelection => state.selection.set(VariantSelection::default()),
        Action::AddToCart => {
            let target = if state.bar.visibility().is_shown() && state.bar.shows_add_button() {
                ControlKind::StickyBar
            } else {
                ControlKind::Inline
            };
            press_add_to_cart(state, target);
        }
        Action::ToggleUpsell => {
            let hovered = state.bar.upgrade_hovered();
            state.bar.set_upgrade_hovered(!hovered);
        }
        Action::ViewCart => state.active_view = ActiveView::Cart,
    }
}

fn scroll_by(state: &mut AppState, delta: i64) {
    state.page.scroll_by(delta);
    sync_scroll(state);
}

/// Press one of the add-to-cart controls.  A dispatched ticket is queued for
/// the main loop to run.
pub fn press_add_to_cart(state: &mut AppState, kind: ControlKind) {
    let selection = state.selection.get();
    let requirements = state.product.requirements();
    let control = match kind {
        ControlKind::Inline => &mut state.inline,
        ControlKind::StickyBar => &mut state.bar.control,
    };

    match control.press(&state.product.id, requirements, &selection, &mut state.alerts) {
        Press::Dispatched(ticket) => state.pending_dispatch.push((kind, ticket)),
        Press::Rejected(err) => tracing::debug!(?kind, "add to cart rejected: {err}"),
        Press::Ignored => {}
    }
}

// ── settings popup ──────────────────────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Product;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                (item.cycle)(state);
            }
        }
        _ => {}
    }
}

// ── mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Product {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            state.active_view = ActiveView::Product;
        }
        return;
    }

    let pos = Position::new(mouse.column, mouse.row);
    let step = i64::from(SCROLL_ROWS * state.config.row_height_px);

    match mouse.kind {
        MouseEventKind::ScrollDown => scroll_by(state, step),
        MouseEventKind::ScrollUp => scroll_by(state, -step),
        MouseEventKind::Moved => {
            let hovered = hits(state.hit.bar_upgrade, pos);
            if hovered != state.bar.upgrade_hovered() {
                state.bar.set_upgrade_hovered(hovered);
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if hits(state.hit.bar_add, pos) {
                press_add_to_cart(state, ControlKind::StickyBar);
            } else if hits(state.hit.bar_upgrade, pos) {
                state.bar.set_upgrade_hovered(true);
            } else if hits(state.hit.inline_add, pos) {
                press_add_to_cart(state, ControlKind::Inline);
            } else if hits(state.hit.inline_view_cart, pos) {
                state.active_view = ActiveView::Cart;
            }
        }
        _ => {}
    }
}

fn hits(area: Option<Rect>, pos: Position) -> bool {
    area.is_some_and(|r| r.contains(pos))
}
