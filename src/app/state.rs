//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    add_to_cart::{AddToCartControl, ControlKind, Ticket},
    cart::CartSnapshot,
    catalog::ProductInfo,
    observe::Observable,
    scroll::ScrollContainer,
    selection::VariantSelection,
    sticky_bar::StickyBarModel,
};
use crate::ui::slide::SlideIn;

use super::alerts::AlertCenter;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Product,
    SettingsMenu,
    Cart,
}

/// Screen rectangles of clickable controls from the last frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub bar_add: Option<Rect>,
    pub bar_upgrade: Option<Rect>,
    pub inline_add: Option<Rect>,
    pub inline_view_cart: Option<Rect>,
}

/// Top-level application state.
pub struct AppState {
    pub product: ProductInfo,
    /// Server-sourced cart; `None` until a cart exists.
    pub cart: Observable<Option<CartSnapshot>>,
    pub selection: Observable<VariantSelection>,
    /// The page viewport.
    pub page: ScrollContainer,
    pub bar: StickyBarModel,
    /// Add-to-cart control in the page body.
    pub inline: AddToCartControl,
    pub alerts: AlertCenter,
    pub bar_slide: SlideIn,
    pub active_view: ActiveView,
    /// Settings as stored in the config file.
    pub config: AppConfig,
    /// Where settings changes are saved; `None` keeps them in memory.
    pub config_path: Option<PathBuf>,
    /// Bar threshold for this run only, never written back to the file.
    pub threshold_override: Option<u32>,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub hit: HitAreas,
    /// Tickets issued by handlers, waiting for the main loop to run them.
    pub pending_dispatch: Vec<(ControlKind, Ticket)>,
    /// Monotonic frame counter (drives spinners).
    pub tick: u64,
}

impl AppState {
    pub fn new(product: ProductInfo, cart: Option<CartSnapshot>, config: AppConfig) -> Self {
        let selection = VariantSelection::default();
        let mut bar = StickyBarModel::new(product.id.clone(), config.sticky_threshold_px);
        bar.on_cart_changed(cart.as_ref(), &selection);

        Self {
            product,
            cart: Observable::new(cart),
            selection: Observable::new(selection),
            page: ScrollContainer::new(),
            bar,
            inline: AddToCartControl::new(ControlKind::Inline),
            alerts: AlertCenter::new(config.alert_ms),
            bar_slide: SlideIn::new(0.45),
            active_view: ActiveView::default(),
            config,
            config_path: None,
            threshold_override: None,
            settings_selected: 0,
            should_quit: false,
            status_message: None,
            hit: HitAreas::default(),
            pending_dispatch: Vec::new(),
            tick: 0,
        }
    }

    /// Persist settings changes to `path`.
    pub fn with_config_file(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Use `threshold_px` for the bar without touching the stored config.
    pub fn with_threshold_override(mut self, threshold_px: u32) -> Self {
        self.threshold_override = Some(threshold_px);
        self.bar.set_threshold(threshold_px);
        self
    }
}
