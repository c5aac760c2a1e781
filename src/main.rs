//! A terminal storefront product page with a sticky purchase bar.
//!
//! Scroll past the threshold and the bar slides in; pick a color and size and
//! add to cart from either the bar or the page body.  Cart calls go to an
//! in-process demo shop with configurable latency and stock.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};
use tokio::{sync::mpsc, time::MissedTickBehavior};

use crate::app::{
    cart_runtime::{apply_cart_update, spawn_add_to_cart, CartUpdate},
    event::{spawn_event_reader, AppEvent},
    handler,
    shop::{sample_product, DemoShop},
    state::{ActiveView, AppState, HitAreas},
};
use crate::core::{
    add_to_cart::AddToCartAction, cart::CartSnapshot, catalog::ProductInfo,
    scroll::ScrollObserver,
};
use crate::ui::{
    layout::AppLayout,
    page::{PageContent, ProductPage},
    popup,
    status::StatusLine,
    sticky_bar::{BarGeometry, StickyBar, BAR_HEIGHT},
    upsell::UpsellFlyout,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Storefront product page with a sticky add-to-cart bar")]
struct Cli {
    /// Product JSON to show (defaults to a built-in sample).
    #[arg(long)]
    product: Option<PathBuf>,

    /// Cart snapshot JSON to start from.
    #[arg(long)]
    cart: Option<PathBuf>,

    /// Simulated add-to-cart latency.
    #[arg(long = "latency-ms", default_value_t = 600)]
    latency_ms: u64,

    /// Variant to report as sold out, as `color/size`, `color` or `/size`.
    #[arg(long = "out-of-stock")]
    out_of_stock: Vec<String>,

    /// Scroll offset (px) at which the sticky bar appears.  Overrides the
    /// config file for this run.
    #[arg(long)]
    threshold: Option<u32>,
}

/// Frame rate for animations and alert expiry.
const TICK_RATE: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    let page_area = layout.page_area;
    let row_px = state.config.row_height_px.max(1);

    let content = PageContent::build(state, page_area.width);
    state.page.set_geometry(
        content.row_count() as u32 * row_px,
        layout.viewport_px(row_px),
    );
    // A resize or row height change may have clamped the offset.
    handler::sync_scroll(state);
    let first_row = AppLayout::first_row(state.page.scroll_top(), row_px);
    frame.render_widget(ProductPage { content: &content, first_row }, page_area);

    let geometry = BarGeometry::compute(&layout, state);
    let mut hit = HitAreas::default();

    // Inline buttons are clickable only when on screen and not under the bar.
    if let Some(line) = layout.row_rect(first_row, content.buttons.row, geometry.is_some()) {
        let rect = |(x, w): (u16, u16)| Rect::new(line.x + x, line.y, w, 1);
        hit.inline_add = content.buttons.add.map(rect);
        hit.inline_view_cart = content.buttons.view_cart.map(rect);
    }

    if let Some(geometry) = geometry {
        let hidden_rows = state.bar_slide.row_offset(BAR_HEIGHT);
        frame.render_widget(
            StickyBar {
                state: &*state,
                geometry,
                hidden_rows,
            },
            page_area,
        );
        if !state.bar_slide.is_animating() {
            hit.bar_add = geometry.add;
            hit.bar_upgrade = geometry.upgrade;
        }

        if let (Some(anchor), Some(upsell)) = (geometry.upgrade, state.product.active_upsell()) {
            if state.bar.flyout_visible(Some(upsell)) {
                frame.render_widget(UpsellFlyout { upsell, anchor }, page_area);
            }
        }
    }
    state.hit = hit;

    let hint = state.config.status_bar_hint();
    let fallback = match state.active_view {
        ActiveView::Product => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::Cart => "",
    };
    frame.render_widget(
        StatusLine {
            alert: state.alerts.current().map(|shown| &shown.alert),
            fallback,
        },
        layout.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state: &*state }, frame.area());
        }
        ActiveView::Cart => {
            frame.render_widget(
                popup::CartPopup {
                    cart: state.cart.get(),
                },
                frame.area(),
            );
        }
        ActiveView::Product => {}
    }
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (silent unless RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── load product + cart ───────────────────────────────────
    let product = match &cli.product {
        Some(path) => ProductInfo::load(path)
            .with_context(|| format!("loading product from {}", path.display()))?,
        None => sample_product(),
    };
    let cart = cli
        .cart
        .as_deref()
        .map(CartSnapshot::load)
        .transpose()
        .context("loading cart snapshot")?;

    let config_path = config::config_path();
    let user_config = config::AppConfig::load_from(&config_path);
    let mut state = AppState::new(product, cart, user_config).with_config_file(config_path);
    if let Some(threshold) = cli.threshold {
        state = state.with_threshold_override(threshold);
    }
    tracing::info!(product = %state.product.id, threshold = state.bar.threshold(), "starting");

    // ── async channels + store subscriptions ──────────────────
    let (event_tx, mut events) = mpsc::unbounded_channel::<AppEvent>();
    let (cart_tx, mut cart_rx) = mpsc::unbounded_channel::<CartUpdate>();

    let scroll_observer = {
        let tx = event_tx.clone();
        ScrollObserver::mount(&state.page, move |offset| {
            let _ = tx.send(AppEvent::Scrolled(offset));
        })
    };
    let cart_subscription = {
        let tx = event_tx.clone();
        state.cart.subscribe(move |_| {
            let _ = tx.send(AppEvent::CartChanged);
        })
    };
    let selection_subscription = {
        let tx = event_tx.clone();
        state.selection.subscribe(move |_| {
            let _ = tx.send(AppEvent::SelectionChanged);
        })
    };

    let shop: Arc<dyn AddToCartAction> = Arc::new(
        DemoShop::new(state.cart.clone(), Duration::from_millis(cli.latency_ms))
            .stock(&state.product)
            .sold_out(cli.out_of_stock.iter().map(String::as_str)),
    );

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    spawn_event_reader(event_tx, TICK_RATE);
    let mut ticker = tokio::time::interval(TICK_RATE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        // Presses queue tickets; run them now that the pending state is on screen.
        for (control, ticket) in state.pending_dispatch.drain(..) {
            spawn_add_to_cart(cart_tx.clone(), Arc::clone(&shop), control, ticket);
        }

        tokio::select! {
            biased;

            // First, so a steady stream of input cannot starve animations.
            _ = ticker.tick() => handler::on_tick(&mut state, chrono::Local::now()),

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => {}
                    AppEvent::Scrolled(offset) => {
                        tracing::trace!(offset, "scroll reported");
                        handler::sync_scroll(&mut state);
                    }
                    AppEvent::CartChanged => handler::on_cart_changed(&mut state),
                    AppEvent::SelectionChanged => handler::on_selection_changed(&mut state),
                }
            }

            Some(update) = cart_rx.recv() => {
                apply_cart_update(&mut state, update);
                while let Ok(update) = cart_rx.try_recv() {
                    apply_cart_update(&mut state, update);
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    scroll_observer.unmount();
    cart_subscription.unsubscribe();
    selection_subscription.unsubscribe();
    tracing::debug!(
        scroll_listeners = state.page.listener_count(),
        cart_listeners = state.cart.listener_count(),
        "listeners released"
    );

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Some(cart) = state.cart.get() {
        tracing::info!(items = cart.item_count(), subtotal = cart.subtotal(), "exiting");
    }

    Ok(())
}
