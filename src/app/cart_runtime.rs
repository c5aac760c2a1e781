//! Background add-to-cart calls.
//!
//! A dispatched ticket runs on its own task so the UI keeps drawing while
//! the action is in flight; the result comes back over a channel and is
//! applied by the main loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::add_to_cart::{ActionResult, AddToCartAction, ControlKind, Outcome, Ticket};

use super::state::AppState;

#[derive(Debug)]
pub struct CartUpdate {
    pub control: ControlKind,
    pub token: u64,
    pub result: ActionResult,
}

pub fn spawn_add_to_cart(
    tx: mpsc::UnboundedSender<CartUpdate>,
    action: Arc<dyn AddToCartAction>,
    control: ControlKind,
    ticket: Ticket,
) {
    tokio::spawn(async move {
        let t0 = std::time::Instant::now();
        let result = action.add_to_cart(ticket.request).await;
        tracing::debug!(?control, token = ticket.token, kind = ?result.kind, "add_to_cart: {:.2?}", t0.elapsed());
        let _ = tx.send(CartUpdate {
            control,
            token: ticket.token,
            result,
        });
    });
}

/// Route a finished call back to the control that issued it.
pub fn apply_cart_update(state: &mut AppState, update: CartUpdate) {
    match update.control {
        ControlKind::Inline => {
            state
                .inline
                .complete(update.token, update.result, &mut state.alerts);
        }
        ControlKind::StickyBar => {
            let outcome =
                state
                    .bar
                    .control
                    .complete(update.token, update.result, &mut state.alerts);
            if outcome == Outcome::Added {
                state.bar.mark_added();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::shop::{sample_product, DemoShop};
    use crate::app::state::ActiveView;
    use crate::config::AppConfig;
    use crate::core::add_to_cart::{ControlState, Press};
    use crate::core::alert::AlertKind;
    use crate::core::selection::VariantSelection;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(sample_product(), None, AppConfig::default())
    }

    fn press(state: &mut AppState, kind: ControlKind) -> Ticket {
        let product_id = state.product.id.clone();
        let requirements = state.product.requirements();
        let selection = state.selection.get();
        let control = match kind {
            ControlKind::Inline => &mut state.inline,
            ControlKind::StickyBar => &mut state.bar.control,
        };
        match control.press(&product_id, requirements, &selection, &mut state.alerts) {
            Press::Dispatched(ticket) => ticket,
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn inline_success_round_trip() {
        let mut state = state();
        state.selection.set(VariantSelection::new(Some("Olive"), Some("M")));
        let shop: Arc<dyn AddToCartAction> =
            Arc::new(DemoShop::new(state.cart.clone(), Duration::ZERO));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticket = press(&mut state, ControlKind::Inline);
        spawn_add_to_cart(tx, shop, ControlKind::Inline, ticket);
        let update = rx.recv().await.unwrap();
        apply_cart_update(&mut state, update);

        assert_eq!(state.inline.state(), ControlState::Added);
        let alert = &state.alerts.current().unwrap().alert;
        assert_eq!(alert.kind, AlertKind::Success);
        assert_eq!(state.active_view, ActiveView::Product);
    }

    #[tokio::test]
    async fn sticky_bar_error_leaves_add_button() {
        let mut state = state();
        state.selection.set(VariantSelection::new(Some("Black"), Some("L")));
        let shop: Arc<dyn AddToCartAction> = Arc::new(
            DemoShop::new(state.cart.clone(), Duration::ZERO).sold_out(["Black/L"]),
        );
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticket = press(&mut state, ControlKind::StickyBar);
        assert_eq!(state.bar.control.state(), ControlState::Pending);
        spawn_add_to_cart(tx, shop, ControlKind::StickyBar, ticket);
        apply_cart_update(&mut state, rx.recv().await.unwrap());

        assert_eq!(state.bar.control.state(), ControlState::Idle);
        assert!(state.bar.shows_add_button());
        let alert = &state.alerts.current().unwrap().alert;
        assert_eq!((alert.kind, alert.message.as_str()), (AlertKind::Error, "Out of stock"));
    }

    #[tokio::test]
    async fn sticky_bar_success_marks_in_cart() {
        let mut state = state();
        state.selection.set(VariantSelection::new(Some("Tan"), Some("S")));
        let shop: Arc<dyn AddToCartAction> =
            Arc::new(DemoShop::new(state.cart.clone(), Duration::ZERO));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let ticket = press(&mut state, ControlKind::StickyBar);
        spawn_add_to_cart(tx, shop, ControlKind::StickyBar, ticket);
        apply_cart_update(&mut state, rx.recv().await.unwrap());

        assert!(!state.bar.shows_add_button());
        assert_eq!(state.alerts.current().unwrap().alert.kind, AlertKind::Neutral);
    }
}
