//! Sticky purchase bar model.
//!
//! Holds the two derived flags (visibility, in-cart) plus the bar's own
//! add-to-cart control.  Every input change arrives through an explicit
//! `on_*` call from the event dispatcher; each one recomputes the flag it
//! feeds so neither can lag behind the latest observed input.

use super::add_to_cart::{AddToCartControl, ControlKind};
use super::cart::{is_in_cart, CartSnapshot};
use super::catalog::Upsell;
use super::scroll::ScrollOffset;
use super::selection::VariantSelection;
use super::visibility::{bar_visibility, BarVisibility};

#[derive(Debug, Clone)]
pub struct StickyBarModel {
    product_id: String,
    threshold: ScrollOffset,
    offset: ScrollOffset,
    visibility: BarVisibility,
    in_cart: bool,
    upgrade_hovered: bool,
    pub control: AddToCartControl,
}

impl StickyBarModel {
    pub fn new(product_id: impl Into<String>, threshold: ScrollOffset) -> Self {
        Self {
            product_id: product_id.into(),
            threshold,
            offset: 0,
            visibility: BarVisibility::Hidden,
            in_cart: false,
            upgrade_hovered: false,
            control: AddToCartControl::new(ControlKind::StickyBar),
        }
    }

    pub fn threshold(&self) -> ScrollOffset {
        self.threshold
    }

    pub fn visibility(&self) -> BarVisibility {
        self.visibility
    }

    pub fn is_in_cart(&self) -> bool {
        self.in_cart
    }

    /// The bar's add button is only offered for variants not yet in the cart.
    pub fn shows_add_button(&self) -> bool {
        !self.in_cart
    }

    /// New scroll offset.  Returns `true` when visibility flipped.
    pub fn on_scroll(&mut self, offset: ScrollOffset) -> bool {
        self.offset = offset;
        self.refresh_visibility()
    }

    /// Move the threshold (settings change); visibility is re-derived from
    /// the last seen offset.
    pub fn set_threshold(&mut self, threshold: ScrollOffset) -> bool {
        self.threshold = threshold;
        self.refresh_visibility()
    }

    pub fn on_cart_changed(&mut self, cart: Option<&CartSnapshot>, selection: &VariantSelection) {
        self.recompute_membership(cart, selection);
    }

    pub fn on_selection_changed(
        &mut self,
        cart: Option<&CartSnapshot>,
        selection: &VariantSelection,
    ) {
        self.recompute_membership(cart, selection);
    }

    /// A successful add from the bar marks the variant as in the cart right
    /// away; the next cart or selection change recomputes it from data.
    pub fn mark_added(&mut self) {
        self.in_cart = true;
    }

    pub fn set_upgrade_hovered(&mut self, hovered: bool) {
        self.upgrade_hovered = hovered;
    }

    pub fn upgrade_hovered(&self) -> bool {
        self.upgrade_hovered
    }

    /// The upsell flyout only exists while the bar is shown, the upgrade
    /// button is hovered, and there is something to upsell.
    pub fn flyout_visible(&self, upsell: Option<&Upsell>) -> bool {
        self.visibility.is_shown()
            && self.upgrade_hovered
            && upsell.is_some_and(|u| !u.products.is_empty())
    }

    fn refresh_visibility(&mut self) -> bool {
        let next = bar_visibility(self.offset, self.threshold);
        let flipped = next != self.visibility;
        if flipped {
            tracing::debug!(offset = self.offset, visibility = ?next, "sticky bar visibility changed");
        }
        self.visibility = next;
        flipped
    }

    fn recompute_membership(&mut self, cart: Option<&CartSnapshot>, selection: &VariantSelection) {
        self.in_cart = is_in_cart(cart, &self.product_id, selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alert::{Alert, AlertKind};
    use crate::core::add_to_cart::{ActionResult, ControlState, Press, VariantRequirements};
    use crate::core::cart::CartLineItem;
    use crate::core::catalog::{Pricing, UpsellProduct, UpsellVisibility};
    use crate::core::visibility::STICKY_BAR_THRESHOLD;

    fn cart_with(color: &str, size: &str) -> CartSnapshot {
        CartSnapshot {
            products: vec![CartLineItem {
                base_product_id: "p1".into(),
                color: Some(color.into()),
                size: Some(size.into()),
                name: "Jacket".into(),
                quantity: 1,
                unit_price: 99.0,
            }],
        }
    }

    fn upsell(products: usize) -> Upsell {
        Upsell {
            id: "u1".into(),
            main_image: String::new(),
            pricing: Pricing::default(),
            visibility: UpsellVisibility::Published,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            products: (0..products)
                .map(|i| UpsellProduct {
                    id: format!("b{i}"),
                    name: format!("Bundle item {i}"),
                    slug: format!("bundle-{i}"),
                    main_image: String::new(),
                    base_price: 10.0,
                })
                .collect(),
        }
    }

    #[test]
    fn scroll_drives_visibility() {
        let mut bar = StickyBarModel::new("p1", STICKY_BAR_THRESHOLD);
        assert!(!bar.on_scroll(500));
        assert_eq!(bar.visibility(), BarVisibility::Hidden);
        assert!(bar.on_scroll(1040));
        assert_eq!(bar.visibility(), BarVisibility::Shown);
        assert!(!bar.on_scroll(2000));
        assert!(bar.on_scroll(1039));
        assert_eq!(bar.visibility(), BarVisibility::Hidden);
    }

    #[test]
    fn threshold_change_rederives_from_last_offset() {
        let mut bar = StickyBarModel::new("p1", STICKY_BAR_THRESHOLD);
        bar.on_scroll(800);
        assert!(bar.set_threshold(640));
        assert!(bar.visibility().is_shown());
    }

    #[test]
    fn membership_follows_cart_and_selection() {
        let mut bar = StickyBarModel::new("p1", STICKY_BAR_THRESHOLD);
        let cart = cart_with("Olive", "M");

        bar.on_cart_changed(Some(&cart), &VariantSelection::new(Some("Olive"), Some("M")));
        assert!(bar.is_in_cart());
        assert!(!bar.shows_add_button());

        bar.on_selection_changed(Some(&cart), &VariantSelection::new(Some("Olive"), Some("L")));
        assert!(!bar.is_in_cart());

        bar.on_cart_changed(None, &VariantSelection::new(Some("Olive"), Some("M")));
        assert!(!bar.is_in_cart());
    }

    #[test]
    fn success_hides_add_button_until_recompute() {
        let mut bar = StickyBarModel::new("p1", STICKY_BAR_THRESHOLD);
        let sel = VariantSelection::new(Some("Olive"), Some("M"));
        let mut alerts: Vec<Alert> = Vec::new();
        let req = VariantRequirements { has_color: true, has_size: true };

        let Press::Dispatched(ticket) = bar.control.press("p1", req, &sel, &mut alerts) else {
            panic!("press should dispatch");
        };
        bar.control.complete(ticket.token, ActionResult::new(AlertKind::Success, "Added"), &mut alerts);
        bar.mark_added();

        assert!(!bar.shows_add_button());
        assert_eq!(bar.control.state(), ControlState::Idle);

        // Cart snapshot arrives with the new line: the flag stays true.
        bar.on_cart_changed(Some(&cart_with("Olive", "M")), &sel);
        assert!(bar.is_in_cart());

        // Another variant is not in the cart.
        bar.on_selection_changed(
            Some(&cart_with("Olive", "M")),
            &VariantSelection::new(Some("Black"), Some("M")),
        );
        assert!(bar.shows_add_button());
    }

    #[test]
    fn flyout_needs_shown_bar_hover_and_products() {
        let mut bar = StickyBarModel::new("p1", STICKY_BAR_THRESHOLD);
        let offer = upsell(2);

        bar.set_upgrade_hovered(true);
        assert!(!bar.flyout_visible(Some(&offer)));

        bar.on_scroll(1200);
        assert!(bar.flyout_visible(Some(&offer)));
        assert!(!bar.flyout_visible(Some(&upsell(0))));
        assert!(!bar.flyout_visible(None));

        bar.set_upgrade_hovered(false);
        assert!(!bar.flyout_visible(Some(&offer)));
    }
}
