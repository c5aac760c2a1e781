//! Cart snapshots and the membership check.
//!
//! A [`CartSnapshot`] is server-sourced and immutable: updates produce a new
//! snapshot that replaces the old one wholesale.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::catalog::CatalogError;
use super::selection::VariantSelection;

/// One product + variant entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub base_product_id: String,
    pub color: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: f64,
}

fn default_quantity() -> u32 {
    1
}

impl CartLineItem {
    /// Does this line hold exactly `(product_id, selection)`?
    pub fn matches(&self, product_id: &str, selection: &VariantSelection) -> bool {
        self.base_product_id == product_id
            && self.color == selection.color
            && self.size == selection.size
    }
}

/// Ordered cart contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub products: Vec<CartLineItem>,
}

impl CartSnapshot {
    /// Read a snapshot from a JSON file (`{"products": [...]}`).
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// New snapshot with `item` appended.
    pub fn with_item(&self, item: CartLineItem) -> Self {
        let mut products = self.products.clone();
        products.push(item);
        Self { products }
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u32 {
        self.products.iter().map(|p| p.quantity).sum()
    }

    /// Sum of `unit_price * quantity`.
    pub fn subtotal(&self) -> f64 {
        self.products
            .iter()
            .map(|p| p.unit_price * f64::from(p.quantity))
            .sum()
    }
}

/// Is this exact variant of `product_id` already in the cart?
///
/// A missing cart behaves like an empty one.
pub fn is_in_cart(
    cart: Option<&CartSnapshot>,
    product_id: &str,
    selection: &VariantSelection,
) -> bool {
    cart.is_some_and(|c| c.products.iter().any(|item| item.matches(product_id, selection)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(id: &str, color: Option<&str>, size: Option<&str>) -> CartLineItem {
        CartLineItem {
            base_product_id: id.into(),
            color: color.map(Into::into),
            size: size.map(Into::into),
            name: String::new(),
            quantity: 1,
            unit_price: 0.0,
        }
    }

    #[test]
    fn missing_cart_is_never_a_member() {
        let sel = VariantSelection::new(Some("Black"), Some("M"));
        assert!(!is_in_cart(None, "p1", &sel));
        assert!(!is_in_cart(Some(&CartSnapshot::default()), "p1", &sel));
    }

    #[test]
    fn exact_triple_required() {
        let cart = CartSnapshot {
            products: vec![
                line("p1", Some("Black"), Some("S")),
                line("p2", Some("Black"), Some("M")),
                line("p1", Some("Olive"), Some("M")),
            ],
        };
        assert!(!is_in_cart(Some(&cart), "p1", &VariantSelection::new(Some("Black"), Some("M"))));
        assert!(is_in_cart(Some(&cart), "p1", &VariantSelection::new(Some("Olive"), Some("M"))));
        assert!(is_in_cart(Some(&cart), "p2", &VariantSelection::new(Some("Black"), Some("M"))));
    }

    #[test]
    fn unset_options_match_unset_line_fields() {
        let cart = CartSnapshot {
            products: vec![line("mug", None, None)],
        };
        assert!(is_in_cart(Some(&cart), "mug", &VariantSelection::default()));
        assert!(!is_in_cart(Some(&cart), "mug", &VariantSelection::new(Some("White"), None)));
    }

    #[test]
    fn with_item_leaves_original_untouched() {
        let before = CartSnapshot::default();
        let after = before.with_item(line("p1", None, None));
        assert!(before.products.is_empty());
        assert_eq!(after.products.len(), 1);
    }

    #[test]
    fn parses_storefront_shape() {
        let raw = json!({
            "products": [
                { "baseProductId": "p1", "color": "Black", "size": "M", "name": "Tee", "unitPrice": 19.5, "quantity": 2 },
                { "baseProductId": "p2", "color": null, "size": null }
            ]
        });
        let cart: CartSnapshot = serde_json::from_value(raw).unwrap();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), 39.0);
        assert_eq!(cart.products[1].quantity, 1);
    }

    #[test]
    fn load_reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, r#"{"products":[{"baseProductId":"p1","color":"Red","size":"L"}]}"#)
            .unwrap();
        let cart = CartSnapshot::load(&path).unwrap();
        assert!(is_in_cart(Some(&cart), "p1", &VariantSelection::new(Some("Red"), Some("L"))));
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(CartSnapshot::load(&path), Err(CatalogError::Parse { .. })));
    }
}
