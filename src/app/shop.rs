//! In-process shop backend used when the page runs standalone.
//!
//! [`DemoShop`] implements the add-to-cart action against the shared cart
//! store: it waits a configurable latency, rejects variants marked out of
//! stock, and otherwise publishes a new cart snapshot.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::core::add_to_cart::{ActionResult, AddToCartAction, AddToCartRequest};
use crate::core::alert::AlertKind;
use crate::core::cart::{is_in_cart, CartLineItem, CartSnapshot};
use crate::core::catalog::{
    ChartColumn, ColorOption, Pricing, ProductImages, ProductInfo, ProductOptions, SizeChart,
    SizeCharts, Upsell, UpsellProduct, UpsellVisibility,
};
use crate::core::observe::Observable;
use crate::core::selection::VariantSelection;

/// `(color, size)` pair used for stock lookups.
type VariantKey = (Option<String>, Option<String>);

pub struct DemoShop {
    cart: Observable<Option<CartSnapshot>>,
    latency: Duration,
    out_of_stock: HashSet<VariantKey>,
    /// Product id → (name, unit price) for the line items we create.
    catalog: HashMap<String, (String, f64)>,
}

impl DemoShop {
    pub fn new(cart: Observable<Option<CartSnapshot>>, latency: Duration) -> Self {
        Self {
            cart,
            latency,
            out_of_stock: HashSet::new(),
            catalog: HashMap::new(),
        }
    }

    /// Register a product so added lines carry its name and price.
    pub fn stock(mut self, product: &ProductInfo) -> Self {
        let price = if product.pricing.sale_price > 0.0 {
            product.pricing.sale_price
        } else {
            product.pricing.base_price
        };
        self.catalog
            .insert(product.id.clone(), (product.name.clone(), price));
        self
    }

    /// Mark variants as sold out.  Each spec is `color/size`, `color` or
    /// `/size`.
    pub fn sold_out<'a>(mut self, specs: impl IntoIterator<Item = &'a str>) -> Self {
        for spec in specs {
            self.out_of_stock.insert(parse_variant(spec));
        }
        self
    }
}

fn parse_variant(spec: &str) -> VariantKey {
    let non_empty = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };
    match spec.split_once('/') {
        Some((color, size)) => (non_empty(color), non_empty(size)),
        None => (non_empty(spec), None),
    }
}

#[async_trait]
impl AddToCartAction for DemoShop {
    async fn add_to_cart(&self, request: AddToCartRequest) -> ActionResult {
        tokio::time::sleep(self.latency).await;

        let key = (request.color.clone(), request.size.clone());
        if self.out_of_stock.contains(&key) {
            return ActionResult::new(AlertKind::Error, "Out of stock");
        }

        let selection = VariantSelection::new(request.color.as_deref(), request.size.as_deref());
        let (name, unit_price) = self
            .catalog
            .get(&request.product_id)
            .cloned()
            .unwrap_or_else(|| (request.product_id.clone(), 0.0));
        let line = CartLineItem {
            base_product_id: request.product_id.clone(),
            color: request.color,
            size: request.size,
            name,
            quantity: 1,
            unit_price,
        };

        // Membership check and append happen under one lock.
        let added = self.cart.update(|current| {
            if is_in_cart(current.as_ref(), &request.product_id, &selection) {
                return None;
            }
            Some(Some(current.clone().unwrap_or_default().with_item(line)))
        });
        if !added {
            return ActionResult::new(AlertKind::Neutral, "Item already in cart");
        }

        ActionResult::new(AlertKind::Success, "Added to cart")
    }
}

// ───────────────────────────────────────── sample data ───────

/// Product shown when no `--product` file is given.
pub fn sample_product() -> ProductInfo {
    let row = |size: &str, chest: &str, length: &str| {
        HashMap::from([
            ("Size".to_string(), size.to_string()),
            ("Chest".to_string(), chest.to_string()),
            ("Length".to_string(), length.to_string()),
        ])
    };
    let columns = vec![
        ChartColumn { label: "Size".into(), order: 1 },
        ChartColumn { label: "Chest".into(), order: 2 },
        ChartColumn { label: "Length".into(), order: 3 },
    ];
    let stamp = Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).single().unwrap_or_else(Utc::now);

    ProductInfo {
        id: "field-jacket".into(),
        name: "Waxed Cotton Field Jacket".into(),
        pricing: Pricing {
            base_price: 1249.0,
            sale_price: 999.0,
            discount_percentage: 20,
        },
        images: ProductImages {
            main: "/images/field-jacket/main.jpg".into(),
            gallery: (1..=6)
                .map(|i| format!("/images/field-jacket/gallery-{i}.jpg"))
                .collect(),
        },
        options: ProductOptions {
            colors: ["Olive", "Black", "Tan"]
                .into_iter()
                .map(|name| ColorOption {
                    name: name.into(),
                    image: format!("/images/field-jacket/{}.jpg", name.to_lowercase()),
                })
                .collect(),
            sizes: SizeCharts {
                inches: SizeChart {
                    columns: columns.clone(),
                    rows: vec![
                        row("S", "36-38", "27"),
                        row("M", "39-41", "28"),
                        row("L", "42-44", "29"),
                        row("XL", "45-47", "30"),
                    ],
                },
                centimeters: SizeChart {
                    columns,
                    rows: vec![
                        row("S", "91-97", "69"),
                        row("M", "99-104", "71"),
                        row("L", "107-112", "74"),
                        row("XL", "114-119", "76"),
                    ],
                },
            },
        },
        upsell: Some(Upsell {
            id: "trail-kit".into(),
            main_image: "/images/upsell/trail-kit.jpg".into(),
            pricing: Pricing {
                base_price: 180.0,
                sale_price: 129.0,
                discount_percentage: 28,
            },
            visibility: UpsellVisibility::Published,
            created_at: stamp,
            updated_at: stamp,
            products: vec![
                UpsellProduct {
                    id: "beanie".into(),
                    name: "Merino Beanie".into(),
                    slug: "merino-beanie".into(),
                    main_image: String::new(),
                    base_price: 45.0,
                },
                UpsellProduct {
                    id: "wax".into(),
                    name: "Re-proofing Wax".into(),
                    slug: "re-proofing-wax".into(),
                    main_image: String::new(),
                    base_price: 35.0,
                },
                UpsellProduct {
                    id: "gloves".into(),
                    name: "Leather Gloves".into(),
                    slug: "leather-gloves".into(),
                    main_image: String::new(),
                    base_price: 100.0,
                },
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn request(color: &str, size: &str) -> AddToCartRequest {
        AddToCartRequest {
            product_id: "field-jacket".into(),
            color: Some(color.into()),
            size: Some(size.into()),
        }
    }

    #[test]
    fn variant_specs() {
        assert_eq!(parse_variant("Olive/M"), (Some("Olive".into()), Some("M".into())));
        assert_eq!(parse_variant("Olive"), (Some("Olive".into()), None));
        assert_eq!(parse_variant("/XL"), (None, Some("XL".into())));
    }

    #[tokio::test]
    async fn success_publishes_new_snapshot() {
        let cart = Observable::new(None);
        let shop = DemoShop::new(cart.clone(), Duration::ZERO).stock(&sample_product());

        let result = shop.add_to_cart(request("Olive", "M")).await;

        assert_eq!(result, ActionResult::new(AlertKind::Success, "Added to cart"));
        let snapshot = cart.get().unwrap();
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.products[0].name, "Waxed Cotton Field Jacket");
        assert_eq!(snapshot.products[0].unit_price, 999.0);
    }

    #[tokio::test]
    async fn sold_out_variant_is_an_error() {
        let cart = Observable::new(None);
        let shop = DemoShop::new(cart.clone(), Duration::ZERO).sold_out(["Black/L"]);

        let result = shop.add_to_cart(request("Black", "L")).await;

        assert_eq!(result, ActionResult::new(AlertKind::Error, "Out of stock"));
        assert_eq!(cart.get(), None);
    }

    #[tokio::test]
    async fn duplicate_add_is_neutral() {
        let cart = Observable::new(None);
        let shop = DemoShop::new(cart.clone(), Duration::ZERO);

        shop.add_to_cart(request("Tan", "S")).await;
        let again = shop.add_to_cart(request("Tan", "S")).await;

        assert_eq!(again.kind, AlertKind::Neutral);
        assert_eq!(cart.get().map(|c| c.products.len()), Some(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_adds_of_one_variant_land_once() {
        let cart = Observable::new(None);
        let shop = Arc::new(DemoShop::new(cart.clone(), Duration::ZERO));

        let calls: Vec<_> = (0..8)
            .map(|_| {
                let shop = Arc::clone(&shop);
                tokio::spawn(async move { shop.add_to_cart(request("Olive", "L")).await })
            })
            .collect();
        let mut kinds = Vec::new();
        for call in calls {
            kinds.push(call.await.unwrap().kind);
        }

        assert_eq!(kinds.iter().filter(|k| **k == AlertKind::Success).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == AlertKind::Neutral).count(), 7);
        assert_eq!(cart.get().map(|c| c.products.len()), Some(1));
    }

    #[test]
    fn sample_product_requires_both_options() {
        let product = sample_product();
        let req = product.requirements();
        assert!(req.has_color && req.has_size);
        assert_eq!(product.size_labels(), vec!["S", "M", "L", "XL"]);
        assert!(product.active_upsell().is_some());
    }
}
