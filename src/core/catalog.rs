//! Product catalog data as the storefront API delivers it.
//!
//! Prices arrive pre-computed; nothing here does pricing math beyond what
//! the display needs (see [`super::pricing`]).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::add_to_cart::VariantRequirements;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

// ───────────────────────────────────────── pricing ───────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub base_price: f64,
    #[serde(default)]
    pub sale_price: f64,
    #[serde(default)]
    pub discount_percentage: u32,
}

// ───────────────────────────────────────── options ───────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartColumn {
    pub label: String,
    pub order: u32,
}

/// A size chart: ordered columns and one map per row (column label → cell).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeChart {
    #[serde(default)]
    pub columns: Vec<ChartColumn>,
    #[serde(default)]
    pub rows: Vec<HashMap<String, String>>,
}

impl SizeChart {
    /// Columns sorted by their display order.
    pub fn ordered_columns(&self) -> Vec<&ChartColumn> {
        let mut cols: Vec<&ChartColumn> = self.columns.iter().collect();
        cols.sort_by_key(|c| c.order);
        cols
    }

    /// Values of the first column, which names the size (`"S"`, `"M"`, …).
    pub fn size_labels(&self) -> Vec<String> {
        let Some(first) = self.ordered_columns().first().map(|c| c.label.clone()) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(&first).cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeCharts {
    #[serde(default)]
    pub inches: SizeChart,
    #[serde(default)]
    pub centimeters: SizeChart,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductOptions {
    #[serde(default)]
    pub colors: Vec<ColorOption>,
    #[serde(default)]
    pub sizes: SizeCharts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductImages {
    pub main: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

// ───────────────────────────────────────── upsell ────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpsellVisibility {
    Draft,
    Published,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsellProduct {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub main_image: String,
    pub base_price: f64,
}

/// Bundled secondary offer shown next to the primary add-to-cart action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upsell {
    pub id: String,
    #[serde(default)]
    pub main_image: String,
    pub pricing: Pricing,
    pub visibility: UpsellVisibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub products: Vec<UpsellProduct>,
}

// ───────────────────────────────────────── product ───────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub id: String,
    pub name: String,
    pub pricing: Pricing,
    pub images: ProductImages,
    #[serde(default)]
    pub options: ProductOptions,
    #[serde(default)]
    pub upsell: Option<Upsell>,
}

impl ProductInfo {
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

    pub fn color_names(&self) -> Vec<String> {
        self.options.colors.iter().map(|c| c.name.clone()).collect()
    }

    pub fn size_labels(&self) -> Vec<String> {
        let labels = self.options.sizes.inches.size_labels();
        if labels.is_empty() {
            self.options.sizes.centimeters.size_labels()
        } else {
            labels
        }
    }

    pub fn has_color(&self) -> bool {
        !self.options.colors.is_empty()
    }

    pub fn has_size(&self) -> bool {
        !self.size_labels().is_empty()
    }

    /// Which variant halves must be chosen before adding to cart.
    pub fn requirements(&self) -> VariantRequirements {
        VariantRequirements {
            has_color: self.has_color(),
            has_size: self.has_size(),
        }
    }

    /// The upsell, if it should be offered at all.
    pub fn active_upsell(&self) -> Option<&Upsell> {
        self.upsell
            .as_ref()
            .filter(|u| !u.products.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart() -> SizeChart {
        SizeChart {
            columns: vec![
                ChartColumn { label: "Chest".into(), order: 2 },
                ChartColumn { label: "Size".into(), order: 1 },
            ],
            rows: vec![
                HashMap::from([("Size".into(), "S".into()), ("Chest".into(), "36".into())]),
                HashMap::from([("Size".into(), "M".into()), ("Chest".into(), "40".into())]),
            ],
        }
    }

    #[test]
    fn size_labels_come_from_lowest_order_column() {
        assert_eq!(chart().size_labels(), vec!["S", "M"]);
        assert!(SizeChart::default().size_labels().is_empty());
    }

    #[test]
    fn parses_storefront_json() {
        let raw = json!({
            "id": "p1",
            "name": "Field Jacket",
            "pricing": { "basePrice": 120.0, "salePrice": 99.0, "discountPercentage": 17 },
            "images": { "main": "/img/main.jpg", "gallery": ["/img/1.jpg"] },
            "options": {
                "colors": [{ "name": "Olive", "image": "/img/olive.jpg" }],
                "sizes": {
                    "inches": {
                        "columns": [{ "label": "Size", "order": 1 }],
                        "rows": [{ "Size": "M" }]
                    },
                    "centimeters": { "columns": [], "rows": [] }
                }
            },
            "upsell": {
                "id": "u1",
                "mainImage": "/img/bundle.jpg",
                "pricing": { "basePrice": 60.0, "salePrice": 45.0, "discountPercentage": 25 },
                "visibility": "PUBLISHED",
                "createdAt": "2024-03-01T10:00:00Z",
                "updatedAt": "2024-03-02T10:00:00Z",
                "products": [{ "id": "b1", "name": "Beanie", "slug": "beanie", "mainImage": "", "basePrice": 30.0 }]
            }
        });
        let product: ProductInfo = serde_json::from_value(raw).unwrap();
        assert!(product.has_color());
        assert!(product.has_size());
        assert_eq!(product.size_labels(), vec!["M"]);
        let upsell = product.active_upsell().unwrap();
        assert_eq!(upsell.visibility, UpsellVisibility::Published);
    }

    #[test]
    fn product_without_options_requires_nothing() {
        let raw = json!({
            "id": "mug",
            "name": "Mug",
            "pricing": { "basePrice": 12.0 },
            "images": { "main": "/img/mug.jpg" }
        });
        let product: ProductInfo = serde_json::from_value(raw).unwrap();
        let req = product.requirements();
        assert!(!req.has_color && !req.has_size);
        assert!(product.active_upsell().is_none());
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = ProductInfo::load(Path::new("/nonexistent/product.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
