//! Price display helpers.  Prices are pre-computed upstream; this only
//! decides how to present them.

use super::catalog::{Pricing, Upsell};

/// How a price block should be shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriceDisplay {
    /// Sale price, struck-through base price and a `-N%` badge.
    Sale {
        sale: f64,
        base: f64,
        discount_percentage: u32,
    },
    Regular(f64),
}

impl PriceDisplay {
    pub fn of(pricing: &Pricing) -> Self {
        if pricing.sale_price > 0.0 {
            PriceDisplay::Sale {
                sale: pricing.sale_price,
                base: pricing.base_price,
                discount_percentage: pricing.discount_percentage,
            }
        } else {
            PriceDisplay::Regular(pricing.base_price)
        }
    }
}

/// `1234.5` → `"1,234.50"`, `1234.0` → `"1,234"`.
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    if frac == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac:02}")
    }
}

/// Whether upsell component prices should be shown struck through.
pub fn upsell_is_discounted(pricing: &Pricing) -> bool {
    pricing.sale_price > 0.0 && pricing.sale_price < pricing.base_price
}

/// Flyout headline, e.g. `"$45 (25% Off)"` or `"$60 today"`.
pub fn upsell_headline(upsell: &Upsell) -> String {
    let p = &upsell.pricing;
    if p.sale_price > 0.0 {
        format!("${} ({}% Off)", format_thousands(p.sale_price), p.discount_percentage)
    } else {
        format!("${} today", format_thousands(p.base_price))
    }
}

/// Amount saved by taking the bundle, when it is discounted.
pub fn upsell_savings(upsell: &Upsell) -> Option<f64> {
    upsell_is_discounted(&upsell.pricing)
        .then(|| upsell.pricing.base_price - upsell.pricing.sale_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::UpsellVisibility;
    use chrono::Utc;

    fn upsell(base: f64, sale: f64, pct: u32) -> Upsell {
        Upsell {
            id: "u".into(),
            main_image: String::new(),
            pricing: Pricing {
                base_price: base,
                sale_price: sale,
                discount_percentage: pct,
            },
            visibility: UpsellVisibility::Published,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            products: Vec::new(),
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.5), "1,234,567.50");
        assert_eq!(format_thousands(19.99), "19.99");
        assert_eq!(format_thousands(-1500.0), "-1,500");
    }

    #[test]
    fn sale_only_when_sale_price_set() {
        let on_sale = Pricing { base_price: 100.0, sale_price: 80.0, discount_percentage: 20 };
        assert!(matches!(PriceDisplay::of(&on_sale), PriceDisplay::Sale { discount_percentage: 20, .. }));
        let regular = Pricing { base_price: 100.0, sale_price: 0.0, discount_percentage: 0 };
        assert_eq!(PriceDisplay::of(&regular), PriceDisplay::Regular(100.0));
    }

    #[test]
    fn headline_and_savings() {
        let discounted = upsell(60.0, 45.0, 25);
        assert_eq!(upsell_headline(&discounted), "$45 (25% Off)");
        assert_eq!(upsell_savings(&discounted), Some(15.0));

        let full = upsell(60.0, 0.0, 0);
        assert_eq!(upsell_headline(&full), "$60 today");
        assert_eq!(upsell_savings(&full), None);
    }

    #[test]
    fn sale_above_base_is_not_a_discount() {
        let odd = upsell(60.0, 70.0, 0);
        assert!(!upsell_is_discounted(&odd.pricing));
        assert_eq!(upsell_savings(&odd), None);
    }
}
