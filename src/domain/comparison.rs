#![allow(dead_code)]

//! Side-by-side product comparison. This is a deliberately simplified model
//! with its own fixed fee and shipping constants — it does not consult the
//! main engine's country tables and must not be reconciled with them.

use serde::{Deserialize, Serialize};

use crate::util::generate_id;

/// Comparison always assumes the default Naver fee tier.
pub const COMPARISON_FEE_RATE: f64 = 0.0563;

/// Flat China-route shipping assumption, KRW per kilogram.
pub const COMPARISON_SHIPPING_RATE_PER_KG: f64 = 7000.0;

pub const MIN_PRODUCTS: usize = 2;
pub const MAX_PRODUCTS: usize = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonProduct {
    pub id: String,
    pub name: String,
    /// Sourcing price in CNY.
    pub sourcing_price: f64,
    pub weight: f64,
    /// Selling price in KRW; comparison ignores buyer-paid shipping.
    pub selling_price: f64,
}

impl ComparisonProduct {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: generate_id("product"),
            name: name.into(),
            sourcing_price: 0.0,
            weight: 0.0,
            selling_price: 0.0,
        }
    }
}

/// Starting roster: two empty slots labelled 상품 A / 상품 B.
pub fn default_products() -> Vec<ComparisonProduct> {
    vec![
        ComparisonProduct::named("상품 A"),
        ComparisonProduct::named("상품 B"),
    ]
}

/// Next letter label (상품 C, 상품 D, ...) for an added slot.
pub fn next_product_name(count: usize) -> String {
    let letter = (b'A' + (count as u8).min(25)) as char;
    format!("상품 {letter}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub id: String,
    pub name: String,
    pub cost_krw: f64,
    pub shipping_krw: f64,
    pub platform_fee: f64,
    pub net_profit: f64,
    pub margin_percent: f64,
}

impl ComparisonRow {
    pub fn is_loss(&self) -> bool {
        self.net_profit < 0.0
    }
}

pub fn evaluate_products(products: &[ComparisonProduct], exchange_rate: f64) -> Vec<ComparisonRow> {
    products
        .iter()
        .map(|product| evaluate_product(product, exchange_rate))
        .collect()
}

fn evaluate_product(product: &ComparisonProduct, exchange_rate: f64) -> ComparisonRow {
    let cost_krw = product.sourcing_price.max(0.0) * exchange_rate.max(0.0);
    let shipping_krw = product.weight.max(0.0) * COMPARISON_SHIPPING_RATE_PER_KG;
    let revenue = product.selling_price.max(0.0);
    let platform_fee = revenue * COMPARISON_FEE_RATE;
    let net_profit = revenue - cost_krw - shipping_krw - platform_fee;
    let margin_percent = if revenue > 0.0 {
        net_profit / revenue * 100.0
    } else {
        0.0
    };

    ComparisonRow {
        id: product.id.clone(),
        name: product.name.clone(),
        cost_krw,
        shipping_krw,
        platform_fee,
        net_profit,
        margin_percent,
    }
}

/// The row worth highlighting: best margin, and only when it is positive.
pub fn best_row(rows: &[ComparisonRow]) -> Option<&ComparisonRow> {
    rows.iter()
        .max_by(|a, b| {
            a.margin_percent
                .partial_cmp(&b.margin_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .filter(|row| row.margin_percent > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, sourcing: f64, weight: f64, selling: f64) -> ComparisonProduct {
        ComparisonProduct {
            id: generate_id("test-product"),
            name: name.to_string(),
            sourcing_price: sourcing,
            weight,
            selling_price: selling,
        }
    }

    #[test]
    fn evaluates_with_fixed_rates() {
        let rows = evaluate_products(&[product("A", 50.0, 1.0, 30_000.0)], 200.0);
        let row = &rows[0];
        assert_eq!(row.cost_krw, 10_000.0);
        assert_eq!(row.shipping_krw, 7_000.0);
        assert!((row.platform_fee - 30_000.0 * 0.0563).abs() < 1e-9);
        let expected_profit = 30_000.0 - 10_000.0 - 7_000.0 - row.platform_fee;
        assert!((row.net_profit - expected_profit).abs() < 1e-9);
    }

    #[test]
    fn zero_selling_price_has_zero_margin() {
        let rows = evaluate_products(&[product("A", 50.0, 1.0, 0.0)], 200.0);
        assert_eq!(rows[0].margin_percent, 0.0);
        assert!(rows[0].is_loss());
    }

    #[test]
    fn best_row_requires_positive_margin() {
        let rows = evaluate_products(
            &[
                product("A", 500.0, 5.0, 10_000.0),
                product("B", 500.0, 5.0, 12_000.0),
            ],
            200.0,
        );
        // Both lose money, so nothing is highlighted.
        assert!(best_row(&rows).is_none());

        let rows = evaluate_products(
            &[
                product("A", 10.0, 0.5, 30_000.0),
                product("B", 10.0, 0.5, 50_000.0),
            ],
            200.0,
        );
        assert_eq!(best_row(&rows).unwrap().name, "B");
    }

    #[test]
    fn product_names_follow_the_alphabet() {
        assert_eq!(next_product_name(2), "상품 C");
        assert_eq!(next_product_name(4), "상품 E");
    }
}
