// --------------------------------------------------------------------------------
// FILE: crates/bk_algo/src/aggregate.rs
// --------------------------------------------------------------------------------
//! Recap aggregation: products + windowed recaps → per-product scoring inputs.
//!
//! Rules in this layer:
//! - One `ScoringInput` per active product, in the order products were given.
//! - `avg_sales = Σ sold_qty / max(1, rows found)`; the divisor counts existing
//!   rows only, so sparse history is not diluted toward zero.
//! - Recap rows for products not in the list are ignored.
//! - Window selection happens upstream; every row passed in is counted.

#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use bk_core::{DailyRecap, Product, ProductId, ScoringInput};

#[derive(Clone, Copy, Debug, Default)]
struct SalesTally {
    sold: i64,
    rows: u64,
}

impl SalesTally {
    fn average(self) -> f64 {
        self.sold as f64 / self.rows.max(1) as f64
    }
}

/// Derive scoring inputs for the active products.
pub fn aggregate(active_products: &[Product], recent_recaps: &[DailyRecap]) -> Vec<ScoringInput> {
    let mut tallies: BTreeMap<&ProductId, SalesTally> = BTreeMap::new();
    for recap in recent_recaps {
        let t = tallies.entry(&recap.product_id).or_default();
        t.sold += recap.sold_qty;
        t.rows += 1;
    }

    active_products
        .iter()
        .filter(|p| p.active)
        .map(|p| {
            let tally = tallies.get(&p.id).copied().unwrap_or_default();
            ScoringInput {
                product_id: p.id.clone(),
                margin: p.margin(),
                avg_sales: tally.average(),
                shelf_life_hours: p.shelf_life_hours,
                difficulty: p.difficulty,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bk_core::RecapEntry;
    use chrono::NaiveDate;

    fn pid(s: &str) -> ProductId {
        s.parse().unwrap()
    }

    fn product(id: &str, sell: i64, cost: i64) -> Product {
        Product {
            id: pid(id),
            name: id.to_string(),
            selling_price: sell,
            cost_price: cost,
            shelf_life_hours: 24,
            difficulty: 2,
            active: true,
        }
    }

    fn recap(day: u32, id: &str, produced: u32, left: u32) -> DailyRecap {
        DailyRecap::from_entry(
            NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
            RecapEntry { product_id: pid(id), production_qty: produced, leftover_qty: left },
        )
    }

    #[test]
    fn average_divides_by_rows_found() {
        let products = vec![product("bolu", 20_000, 8_000)];
        let recaps = vec![recap(1, "bolu", 12, 2), recap(2, "bolu", 5, 5), recap(3, "bolu", 25, 5)];
        let out = aggregate(&products, &recaps);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].avg_sales, 10.0);
        assert_eq!(out[0].margin, 12_000);
    }

    #[test]
    fn no_history_means_zero_average() {
        let products = vec![product("puding", 18_000, 6_000)];
        let out = aggregate(&products, &[]);
        assert_eq!(out[0].avg_sales, 0.0);
    }

    #[test]
    fn keeps_product_order_and_skips_inactive() {
        let mut retired = product("retired", 1, 1);
        retired.active = false;
        let products = vec![product("b", 2, 1), retired, product("a", 3, 1)];
        let out = aggregate(&products, &[recap(1, "a", 4, 0)]);
        let ids: Vec<&str> = out.iter().map(|s| s.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(out[1].avg_sales, 4.0);
    }

    #[test]
    fn negative_sold_flows_through() {
        let products = vec![product("lapis", 25_000, 12_000)];
        let out = aggregate(&products, &[recap(1, "lapis", 3, 7), recap(2, "lapis", 10, 0)]);
        assert_eq!(out[0].avg_sales, 3.0);
    }

    #[test]
    fn unknown_product_rows_are_ignored() {
        let products = vec![product("lapis", 25_000, 12_000)];
        let out = aggregate(&products, &[recap(1, "ghost", 50, 0)]);
        assert_eq!(out[0].avg_sales, 0.0);
    }

    #[test]
    fn empty_products_yield_empty_inputs() {
        assert!(aggregate(&[], &[recap(1, "lapis", 1, 0)]).is_empty());
    }
}
