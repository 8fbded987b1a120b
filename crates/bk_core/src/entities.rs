//! Domain entities: products, daily recaps, and the derived scoring/ranking rows.
//!
//! Money is integer currency units (the bakery prices in whole rupiah).

use chrono::NaiveDate;

use crate::ids::ProductId;
use crate::tier::Tier;

/// Whole currency units. Signed so that margins and profits may go negative.
pub type Money = i64;

/// A product on the catalog. `active == false` is a soft delete.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub selling_price: Money,
    pub cost_price: Money,
    pub shelf_life_hours: u32,
    /// 1 (easy) ..= 5 (hard).
    pub difficulty: u8,
    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub active: bool,
}

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

impl Product {
    /// Selling price minus cost price; never clamped.
    #[inline]
    pub fn margin(&self) -> Money {
        self.selling_price - self.cost_price
    }
}

/// One product's counts as submitted for a day (before `sold_qty` is derived).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecapEntry {
    pub product_id: ProductId,
    pub production_qty: u32,
    pub leftover_qty: u32,
}

impl RecapEntry {
    /// `production - leftover`, negative when more was left over than produced.
    #[inline]
    pub fn sold_qty(&self) -> i64 {
        i64::from(self.production_qty) - i64::from(self.leftover_qty)
    }
}

/// Stored daily recap row. `sold_qty` is fixed at write time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyRecap {
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub production_qty: u32,
    pub leftover_qty: u32,
    pub sold_qty: i64,
}

impl DailyRecap {
    pub fn from_entry(date: NaiveDate, entry: RecapEntry) -> Self {
        let sold_qty = entry.sold_qty();
        DailyRecap {
            date,
            product_id: entry.product_id,
            production_qty: entry.production_qty,
            leftover_qty: entry.leftover_qty,
            sold_qty,
        }
    }
}

/// Raw criterion values for one product, ready for normalization.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringInput {
    pub product_id: ProductId,
    pub margin: Money,
    pub avg_sales: f64,
    pub shelf_life_hours: u32,
    pub difficulty: u8,
}

/// One product's place in a ranking.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedResult {
    pub rank: u32,
    pub product_id: ProductId,
    /// Already rounded to 3 decimals.
    pub final_score: f64,
    pub tier: Tier,
    pub recommendation: String,
}
