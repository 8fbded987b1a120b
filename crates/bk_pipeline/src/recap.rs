//! Daily recap ledger: one row per (date, product), upserted.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use bk_core::{DailyRecap, ProductId, RecapEntry};
use chrono::{Days, NaiveDate};

#[derive(Clone, Debug, Default)]
pub struct RecapLedger {
    days: BTreeMap<NaiveDate, BTreeMap<ProductId, DailyRecap>>,
}

impl RecapLedger {
    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Derive `sold_qty` and upsert. A same-day write for the same product replaces the row.
    pub fn record(&mut self, date: NaiveDate, entry: RecapEntry) -> &DailyRecap {
        let row = DailyRecap::from_entry(date, entry);
        if row.sold_qty < 0 {
            tracing::debug!(
                date = %date,
                product = %row.product_id,
                sold = row.sold_qty,
                "leftover exceeds production"
            );
        }
        match self.days.entry(date).or_default().entry(row.product_id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(row);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(row),
        }
    }

    /// Apply several entries for one day; returns how many were written.
    pub fn record_batch(&mut self, date: NaiveDate, entries: Vec<RecapEntry>) -> usize {
        let n = entries.len();
        for e in entries {
            self.record(date, e);
        }
        n
    }

    /// All rows ordered by date then product id.
    pub fn iter(&self) -> impl Iterator<Item = &DailyRecap> {
        self.days.values().flat_map(BTreeMap::values)
    }

    pub fn on(&self, date: NaiveDate) -> Vec<&DailyRecap> {
        self.between(date, date)
    }

    /// Rows with `from <= date <= to`. Empty when `from > to`.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&DailyRecap> {
        if from > to {
            return Vec::new();
        }
        self.days.range(from..=to).flat_map(|(_, rows)| rows.values()).collect()
    }

    /// Rows with `as_of - days <= date <= as_of` (`days + 1` calendar days),
    /// cloned for the aggregator.
    pub fn trailing_window(&self, as_of: NaiveDate, days: u64) -> Vec<DailyRecap> {
        let from = as_of.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        self.between(from, as_of).into_iter().cloned().collect()
    }
}
