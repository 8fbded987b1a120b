//! Ranking snapshots keyed by (calculation date, product id).

use std::collections::BTreeMap;
use std::path::Path;

use bk_core::{Money, ProductId, Tier};
use bk_io::canonical_json::write_canonical_file;
use bk_io::loader::read_json_or_default;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ranking::RankedRow;
use crate::PipelineError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub rank: u32,
    pub final_score: f64,
    pub tier: Tier,
    pub recommendation: String,
    pub margin: Money,
    pub avg_sales: f64,
    pub shelf_life_hours: u32,
    pub difficulty: u8,
}

impl SnapshotRow {
    fn from_ranked(date: NaiveDate, r: &RankedRow) -> Self {
        SnapshotRow {
            date,
            product_id: r.product_id.clone(),
            rank: r.rank,
            final_score: r.final_score,
            tier: r.tier,
            recommendation: r.recommendation.clone(),
            margin: r.margin,
            avg_sales: r.avg_sales,
            shelf_life_hours: r.shelf_life_hours,
            difficulty: r.difficulty,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SnapshotStore {
    rows: BTreeMap<(NaiveDate, ProductId), SnapshotRow>,
}

impl SnapshotStore {
    /// Load a snapshot file; a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let rows: Vec<SnapshotRow> = read_json_or_default(path)?;
        Ok(SnapshotStore {
            rows: rows.into_iter().map(|r| ((r.date, r.product_id.clone()), r)).collect(),
        })
    }

    /// Write every row, ordered by date then product id.
    pub fn write(&self, path: &Path) -> Result<(), PipelineError> {
        let rows: Vec<&SnapshotRow> = self.rows.values().collect();
        write_canonical_file(&rows, path)?;
        tracing::info!(path = %path.display(), rows = rows.len(), "snapshots written");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Upsert one row per ranked product for `date`. Returns how many were replaced.
    pub fn save(&mut self, date: NaiveDate, ranked: &[RankedRow]) -> usize {
        let replaced = ranked
            .iter()
            .filter_map(|r| {
                self.rows
                    .insert((date, r.product_id.clone()), SnapshotRow::from_ranked(date, r))
            })
            .count();
        tracing::debug!(date = %date, saved = ranked.len(), replaced, "snapshot saved");
        replaced
    }

    /// Rows for one date, best rank first.
    pub fn on(&self, date: NaiveDate) -> Vec<&SnapshotRow> {
        let mut out: Vec<&SnapshotRow> =
            self.rows.values().filter(|r| r.date == date).collect();
        out.sort_by_key(|r| r.rank);
        out
    }

    /// One product's rows, oldest first.
    pub fn history(&self, product_id: &ProductId) -> Vec<&SnapshotRow> {
        self.rows.values().filter(|r| &r.product_id == product_id).collect()
    }
}
