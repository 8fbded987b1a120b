//! bk_pipeline: orchestration surface for the bakery engine.
//!
//! Holds the in-memory stores (catalog, recap ledger, criteria) behind a single
//! `BakeryCtx`, and the operations built on them: ranking runs, financial
//! reports, dashboard stats and ranking snapshots. File access is delegated to
//! `bk_io`; the math lives in `bk_algo`.

#![forbid(unsafe_code)]

use chrono::NaiveDate;
use thiserror::Error;

use bk_core::{DailyRecap, ProductId, RecapEntry};
use bk_io::loader::{Dataset, RecapRecord};

pub mod catalog;
pub mod criteria;
pub mod ranking;
pub mod recap;
pub mod report;
pub mod seed;
pub mod snapshot;

pub use catalog::{Catalog, ProductDraft};
pub use criteria::CriteriaSet;
pub use ranking::{build_ranking_artifact, calculate_ranking, RankedRow, RankingArtifact, WINDOW_DAYS};
pub use recap::RecapLedger;
pub use report::{dashboard_stats, financial_report, DashboardStats, FinancialReport, ReportQuery};
pub use snapshot::{SnapshotRow, SnapshotStore};

/// Single error surface for pipeline operations.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] bk_io::IoError),

    #[error("validation failed: {0}")]
    Validate(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("criteria weights must total 1.0 (got {total:.3})")]
    Weights { total: f64 },
}

/// The three stores a ranking or report reads from.
#[derive(Clone, Debug, Default)]
pub struct BakeryCtx {
    pub catalog: Catalog,
    pub ledger: RecapLedger,
    pub criteria: CriteriaSet,
}

impl BakeryCtx {
    /// Build stores from a validated dataset. Missing criteria become the seeded set.
    pub fn from_dataset(ds: &Dataset) -> Result<Self, PipelineError> {
        let mut catalog = Catalog::default();
        for p in &ds.products {
            catalog.restore(p.clone())?;
        }

        let mut ctx = BakeryCtx {
            catalog,
            ledger: RecapLedger::default(),
            criteria: CriteriaSet::from_criteria(ds.effective_criteria()),
        };
        for r in &ds.recaps {
            ctx.record_recap(r.date, r.entry())?;
        }
        tracing::debug!(
            products = ctx.catalog.len(),
            recaps = ctx.ledger.len(),
            "context loaded"
        );
        Ok(ctx)
    }

    /// Snapshot of the stores in dataset form (recaps ordered by date, product id).
    pub fn to_dataset(&self) -> Dataset {
        Dataset {
            criteria: self.criteria.list().into_iter().cloned().collect(),
            products: self.catalog.all().into_iter().cloned().collect(),
            recaps: self.ledger.iter().map(RecapRecord::from).collect(),
        }
    }

    /// Record one product's counts for a day. The product must exist in the catalog.
    pub fn record_recap(&mut self, date: NaiveDate, entry: RecapEntry) -> Result<&DailyRecap, PipelineError> {
        if self.catalog.get(&entry.product_id).is_none() {
            return Err(not_found(&entry.product_id));
        }
        Ok(self.ledger.record(date, entry))
    }

    /// Record several entries for one day; stops at the first unknown product.
    pub fn record_recap_batch(
        &mut self,
        date: NaiveDate,
        entries: Vec<RecapEntry>,
    ) -> Result<usize, PipelineError> {
        if let Some(unknown) = entries.iter().find(|e| self.catalog.get(&e.product_id).is_none()) {
            return Err(not_found(&unknown.product_id));
        }
        Ok(self.ledger.record_batch(date, entries))
    }
}

pub(crate) fn not_found(id: &ProductId) -> PipelineError {
    PipelineError::NotFound(format!("product {id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recap_for_unknown_product_is_rejected() {
        let mut ctx = BakeryCtx::default();
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let entry = RecapEntry { product_id: "ghost".parse().unwrap(), production_qty: 1, leftover_qty: 0 };
        assert!(matches!(ctx.record_recap(date, entry), Err(PipelineError::NotFound(_))));
    }

    #[test]
    fn dataset_round_trip_keeps_stores() {
        let ds = seed::sample_dataset();
        let ctx = BakeryCtx::from_dataset(&ds).unwrap();
        let back = ctx.to_dataset();
        assert_eq!(back.products.len(), ds.products.len());
        assert_eq!(back.criteria.len(), 4);
        assert_eq!(back.recaps.len(), ds.recaps.len());
    }
}
