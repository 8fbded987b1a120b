//! Ranking run: window the ledger, aggregate, rank, and attach display fields.
//!
//! `calculate_ranking` never writes anything. Persisting a run is a separate
//! call (`SnapshotStore::save`, or `build_ranking_artifact` + `write_canonical_file`).

use std::collections::{BTreeMap, BTreeSet};

use bk_algo::{aggregate, rank, CriteriaWeights};
use bk_core::{CriterionKind, Money, Product, ProductId, RankingId, Tier};
use bk_io::hasher::ranking_id_from_canonical;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{BakeryCtx, PipelineError};

/// Trailing window length. The window `[as_of - WINDOW_DAYS, as_of]` is inclusive
/// at both ends, so it covers `WINDOW_DAYS + 1` = 31 calendar days.
pub const WINDOW_DAYS: u64 = 30;

/// One ranked product with its name and the raw values that were scored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    pub rank: u32,
    pub product_id: ProductId,
    pub name: String,
    pub final_score: f64,
    pub tier: Tier,
    pub recommendation: String,
    pub margin: Money,
    pub avg_sales: f64,
    pub shelf_life_hours: u32,
    pub difficulty: u8,
}

pub fn calculate_ranking(ctx: &BakeryCtx, as_of: NaiveDate) -> Vec<RankedRow> {
    let products: Vec<Product> = ctx.catalog.active().into_iter().cloned().collect();
    let window = ctx.ledger.trailing_window(as_of, WINDOW_DAYS);

    let known: BTreeSet<&ProductId> = products.iter().map(|p| &p.id).collect();
    let skipped = window.iter().filter(|r| !known.contains(&r.product_id)).count();
    if skipped > 0 {
        tracing::debug!(skipped, "recap rows for inactive or unknown products ignored");
    }

    let weights = ctx.criteria.weights();
    if !ctx.criteria.is_total_valid() {
        tracing::warn!(total = weights.total(), "criteria weights do not total 1.0");
    }

    let inputs = aggregate(&products, &window);
    let by_id: BTreeMap<&ProductId, (&Product, f64)> = products
        .iter()
        .zip(&inputs)
        .map(|(p, i)| (&p.id, (p, i.avg_sales)))
        .collect();

    let rows: Vec<RankedRow> = rank(&inputs, &weights)
        .into_iter()
        .filter_map(|r| {
            let &(p, avg_sales) = by_id.get(&r.product_id)?;
            Some(RankedRow {
                rank: r.rank,
                product_id: r.product_id,
                name: p.name.clone(),
                final_score: r.final_score,
                tier: r.tier,
                recommendation: r.recommendation,
                margin: p.margin(),
                avg_sales,
                shelf_life_hours: p.shelf_life_hours,
                difficulty: p.difficulty,
            })
        })
        .collect();

    tracing::info!(
        as_of = %as_of,
        products = rows.len(),
        window_rows = window.len(),
        "ranking calculated"
    );
    rows
}

/// Persistable ranking run. `id` is the digest of every other field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankingArtifact {
    pub id: RankingId,
    pub as_of: NaiveDate,
    pub dataset_sha256: String,
    pub weights: BTreeMap<CriterionKind, f64>,
    pub results: Vec<RankedRow>,
}

#[derive(Serialize)]
struct RankingArtifactNoId<'a> {
    as_of: NaiveDate,
    dataset_sha256: &'a str,
    weights: &'a BTreeMap<CriterionKind, f64>,
    results: &'a [RankedRow],
}

pub fn build_ranking_artifact(
    as_of: NaiveDate,
    dataset_sha256: &str,
    weights: &CriteriaWeights,
    results: Vec<RankedRow>,
) -> Result<RankingArtifact, PipelineError> {
    if !bk_core::ids::is_valid_sha256(dataset_sha256) {
        return Err(PipelineError::Validate(format!(
            "dataset digest is not 64 lowercase hex: {dataset_sha256}"
        )));
    }
    let weights: BTreeMap<CriterionKind, f64> = weights.resolved().into_iter().collect();

    let id = ranking_id_from_canonical(&RankingArtifactNoId {
        as_of,
        dataset_sha256,
        weights: &weights,
        results: &results,
    })?;

    Ok(RankingArtifact {
        id,
        as_of,
        dataset_sha256: dataset_sha256.to_string(),
        weights,
        results,
    })
}
