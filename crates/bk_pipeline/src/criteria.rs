//! Criteria configuration: names and weights of C1..C4.
//!
//! Codes and polarities are fixed by `CriterionKind`. Weights are edited in
//! batches through `update_weights`, which clamps each value into [0, 1] and
//! refuses a batch whose resulting total strays more than `TOTAL_TOLERANCE`
//! from 1.0. The ranker itself never checks totals.

use std::collections::BTreeMap;

use bk_algo::CriteriaWeights;
use bk_core::{Criterion, CriterionKind};

use crate::PipelineError;

pub const TOTAL_TOLERANCE: f64 = 0.001;

#[derive(Clone, Debug, PartialEq)]
pub struct CriteriaSet {
    criteria: BTreeMap<CriterionKind, Criterion>,
}

impl Default for CriteriaSet {
    fn default() -> Self {
        Self::seeded()
    }
}

impl CriteriaSet {
    /// C1 "Profit Margin" 0.3, C2 "Sales Volume" 0.3, C3 "Shelf Life" 0.2,
    /// C4 "Production Difficulty" 0.2.
    pub fn seeded() -> Self {
        Self::from_criteria(CriterionKind::ALL.iter().map(|&k| Criterion::seeded(k)))
    }

    /// Later entries for the same code replace earlier ones.
    pub fn from_criteria<I: IntoIterator<Item = Criterion>>(criteria: I) -> Self {
        CriteriaSet {
            criteria: criteria.into_iter().map(|c| (c.kind, c)).collect(),
        }
    }

    /// Configured criteria in code order.
    pub fn list(&self) -> Vec<&Criterion> {
        self.criteria.values().collect()
    }

    pub fn get(&self, kind: CriterionKind) -> Option<&Criterion> {
        self.criteria.get(&kind)
    }

    /// Weight map for the ranker; absent codes fall back to their defaults there.
    pub fn weights(&self) -> CriteriaWeights {
        CriteriaWeights::from_criteria(self.criteria.values())
    }

    pub fn total_weight(&self) -> f64 {
        self.weights().total()
    }

    pub fn is_total_valid(&self) -> bool {
        is_valid_total(self.total_weight())
    }

    /// Apply a batch of weight edits, all or nothing.
    pub fn update_weights(&mut self, updates: &[(CriterionKind, f64)]) -> Result<(), PipelineError> {
        let mut next = self.criteria.clone();
        for &(kind, weight) in updates {
            if !weight.is_finite() {
                return Err(PipelineError::Validate(format!("weight for {kind} is not a number")));
            }
            next.entry(kind)
                .or_insert_with(|| Criterion::seeded(kind))
                .weight = weight.clamp(0.0, 1.0);
        }

        let total = CriteriaWeights::from_criteria(next.values()).total();
        if !is_valid_total(total) {
            tracing::warn!(total, "rejected criteria weights");
            return Err(PipelineError::Weights { total });
        }

        self.criteria = next;
        tracing::info!(total, "criteria weights updated");
        Ok(())
    }
}

fn is_valid_total(total: f64) -> bool {
    (total - 1.0).abs() <= TOTAL_TOLERANCE
}
