//! Criterion weight map consumed by the ranker.
//!
//! Missing entries resolve to `CriterionKind::default_weight` (0.3/0.3/0.2/0.2).
//! Nothing here checks that weights are in [0,1] or sum to 1; that belongs to
//! whoever edits them.

use std::collections::BTreeMap;

use bk_core::{Criterion, CriterionKind};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CriteriaWeights {
    entries: BTreeMap<CriterionKind, f64>,
}

impl CriteriaWeights {
    /// Empty map: every lookup falls back to the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, kind: CriterionKind, weight: f64) -> Self {
        self.entries.insert(kind, weight);
        self
    }

    pub fn insert(&mut self, kind: CriterionKind, weight: f64) -> Option<f64> {
        self.entries.insert(kind, weight)
    }

    pub fn from_criteria<'a, I>(criteria: I) -> Self
    where
        I: IntoIterator<Item = &'a Criterion>,
    {
        CriteriaWeights {
            entries: criteria.into_iter().map(|c| (c.kind, c.weight)).collect(),
        }
    }

    /// Explicit entry, if any.
    pub fn get(&self, kind: CriterionKind) -> Option<f64> {
        self.entries.get(&kind).copied()
    }

    /// Effective weight (explicit entry or default).
    pub fn weight(&self, kind: CriterionKind) -> f64 {
        self.get(kind).unwrap_or_else(|| kind.default_weight())
    }

    /// Effective weights in criterion order.
    pub fn resolved(&self) -> [(CriterionKind, f64); 4] {
        CriterionKind::ALL.map(|k| (k, self.weight(k)))
    }

    /// Sum of effective weights.
    pub fn total(&self) -> f64 {
        self.resolved().iter().map(|(_, w)| w).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_codes_fall_back() {
        let w = CriteriaWeights::new().with(CriterionKind::Margin, 0.5);
        assert_eq!(w.weight(CriterionKind::Margin), 0.5);
        assert_eq!(w.weight(CriterionKind::AvgSales), 0.3);
        assert_eq!(w.weight(CriterionKind::ShelfLife), 0.2);
        assert_eq!(w.weight(CriterionKind::Difficulty), 0.2);
        assert_eq!(w.get(CriterionKind::Difficulty), None);
    }

    #[test]
    fn explicit_zero_is_kept() {
        let w = CriteriaWeights::new().with(CriterionKind::ShelfLife, 0.0);
        assert_eq!(w.weight(CriterionKind::ShelfLife), 0.0);
    }

    #[test]
    fn from_seeded_criteria() {
        let seeded: Vec<Criterion> = CriterionKind::ALL.iter().map(|&k| Criterion::seeded(k)).collect();
        let w = CriteriaWeights::from_criteria(&seeded);
        assert!((w.total() - 1.0).abs() < 1e-9);
        assert_eq!(w.get(CriterionKind::AvgSales), Some(0.3));
    }
}
