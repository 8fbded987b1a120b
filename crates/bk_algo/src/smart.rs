// --------------------------------------------------------------------------------
// FILE: crates/bk_algo/src/smart.rs
// --------------------------------------------------------------------------------
//! SMART ranking (Simple Multi-Attribute Rating Technique).
//!
//! Steps, in fixed order:
//! 1. min/max of each criterion over the whole input set;
//! 2. normalize (benefit: `(v-min)/(max-min)`, cost: `(max-v)/(max-min)`,
//!    `1.0` when `max == min`);
//! 3. weighted sum with C1..C4 weights (defaults for missing entries);
//! 4. round once to 3 decimals;
//! 5. stable sort descending by the rounded score, ranks 1..N in that order;
//! 6. classify the rounded score into a tier.
//!
//! Exact ties keep input order and still receive distinct ranks. Invalid weights
//! (negative, not summing to 1) are used as given.

#![forbid(unsafe_code)]

use bk_core::{
    rounding::round_3dp, CriterionKind, ProductId, RankedResult, ScoringInput, Tier,
};

use crate::normalize::MinMax;
use crate::weights::CriteriaWeights;

/// Per-product normalized values and the rounded final score, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBreakdown {
    pub product_id: ProductId,
    /// Normalized values indexed like `CriterionKind::ALL`.
    pub normalized: [f64; 4],
    pub final_score: f64,
}

impl ScoreBreakdown {
    pub fn normalized(&self, kind: CriterionKind) -> f64 {
        self.normalized[index_of(kind)]
    }
}

#[inline]
fn index_of(kind: CriterionKind) -> usize {
    match kind {
        CriterionKind::Margin => 0,
        CriterionKind::AvgSales => 1,
        CriterionKind::ShelfLife => 2,
        CriterionKind::Difficulty => 3,
    }
}

/// Raw value of one criterion as a float.
pub fn criterion_value(input: &ScoringInput, kind: CriterionKind) -> f64 {
    match kind {
        CriterionKind::Margin => input.margin as f64,
        CriterionKind::AvgSales => input.avg_sales,
        CriterionKind::ShelfLife => f64::from(input.shelf_life_hours),
        CriterionKind::Difficulty => f64::from(input.difficulty),
    }
}

fn bounds(inputs: &[ScoringInput]) -> Option<[MinMax; 4]> {
    let mut out = [MinMax { min: 0.0, max: 0.0 }; 4];
    for kind in CriterionKind::ALL {
        out[index_of(kind)] = MinMax::of(inputs.iter().map(|i| criterion_value(i, kind)))?;
    }
    Some(out)
}

/// Normalize and weight every input; output keeps input order.
pub fn breakdown(inputs: &[ScoringInput], weights: &CriteriaWeights) -> Vec<ScoreBreakdown> {
    let Some(ranges) = bounds(inputs) else {
        return Vec::new();
    };

    inputs
        .iter()
        .map(|input| {
            let normalized = CriterionKind::ALL.map(|kind| {
                ranges[index_of(kind)].normalize(criterion_value(input, kind), kind.polarity())
            });
            let raw: f64 = CriterionKind::ALL
                .iter()
                .map(|&kind| normalized[index_of(kind)] * weights.weight(kind))
                .sum();
            ScoreBreakdown {
                product_id: input.product_id.clone(),
                normalized,
                final_score: round_3dp(raw),
            }
        })
        .collect()
}

/// Rank products by SMART score. Empty input yields an empty ranking.
pub fn rank(inputs: &[ScoringInput], weights: &CriteriaWeights) -> Vec<RankedResult> {
    let mut scored = breakdown(inputs, weights);
    // `sort_by` is stable: equal scores keep input order.
    scored.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    scored
        .into_iter()
        .enumerate()
        .map(|(pos, s)| {
            let tier = Tier::classify(s.final_score);
            RankedResult {
                rank: pos as u32 + 1,
                product_id: s.product_id,
                final_score: s.final_score,
                tier,
                recommendation: tier.recommendation().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, margin: i64, avg: f64, shelf: u32, diff: u8) -> ScoringInput {
        ScoringInput {
            product_id: id.parse().unwrap(),
            margin,
            avg_sales: avg,
            shelf_life_hours: shelf,
            difficulty: diff,
        }
    }

    fn ids(results: &[RankedResult]) -> Vec<&str> {
        results.iter().map(|r| r.product_id.as_str()).collect()
    }

    #[test]
    fn two_product_scenario_with_default_weights() {
        let inputs = vec![input("a", 13_000, 10.0, 48, 3), input("b", 15_000, 5.0, 72, 2)];
        let w = CriteriaWeights::new();

        let bd = breakdown(&inputs, &w);
        assert_eq!(bd[0].normalized, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(bd[1].normalized, [1.0, 0.0, 1.0, 1.0]);
        assert_eq!(bd[1].normalized(CriterionKind::Difficulty), 1.0);

        let out = rank(&inputs, &w);
        assert_eq!(ids(&out), vec!["b", "a"]);
        assert_eq!(out[0].rank, 1);
        assert_eq!(out[0].final_score, 0.7);
        assert_eq!(out[0].tier, Tier::High);
        assert_eq!(out[0].recommendation, "increase stock — high priority");
        assert_eq!(out[1].rank, 2);
        assert_eq!(out[1].final_score, 0.3);
        assert_eq!(out[1].tier, Tier::Low);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(rank(&[], &CriteriaWeights::new()).is_empty());
        assert!(breakdown(&[], &CriteriaWeights::new()).is_empty());
    }

    #[test]
    fn single_product_scores_sum_of_weights() {
        let out = rank(&[input("solo", -500, 0.0, 12, 5)], &CriteriaWeights::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].rank, 1);
        assert_eq!(out[0].final_score, 1.0);
        assert_eq!(out[0].tier, Tier::High);
    }

    #[test]
    fn identical_products_tie_but_get_distinct_ranks() {
        let inputs: Vec<_> = ["x", "y", "z"]
            .iter()
            .map(|id| input(id, 10_000, 4.0, 24, 2))
            .collect();
        let w = CriteriaWeights::new()
            .with(CriterionKind::Margin, 0.25)
            .with(CriterionKind::AvgSales, 0.25)
            .with(CriterionKind::ShelfLife, 0.25)
            .with(CriterionKind::Difficulty, 0.15);
        let out = rank(&inputs, &w);
        assert_eq!(ids(&out), vec!["x", "y", "z"]);
        assert_eq!(out.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(out.iter().all(|r| r.final_score == 0.9));
    }

    #[test]
    fn exact_score_ties_keep_input_order() {
        // c and a mirror each other on margin vs sales with equal weights
        let inputs = vec![
            input("c", 100, 0.0, 24, 3),
            input("mid", 50, 5.0, 24, 3),
            input("a", 0, 10.0, 24, 3),
        ];
        let w = CriteriaWeights::new()
            .with(CriterionKind::Margin, 0.4)
            .with(CriterionKind::AvgSales, 0.4)
            .with(CriterionKind::ShelfLife, 0.1)
            .with(CriterionKind::Difficulty, 0.1);
        let out = rank(&inputs, &w);
        assert!(out.iter().all(|r| r.final_score == 0.6));
        assert_eq!(ids(&out), vec!["c", "mid", "a"]);
    }

    #[test]
    fn invalid_weights_still_score() {
        let inputs = vec![input("a", 1, 1.0, 1, 1), input("b", 2, 2.0, 2, 2)];
        let w = CriteriaWeights::new()
            .with(CriterionKind::Margin, 1.0)
            .with(CriterionKind::AvgSales, 1.0)
            .with(CriterionKind::ShelfLife, -0.5)
            .with(CriterionKind::Difficulty, 0.0);
        let out = rank(&inputs, &w);
        // b: 1 + 1 - 0.5 + 0 = 1.5 ; a: 0 + 0 + 0 + 0 = 0
        assert_eq!(out[0].product_id.as_str(), "b");
        assert_eq!(out[0].final_score, 1.5);
        assert_eq!(out[0].tier, Tier::High);
        assert_eq!(out[1].final_score, 0.0);
        assert_eq!(out[1].tier, Tier::Low);
    }

    #[test]
    fn rounding_happens_before_classification() {
        // sales, shelf life and difficulty are degenerate (norm 1) and contribute 0.5
        let inputs = vec![input("lo", 0, 0.0, 10, 5), input("hi", 3, 0.0, 10, 5), input("p", 2, 0.0, 10, 5)];
        let w = CriteriaWeights::new()
            .with(CriterionKind::Margin, 0.2999)
            .with(CriterionKind::AvgSales, 0.2)
            .with(CriterionKind::ShelfLife, 0.2)
            .with(CriterionKind::Difficulty, 0.1);
        let out = rank(&inputs, &w);
        let hi = out.iter().find(|r| r.product_id.as_str() == "hi").unwrap();
        // raw 0.7999 → 0.8
        assert_eq!(hi.final_score, 0.8);
        let p = out.iter().find(|r| r.product_id.as_str() == "p").unwrap();
        // raw 2/3*0.2999 + 0.5 = 0.69993.. → 0.7 → HIGH
        assert_eq!(p.final_score, 0.7);
        assert_eq!(p.tier, Tier::High);
    }

    #[test]
    fn rank_is_idempotent() {
        let inputs = vec![
            input("a", 13_000, 10.0, 48, 3),
            input("b", 15_000, 5.0, 72, 2),
            input("c", 12_000, 7.5, 24, 2),
        ];
        let w = CriteriaWeights::new();
        assert_eq!(rank(&inputs, &w), rank(&inputs, &w));
    }
}
