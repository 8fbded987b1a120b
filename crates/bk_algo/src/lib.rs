// crates/bk_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Pure scoring algorithms. No I/O, no logging, no hidden state: every entry
//! point borrows its inputs and returns fresh data.

// File modules
pub mod aggregate;
pub mod normalize;
pub mod smart;
pub mod weights;

// Tight, explicit re-exports (pipeline imports these from crate root).
pub use aggregate::aggregate;
pub use normalize::MinMax;
pub use smart::{breakdown, rank, ScoreBreakdown};
pub use weights::CriteriaWeights;

pub use bk_core::{CriterionKind, Polarity, RankedResult, ScoringInput};
