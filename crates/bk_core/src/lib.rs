//! bk_core: core types shared by the bakery engine.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! workspace (`bk_algo`, `bk_io`, `bk_pipeline`, `bk_cli`):
//!
//! - Identifiers: `ProductId`, `RankingId`
//! - Entities: `Product`, `RecapEntry`, `DailyRecap`, `ScoringInput`, `RankedResult`
//! - The fixed criterion enumeration (`CriterionKind`) with polarity and default weight
//! - Tier classification and score rounding
//!
//! Serialization derives are gated behind the `serde` feature.

#![forbid(unsafe_code)]

pub mod criteria;
pub mod entities;
pub mod ids;
pub mod rounding;
pub mod tier;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidId,
        InvalidHex,
        UnknownCriterion,
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::InvalidHex => write!(f, "invalid hex"),
                CoreError::UnknownCriterion => write!(f, "unknown criterion code"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub use criteria::{Criterion, CriterionKind, Polarity};
pub use entities::{DailyRecap, Money, Product, RankedResult, RecapEntry, ScoringInput};
pub use errors::CoreError;
pub use ids::{ProductId, RankingId};
pub use tier::Tier;
