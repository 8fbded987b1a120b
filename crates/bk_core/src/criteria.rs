//! The four scoring criteria as a closed enumeration.
//!
//! Each criterion carries its wire code (`C1`..`C4`), its polarity and the
//! fallback weight used when a weight map has no entry for it. Adding a
//! criterion means extending this enum; nothing matches on free-form codes.

use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;

/// Whether a higher raw value is better (`Benefit`) or worse (`Cost`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    #[cfg_attr(feature = "serde", serde(rename = "BENEFIT"))]
    Benefit,
    #[cfg_attr(feature = "serde", serde(rename = "COST"))]
    Cost,
}

/// Scoring dimension. Ordering follows the code (C1 < C2 < C3 < C4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CriterionKind {
    /// C1: selling price minus cost price.
    #[cfg_attr(feature = "serde", serde(rename = "C1"))]
    Margin,
    /// C2: average units sold per recorded day.
    #[cfg_attr(feature = "serde", serde(rename = "C2"))]
    AvgSales,
    /// C3: shelf life in hours.
    #[cfg_attr(feature = "serde", serde(rename = "C3"))]
    ShelfLife,
    /// C4: production difficulty, 1 (easy) ..= 5 (hard).
    #[cfg_attr(feature = "serde", serde(rename = "C4"))]
    Difficulty,
}

impl CriterionKind {
    pub const ALL: [CriterionKind; 4] = [
        CriterionKind::Margin,
        CriterionKind::AvgSales,
        CriterionKind::ShelfLife,
        CriterionKind::Difficulty,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            CriterionKind::Margin => "C1",
            CriterionKind::AvgSales => "C2",
            CriterionKind::ShelfLife => "C3",
            CriterionKind::Difficulty => "C4",
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            CriterionKind::Difficulty => Polarity::Cost,
            _ => Polarity::Benefit,
        }
    }

    /// Weight applied when the caller's weight map has no entry for this criterion.
    pub const fn default_weight(self) -> f64 {
        match self {
            CriterionKind::Margin | CriterionKind::AvgSales => 0.3,
            CriterionKind::ShelfLife | CriterionKind::Difficulty => 0.2,
        }
    }

    pub const fn default_name(self) -> &'static str {
        match self {
            CriterionKind::Margin => "Profit Margin",
            CriterionKind::AvgSales => "Sales Volume",
            CriterionKind::ShelfLife => "Shelf Life",
            CriterionKind::Difficulty => "Production Difficulty",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CriterionKind {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CriterionKind::ALL
            .into_iter()
            .find(|k| k.code() == s)
            .ok_or(CoreError::UnknownCriterion)
    }
}

/// A configured criterion (name and weight are editable; code and polarity are not).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criterion {
    #[cfg_attr(feature = "serde", serde(rename = "code"))]
    pub kind: CriterionKind,
    pub name: String,
    pub weight: f64,
    pub polarity: Polarity,
}

impl Criterion {
    /// The seeded configuration for one criterion.
    pub fn seeded(kind: CriterionKind) -> Self {
        Criterion {
            kind,
            name: kind.default_name().to_string(),
            weight: kind.default_weight(),
            polarity: kind.polarity(),
        }
    }
}
