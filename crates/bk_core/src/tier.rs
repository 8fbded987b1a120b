//! Priority tiers and their recommendation texts.

use core::fmt;

/// Lower bound (inclusive) of the HIGH tier.
pub const HIGH_THRESHOLD: f64 = 0.7;
/// Lower bound (inclusive) of the MEDIUM tier.
pub const MEDIUM_THRESHOLD: f64 = 0.4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    /// Classify an already-rounded final score.
    pub fn classify(score: f64) -> Tier {
        if score >= HIGH_THRESHOLD {
            Tier::High
        } else if score >= MEDIUM_THRESHOLD {
            Tier::Medium
        } else {
            Tier::Low
        }
    }

    pub const fn recommendation(self) -> &'static str {
        match self {
            Tier::High => "increase stock — high priority",
            Tier::Medium => "maintain stock level",
            Tier::Low => "reduce production",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Tier::High => "HIGH",
            Tier::Medium => "MEDIUM",
            Tier::Low => "LOW",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(Tier::classify(0.7), Tier::High);
        assert_eq!(Tier::classify(0.699), Tier::Medium);
        assert_eq!(Tier::classify(0.4), Tier::Medium);
        assert_eq!(Tier::classify(0.399), Tier::Low);
        assert_eq!(Tier::classify(1.0), Tier::High);
        assert_eq!(Tier::classify(-0.2), Tier::Low);
        assert_eq!(Tier::classify(1.4), Tier::High);
    }

    #[test]
    fn recommendations_follow_tier() {
        assert_eq!(Tier::High.recommendation(), "increase stock — high priority");
        assert_eq!(Tier::Medium.recommendation(), "maintain stock level");
        assert_eq!(Tier::Low.recommendation(), "reduce production");
    }
}
