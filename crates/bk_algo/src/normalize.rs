//! Min-max normalization over the current product set.

use bk_core::Polarity;

/// Observed range of one criterion across the product set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    /// Range of `values`; `None` when empty.
    pub fn of<I: IntoIterator<Item = f64>>(values: I) -> Option<MinMax> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(MinMax { min: v, max: v }),
            Some(m) => Some(MinMax { min: m.min.min(v), max: m.max.max(v) }),
        })
    }

    /// Map `value` onto [0,1] (for values inside the range).
    ///
    /// When every product shares the same value (`max == min`) the criterion
    /// does not discriminate and everybody gets `1.0`.
    pub fn normalize(&self, value: f64, polarity: Polarity) -> f64 {
        if self.max == self.min {
            return 1.0;
        }
        let span = self.max - self.min;
        match polarity {
            Polarity::Benefit => (value - self.min) / span,
            Polarity::Cost => (self.max - value) / span,
        }
    }
}
