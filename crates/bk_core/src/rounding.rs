//! Score rounding and percentage helpers.

/// Round to 3 decimal places, halves toward +infinity.
///
/// Negative zero is folded to `0.0` so that equal scores compare equal under
/// `f64::total_cmp`.
#[inline]
pub fn round_3dp(x: f64) -> f64 {
    ((x * 1000.0 + 0.5).floor() / 1000.0) + 0.0
}

/// `num / den * 100`, or `0.0` when `den == 0`.
#[inline]
pub fn percent(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(round_3dp(0.3), 0.3);
        assert_eq!(round_3dp(0.12345), 0.123);
        assert_eq!(round_3dp(0.6666666), 0.667);
        assert_eq!(round_3dp(1.0), 1.0);
    }

    #[test]
    fn exact_sums_land_on_thresholds() {
        // summation order leaves different low bits around 0.7
        assert_eq!(round_3dp(0.1 + 0.2 + 0.2 + 0.2), 0.7);
        assert_eq!(round_3dp(0.3 + 0.1), 0.4);
    }

    #[test]
    fn negative_zero_is_folded() {
        let r = round_3dp(-0.0001);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn percent_guards_zero_denominator() {
        assert_eq!(percent(5.0, 0.0), 0.0);
        assert_eq!(percent(1.0, 4.0), 25.0);
    }
}
