//! Relative fuzzy comparison for f64.
//!
//! Geometry code in this workspace compares interpolated coordinates
//! against exact grid values; bitwise equality is too strict for that.
//! The tolerance is relative (1 part in 1e12), so values near zero
//! should be compared through `fuzzy_eq(a - b + 1.0, 1.0)`.

/// True when `a` and `b` agree to within one part in 1e12 of the
/// smaller magnitude.
pub fn fuzzy_eq(a: f64, b: f64) -> bool {
    (a - b).abs() * 1e12 <= a.abs().min(b.abs())
}

/// Relative comparison anchored away from zero, for operands that may
/// legitimately be zero.
pub fn fuzzy_eq_near_zero(a: f64, b: f64) -> bool {
    fuzzy_eq(a - b + 1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{fuzzy_eq, fuzzy_eq_near_zero};

    #[test]
    fn exact_values_compare_equal() {
        assert!(fuzzy_eq(2.0, 2.0));
        assert!(fuzzy_eq(-3.5, -3.5));
    }

    #[test]
    fn tolerates_accumulated_rounding() {
        let mut x = 0.0;
        for _ in 0..10 {
            x += 0.1;
        }
        assert!(x != 1.0);
        assert!(fuzzy_eq(x, 1.0));
    }

    #[test]
    fn rejects_distinct_values() {
        assert!(!fuzzy_eq(1.0, 1.0001));
        assert!(!fuzzy_eq(100.0, 101.0));
    }

    #[test]
    fn zero_needs_the_shifted_form() {
        // Plain relative comparison degenerates at zero.
        assert!(!fuzzy_eq(1e-30, 0.0));
        assert!(fuzzy_eq_near_zero(1e-30, 0.0));
        assert!(!fuzzy_eq_near_zero(0.1, 0.0));
    }
}
