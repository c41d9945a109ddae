use crate::PfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Decimal digits kept by rounded results (RMS, powers, power factor).
pub const RESULT_DECIMALS: u32 = 4;

/// Absolute and relative bounds for comparing computed quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// True when `a` and `b` agree within either bound of `tol`.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PfError::NonFinite { what, value: v })
    }
}

/// Round to `decimals` digits, ties to even. Non-finite input is returned
/// unchanged.
pub fn round_to(v: Real, decimals: u32) -> Real {
    if !v.is_finite() {
        return v;
    }
    let scale = 10f64.powi(decimals as i32);
    let scaled = v * scale;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round_ties_even() / scale
}

/// Round to [`RESULT_DECIMALS`].
#[inline]
pub fn round_result(v: Real) -> Real {
    round_to(v, RESULT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_uses_either_bound() {
        let tol = Tolerances::default();
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(230.0, 230.0 + 1e-8, tol));
        assert!(!nearly_equal(230.0, 230.001, tol));
        assert!(!nearly_equal(Real::NAN, Real::NAN, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn round_to_four_digits() {
        assert_eq!(round_to(1.234_567, 4), 1.2346);
        assert_eq!(round_to(-1.234_54, 4), -1.2345);
        assert_eq!(round_result(100.000_04), 100.0);
    }

    #[test]
    fn round_ties_to_even() {
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
        assert_eq!(round_to(2.5, 0), 2.0);
    }

    #[test]
    fn round_passes_through_non_finite() {
        assert!(round_to(Real::NAN, 4).is_nan());
        assert_eq!(round_to(Real::INFINITY, 4), Real::INFINITY);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rounding_error_is_bounded(v in -1.0e6_f64..1.0e6_f64) {
            let r = round_to(v, 4);
            prop_assert!((r - v).abs() <= 0.5e-4 + 1e-9);
        }

        #[test]
        fn rounding_is_monotonic(a in -1.0e4_f64..1.0e4_f64, b in -1.0e4_f64..1.0e4_f64) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(round_result(lo) <= round_result(hi));
        }
    }
}
