use crate::TpError;

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
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

impl Tolerances {
    /// Relative-only comparison with a small absolute floor for values near zero.
    pub fn relative(rel: Real) -> Self {
        Self { abs: 1e-9, rel }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TpError::NonFinite { what, value: v })
    }
}

/// Reject zero, negative and non-finite values.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, TpError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TpError::InvalidArg { what })
    }
}

/// Linear interpolation between `a` and `b` at fraction `frac` in [0, 1].
///
/// Exact at both endpoints.
#[inline]
pub fn lerp(a: Real, b: Real, frac: Real) -> Real {
    a * (1.0 - frac) + b * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn relative_tolerance_scales_with_magnitude() {
        let tol = Tolerances::relative(1e-2);
        assert!(nearly_equal(3467.0, 3490.0, tol));
        assert!(!nearly_equal(3467.0, 3600.0, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert_eq!(ensure_positive(0.05, "volume"), Ok(0.05));
        assert!(matches!(
            ensure_positive(0.0, "volume"),
            Err(TpError::InvalidArg { what: "volume" })
        ));
        assert!(ensure_positive(-1.0, "volume").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "volume"),
            Err(TpError::NonFinite { .. })
        ));
    }

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(300.0, 400.0, 0.0), 300.0);
        assert_eq!(lerp(300.0, 400.0, 1.0), 400.0);
        assert_eq!(lerp(300.0, 400.0, 0.5), 350.0);
        assert_eq!(lerp(0.05, 0.08, 1.0), 0.08);
    }
}
