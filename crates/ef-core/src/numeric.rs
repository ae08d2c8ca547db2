use crate::EfError;

/// Floating point type used throughout system
pub type Real = f64;

/// Tolerance pair for float comparisons.
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

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, EfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(EfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, EfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(EfError::OutOfRange {
            value: v,
            reason: "value must be greater than zero",
        })
    }
}

/// Relative deviation of `actual` from `expected`, e.g. `0.01` for 1 % high.
pub fn relative_error(actual: Real, expected: Real) -> Real {
    actual / expected - 1.0
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
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.0, "target").is_err());
        assert!(ensure_positive(-1.0, "target").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "target"),
            Err(EfError::NonFinite { .. })
        ));
        assert_eq!(ensure_positive(4.7, "target").unwrap(), 4.7);
    }

    #[test]
    fn relative_error_sign() {
        assert!((relative_error(101.0, 100.0) - 0.01).abs() < 1e-12);
        assert!(relative_error(99.0, 100.0) < 0.0);
    }
}
