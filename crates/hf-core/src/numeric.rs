use crate::HfError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
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

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HfError::NonFinite { what, value: v })
    }
}

/// Require a finite, strictly positive value.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, HfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HfError::NonPositive { what, value: v })
    }
}

/// Sign-preserving power: `sign(base) * |base|^exponent`.
///
/// Empirical emitter laws raise a temperature difference to a non-integer
/// exponent. The difference turns negative whenever the emitter is cooler than
/// its surroundings; `powf` would return NaN there, this returns the mirrored
/// value so heat simply flows the other way.
#[inline]
pub fn signed_pow(base: Real, exponent: Real) -> Real {
    if base == 0.0 {
        return 0.0;
    }
    base.signum() * base.abs().powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

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
        assert!(ensure_positive(0.0, "c").is_err());
        assert!(ensure_positive(-1.0, "c").is_err());
        assert!(matches!(
            ensure_positive(Real::INFINITY, "c"),
            Err(HfError::NonFinite { .. })
        ));
        assert_eq!(ensure_positive(2.5, "c").unwrap(), 2.5);
    }

    #[test]
    fn signed_pow_matches_powf_for_positive_base() {
        let x: Real = 70.0 / 30.0;
        assert_eq!(signed_pow(x, 1.286), x.powf(1.286));
    }

    #[test]
    fn signed_pow_negative_base_is_finite() {
        let v = signed_pow(-0.5, 1.286);
        assert!(v.is_finite());
        assert!(v < 0.0);
        assert!(nearly_equal(v, -(0.5_f64.powf(1.286)), Tolerances::default()));
    }

    #[test]
    fn signed_pow_zero_base() {
        assert_eq!(signed_pow(0.0, 1.286), 0.0);
        assert_eq!(signed_pow(-0.0, 1.286), 0.0);
    }

    proptest! {
        #[test]
        fn signed_pow_is_odd(x in -100.0_f64..100.0, e in 0.5_f64..3.0) {
            let tol = Tolerances { abs: 1e-12, rel: 1e-12 };
            prop_assert!(nearly_equal(signed_pow(-x, e), -signed_pow(x, e), tol));
            prop_assert!(signed_pow(x, e).is_finite());
        }
    }
}
