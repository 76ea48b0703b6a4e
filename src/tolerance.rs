//! Tolerance comparisons.
//!
//! Floating-point coefficients are never compared against zero with `==`
//! inside the kernels; they go through these helpers with an explicit `eps`.
//! Scale-sensitive kernels first divide their input by [`pow2_scale`] so that
//! a fixed `eps` is relative to the data.

use crate::traits::FloatScalar;

/// `true` if `|x| <= eps`.
///
/// ```
/// use smallmat::tolerance::is_zero;
/// assert!(is_zero(1e-16_f64, 1e-14));
/// assert!(!is_zero(1e-3_f64, 1e-14));
/// ```
#[inline]
pub fn is_zero<T: FloatScalar>(x: T, eps: T) -> bool {
    x.abs() <= eps
}

/// `true` if `|x - y| <= eps`.
///
/// ```
/// use smallmat::tolerance::is_equal;
/// assert!(is_equal(0.1_f64 + 0.2, 0.3, 1e-14));
/// ```
#[inline]
pub fn is_equal<T: FloatScalar>(x: T, y: T, eps: T) -> bool {
    (x - y).abs() <= eps
}

/// Sign of `x` as `±1`, treating `+0` as positive.
#[inline]
pub(crate) fn sign<T: FloatScalar>(x: T) -> T {
    if x < T::zero() {
        -T::one()
    } else {
        T::one()
    }
}

/// Power of two at most `|x|` and above `|x|/2`, or one when `x` is zero or
/// not finite.
///
/// Dividing by it and multiplying back is exact, so rescaling costs no
/// rounding.
#[inline]
pub(crate) fn pow2_scale<T: FloatScalar>(x: T) -> T {
    let x = x.abs();
    if x.is_zero() || !x.is_finite() {
        return T::one();
    }
    x.log2().floor().exp2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_within_tolerance() {
        assert!(is_zero(0.0_f64, 0.0));
        assert!(is_zero(-5e-15_f64, 1e-14));
        assert!(!is_zero(2e-14_f64, 1e-14));
    }

    #[test]
    fn equal_within_tolerance() {
        assert!(is_equal(1.0_f64, 1.0 + 1e-15, 1e-14));
        assert!(!is_equal(1.0_f64, 1.001, 1e-14));
        assert!(is_equal(1.0_f32, 1.0000005, 1e-6));
    }

    #[test]
    fn sign_of_zero_is_positive() {
        assert_eq!(sign(0.0_f64), 1.0);
        assert_eq!(sign(-0.5_f64), -1.0);
        assert_eq!(sign(3.0_f64), 1.0);
    }

    #[test]
    fn pow2_scale_brackets_magnitude() {
        assert_eq!(pow2_scale(0.0_f64), 1.0);
        assert_eq!(pow2_scale(f64::INFINITY), 1.0);
        assert_eq!(pow2_scale(8.0_f64), 8.0);
        assert_eq!(pow2_scale(-6.0_f64), 4.0);
        assert_eq!(pow2_scale(1.5_f32), 1.0);
        for &x in &[3e-200_f64, 7e-5, 0.3, 1e60, 5e300] {
            let s = pow2_scale(x);
            assert!(s <= x && s > 0.5 * x, "{} -> {}", x, s);
            assert_eq!(s.log2().fract(), 0.0);
        }
    }
}
