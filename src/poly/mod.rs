//! Closed-form roots of quadratic and cubic polynomials.
//!
//! All zero comparisons (leading coefficient, discriminant) go through
//! [`crate::tolerance`] with the tolerance carried by [`PolySettings`].
//! The monic polynomial is rescaled to unit coefficient magnitude before any
//! discriminant test, so the root structure found does not depend on the
//! magnitude of the roots.
//!
//! # Real roots
//!
//! - [`quadratic_roots`]: 0, 1 or 2 real roots of `ax² + bx + c`
//! - [`cubic_roots`]: 1, 2 or 3 real roots of `ax³ + bx² + cx + d` by the
//!   depressed-cubic method (Cardano for one real root, trigonometric for three)
//!
//! Repeated roots are collapsed and results are sorted ascending. A leading
//! coefficient within tolerance of zero drops the equation to the next lower
//! degree.
//!
//! # Complex roots
//!
//! - [`quadratic_roots_complex`]: both roots of the monic `x² + px + q`
//! - [`cubic_roots_complex`]: all three roots of the monic `x³ + px² + qx + r`
//!
//! These keep multiplicity and return complex-conjugate pairs when the
//! discriminant says so. They back the closed-form eigenvalue routines.
//!
//! ```
//! use smallmat::poly::{cubic_roots, PolySettings};
//!
//! // (x - 1)(x - 2)(x - 3)
//! let roots = cubic_roots(1.0_f64, -6.0, 11.0, -6.0, &PolySettings::default());
//! assert_eq!(roots.len(), 3);
//! for (r, expected) in roots.iter().zip([1.0, 2.0, 3.0]) {
//!     assert!((r - expected).abs() < 1e-10);
//! }
//! ```

mod cubic;
mod quadratic;


pub use cubic::{cubic_roots, cubic_roots_complex};
pub use quadratic::{quadratic_roots, quadratic_roots_complex};

use core::cmp::Ordering;

use crate::traits::FloatScalar;

/// Settings for the polynomial solvers.
#[derive(Debug, Clone, Copy)]
pub struct PolySettings<T> {
    /// Tolerance for treating a leading coefficient or discriminant as zero.
    pub tol: T,
}

impl<T: FloatScalar> Default for PolySettings<T> {
    fn default() -> Self {
        Self {
            tol: T::default_tol(),
        }
    }
}

/// Up to three distinct real roots, sorted ascending.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealRoots<T> {
    roots: [T; 3],
    len: usize,
}

impl<T: FloatScalar> RealRoots<T> {
    pub(crate) fn empty() -> Self {
        Self {
            roots: [T::zero(); 3],
            len: 0,
        }
    }

    /// Collect `values` (at most three) and sort them.
    pub(crate) fn from_slice(values: &[T]) -> Self {
        let mut out = Self::empty();
        let len = values.len().min(3);
        out.roots[..len].copy_from_slice(&values[..len]);
        out.len = len;
        out.roots[..len].sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.roots[..self.len]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }
}

impl<T: FloatScalar> IntoIterator for RealRoots<T> {
    type Item = T;
    type IntoIter = core::iter::Take<core::array::IntoIter<T, 3>>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots.into_iter().take(self.len)
    }
}

impl<'a, T: FloatScalar> IntoIterator for &'a RealRoots<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Tolerance for a quantity built from terms of magnitude up to `scale`.
///
/// Callers rescale their coefficients to unit magnitude first, so the `tol²`
/// floor is relative as well. It keeps the comparison meaningful when every
/// term has cancelled to rounding noise.
#[inline]
pub(crate) fn scaled_tol<T: FloatScalar>(tol: T, scale: T) -> T {
    tol * scale.max(tol)
}
