use num_complex::Complex;

use super::{PolySettings, RealRoots};
use crate::complex::ComplexRoots;
use crate::tolerance::{is_zero, pow2_scale, sign};
use crate::traits::FloatScalar;

/// Real roots of `ax² + bx + c = 0`.
///
/// The discriminant decides the count: negative gives none, zero (within
/// tolerance) gives the repeated root once, positive gives two. The larger
/// root comes from `-(b + sign(b)√Δ)/2` and the smaller from Vieta's product
/// so neither suffers cancellation.
///
/// If `a` is within tolerance of zero the equation is solved as linear; if
/// `b` is too the result is empty.
///
/// ```
/// use smallmat::poly::{quadratic_roots, PolySettings};
///
/// let roots = quadratic_roots(1.0_f64, -3.0, 2.0, &PolySettings::default());
/// assert_eq!(roots.as_slice(), &[1.0, 2.0]);
///
/// let none = quadratic_roots(1.0_f64, 0.0, 1.0, &PolySettings::default());
/// assert!(none.is_empty());
/// ```
pub fn quadratic_roots<T: FloatScalar>(a: T, b: T, c: T, settings: &PolySettings<T>) -> RealRoots<T> {
    let tol = settings.tol;
    if is_zero(a, tol) {
        if is_zero(b, tol) {
            return RealRoots::empty();
        }
        return RealRoots::from_slice(&[-c / b]);
    }

    let m = Monic::new(b / a * T::lit(0.5), c / a);
    let disc = m.discriminant();

    if is_zero(disc, tol) {
        return RealRoots::from_slice(&[-m.half * m.scale]);
    }
    if disc < T::zero() {
        return RealRoots::empty();
    }
    let (r0, r1) = m.distinct_real(disc);
    RealRoots::from_slice(&[r0 * m.scale, r1 * m.scale])
}

/// Both roots of the monic `x² + px + q = 0`, with multiplicity.
///
/// Real roots come back ascending with zero imaginary part. A complex pair
/// comes back with the positive imaginary part first.
///
/// ```
/// use smallmat::poly::{quadratic_roots_complex, PolySettings};
///
/// let [r0, r1] = quadratic_roots_complex(0.0_f64, 4.0, &PolySettings::default());
/// assert!((r0.im - 2.0).abs() < 1e-15 && (r1.im + 2.0).abs() < 1e-15);
/// ```
pub fn quadratic_roots_complex<T: FloatScalar>(
    p: T,
    q: T,
    settings: &PolySettings<T>,
) -> [Complex<T>; 2] {
    let m = Monic::new(p * T::lit(0.5), q);
    let disc = m.discriminant();

    if is_zero(disc, settings.tol) {
        return [Complex::new(-m.half * m.scale, T::zero()); 2];
    }
    if disc > T::zero() {
        let (r0, r1) = m.distinct_real(disc);
        let (lo, hi) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
        return [Complex::new(lo * m.scale, T::zero()), Complex::new(hi * m.scale, T::zero())];
    }

    let [s0, s1] = Complex::new(disc, T::zero()).square_roots();
    [(s0 - m.half) * m.scale, (s1 - m.half) * m.scale]
}

/// `x² + 2·half·x + q` rescaled by the power of two nearest below
/// `max(|half|, √|q|)`, so the discriminant is compared against a unit
/// coefficient scale and neither `half²` nor `q` can overflow.
#[derive(Debug, Clone, Copy)]
struct Monic<T> {
    half: T,
    q: T,
    scale: T,
}

impl<T: FloatScalar> Monic<T> {
    fn new(half: T, q: T) -> Self {
        let scale = pow2_scale(half.abs().max(q.abs().sqrt()));
        Self {
            half: half / scale,
            q: q / scale / scale,
            scale,
        }
    }

    fn discriminant(&self) -> T {
        self.half * self.half - self.q
    }

    /// Both real roots of the rescaled quadratic for a positive discriminant.
    ///
    /// The larger-magnitude root avoids cancellation; the other follows from
    /// the product of the roots.
    fn distinct_real(&self, disc: T) -> (T, T) {
        let t = -(self.half + sign(self.half) * disc.sqrt());
        (t, self.q / t)
    }
}
