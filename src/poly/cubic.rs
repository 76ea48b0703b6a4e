use num_complex::Complex;

use super::{quadratic_roots, scaled_tol, PolySettings, RealRoots};
use crate::complex::{ComplexRoots, NewtonSettings};
use crate::linalg::LinalgError;
use crate::tolerance::{is_zero, pow2_scale, sign};
use crate::traits::FloatScalar;

/// `y³ + a·y + b = 0` with `x = (y + shift)·scale`.
///
/// The monic cubic is first rescaled by the power of two nearest below
/// `max(|p|, √|q|, ∛|r|)`, which brings its coefficients to order one without
/// rounding; every tolerance below is relative to that unit scale. `a_mag` and `b_mag` are the summed magnitudes of the
/// terms that cancel to form `a` and `b`; rounding error in each is
/// proportional to them.
#[derive(Debug, Clone, Copy)]
struct Depressed<T> {
    a: T,
    b: T,
    shift: T,
    scale: T,
    a_mag: T,
    b_mag: T,
}

/// Root structure of a depressed cubic, decided by its discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    /// `Δ ≈ 0` and `a ≈ 0`: one root of multiplicity three.
    Triple,
    /// `Δ ≈ 0`: one simple root and one double root.
    Double,
    /// `Δ > 0`: one real root and a complex-conjugate pair.
    OneReal,
    /// `Δ < 0`: three distinct real roots.
    ThreeReal,
}

impl<T: FloatScalar> Depressed<T> {
    /// Rescale the monic `x³ + px² + qx + r`, then substitute `x = y - p/3`.
    fn new(p: T, q: T, r: T) -> Self {
        let scale = pow2_scale(p.abs().max(q.abs().sqrt()).max(r.abs().cbrt()));
        let (p, q, r) = (p / scale, q / scale / scale, r / scale / scale / scale);

        let third = p / T::lit(3.0);
        let cube = T::lit(2.0) * third * third * third;
        Self {
            a: q - p * third,
            b: cube - third * q + r,
            shift: -third,
            scale,
            a_mag: q.abs() + (p * third).abs(),
            b_mag: cube.abs() + (third * q).abs() + r.abs(),
        }
    }

    /// Map a root of the depressed cubic back to `x`.
    #[inline]
    fn restore(&self, y: T) -> T {
        (y + self.shift) * self.scale
    }

    /// Returns `(b²/4, a³/27)`; the discriminant is their sum.
    fn terms(&self) -> (T, T) {
        (self.b * self.b * T::lit(0.25), self.a * self.a * self.a / T::lit(27.0))
    }

    /// Classify by the sign of `Δ = b²/4 + a³/27`.
    ///
    /// `Δ` counts as zero within `tol` times the first-order rounding error it
    /// inherits from `a` and `b`, so exact repeated roots survive coefficient
    /// rounding. A vanishing `Δ` is a triple root when both `a` and `b` vanish
    /// too, otherwise a double root.
    fn classify(&self, tol: T) -> (Case, T) {
        let (half_b_sq, a_cube) = self.terms();
        let disc = half_b_sq + a_cube;
        let sensitivity =
            self.b.abs() * T::lit(0.5) * self.b_mag + self.a * self.a / T::lit(9.0) * self.a_mag;
        let case = if is_zero(disc, scaled_tol(tol, sensitivity)) {
            // b shrinks like the cube of the root spread, so a must vanish as well
            let flat_b = is_zero(self.b, scaled_tol(tol, self.b_mag));
            if flat_b && is_zero(self.a, scaled_tol(tol, self.a_mag)) {
                Case::Triple
            } else {
                Case::Double
            }
        } else if disc > T::zero() {
            Case::OneReal
        } else {
            Case::ThreeReal
        };
        (case, disc)
    }

    /// `(simple, double)` roots in `y` for a vanishing discriminant.
    fn double_roots(&self) -> (T, T) {
        let m = (-self.a / T::lit(3.0)).max(T::zero()).sqrt();
        let s = sign(self.b);
        (-T::lit(2.0) * s * m, s * m)
    }

    /// Cardano's real root for a positive discriminant.
    ///
    /// `u³ = -b/2 - sign(b)√Δ` is the larger-magnitude branch and `v` follows
    /// from `u·v = -a/3`, avoiding the cancellation in `cbrt(-b/2 + √Δ)`.
    fn cardano_root(&self, disc: T) -> T {
        let u = (-self.b * T::lit(0.5) - sign(self.b) * disc.sqrt()).cbrt();
        if u.is_zero() {
            return u;
        }
        u - self.a / (T::lit(3.0) * u)
    }

    /// The three trigonometric roots in `y` for a negative discriminant.
    fn trig_roots(&self) -> [T; 3] {
        let (half_b_sq, a_cube) = self.terms();
        let j = (half_b_sq / -a_cube).max(T::zero()).min(T::one());
        let theta = (-sign(self.b) * j.sqrt()).acos();
        let m = T::lit(2.0) * (-self.a / T::lit(3.0)).sqrt();
        let two_pi = T::lit(core::f64::consts::TAU);
        let three = T::lit(3.0);
        [
            m * (theta / three).cos(),
            m * ((theta + two_pi) / three).cos(),
            m * ((theta + two_pi + two_pi) / three).cos(),
        ]
    }
}

/// Real roots of `ax³ + bx² + cx + d = 0`.
///
/// Distinct roots only, sorted ascending: a double root is reported once and
/// a triple root collapses to a single value. If `a` is within tolerance of
/// zero the equation is handed to [`quadratic_roots`].
///
/// ```
/// use smallmat::poly::{cubic_roots, PolySettings};
///
/// // (x - 2)²(x + 1)
/// let roots = cubic_roots(1.0_f64, -3.0, 0.0, 4.0, &PolySettings::default());
/// assert_eq!(roots.len(), 2);
/// assert!((roots.as_slice()[0] + 1.0).abs() < 1e-12);
/// assert!((roots.as_slice()[1] - 2.0).abs() < 1e-12);
/// ```
pub fn cubic_roots<T: FloatScalar>(a: T, b: T, c: T, d: T, settings: &PolySettings<T>) -> RealRoots<T> {
    if is_zero(a, settings.tol) {
        return quadratic_roots(b, c, d, settings);
    }

    let dep = Depressed::new(b / a, c / a, d / a);
    let (case, disc) = dep.classify(settings.tol);
    match case {
        Case::Triple => RealRoots::from_slice(&[dep.restore(T::zero())]),
        Case::Double => {
            let (simple, double) = dep.double_roots();
            RealRoots::from_slice(&[dep.restore(simple), dep.restore(double)])
        }
        Case::OneReal => RealRoots::from_slice(&[dep.restore(dep.cardano_root(disc))]),
        Case::ThreeReal => RealRoots::from_slice(&dep.trig_roots().map(|y| dep.restore(y))),
    }
}

/// All three roots of the monic `x³ + px² + qx + r = 0`, with multiplicity.
///
/// Real cases return three values with zero imaginary part, ascending. When
/// the discriminant is positive the roots come from the complex Cardano
/// formula: `u` runs over the three cube roots of `-b/2 - sign(b)√Δ` and each
/// root is `u - a/(3u)`. The real root comes first (imaginary part exactly
/// zero) followed by the conjugate pair, positive imaginary part first.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] if cube-root refinement fails.
///
/// ```
/// use smallmat::complex::NewtonSettings;
/// use smallmat::poly::{cubic_roots_complex, PolySettings};
///
/// // x³ - 1
/// let roots = cubic_roots_complex(0.0_f64, 0.0, -1.0, &PolySettings::default(), &NewtonSettings::default())
///     .unwrap();
/// assert!((roots[0].re - 1.0).abs() < 1e-14 && roots[0].im == 0.0);
/// assert!((roots[1].im - 0.75_f64.sqrt()).abs() < 1e-14);
/// assert_eq!(roots[2], roots[1].conj());
/// ```
pub fn cubic_roots_complex<T: FloatScalar>(
    p: T,
    q: T,
    r: T,
    settings: &PolySettings<T>,
    newton: &NewtonSettings<T>,
) -> Result<[Complex<T>; 3], LinalgError> {
    let dep = Depressed::new(p, q, r);
    let (case, disc) = dep.classify(settings.tol);
    let roots = match case {
        Case::Triple => [Complex::new(dep.restore(T::zero()), T::zero()); 3],
        Case::Double => {
            let (simple, double) = dep.double_roots();
            sorted_real([simple, double, double].map(|y| dep.restore(y)))
        }
        Case::ThreeReal => sorted_real(dep.trig_roots().map(|y| dep.restore(y))),
        Case::OneReal => {
            let w = -dep.b * T::lit(0.5) - sign(dep.b) * disc.sqrt();
            let us = Complex::new(w, T::zero()).cube_roots(newton)?;
            let mut ys = [Complex::new(T::zero(), T::zero()); 3];
            for (y, u) in ys.iter_mut().zip(us) {
                *y = if u.norm().is_zero() {
                    u
                } else {
                    u - Complex::new(dep.a, T::zero()) / (u * T::lit(3.0))
                };
            }
            split_conjugates(ys, &dep)
        }
    };
    Ok(roots)
}

fn sorted_real<T: FloatScalar>(mut xs: [T; 3]) -> [Complex<T>; 3] {
    xs.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(core::cmp::Ordering::Equal));
    xs.map(|x| Complex::new(x, T::zero()))
}

/// Snap the root with the smallest imaginary part onto the real axis and
/// force the other two into an exact conjugate pair.
fn split_conjugates<T: FloatScalar>(ys: [Complex<T>; 3], dep: &Depressed<T>) -> [Complex<T>; 3] {
    let mut real_idx = 0;
    for k in 1..3 {
        if ys[k].im.abs() < ys[real_idx].im.abs() {
            real_idx = k;
        }
    }
    let (i, j) = match real_idx {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let half = T::lit(0.5);
    let re = dep.restore((ys[i].re + ys[j].re) * half);
    let im = (ys[i].im.abs() + ys[j].im.abs()) * half * dep.scale;
    [
        Complex::new(dep.restore(ys[real_idx].re), T::zero()),
        Complex::new(re, im),
        Complex::new(re, -im),
    ]
}
