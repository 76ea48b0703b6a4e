//! Multi-valued roots of complex numbers.
//!
//! [`ComplexRoots`] extends [`num_complex::Complex`] with both square roots
//! and all three cube roots. Cube roots start from the polar closed form and
//! are polished by Newton iteration on `f(x) = x³ - z`, so the three roots
//! agree with `z` to working precision rather than only to the accuracy of
//! `cbrt`, `cos` and `sin`.
//!
//! ```
//! use smallmat::complex::{ComplexRoots, NewtonSettings};
//! use smallmat::Complex;
//!
//! let z = Complex::new(-8.0_f64, 0.0);
//! let [principal, _, _] = z.cube_roots(&NewtonSettings::default()).unwrap();
//! assert!((principal - Complex::new(1.0, 3.0_f64.sqrt())).norm() < 1e-14);
//! ```

use num_complex::Complex;
use num_traits::Zero;

use crate::linalg::LinalgError;
use crate::tolerance::{is_zero, sign};
use crate::traits::FloatScalar;

/// Settings for Newton refinement of cube roots.
#[derive(Debug, Clone, Copy)]
pub struct NewtonSettings<T> {
    /// Stop once successive iterates differ by at most `tol * |x|`.
    pub tol: T,
    /// Maximum number of Newton steps per root.
    pub max_iter: usize,
}

impl<T: FloatScalar> Default for NewtonSettings<T> {
    fn default() -> Self {
        Self {
            tol: T::newton_tol(),
            max_iter: 100,
        }
    }
}

/// Square and cube roots returning every branch.
pub trait ComplexRoots: Sized {
    type Real;

    /// Both square roots, principal root first and its negation second.
    fn square_roots(&self) -> [Self; 2];

    /// All three cube roots, principal root first, then the roots at
    /// `(θ + 2π)/3` and `(θ - 2π)/3`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::ConvergenceFailure`] if Newton refinement of any root
    /// does not settle within `settings.max_iter` steps.
    fn cube_roots(&self, settings: &NewtonSettings<Self::Real>) -> Result<[Self; 3], LinalgError>;
}

impl<T: FloatScalar> ComplexRoots for Complex<T> {
    type Real = T;

    fn square_roots(&self) -> [Self; 2] {
        let (a, b) = (self.re, self.im);
        if a > T::zero() && is_zero(b, T::default_tol() * a) {
            let r = a.sqrt();
            return [Complex::new(r, T::zero()), Complex::new(-r, T::zero())];
        }

        let modulus = self.norm();
        let half = T::lit(0.5);
        let u = ((a + modulus) * half).max(T::zero()).sqrt();
        let v = sign(b) * ((modulus - a) * half).max(T::zero()).sqrt();
        [Complex::new(u, v), Complex::new(-u, -v)]
    }

    fn cube_roots(&self, settings: &NewtonSettings<T>) -> Result<[Self; 3], LinalgError> {
        if self.is_zero() {
            return Ok([Complex::zero(); 3]);
        }

        // Refine on the unit circle and rescale, so nothing overflows or
        // underflows for extreme |z|.
        let modulus = self.norm();
        let unit = self.unscale(modulus);
        let magnitude = modulus.cbrt();
        let theta = self.arg();
        let two_pi = T::lit(core::f64::consts::TAU);
        let three = T::lit(3.0);

        let angles = [theta / three, (theta + two_pi) / three, (theta - two_pi) / three];
        let mut roots = [Complex::zero(); 3];
        for (root, angle) in roots.iter_mut().zip(angles) {
            let seed = Complex::from_polar(T::one(), angle);
            *root = refine_cube_root(unit, seed, settings)?.scale(magnitude);
        }
        Ok(roots)
    }
}

/// Newton iteration `x ← (z/x² + 2x)/3` from `seed`, for `|z| = 1`.
fn refine_cube_root<T: FloatScalar>(
    z: Complex<T>,
    seed: Complex<T>,
    settings: &NewtonSettings<T>,
) -> Result<Complex<T>, LinalgError> {
    let two = T::lit(2.0);
    let three = T::lit(3.0);

    let mut x = seed;
    for _ in 0..settings.max_iter {
        let next = (z / (x * x) + x * two) / three;
        let step = (next - x).norm();
        x = next;
        if !step.is_finite() {
            break;
        }
        if step <= settings.tol * x.norm() {
            return Ok(x);
        }
    }

    tracing::debug!(max_iter = settings.max_iter, "cube root refinement did not converge");
    Err(LinalgError::ConvergenceFailure {
        iterations: settings.max_iter,
    })
}
