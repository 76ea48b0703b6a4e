use num_complex::Complex;

use crate::complex::NewtonSettings;
use crate::linalg::hessenberg::{
    double_shift_qr_step, qr_step, wilkinson_shift, HessenbergDecomposition,
};
use crate::linalg::LinalgError;
use crate::matrix::{Matrix2, Matrix3};
use crate::poly::{cubic_roots_complex, quadratic_roots_complex, PolySettings};
use crate::tolerance::pow2_scale;
use crate::traits::FloatScalar;
use crate::Matrix;

/// Settings for the shifted QR eigenvalue iteration.
#[derive(Debug, Clone, Copy)]
pub struct QrIterSettings<T> {
    /// A subdiagonal entry is negligible once `|h[i][i-1]| <= tol·(|h[i-1][i-1]| + |h[i][i]|)`,
    /// or once it is below machine epsilon relative to the largest entry.
    pub tol: T,
    /// Maximum number of QR steps.
    pub max_iter: usize,
}

impl<T: FloatScalar> Default for QrIterSettings<T> {
    fn default() -> Self {
        Self {
            tol: T::default_tol(),
            max_iter: 500,
        }
    }
}

/// Eigenvalues of a square matrix by shifted QR iteration.
///
/// Reduces to Hessenberg form, then repeats [`qr_step`] until every
/// subdiagonal entry is negligible or closes off an isolated 2×2 block with a
/// complex-conjugate pair. Eigenvalues are read off the diagonal blocks from
/// top to bottom; a complex pair comes positive imaginary part first.
///
/// Shifts come from the bottom 2×2 of the lowest unreduced block: a single
/// Wilkinson shift when its eigenvalues are real, otherwise a Francis
/// double-shift step with the conjugate pair. Every tenth step uses an
/// exceptional single shift instead to break cycles.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] after `settings.max_iter` steps.
///
/// ```
/// use smallmat::Matrix;
/// use smallmat::linalg::{eigenvalues_qr, QrIterSettings};
///
/// let a = Matrix::new([
///     [2.0_f64, 0.0, 0.0, 0.0],
///     [1.0, 3.0, 0.0, 0.0],
///     [0.0, 1.0, 4.0, 0.0],
///     [0.0, 0.0, 1.0, 5.0],
/// ]);
/// let mut ev = eigenvalues_qr(&a, &QrIterSettings::default()).unwrap();
/// ev.sort_by(|x, y| x.re.partial_cmp(&y.re).unwrap());
/// for (z, expected) in ev.iter().zip([2.0, 3.0, 4.0, 5.0]) {
///     assert!((z.re - expected).abs() < 1e-10 && z.im.abs() < 1e-10);
/// }
/// ```
pub fn eigenvalues_qr<T: FloatScalar, const N: usize>(
    a: &Matrix<T, N, N>,
    settings: &QrIterSettings<T>,
) -> Result<[Complex<T>; N], LinalgError> {
    let (a, scale) = unit_scaled(a);
    let mut h = HessenbergDecomposition::new(&a, settings.tol).h();
    let floor = T::epsilon() * h.max_abs();

    let mut iter = 0usize;
    loop {
        deflate(&mut h, settings.tol, floor);

        let Some((start, end)) = active_block(&h) else {
            tracing::trace!(iterations = iter, "QR iteration converged");
            return Ok(read_eigenvalues(&h).map(|z| z.scale(scale)));
        };

        if iter >= settings.max_iter {
            tracing::debug!(
                max_iter = settings.max_iter,
                block_start = start,
                block_end = end,
                "QR iteration did not converge"
            );
            return Err(LinalgError::ConvergenceFailure {
                iterations: settings.max_iter,
            });
        }
        iter += 1;

        if iter % 10 == 0 {
            let shift = exceptional_shift(&h, end);
            qr_step(&mut h, shift);
        } else {
            let (i, j) = (end - 2, end - 1);
            match wilkinson_shift(h[(i, i)], h[(i, j)], h[(j, i)], h[(j, j)]) {
                Some(shift) => qr_step(&mut h, shift),
                None => {
                    let s = h[(i, i)] + h[(j, j)];
                    let t = h[(i, i)] * h[(j, j)] - h[(i, j)] * h[(j, i)];
                    double_shift_qr_step(&mut h, s, t);
                }
            }
        }

        for j in 0..N {
            for i in (j + 2)..N {
                h[(i, j)] = T::zero();
            }
        }
    }
}

/// `a / s` and `s`, where `s` is the power of two just below the largest
/// entry magnitude. Characteristic polynomials and shifts of the result stay
/// clear of overflow and underflow.
fn unit_scaled<T: FloatScalar, const N: usize>(a: &Matrix<T, N, N>) -> (Matrix<T, N, N>, T) {
    let s = pow2_scale(a.max_abs());
    let mut scaled = *a;
    for j in 0..N {
        for i in 0..N {
            scaled[(i, j)] = scaled[(i, j)] / s;
        }
    }
    (scaled, s)
}

/// Zero every subdiagonal entry that is negligible next to its diagonal neighbours.
fn deflate<T: FloatScalar, const N: usize>(h: &mut Matrix<T, N, N>, tol: T, floor: T) {
    for i in 1..N {
        let sub = h[(i, i - 1)];
        if sub.is_zero() {
            continue;
        }
        let scale = h[(i - 1, i - 1)].abs() + h[(i, i)].abs();
        if sub.abs() <= tol * scale || sub.abs() <= floor {
            tracing::trace!(row = i, "deflating subdiagonal entry");
            h[(i, i - 1)] = T::zero();
        }
    }
}

/// Lowest diagonal block `start..end` that still needs iterating, if any.
fn active_block<T: FloatScalar, const N: usize>(h: &Matrix<T, N, N>) -> Option<(usize, usize)> {
    let mut end = N;
    while end > 0 {
        let mut start = end - 1;
        while start > 0 && !h[(start, start - 1)].is_zero() {
            start -= 1;
        }
        match end - start {
            1 => {}
            2 if is_complex_block(h, start) => {}
            _ => return Some((start, end)),
        }
        end = start;
    }
    None
}

fn is_complex_block<T: FloatScalar, const N: usize>(h: &Matrix<T, N, N>, i: usize) -> bool {
    wilkinson_shift(h[(i, i)], h[(i, i + 1)], h[(i + 1, i)], h[(i + 1, i + 1)]).is_none()
}

fn exceptional_shift<T: FloatScalar, const N: usize>(h: &Matrix<T, N, N>, end: usize) -> T {
    let j = end - 1;
    h[(j, j)] + T::lit(1.5) * h[(j, j - 1)].abs()
}

/// Read eigenvalues off a converged quasi-triangular matrix.
fn read_eigenvalues<T: FloatScalar, const N: usize>(h: &Matrix<T, N, N>) -> [Complex<T>; N] {
    let mut out = [Complex::new(T::zero(), T::zero()); N];
    let mut i = 0;
    while i < N {
        if i + 1 < N && !h[(i + 1, i)].is_zero() {
            let block = Matrix::new([[h[(i, i)], h[(i, i + 1)]], [h[(i + 1, i)], h[(i + 1, i + 1)]]]);
            let [z0, z1] = block.eigenvalues();
            out[i] = z0;
            out[i + 1] = z1;
            i += 2;
        } else {
            out[i] = Complex::new(h[(i, i)], T::zero());
            i += 1;
        }
    }
    out
}

impl<T: FloatScalar> Matrix2<T> {
    /// Coefficients `[1, -tr, det]` of `λ² - tr·λ + det`.
    pub fn characteristic_polynomial(&self) -> [T; 3] {
        let det = self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)];
        [T::one(), -self.trace(), det]
    }

    /// Both eigenvalues from the characteristic quadratic.
    ///
    /// The matrix is divided by a power of two near its largest entry first,
    /// so the polynomial coefficients neither overflow nor underflow.
    ///
    /// Real eigenvalues come back ascending with zero imaginary part; a
    /// complex pair comes back positive imaginary part first.
    ///
    /// ```
    /// use smallmat::Matrix2;
    ///
    /// // rotation by 90°
    /// let r = Matrix2::new([[0.0_f64, -1.0], [1.0, 0.0]]);
    /// let [z0, z1] = r.eigenvalues();
    /// assert_eq!((z0.re, z0.im), (0.0, 1.0));
    /// assert_eq!((z1.re, z1.im), (0.0, -1.0));
    /// ```
    pub fn eigenvalues(&self) -> [Complex<T>; 2] {
        let (a, scale) = unit_scaled(self);
        let [_, p, q] = a.characteristic_polynomial();
        quadratic_roots_complex(p, q, &PolySettings::default()).map(|z| z.scale(scale))
    }
}

impl<T: FloatScalar> Matrix3<T> {
    /// Coefficients `[1, -tr, m₂, -det]` of `λ³ - tr·λ² + m₂·λ - det`, where
    /// `m₂` is the sum of the principal 2×2 minors.
    pub fn characteristic_polynomial(&self) -> [T; 4] {
        let a = self;
        let det = a[(0, 0)] * (a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)])
            - a[(0, 1)] * (a[(1, 0)] * a[(2, 2)] - a[(1, 2)] * a[(2, 0)])
            + a[(0, 2)] * (a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)]);
        [T::one(), -a.trace(), a.principal_minor_sum(), -det]
    }

    /// All three eigenvalues from the characteristic cubic, with multiplicity.
    ///
    /// Scaled like [`Matrix2::eigenvalues`] before the cubic is formed.
    ///
    /// Real eigenvalues come back ascending with zero imaginary part. With a
    /// complex pair the real eigenvalue comes first, then the pair.
    ///
    /// # Errors
    ///
    /// [`LinalgError::ConvergenceFailure`] if cube-root refinement fails.
    ///
    /// ```
    /// use smallmat::Matrix3;
    ///
    /// let a = Matrix3::new([[3.0_f64, 2.0, 4.0], [2.0, 0.0, 2.0], [4.0, 2.0, 3.0]]);
    /// let ev = a.eigenvalues().unwrap();
    /// let re: Vec<f64> = ev.iter().map(|z| z.re).collect();
    /// assert_eq!(re, vec![-1.0, -1.0, 8.0]);
    /// ```
    pub fn eigenvalues(&self) -> Result<[Complex<T>; 3], LinalgError> {
        self.eigenvalues_with(&PolySettings::default(), &NewtonSettings::default())
    }

    /// [`eigenvalues`](Self::eigenvalues) with explicit solver settings.
    pub fn eigenvalues_with(
        &self,
        poly: &PolySettings<T>,
        newton: &NewtonSettings<T>,
    ) -> Result<[Complex<T>; 3], LinalgError> {
        let (a, scale) = unit_scaled(self);
        let [_, p, q, r] = a.characteristic_polynomial();
        let roots = cubic_roots_complex(p, q, r, poly, newton)?;
        Ok(roots.map(|z| z.scale(scale)))
    }
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Eigenvalues by shifted QR iteration with default settings.
    ///
    /// See [`eigenvalues_qr`].
    pub fn eigenvalues_qr(&self) -> Result<[Complex<T>; N], LinalgError> {
        eigenvalues_qr(self, &QrIterSettings::default())
    }
}
