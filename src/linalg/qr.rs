use crate::linalg::{check_square, LinalgError};
use crate::matrix::vector::Vector;
use crate::tolerance::{is_zero, sign};
use crate::traits::{FloatScalar, MatrixMut};
use crate::Matrix;

/// A plane rotation `[[c, s], [-s, c]]` mapping `(a, b)` to `(r, 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Givens<T> {
    pub c: T,
    pub s: T,
    pub r: T,
}

/// Compute the Givens rotation that zeroes `b` against `a`.
///
/// Branches on which magnitude is larger so that `t = min/max` stays in
/// `[-1, 1]` and `sqrt(1 + t²)` cannot overflow. `r` is always non-negative.
///
/// ```
/// use smallmat::linalg::givens;
/// let g = givens(3.0_f64, 4.0);
/// assert!((g.r - 5.0).abs() < 1e-15);
/// assert!((-g.s * 3.0 + g.c * 4.0).abs() < 1e-15);
/// ```
pub fn givens<T: FloatScalar>(a: T, b: T) -> Givens<T> {
    if b.is_zero() {
        Givens {
            c: sign(a),
            s: T::zero(),
            r: a.abs(),
        }
    } else if a.is_zero() {
        Givens {
            c: T::zero(),
            s: sign(b),
            r: b.abs(),
        }
    } else if a.abs() > b.abs() {
        let t = b / a;
        let u = sign(a) * (T::one() + t * t).sqrt();
        let c = T::one() / u;
        Givens { c, s: c * t, r: a * u }
    } else {
        let t = a / b;
        let u = sign(b) * (T::one() + t * t).sqrt();
        let s = T::one() / u;
        Givens { c: s * t, s, r: b * u }
    }
}

/// QR decomposition in place using sequential Givens rotations.
///
/// `r` is reduced to upper-triangular form column by column, zeroing from the
/// bottom row upward. `q` is reset to the identity and accumulates the
/// transposed rotations, so that `A = Q·R` for the original `A` with `Q`
/// orthogonal. Pairs that are already both zero are skipped. Rank-deficient
/// input is fine; R simply ends up with small or zero diagonal entries.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] if `r` is not square or `q` does not
/// have the same dimension. Neither buffer is touched in that case.
pub fn givens_qr_in_place<T: FloatScalar>(
    r: &mut impl MatrixMut<T>,
    q: &mut impl MatrixMut<T>,
) -> Result<(), LinalgError> {
    let n = r.nrows();
    check_square(&*r, n)?;
    check_square(&*q, n)?;
    rotate_to_upper(r, q);
    Ok(())
}

/// [`givens_qr_in_place`] for fixed-size buffers, where the shapes already agree.
pub(crate) fn givens_qr_square<T: FloatScalar, const N: usize>(
    r: &mut Matrix<T, N, N>,
    q: &mut Matrix<T, N, N>,
) {
    rotate_to_upper(r, q);
}

fn rotate_to_upper<T: FloatScalar>(r: &mut impl MatrixMut<T>, q: &mut impl MatrixMut<T>) {
    let n = r.nrows();
    for i in 0..n {
        for j in 0..n {
            *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    for j in 0..n {
        for i in ((j + 1)..n).rev() {
            let a = *r.get(i - 1, j);
            let b = *r.get(i, j);
            if a.is_zero() && b.is_zero() {
                continue;
            }
            let g = givens(a, b);

            // Rows i-1 and i of R
            for k in j..n {
                let x = *r.get(i - 1, k);
                let y = *r.get(i, k);
                *r.get_mut(i - 1, k) = g.c * x + g.s * y;
                *r.get_mut(i, k) = g.c * y - g.s * x;
            }
            *r.get_mut(i - 1, j) = g.r;
            *r.get_mut(i, j) = T::zero();

            // Columns i-1 and i of Q (right-multiply by the transpose)
            for k in 0..n {
                let x = *q.get(k, i - 1);
                let y = *q.get(k, i);
                *q.get_mut(k, i - 1) = g.c * x + g.s * y;
                *q.get_mut(k, i) = g.c * y - g.s * x;
            }
        }
    }
}

/// QR decomposition of a fixed-size square matrix.
///
/// `Q` starts as the identity and accumulates rotations; `R` starts as a
/// copy of `A` and is reduced in place. The source matrix is untouched.
///
/// # Example
///
/// ```
/// use smallmat::Matrix;
///
/// let a = Matrix::new([[12.0_f64, -51.0, 4.0], [6.0, 167.0, -68.0], [-4.0, 24.0, -41.0]]);
/// let qr = a.qr();
/// let back = qr.q() * qr.r();
/// assert!(back.approx_eq(&a, 1e-10));
/// assert!(qr.r().is_upper_triangular(0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QrDecomposition<T, const N: usize> {
    q: Matrix<T, N, N>,
    r: Matrix<T, N, N>,
}

impl<T: FloatScalar, const N: usize> QrDecomposition<T, N> {
    pub fn new(a: &Matrix<T, N, N>) -> Self {
        let mut r = *a;
        let mut q = Matrix::eye();
        givens_qr_square(&mut r, &mut q);
        Self { q, r }
    }

    /// Orthogonal factor.
    pub fn q(&self) -> Matrix<T, N, N> {
        self.q
    }

    /// Upper-triangular factor.
    pub fn r(&self) -> Matrix<T, N, N> {
        self.r
    }

    pub fn into_parts(self) -> (Matrix<T, N, N>, Matrix<T, N, N>) {
        (self.q, self.r)
    }

    /// Solve `Ax = b` as `R x = Qᵀ b` by back substitution.
    ///
    /// Fails with [`LinalgError::Singular`] if a diagonal entry of R is within
    /// `tol` of zero.
    pub fn solve(&self, b: &Vector<T, N>, tol: T) -> Result<Vector<T, N>, LinalgError> {
        let qtb = self.q.transpose().vecmul(b);
        let mut x = Vector::zeros();
        for i in (0..N).rev() {
            let d = self.r[(i, i)];
            if is_zero(d, tol) {
                return Err(LinalgError::Singular);
            }
            let mut sum = qtb[i];
            for j in (i + 1)..N {
                sum = sum - self.r[(i, j)] * x[j];
            }
            x[i] = sum / d;
        }
        Ok(x)
    }

    /// Determinant of the original matrix. Every rotation has determinant 1,
    /// so this is the product of R's diagonal.
    pub fn det(&self) -> T {
        let mut d = T::one();
        for i in 0..N {
            d = d * self.r[(i, i)];
        }
        d
    }
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// QR decomposition using Givens rotations. Never fails.
    pub fn qr(&self) -> QrDecomposition<T, N> {
        QrDecomposition::new(self)
    }

    /// Solve `Ax = b` via QR decomposition.
    pub fn solve_qr(&self, b: &Vector<T, N>) -> Result<Vector<T, N>, LinalgError> {
        self.qr().solve(b, T::default_tol())
    }
}
