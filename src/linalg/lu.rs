use crate::linalg::{check_len, check_square, LinalgError, Permutation};
use crate::matrix::vector::Vector;
use crate::tolerance::is_zero;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use crate::Matrix;

/// What [`Matrix::inverse_with`] does when the matrix is singular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularPolicy {
    /// Return [`LinalgError::Singular`].
    #[default]
    Fail,
    /// Log a warning and return the identity matrix instead.
    Identity,
}

/// Crout LU decomposition with scaled partial pivoting, in place.
///
/// Every row is weighted by the reciprocal of its largest magnitude before
/// elimination starts, and the pivot for column `j` is the candidate row
/// maximizing `scale[row] * |entry|`. Row swaps are applied to `a` and
/// recorded in `perm`, composing with the identity it is reset to.
///
/// On return, `a` contains both L and U packed together:
/// - Upper triangle (including diagonal): U
/// - Lower triangle (excluding diagonal): L (diagonal of L is implicitly 1)
///
/// and `P·A = L·U` holds for the original `A`, with `P` given by `perm`.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] if `a` is not `N × N`;
/// [`LinalgError::Singular`] if a row is entirely zero or a pivot is exactly zero.
pub fn lu_in_place<T: FloatScalar, const N: usize>(
    a: &mut impl MatrixMut<T>,
    perm: &mut Permutation<N>,
) -> Result<(), LinalgError> {
    check_square(&*a, N)?;
    *perm = Permutation::identity();

    // Implicit row scaling
    let mut scale = [T::zero(); N];
    for (i, s) in scale.iter_mut().enumerate() {
        let mut big = T::zero();
        for j in 0..N {
            big = big.max(a.get(i, j).abs());
        }
        if is_zero(big, T::zero()) {
            return Err(LinalgError::Singular);
        }
        *s = T::one() / big;
    }

    for j in 0..N {
        // U entries above the diagonal
        for i in 0..j {
            let mut sum = *a.get(i, j);
            for k in 0..i {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;
        }

        // Diagonal and L candidates, tracking the best scaled pivot
        let mut big = T::zero();
        let mut imax = j;
        for i in j..N {
            let mut sum = *a.get(i, j);
            for k in 0..j {
                sum = sum - *a.get(i, k) * *a.get(k, j);
            }
            *a.get_mut(i, j) = sum;

            let weighted = scale[i] * sum.abs();
            if weighted > big {
                big = weighted;
                imax = i;
            }
        }

        if imax != j {
            a.swap_rows_in_place(imax, j);
            perm.swap(imax, j);
            scale.swap(imax, j);
        }

        let pivot = *a.get(j, j);
        if is_zero(pivot, T::zero()) {
            return Err(LinalgError::Singular);
        }

        let inv_pivot = T::one() / pivot;
        for i in (j + 1)..N {
            *a.get_mut(i, j) = *a.get(i, j) * inv_pivot;
        }
    }

    Ok(())
}

/// Solve `Ax = b` given the packed LU factors and permutation from
/// [`lu_in_place`].
///
/// Permutes `b`, solves `Ly = Pb` by forward substitution (unit diagonal),
/// then `Ux = y` by back substitution.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] if `lu` is not `N × N` or either slice
/// does not have length `N`.
pub fn lu_solve<T: FloatScalar, const N: usize>(
    lu: &impl MatrixRef<T>,
    perm: &Permutation<N>,
    b: &[T],
    x: &mut [T],
) -> Result<(), LinalgError> {
    check_square(lu, N)?;
    check_len(b.len(), N)?;
    check_len(x.len(), N)?;
    substitute(lu, perm.as_slice(), b, x);
    Ok(())
}

fn substitute<T: FloatScalar>(lu: &impl MatrixRef<T>, order: &[usize], b: &[T], x: &mut [T]) {
    let n = order.len();

    // Forward substitution: solve Ly = Pb
    for i in 0..n {
        let mut sum = b[order[i]];
        for j in 0..i {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum;
    }

    // Back substitution: solve Ux = y
    for i in (0..n).rev() {
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - *lu.get(i, j) * x[j];
        }
        x[i] = sum / *lu.get(i, i);
    }
}

/// LU decomposition of a fixed-size square matrix.
///
/// Stores the packed L/U factors and the row permutation.
/// Use `solve()`, `inverse()`, or `det()` to work with the decomposition.
///
/// # Example
///
/// ```
/// use smallmat::{Matrix, Vector};
///
/// let a = Matrix::new([[2.0_f64, 1.0], [5.0, 3.0]]);
/// let lu = a.lu().unwrap();
///
/// let b = Vector::from_array([4.0, 11.0]);
/// let x = lu.solve(&b);
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
///
/// assert!((lu.det() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LuDecomposition<T, const N: usize> {
    lu: Matrix<T, N, N>,
    perm: Permutation<N>,
}

impl<T: FloatScalar, const N: usize> LuDecomposition<T, N> {
    /// Decompose a copy of `a`. Returns an error if the matrix is singular.
    pub fn new(a: &Matrix<T, N, N>) -> Result<Self, LinalgError> {
        let mut lu = *a;
        let mut perm = Permutation::identity();
        lu_in_place(&mut lu, &mut perm)?;
        Ok(Self { lu, perm })
    }

    /// Solve Ax = b for x.
    pub fn solve(&self, b: &Vector<T, N>) -> Vector<T, N> {
        let mut x = [T::zero(); N];
        substitute(&self.lu, self.perm.as_slice(), &b.to_array(), &mut x);
        Vector::from_array(x)
    }

    /// Compute the matrix inverse by solving against each identity column.
    pub fn inverse(&self) -> Matrix<T, N, N> {
        let mut inv = Matrix::<T, N, N>::zeros();
        let mut e = [T::zero(); N];
        let mut col_buf = [T::zero(); N];

        for col in 0..N {
            if col > 0 {
                e[col - 1] = T::zero();
            }
            e[col] = T::one();
            substitute(&self.lu, self.perm.as_slice(), &e, &mut col_buf);
            inv.data[col] = col_buf;
        }

        inv
    }

    /// Compute the determinant.
    pub fn det(&self) -> T {
        let mut d: T = self.perm.sign();
        for i in 0..N {
            d = d * self.lu[(i, i)];
        }
        d
    }

    /// Unit lower-triangular factor.
    pub fn l(&self) -> Matrix<T, N, N> {
        let mut l = Matrix::eye();
        for j in 0..N {
            for i in (j + 1)..N {
                l[(i, j)] = self.lu[(i, j)];
            }
        }
        l
    }

    /// Upper-triangular factor.
    pub fn u(&self) -> Matrix<T, N, N> {
        let mut u = Matrix::zeros();
        for j in 0..N {
            for i in 0..=j {
                u[(i, j)] = self.lu[(i, j)];
            }
        }
        u
    }

    /// Permutation matrix with `P·A = L·U`.
    pub fn p(&self) -> Matrix<T, N, N> {
        self.perm.to_matrix()
    }

    pub fn permutation(&self) -> &Permutation<N> {
        &self.perm
    }

    /// Packed L/U factors as produced by [`lu_in_place`].
    pub fn packed(&self) -> &Matrix<T, N, N> {
        &self.lu
    }
}

/// Convenience methods on square matrices.
impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// LU decomposition with scaled partial pivoting.
    pub fn lu(&self) -> Result<LuDecomposition<T, N>, LinalgError> {
        LuDecomposition::new(self)
    }

    /// Solve `Ax = b` for `x` via LU decomposition.
    ///
    /// ```
    /// use smallmat::{Matrix, Vector};
    /// let a = Matrix::new([
    ///     [2.0_f64, 1.0, -1.0],
    ///     [-3.0, -1.0, 2.0],
    ///     [-2.0, 1.0, 2.0],
    /// ]);
    /// let b = Vector::from_array([8.0, -11.0, -3.0]);
    /// let x = a.solve(&b).unwrap();
    /// assert!((x[0] - 2.0).abs() < 1e-12);
    /// assert!((x[1] - 3.0).abs() < 1e-12);
    /// assert!((x[2] - (-1.0)).abs() < 1e-12);
    /// ```
    pub fn solve(&self, b: &Vector<T, N>) -> Result<Vector<T, N>, LinalgError> {
        Ok(self.lu()?.solve(b))
    }

    /// Matrix inverse; fails with [`LinalgError::Singular`] when the LU
    /// factorization breaks down or `|det|` is within the default tolerance
    /// of zero.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let a = Matrix::new([[4.0_f64, 7.0], [2.0, 6.0]]);
    /// let a_inv = a.inverse().unwrap();
    /// let id = a * a_inv;
    /// assert!((id[(0, 0)] - 1.0).abs() < 1e-12);
    /// assert!((id[(0, 1)]).abs() < 1e-12);
    /// ```
    pub fn inverse(&self) -> Result<Self, LinalgError> {
        self.inverse_with(SingularPolicy::Fail, T::default_tol())
    }

    /// Matrix inverse with an explicit singular-matrix policy.
    ///
    /// The matrix counts as singular when LU fails or `|det| <= tol`.
    /// Under [`SingularPolicy::Identity`] a warning is logged and the identity
    /// is returned, so the substitution is never silent.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// use smallmat::linalg::SingularPolicy;
    ///
    /// let singular = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0]]);
    /// let fallback = singular.inverse_with(SingularPolicy::Identity, 1e-14).unwrap();
    /// assert_eq!(fallback, Matrix::eye());
    /// ```
    pub fn inverse_with(&self, policy: SingularPolicy, tol: T) -> Result<Self, LinalgError> {
        if let Ok(lu) = self.lu() {
            if !is_zero(lu.det(), tol) {
                return Ok(lu.inverse());
            }
        }
        match policy {
            SingularPolicy::Fail => Err(LinalgError::Singular),
            SingularPolicy::Identity => {
                tracing::warn!(dim = N, "singular matrix inverse replaced by identity");
                Ok(Self::eye())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn assert_mat_near<const N: usize>(a: &Matrix<f64, N, N>, b: &Matrix<f64, N, N>, tol: f64) {
        for i in 0..N {
            for j in 0..N {
                assert!(
                    (a[(i, j)] - b[(i, j)]).abs() < tol,
                    "[({},{})] = {}, expected {}",
                    i,
                    j,
                    a[(i, j)],
                    b[(i, j)]
                );
            }
        }
    }

    #[test]
    fn lu_solve_2x2() {
        // 3x + 2y = 7
        // x + 4y = 9
        let a = Matrix::new([[3.0_f64, 2.0], [1.0, 4.0]]);
        let b = Vector::from_array([7.0, 9.0]);

        let x = a.solve(&b).unwrap();
        assert!((x[0] - 1.0).abs() < TOL);
        assert!((x[1] - 2.0).abs() < TOL);
    }

    #[test]
    fn factors_reproduce_permuted_matrix() {
        let a = Matrix::new([
            [1.0_f64, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [2.0, 6.0, 4.0, 1.0],
            [3.0, 1.0, 9.0, 2.0],
        ]);
        let lu = a.lu().unwrap();
        assert_mat_near(&(lu.p() * a), &(lu.l() * lu.u()), TOL);
        assert!(lu.u().is_upper_triangular(0.0));
        for i in 0..4 {
            assert_eq!(lu.l()[(i, i)], 1.0);
        }
    }

    #[test]
    fn scaled_pivot_prefers_small_row() {
        // Unscaled pivoting would keep row 0 (|2| > |1|), but relative to its
        // row magnitude row 1 dominates.
        let a = Matrix::new([[2.0_f64, 10000.0], [1.0, 1.0]]);
        let lu = a.lu().unwrap();
        assert_eq!(lu.permutation().as_slice(), &[1, 0]);
        assert_mat_near(&(lu.p() * a), &(lu.l() * lu.u()), 1e-9);
    }

    #[test]
    fn inverse_3x3_known_values() {
        let a = Matrix::new([[3.0_f64, 0.0, 2.0], [2.0, 0.0, -2.0], [0.0, 1.0, 1.0]]);
        let expected = Matrix::new([[0.2, 0.2, 0.0], [-0.2, 0.3, 1.0], [0.2, -0.3, 0.0]]);
        assert_mat_near(&a.inverse().unwrap(), &expected, TOL);
    }

    #[test]
    fn lu_det() {
        let a = Matrix::new([[3.0_f64, 8.0], [4.0, 6.0]]);
        let lu = a.lu().unwrap();
        assert!((lu.det() - (-14.0)).abs() < TOL);
    }

    #[test]
    fn lu_singular() {
        let a = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0]]);
        assert_eq!(a.lu().unwrap_err(), LinalgError::Singular);

        let zero_row = Matrix::new([[1.0_f64, 2.0, 3.0], [0.0, 0.0, 0.0], [4.0, 5.0, 6.0]]);
        assert_eq!(zero_row.lu().unwrap_err(), LinalgError::Singular);
    }

    #[test]
    fn inverse_policy() {
        let a = Matrix::new([[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(
            a.inverse_with(SingularPolicy::Fail, 1e-12).unwrap_err(),
            LinalgError::Singular
        );
        assert_eq!(
            a.inverse_with(SingularPolicy::Identity, 1e-12).unwrap(),
            Matrix::eye()
        );

        // Nonsingular input ignores the policy
        let b = Matrix::new([[4.0_f64, 7.0], [2.0, 6.0]]);
        let inv = b.inverse_with(SingularPolicy::Identity, 1e-12).unwrap();
        assert_mat_near(&(b * inv), &Matrix::eye(), TOL);
    }

    #[test]
    fn lu_in_place_generic() {
        let mut a = Matrix::new([[2.0_f64, 1.0], [4.0, 3.0]]);
        let mut perm: Permutation<2> = Permutation::identity();
        lu_in_place(&mut a, &mut perm).unwrap();

        let mut x = [0.0; 2];
        lu_solve(&a, &perm, &[3.0, 7.0], &mut x).unwrap();
        assert!((x[0] - 1.0).abs() < TOL);
        assert!((x[1] - 1.0).abs() < TOL);
    }

    #[test]
    fn lu_solve_dimension_mismatch() {
        let mut a = Matrix::new([[2.0_f64, 1.0], [4.0, 3.0]]);
        let mut perm: Permutation<2> = Permutation::identity();
        lu_in_place(&mut a, &mut perm).unwrap();

        let mut x = [0.0; 2];
        assert_eq!(
            lu_solve(&a, &perm, &[1.0, 2.0, 3.0], &mut x).unwrap_err(),
            LinalgError::DimensionMismatch { expected: 2, found: 3 }
        );

        let mut wrong_size: Permutation<3> = Permutation::identity();
        assert_eq!(
            lu_in_place(&mut a, &mut wrong_size).unwrap_err(),
            LinalgError::DimensionMismatch { expected: 3, found: 2 }
        );
    }

    #[test]
    fn solve_verify_residual() {
        let a = Matrix::new([
            [1.0_f64, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [2.0, 6.0, 4.0, 1.0],
            [3.0, 1.0, 9.0, 2.0],
        ]);
        let b = Vector::from_array([10.0, 26.0, 13.0, 15.0]);

        let x = a.solve(&b).unwrap();
        let ax = a.vecmul(&x);
        for i in 0..4 {
            assert!((ax[i] - b[i]).abs() < 1e-10, "residual[{}] = {}", i, ax[i] - b[i]);
        }
    }
}
