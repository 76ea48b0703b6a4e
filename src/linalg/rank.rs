use crate::tolerance::is_zero;
use crate::traits::{FloatScalar, MatrixMut};
use crate::Matrix;

/// Reduce `a` to reduced row-echelon form in place (Gauss-Jordan).
///
/// For each column the remaining row with the largest magnitude becomes the
/// pivot row; it is swapped up, scaled so the pivot is one, and the column is
/// eliminated both below and above it. Columns whose best candidate is within
/// `tol` of zero are cleared and skipped. Returns the number of pivots found.
///
/// ```
/// use smallmat::Matrix;
/// use smallmat::linalg::row_echelon_in_place;
///
/// let mut a = Matrix::new([[2.0_f64, 4.0], [1.0, 3.0]]);
/// assert_eq!(row_echelon_in_place(&mut a, 1e-14), 2);
/// assert!(a.approx_eq(&Matrix::eye(), 1e-14));
/// ```
pub fn row_echelon_in_place<T: FloatScalar>(a: &mut impl MatrixMut<T>, tol: T) -> usize {
    let m = a.nrows();
    let n = a.ncols();
    let mut lead = 0usize;

    for col in 0..n {
        if lead >= m {
            break;
        }

        let mut pivot_row = lead;
        let mut best = a.get(lead, col).abs();
        for i in (lead + 1)..m {
            let v = a.get(i, col).abs();
            if v > best {
                best = v;
                pivot_row = i;
            }
        }

        if is_zero(best, tol) {
            for i in lead..m {
                *a.get_mut(i, col) = T::zero();
            }
            continue;
        }

        a.swap_rows_in_place(pivot_row, lead);

        let inv_pivot = T::one() / *a.get(lead, col);
        for k in col..n {
            *a.get_mut(lead, k) = *a.get(lead, k) * inv_pivot;
        }
        *a.get_mut(lead, col) = T::one();

        for i in 0..m {
            if i == lead {
                continue;
            }
            let factor = *a.get(i, col);
            if factor.is_zero() {
                continue;
            }
            for k in col..n {
                *a.get_mut(i, k) = *a.get(i, k) - factor * *a.get(lead, k);
            }
            *a.get_mut(i, col) = T::zero();
        }

        lead += 1;
    }

    lead
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Numerical rank.
    ///
    /// Computes R from the Givens QR, flushes entries below `100 * tol` to
    /// zero (rotation error accumulates over several entries), reduces R to
    /// row-echelon form, and counts the rows that are not entirely zero at
    /// that same threshold.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let a = Matrix::new([[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
    /// assert_eq!(a.rank(1e-14), 2);
    /// ```
    pub fn rank(&self, tol: T) -> usize {
        let threshold = T::lit(100.0) * tol;
        let mut r = self.qr().r();
        for x in r.as_mut_slice() {
            if is_zero(*x, threshold) {
                *x = T::zero();
            }
        }

        row_echelon_in_place(&mut r, threshold);

        (0..N)
            .filter(|&i| (0..N).any(|j| !is_zero(r[(i, j)], threshold)))
            .count()
    }

    /// [`rank`](Self::rank) with [`FloatScalar::default_tol`].
    pub fn rank_default(&self) -> usize {
        self.rank(T::default_tol())
    }
}
