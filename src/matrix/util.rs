use core::fmt::{self, Write as _};

use crate::linalg::LinalgError;
use crate::matrix::vector::Vector;
use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

// ── Constructors ────────────────────────────────────────────────────

impl<T, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix by calling `f(row, col)` for each element, column by
    /// column.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let m: Matrix<f64, 3, 3> = Matrix::from_fn(|i, j| {
    ///     if i == j { 1.0 } else { 0.0 }
    /// });
    /// assert_eq!(m, Matrix::eye());
    /// ```
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self
    where
        T: Copy + Default,
    {
        let mut data = [[T::default(); M]; N];
        for (j, column) in data.iter_mut().enumerate() {
            for (i, slot) in column.iter_mut().enumerate() {
                *slot = f(i, j);
            }
        }
        Self { data }
    }
}

// ── Row / Column manipulation ───────────────────────────────────────

impl<T: Copy, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Swap two rows in place.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let mut m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// m.swap_rows(0, 1);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 0)], 1.0);
    /// ```
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for column in self.data.iter_mut() {
                column.swap(a, b);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            self.data.swap(a, b);
        }
    }

    /// Checked [`swap_rows`](Self::swap_rows).
    pub fn try_swap_rows(&mut self, a: usize, b: usize) -> Result<(), LinalgError> {
        check_index(a, M)?;
        check_index(b, M)?;
        self.swap_rows(a, b);
        Ok(())
    }

    /// Checked [`swap_cols`](Self::swap_cols).
    pub fn try_swap_cols(&mut self, a: usize, b: usize) -> Result<(), LinalgError> {
        check_index(a, N)?;
        check_index(b, N)?;
        self.swap_cols(a, b);
        Ok(())
    }

    /// Checked element access.
    ///
    /// ```
    /// use smallmat::Matrix2;
    /// use smallmat::linalg::LinalgError;
    ///
    /// let m = Matrix2::<f64>::eye();
    /// assert_eq!(m.try_get(1, 1), Ok(1.0));
    /// assert_eq!(m.try_get(2, 0), Err(LinalgError::IndexOutOfRange { index: 2, len: 2 }));
    /// ```
    pub fn try_get(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        check_index(row, M)?;
        check_index(col, N)?;
        Ok(self.data[col][row])
    }
}

#[inline]
fn check_index(index: usize, len: usize) -> Result<(), LinalgError> {
    if index < len {
        Ok(())
    } else {
        Err(LinalgError::IndexOutOfRange { index, len })
    }
}

// ── Row / Column access ─────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Extract row `i` as a row vector.
    pub fn row(&self, i: usize) -> Vector<T, N> {
        let mut v = Vector::zeros();
        for j in 0..N {
            v[j] = self[(i, j)];
        }
        v
    }

    /// Set row `i` from a row vector.
    pub fn set_row(&mut self, i: usize, v: &Vector<T, N>) {
        for j in 0..N {
            self[(i, j)] = v[j];
        }
    }

    /// Extract column `j` as a row vector.
    pub fn col(&self, j: usize) -> Vector<T, M> {
        Vector::from_array(self.data[j])
    }

    /// Set column `j` from a row vector.
    pub fn set_col(&mut self, j: usize, v: &Vector<T, M>) {
        self.data[j] = v.to_array();
    }

    /// Checked [`row`](Self::row).
    pub fn try_row(&self, i: usize) -> Result<Vector<T, N>, LinalgError> {
        check_index(i, M)?;
        Ok(self.row(i))
    }

    /// Checked [`col`](Self::col).
    pub fn try_col(&self, j: usize) -> Result<Vector<T, M>, LinalgError> {
        check_index(j, N)?;
        Ok(self.col(j))
    }

    /// Checked [`set_row`](Self::set_row).
    pub fn try_set_row(&mut self, i: usize, v: &Vector<T, N>) -> Result<(), LinalgError> {
        check_index(i, M)?;
        self.set_row(i, v);
        Ok(())
    }

    /// Checked [`set_col`](Self::set_col).
    pub fn try_set_col(&mut self, j: usize, v: &Vector<T, M>) -> Result<(), LinalgError> {
        check_index(j, N)?;
        self.set_col(j, v);
        Ok(())
    }
}

// ── Comparison ──────────────────────────────────────────────────────

impl<T: FloatScalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Largest absolute coefficient.
    pub fn max_abs(&self) -> T {
        self.as_slice()
            .iter()
            .fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }

    /// Element-wise comparison within an absolute tolerance.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0]]);
    /// let b = Matrix::new([[1.0, 2.0 + 1e-13], [3.0, 4.0]]);
    /// assert!(a.approx_eq(&b, 1e-12));
    /// assert!(!a.approx_eq(&b, 1e-14));
    /// ```
    pub fn approx_eq(&self, rhs: &Self, tol: T) -> bool {
        self.as_slice()
            .iter()
            .zip(rhs.as_slice())
            .all(|(&x, &y)| crate::tolerance::is_equal(x, y, tol))
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display, const M: usize, const N: usize> fmt::Display for Matrix<T, M, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Widest entry per column, for alignment
        let mut widths = [0usize; N];
        for (j, width) in widths.iter_mut().enumerate() {
            for i in 0..M {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                *width = (*width).max(w);
            }
        }

        for i in 0..M {
            write!(f, "│")?;
            for (j, &width) in widths.iter().enumerate() {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = width)?;
            }
            write!(f, "│")?;
            if i + 1 < M {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Counts characters written, without allocating.
struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}
