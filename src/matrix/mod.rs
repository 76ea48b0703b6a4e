pub mod aliases;
mod ops;
mod square;
mod util;
pub mod vector;

use core::ops::{Index, IndexMut};

use crate::linalg::LinalgError;
use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Fixed-size matrix with `M` rows and `N` columns.
///
/// Storage is column-major: `data[col][row]`, which is one contiguous
/// column-major buffer of `M * N` coefficients (see [`Matrix::as_slice`]).
/// Stack-allocated, no-std compatible. Decompositions never cache state on
/// the matrix; they return fresh structures.
///
/// # Examples
///
/// ```
/// use smallmat::Matrix;
///
/// let a = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b: Matrix<f64, 3, 3> = Matrix::eye();
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const M: usize, const N: usize> {
    pub(crate) data: [[T; M]; N],
}

impl<T, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix from a row-major 2D array.
    ///
    /// The input is `[[row0], [row1], ...]` (M arrays of N elements each).
    /// Internally transposed to column-major storage.
    #[inline]
    pub fn new(rows: [[T; N]; M]) -> Self
    where
        T: Copy,
    {
        let init = rows[0][0];
        let mut data: [[T; M]; N] = [[init; M]; N];
        for (col, column) in data.iter_mut().enumerate() {
            for (row, slot) in column.iter_mut().enumerate() {
                *slot = rows[row][col];
            }
        }
        Self { data }
    }

    /// Number of rows.
    #[inline]
    pub const fn nrows(&self) -> usize {
        M
    }

    /// Number of columns.
    #[inline]
    pub const fn ncols(&self) -> usize {
        N
    }

    /// Column-major view of all `M * N` coefficients.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let m = Matrix::new([[1.0, 2.0], [3.0, 4.0]]);
    /// assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// ```
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    /// Mutable column-major view of all coefficients.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }
}

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Create a matrix filled with zeros.
    pub fn zeros() -> Self {
        Self {
            data: [[T::zero(); M]; N],
        }
    }

    /// Build a matrix from a column-major buffer.
    ///
    /// Fails with [`LinalgError::DimensionMismatch`] unless the buffer holds
    /// exactly `M * N` coefficients.
    ///
    /// ```
    /// use smallmat::Matrix2;
    /// use smallmat::linalg::LinalgError;
    ///
    /// let m = Matrix2::from_column_slice(&[1.0, 3.0, 2.0, 4.0]).unwrap();
    /// assert_eq!(m[(0, 1)], 2.0);
    ///
    /// let err = Matrix2::<f64>::from_column_slice(&[1.0, 2.0, 3.0]).unwrap_err();
    /// assert_eq!(err, LinalgError::DimensionMismatch { expected: 4, found: 3 });
    /// ```
    pub fn from_column_slice(buf: &[T]) -> Result<Self, LinalgError> {
        if buf.len() != M * N {
            return Err(LinalgError::DimensionMismatch {
                expected: M * N,
                found: buf.len(),
            });
        }
        let mut m = Self::zeros();
        m.as_mut_slice().copy_from_slice(buf);
        Ok(m)
    }
}

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Create an identity matrix (square matrices only).
    pub fn eye() -> Self {
        let mut m = Self::zeros();
        for i in 0..N {
            m.data[i][i] = T::one();
        }
        m
    }
}

impl<T, const M: usize, const N: usize> MatrixRef<T> for Matrix<T, M, N> {
    #[inline]
    fn nrows(&self) -> usize {
        M
    }

    #[inline]
    fn ncols(&self) -> usize {
        N
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col][row]
    }
}

impl<T, const M: usize, const N: usize> MatrixMut<T> for Matrix<T, M, N> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col][row]
    }
}

// Index by (row, col) tuple
impl<T, const M: usize, const N: usize> Index<(usize, usize)> for Matrix<T, M, N> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[col][row]
    }
}

impl<T, const M: usize, const N: usize> IndexMut<(usize, usize)> for Matrix<T, M, N> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[col][row]
    }
}

pub use aliases::*;
