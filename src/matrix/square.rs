use crate::matrix::vector::Vector;
use crate::tolerance::is_zero;
use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

impl<T: Scalar, const N: usize> Matrix<T, N, N> {
    /// Sum of diagonal elements.
    pub fn trace(&self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self[(i, i)];
        }
        sum
    }

    /// Extract the diagonal as a vector.
    pub fn diag(&self) -> Vector<T, N> {
        let mut v = Vector::zeros();
        for i in 0..N {
            v[i] = self[(i, i)];
        }
        v
    }

    /// Sum of all 2×2 principal minors.
    ///
    /// This is the second elementary symmetric function of the eigenvalues,
    /// i.e. the `λ^(N-2)` coefficient of the characteristic polynomial up to sign.
    ///
    /// ```
    /// use smallmat::Matrix;
    /// let a = Matrix::new([[3.0, 2.0, 4.0], [2.0, 0.0, 2.0], [4.0, 2.0, 3.0]]);
    /// assert_eq!(a.principal_minor_sum(), -15.0);
    /// ```
    pub fn principal_minor_sum(&self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            for j in (i + 1)..N {
                sum = sum + self[(i, i)] * self[(j, j)] - self[(i, j)] * self[(j, i)];
            }
        }
        sum
    }

    /// Check if the matrix is symmetric (A == A^T).
    pub fn is_symmetric(&self) -> bool {
        for i in 0..N {
            for j in (i + 1)..N {
                if self[(i, j)] != self[(j, i)] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Determinant from the pivoted LU factorization; zero when singular.
    pub fn det(&self) -> T {
        match self.lu() {
            Ok(lu) => lu.det(),
            Err(_) => T::zero(),
        }
    }

    /// Every entry below the diagonal is within `tol` of zero.
    pub fn is_upper_triangular(&self, tol: T) -> bool {
        (0..N).all(|j| ((j + 1)..N).all(|i| is_zero(self[(i, j)], tol)))
    }

    /// Every entry two or more below the diagonal is within `tol` of zero.
    pub fn is_upper_hessenberg(&self, tol: T) -> bool {
        (0..N).all(|j| ((j + 2)..N).all(|i| is_zero(self[(i, j)], tol)))
    }
}
