use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::matrix::vector::Vector;
use crate::traits::Scalar;
use crate::Matrix;

// ── Element-wise addition / subtraction ─────────────────────────────

macro_rules! impl_elementwise {
    ($Op:ident, $method:ident, $OpAssign:ident, $method_assign:ident, $op:tt) => {
        impl<T: Scalar, const M: usize, const N: usize> $Op for Matrix<T, M, N> {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                let mut out = self;
                out.$method_assign(rhs);
                out
            }
        }

        impl<T: Scalar, const M: usize, const N: usize> $OpAssign for Matrix<T, M, N> {
            fn $method_assign(&mut self, rhs: Self) {
                for (x, &y) in self.as_mut_slice().iter_mut().zip(rhs.as_slice()) {
                    *x = *x $op y;
                }
            }
        }

        impl<T: Scalar, const M: usize, const N: usize> $OpAssign<&Matrix<T, M, N>>
            for Matrix<T, M, N>
        {
            fn $method_assign(&mut self, rhs: &Matrix<T, M, N>) {
                self.$method_assign(*rhs);
            }
        }

        // Matrix is Copy, so &Matrix ops just deref and delegate.
        impl<T: Scalar, const M: usize, const N: usize> $Op<&Matrix<T, M, N>> for Matrix<T, M, N> {
            type Output = Matrix<T, M, N>;
            fn $method(self, rhs: &Matrix<T, M, N>) -> Matrix<T, M, N> {
                self.$method(*rhs)
            }
        }

        impl<T: Scalar, const M: usize, const N: usize> $Op<&Matrix<T, M, N>> for &Matrix<T, M, N> {
            type Output = Matrix<T, M, N>;
            fn $method(self, rhs: &Matrix<T, M, N>) -> Matrix<T, M, N> {
                (*self).$method(*rhs)
            }
        }
    };
}

impl_elementwise!(Add, add, AddAssign, add_assign, +);
impl_elementwise!(Sub, sub, SubAssign, sub_assign, -);

// ── Negation ────────────────────────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Neg for Matrix<T, M, N> {
    type Output = Self;

    fn neg(self) -> Self {
        let mut out = self;
        for x in out.as_mut_slice() {
            *x = T::zero() - *x;
        }
        out
    }
}

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<Matrix<T, N, P>>
    for Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;

    fn mul(self, rhs: Matrix<T, N, P>) -> Matrix<T, M, P> {
        let mut out = Matrix::<T, M, P>::zeros();
        for i in 0..M {
            for j in 0..P {
                let mut sum = T::zero();
                for k in 0..N {
                    sum = sum + self[(i, k)] * rhs[(k, j)];
                }
                out[(i, j)] = sum;
            }
        }
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize, const P: usize> Mul<&Matrix<T, N, P>>
    for &Matrix<T, M, N>
{
    type Output = Matrix<T, M, P>;
    fn mul(self, rhs: &Matrix<T, N, P>) -> Matrix<T, M, P> {
        (*self).mul(*rhs)
    }
}

// ── Scalar multiplication: matrix * scalar ──────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Mul<T> for Matrix<T, M, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        let mut out = self;
        out *= rhs;
        out
    }
}

impl<T: Scalar, const M: usize, const N: usize> MulAssign<T> for Matrix<T, M, N> {
    fn mul_assign(&mut self, rhs: T) {
        for x in self.as_mut_slice() {
            *x = *x * rhs;
        }
    }
}

// ── scalar * matrix (concrete impls to avoid orphan rules) ──────────

macro_rules! impl_scalar_mul {
    ($($t:ty),*) => {
        $(
            impl<const M: usize, const N: usize> Mul<Matrix<$t, M, N>> for $t {
                type Output = Matrix<$t, M, N>;

                fn mul(self, rhs: Matrix<$t, M, N>) -> Matrix<$t, M, N> {
                    rhs * self
                }
            }
        )*
    };
}

impl_scalar_mul!(f32, f64);

// ── Products used by the kernels ────────────────────────────────────

impl<T: Scalar, const M: usize, const N: usize> Matrix<T, M, N> {
    /// Matrix-vector product: A * v → result.
    ///
    /// Takes and returns row vectors for convenience, avoiding
    /// explicit transpose. Equivalent to `(A * v^T)^T`.
    pub fn vecmul(&self, v: &Vector<T, N>) -> Vector<T, M> {
        let mut out = Vector::<T, M>::zeros();
        for i in 0..M {
            let mut sum = T::zero();
            for j in 0..N {
                sum = sum + self[(i, j)] * v[j];
            }
            out[i] = sum;
        }
        out
    }

    /// Transpose: (M×N) → (N×M).
    pub fn transpose(&self) -> Matrix<T, N, M> {
        let mut out = Matrix::<T, N, M>::zeros();
        for i in 0..M {
            for j in 0..N {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Rank-one update in place: `A += alpha * u * v^T`.
    ///
    /// This is the update quasi-Newton methods apply to their Hessian
    /// approximation.
    ///
    /// ```
    /// use smallmat::{Matrix2, Vector};
    /// let mut a = Matrix2::<f64>::eye();
    /// let u = Vector::from_array([1.0, 2.0]);
    /// a.rank_one_update(0.5, &u, &u);
    /// assert_eq!(a[(0, 0)], 1.5);
    /// assert_eq!(a[(0, 1)], 1.0);
    /// assert_eq!(a[(1, 1)], 3.0);
    /// ```
    pub fn rank_one_update(&mut self, alpha: T, u: &Vector<T, M>, v: &Vector<T, N>) {
        for j in 0..N {
            let scaled = alpha * v[j];
            for i in 0..M {
                self[(i, j)] = self[(i, j)] + u[i] * scaled;
            }
        }
    }
}
