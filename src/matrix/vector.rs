use core::ops::{Index, IndexMut};

use crate::traits::{FloatScalar, Scalar};
use crate::Matrix;

/// A row vector (1×N matrix).
///
/// Vectors support single-index access (`v[i]`), dot products, norms, outer
/// products, and cross products (3-element vectors).
///
/// # Examples
///
/// ```
/// use smallmat::Vector;
///
/// let v = Vector::from_array([3.0_f64, 4.0]);
/// assert_eq!(v[0], 3.0);
/// assert_eq!(v.dot(&v), 25.0);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// ```
pub type Vector<T, const N: usize> = Matrix<T, 1, N>;

/// A 3-element row vector, the only size with [`Vector3::cross`].
pub type Vector3<T> = Vector<T, 3>;

impl<T: Scalar, const N: usize> Vector<T, N> {
    /// Create a vector from a 1D array.
    #[inline]
    pub fn from_array(data: [T; N]) -> Self {
        Self::new([data])
    }

    /// Copy the components out into a plain array.
    #[inline]
    pub fn to_array(&self) -> [T; N] {
        let mut out = [T::zero(); N];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self[i];
        }
        out
    }

    /// Number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// `true` for the zero-length vector.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Dot product of two vectors.
    ///
    /// ```
    /// use smallmat::Vector;
    /// let a = Vector::from_array([1.0, 2.0, 3.0]);
    /// let b = Vector::from_array([4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        let mut sum = T::zero();
        for i in 0..N {
            sum = sum + self[(0, i)] * rhs[(0, i)];
        }
        sum
    }

    /// Outer product: `v.outer(w)` → N×P matrix where `result[i][j] = v[i] * w[j]`.
    ///
    /// ```
    /// use smallmat::Vector;
    /// let a = Vector::from_array([1.0, 2.0]);
    /// let b = Vector::from_array([3.0, 4.0, 5.0]);
    /// let m = a.outer(&b);
    /// assert_eq!(m[(0, 0)], 3.0);
    /// assert_eq!(m[(1, 2)], 10.0);
    /// ```
    pub fn outer<const P: usize>(&self, rhs: &Vector<T, P>) -> Matrix<T, N, P> {
        let mut out = Matrix::<T, N, P>::zeros();
        for i in 0..N {
            for j in 0..P {
                out[(i, j)] = self[i] * rhs[j];
            }
        }
        out
    }
}

impl<T: FloatScalar, const N: usize> Vector<T, N> {
    /// Euclidean norm.
    pub fn norm(&self) -> T {
        self.dot(self).sqrt()
    }
}

impl<T: Scalar> Vector3<T> {
    /// Cross product of two 3-vectors.
    ///
    /// ```
    /// use smallmat::Vector3;
    /// let x = Vector3::from_array([1.0, 0.0, 0.0]);
    /// let y = Vector3::from_array([0.0, 1.0, 0.0]);
    /// let z = x.cross(&y);
    /// assert_eq!(z[2], 1.0);
    /// ```
    #[inline]
    pub fn cross(&self, rhs: &Self) -> Self {
        Self::from_array([
            self[1] * rhs[2] - self[2] * rhs[1],
            self[2] * rhs[0] - self[0] * rhs[2],
            self[0] * rhs[1] - self[1] * rhs[0],
        ])
    }
}

// Single-index access: v[i] instead of v[(0, i)]
impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self[(0, i)]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self[(0, i)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_array_and_index() {
        let mut v = Vector::from_array([1.0, 2.0, 3.0]);
        assert_eq!(v[1], 2.0);
        v[2] = 9.0;
        assert_eq!(v.to_array(), [1.0, 2.0, 9.0]);
        assert_eq!(v.len(), 3);
    }

    #[test]
    fn norm_of_pythagorean_triple() {
        let v = Vector::from_array([2.0_f64, 3.0, 6.0]);
        assert!((v.norm() - 7.0).abs() < 1e-14);
    }

    #[test]
    fn cross_product_anticommutative() {
        let a = Vector3::from_array([1.0, 2.0, 3.0]);
        let b = Vector3::from_array([4.0, 5.0, 6.0]);
        let ab = a.cross(&b);
        let ba = b.cross(&a);
        for i in 0..3 {
            assert_eq!(ab[i], -ba[i]);
        }
        assert_eq!(ab.dot(&a), 0.0);
    }

    #[test]
    fn outer_product_square() {
        let v = Vector::from_array([1.0, 2.0, 3.0]);
        let m = v.outer(&v);
        assert_eq!(m[(1, 2)], 6.0);
        assert_eq!(m[(2, 1)], 6.0);
        assert_eq!(m[(2, 2)], 9.0);
    }
}
