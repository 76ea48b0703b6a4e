//! Type aliases for the square sizes the kernels target.

use crate::matrix::vector::Vector;
use crate::Matrix;

/// 2×2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;
/// 3×3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;
/// 4×4 matrix.
pub type Matrix4<T> = Matrix<T, 4, 4>;

/// A 2-element row vector.
pub type Vector2<T> = Vector<T, 2>;
/// A 4-element row vector.
pub type Vector4<T> = Vector<T, 4>;
