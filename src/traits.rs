use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by every kernel routine (decompositions, rank, eigenvalues,
/// polynomial and complex roots). Carries the default tolerances used when
/// the caller does not supply one.
pub trait FloatScalar: Scalar + Float {
    /// Absolute tolerance for degeneracy checks (discriminants, pivots,
    /// negligible entries).
    fn default_tol() -> Self;

    /// Convergence tolerance for Newton refinement of cube roots.
    fn newton_tol() -> Self;

    /// Lossless-enough conversion from an `f64` literal.
    fn lit(x: f64) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty => $tol:expr, $newton:expr);* $(;)?) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn default_tol() -> $t { $tol }
                #[inline] fn newton_tol() -> $t { $newton }
                #[inline] fn lit(x: f64) -> $t { x as $t }
            }
        )*
    };
}

impl_float_scalar! {
    f32 => 1e-6, 1e-6;
    f64 => 1e-14, 1e-15;
}

/// Read-only access to a matrix-like type.
///
/// This trait allows algorithms to operate generically over any
/// matrix storage that exposes `(row, col)` access.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (LU, Givens QR, row echelon) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Swap two rows across every column.
    fn swap_rows_in_place(&mut self, a: usize, b: usize)
    where
        T: Copy,
    {
        if a == b {
            return;
        }
        for j in 0..self.ncols() {
            let tmp = *self.get(a, j);
            *self.get_mut(a, j) = *self.get(b, j);
            *self.get_mut(b, j) = tmp;
        }
    }
}
