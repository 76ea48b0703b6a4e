//! Factorizations and eigenvalue kernels for small dense matrices.
//!
//! Free functions (`lu_in_place`, `givens_qr_in_place`, `row_echelon_in_place`,
//! `hessenberg_in_place`, `qr_step`) mutate the buffers they are given.
//! Wrapper structs (`LuDecomposition`, `QrDecomposition`,
//! `HessenbergDecomposition`) clone their input first and return fresh
//! results; the source matrix is never modified.

pub(crate) mod eigen;
pub(crate) mod hessenberg;
pub(crate) mod lu;
pub(crate) mod permutation;
pub(crate) mod qr;
pub(crate) mod rank;

pub use eigen::{eigenvalues_qr, QrIterSettings};
pub use hessenberg::{
    double_shift_qr_step, hessenberg_in_place, householder_reflector, qr_step, wilkinson_shift,
    HessenbergDecomposition,
};
pub use lu::{lu_in_place, lu_solve, LuDecomposition, SingularPolicy};
pub use permutation::Permutation;
pub use qr::{givens, givens_qr_in_place, Givens, QrDecomposition};
pub use rank::row_echelon_in_place;

use crate::traits::MatrixRef;

/// Errors from linear algebra and root-extraction operations.
///
/// Returned by decomposition constructors and convenience methods
/// (`solve`, `inverse`, `lu`, `eigenvalues`, `cube_roots`).
///
/// ```
/// use smallmat::Matrix;
/// use smallmat::linalg::LinalgError;
///
/// let singular = Matrix::new([[1.0_f64, 2.0], [2.0, 4.0]]);
/// assert_eq!(singular.inverse().unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// Matrix is singular or nearly singular.
    #[error("matrix is singular")]
    Singular,
    /// Operand dimensions disagree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Row or column index outside the matrix.
    #[error("index {index} out of range for dimension {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// Iterative algorithm did not converge within the iteration budget.
    #[error("iterative algorithm did not converge after {iterations} iterations")]
    ConvergenceFailure { iterations: usize },
}

pub(crate) fn check_square<T>(a: &impl MatrixRef<T>, n: usize) -> Result<(), LinalgError> {
    check_len(a.nrows(), n)?;
    check_len(a.ncols(), n)
}

#[inline]
pub(crate) fn check_len(found: usize, expected: usize) -> Result<(), LinalgError> {
    if found == expected {
        Ok(())
    } else {
        Err(LinalgError::DimensionMismatch { expected, found })
    }
}
