//! # smallmat
//!
//! Dense linear-algebra and root-finding kernels for small fixed-size
//! matrices (2×2, 3×3, 4×4), no-std compatible. Everything is stack-allocated
//! and created fresh per call; the crate holds no global state.
//!
//! ## Quick start
//!
//! ```
//! use smallmat::{Matrix, Matrix3, Vector};
//!
//! // Solve a linear system Ax = b through the scaled-pivot LU
//! let a = Matrix::new([
//!     [2.0_f64, 1.0, -1.0],
//!     [-3.0, -1.0, 2.0],
//!     [-2.0, 1.0, 2.0],
//! ]);
//! let b = Vector::from_array([8.0, -11.0, -3.0]);
//! let x = a.solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - 2.0).abs() < 1e-12);
//!
//! // Closed-form eigenvalues of a 3×3
//! let s = Matrix3::new([[3.0_f64, 2.0, 4.0], [2.0, 0.0, 2.0], [4.0, 2.0, 3.0]]);
//! let ev = s.eigenvalues().unwrap(); // -1, -1, 8
//! assert!((ev[2].re - 8.0).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`matrix`]: Fixed-size `Matrix<T, M, N>` with const-generic dimensions and
//!   column-major `[[T; M]; N]` storage. Arithmetic, indexing, row/column
//!   access (panicking and `try_*` variants), trace and principal minors,
//!   structural predicates. [`Vector<T, N>`] is a 1-row matrix.
//!
//! - [`linalg`]: Crout LU with scaled partial pivoting ([`linalg::LuDecomposition`]),
//!   Givens QR ([`linalg::QrDecomposition`]), rank by QR plus row echelon,
//!   Householder Hessenberg reduction, shifted QR steps and a driven QR
//!   eigenvalue loop. Free functions work in place on `&mut impl MatrixMut<T>`
//!   or `&mut Matrix`; wrapper structs copy their input. Convenience methods on
//!   `Matrix`: `a.solve(&b)`, `a.inverse()`, `a.det()`, `a.rank(tol)`,
//!   `a.eigenvalues()`.
//!
//! - [`poly`]: Real roots of quadratics and cubics (depressed-cubic method),
//!   and complex variants that keep multiplicity.
//!
//! - [`complex`]: [`ComplexRoots`] adds `square_roots` and Newton-refined
//!   `cube_roots` to [`Complex`].
//!
//! - [`tolerance`]: `is_zero` / `is_equal` comparisons with explicit epsilon.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by every kernel;
//!     carries the default tolerances
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for in-place algorithms
//!
//! ## Errors and logging
//!
//! Fallible operations return [`LinalgError`]. The crate emits `tracing`
//! events (a `warn!` when a singular inverse is replaced by the identity,
//! `debug!` when an iteration budget runs out) and never installs a
//! subscriber.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm, `std::error::Error` for [`LinalgError`] |
//! | `libm`    | baseline | Pure-Rust software float fallback for no-std targets |

#![cfg_attr(not(feature = "std"), no_std)]

pub mod complex;
pub mod linalg;
pub mod matrix;
pub mod poly;
pub mod tolerance;
pub mod traits;

pub use complex::{ComplexRoots, NewtonSettings};
pub use linalg::LinalgError;
pub use matrix::aliases::{Matrix2, Matrix3, Matrix4, Vector2, Vector4};
pub use matrix::vector::{Vector, Vector3};
pub use matrix::Matrix;
pub use num_complex::Complex;
pub use poly::{PolySettings, RealRoots};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
