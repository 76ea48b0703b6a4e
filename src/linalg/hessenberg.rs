use crate::linalg::qr::givens_qr_square;
use crate::matrix::vector::Vector;
use crate::tolerance::{is_zero, sign};
use crate::traits::FloatScalar;
use crate::Matrix;

/// Householder reflector `P = I - 2vvᵀ/(vᵀv)` acting on entries `start..N`.
///
/// `P` maps `x[start..]` onto `(α, 0, …, 0)` with `α = -sign(x[start])·‖x[start..]‖`
/// and leaves entries before `start` untouched. `P` is symmetric and
/// orthogonal. Returns `None` when the entries below `start` already have
/// norm within `tol` of zero, or when `start` is past the end.
///
/// ```
/// use smallmat::linalg::householder_reflector;
/// use smallmat::Vector;
///
/// let x = Vector::from_array([1.0_f64, 3.0, 4.0]);
/// let p = householder_reflector(&x, 1, 1e-14).unwrap();
/// let px = p.vecmul(&x);
/// assert!((px[0] - 1.0).abs() < 1e-14);
/// assert!((px[1] + 5.0).abs() < 1e-14);
/// assert!(px[2].abs() < 1e-14);
/// ```
pub fn householder_reflector<T: FloatScalar, const N: usize>(
    x: &Vector<T, N>,
    start: usize,
    tol: T,
) -> Option<Matrix<T, N, N>> {
    if start >= N {
        return None;
    }

    let mut tail_sq = T::zero();
    for i in (start + 1)..N {
        tail_sq = tail_sq + x[i] * x[i];
    }
    if is_zero(tail_sq.sqrt(), tol) {
        return None;
    }

    let x0 = x[start];
    let alpha = -sign(x0) * (x0 * x0 + tail_sq).sqrt();

    let mut v: Vector<T, N> = Vector::zeros();
    v[start] = x0 - alpha;
    for i in (start + 1)..N {
        v[i] = x[i];
    }

    let mut p = Matrix::eye();
    p.rank_one_update(-T::lit(2.0) / v.dot(&v), &v, &v);
    Some(p)
}

/// Reduce `a` to upper Hessenberg form by Householder similarity transforms.
///
/// On return `a` holds `H` and `q` holds the accumulated orthogonal `Q` with
/// `A = Q·H·Qᵀ` for the original `A`. Each step builds the reflector for the
/// column below the subdiagonal and applies it on both sides (`P·A·P`), so
/// eigenvalues are preserved. Columns that are already reduced (below the
/// subdiagonal within `tol` of zero) are left alone, which makes the
/// reduction idempotent on Hessenberg input. Matrices of dimension two or less
/// are already Hessenberg.
pub fn hessenberg_in_place<T: FloatScalar, const N: usize>(
    a: &mut Matrix<T, N, N>,
    q: &mut Matrix<T, N, N>,
    tol: T,
) {
    *q = Matrix::eye();

    for k in 0..N.saturating_sub(2) {
        let Some(p) = householder_reflector(&a.col(k), k + 1, tol) else {
            continue;
        };
        *a = p * *a * p;
        *q = *q * p;
        for i in (k + 2)..N {
            a[(i, k)] = T::zero();
        }
    }
}

/// Upper Hessenberg decomposition `A = Q·H·Qᵀ`.
///
/// # Example
///
/// ```
/// use smallmat::Matrix;
///
/// let a = Matrix::new([
///     [4.0_f64, 1.0, -2.0, 2.0],
///     [1.0, 2.0, 0.0, 1.0],
///     [-2.0, 0.0, 3.0, -2.0],
///     [2.0, 1.0, -2.0, -1.0],
/// ]);
/// let hd = a.hessenberg();
/// assert!(hd.h().is_upper_hessenberg(0.0));
/// let back = hd.q() * hd.h() * hd.q().transpose();
/// assert!(back.approx_eq(&a, 1e-12));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HessenbergDecomposition<T, const N: usize> {
    h: Matrix<T, N, N>,
    q: Matrix<T, N, N>,
}

impl<T: FloatScalar, const N: usize> HessenbergDecomposition<T, N> {
    pub fn new(a: &Matrix<T, N, N>, tol: T) -> Self {
        let mut h = *a;
        let mut q = Matrix::eye();
        hessenberg_in_place(&mut h, &mut q, tol);
        Self { h, q }
    }

    /// The Hessenberg matrix H.
    pub fn h(&self) -> Matrix<T, N, N> {
        self.h
    }

    /// The orthogonal transform Q.
    pub fn q(&self) -> Matrix<T, N, N> {
        self.q
    }

    pub fn into_parts(self) -> (Matrix<T, N, N>, Matrix<T, N, N>) {
        (self.h, self.q)
    }
}

impl<T: FloatScalar, const N: usize> Matrix<T, N, N> {
    /// Hessenberg decomposition with [`FloatScalar::default_tol`].
    pub fn hessenberg(&self) -> HessenbergDecomposition<T, N> {
        HessenbergDecomposition::new(self, T::default_tol())
    }
}

/// One shifted QR step: factor `A - μI = Q·R`, then `A ← R·Q + μI`.
///
/// The result is the orthogonal similarity `QᵀAQ`, so eigenvalues are
/// preserved; on Hessenberg input the result is Hessenberg again. A zero
/// `shift` gives the plain unshifted step. Only one step is taken; driving the
/// subdiagonal to zero is up to the caller (see
/// [`eigenvalues_qr`](crate::linalg::eigenvalues_qr)).
pub fn qr_step<T: FloatScalar, const N: usize>(a: &mut Matrix<T, N, N>, shift: T) {
    for i in 0..N {
        a[(i, i)] = a[(i, i)] - shift;
    }
    let mut q = Matrix::eye();
    givens_qr_square(a, &mut q);
    *a = *a * q;
    for i in 0..N {
        a[(i, i)] = a[(i, i)] + shift;
    }
}

/// One Francis double-shift step with shifts `μ₁, μ₂` given by their sum
/// `s = μ₁ + μ₂` and product `t = μ₁μ₂`.
///
/// Factors `M = A² - sA + tI = Q·R` and sets `A ← QᵀAQ`, which equals two
/// consecutive shifted [`qr_step`]s with `μ₁` and `μ₂` but stays in real
/// arithmetic when the shifts are a complex-conjugate pair.
pub fn double_shift_qr_step<T: FloatScalar, const N: usize>(a: &mut Matrix<T, N, N>, s: T, t: T) {
    let mut m = *a * *a - *a * s;
    for i in 0..N {
        m[(i, i)] = m[(i, i)] + t;
    }
    let mut q = Matrix::eye();
    givens_qr_square(&mut m, &mut q);
    *a = q.transpose() * *a * q;
}

/// Eigenvalue of `[[a, b], [c, d]]` closest to `d`, or `None` when the block
/// has a complex-conjugate pair.
///
/// ```
/// use smallmat::linalg::wilkinson_shift;
/// // eigenvalues 1 and 6
/// assert_eq!(wilkinson_shift(2.0_f64, 2.0, 2.0, 5.0), Some(6.0));
/// assert_eq!(wilkinson_shift(0.0_f64, -1.0, 1.0, 0.0), None);
/// ```
pub fn wilkinson_shift<T: FloatScalar>(a: T, b: T, c: T, d: T) -> Option<T> {
    let delta = (a - d) * T::lit(0.5);
    let disc = delta * delta + b * c;
    if disc < T::zero() {
        return None;
    }
    let denom = delta + sign(delta) * disc.sqrt();
    if denom.is_zero() {
        return Some(d);
    }
    Some(d - b * c / denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn check_decomposition<const N: usize>(a: &Matrix<f64, N, N>) {
        let hd = a.hessenberg();
        let (h, q) = (hd.h(), hd.q());

        assert!(h.is_upper_hessenberg(0.0), "not Hessenberg: {:?}", h);

        let qtq = q.transpose() * q;
        assert!(qtq.approx_eq(&Matrix::eye(), TOL), "Q not orthogonal");

        let qtaq = q.transpose() * *a * q;
        for i in 0..N {
            for j in 0..N {
                assert_near(qtaq[(i, j)], h[(i, j)], TOL, &format!("QᵀAQ[({},{})]", i, j));
            }
        }
        assert_near(h.trace(), a.trace(), TOL, "trace");
    }

    #[test]
    fn reflector_is_orthogonal_and_symmetric() {
        let x = Vector::from_array([2.0_f64, -1.0, 2.0, 4.0]);
        let p = householder_reflector(&x, 1, 1e-14).unwrap();
        assert!(p.approx_eq(&p.transpose(), 1e-15));
        assert!((p * p).approx_eq(&Matrix::eye(), 1e-14));
        let px = p.vecmul(&x);
        assert_eq!(px[0], 2.0);
        assert_near(px[1].abs(), 21.0_f64.sqrt(), 1e-14, "alpha");
        assert_near(px[2], 0.0, 1e-14, "px[2]");
        assert_near(px[3], 0.0, 1e-14, "px[3]");
    }

    #[test]
    fn reflector_skips_reduced_column() {
        let x = Vector::from_array([1.0_f64, 5.0, 0.0]);
        assert!(householder_reflector(&x, 1, 1e-14).is_none());
        assert!(householder_reflector(&x, 3, 1e-14).is_none());
    }

    #[test]
    fn hessenberg_3x3() {
        check_decomposition(&Matrix::new([
            [4.0_f64, 1.0, -2.0],
            [1.0, 2.0, 0.0],
            [-2.0, 0.0, 3.0],
        ]));
    }

    #[test]
    fn hessenberg_4x4_nonsymmetric() {
        check_decomposition(&Matrix::new([
            [1.0_f64, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [2.0, 6.0, 4.0, 1.0],
            [3.0, 1.0, 9.0, 2.0],
        ]));
    }

    #[test]
    fn hessenberg_2x2_is_identity_transform() {
        let a = Matrix::new([[1.0_f64, 2.0], [3.0, 4.0]]);
        let hd = a.hessenberg();
        assert_eq!(hd.h(), a);
        assert_eq!(hd.q(), Matrix::eye());
    }

    #[test]
    fn hessenberg_is_idempotent() {
        let a = Matrix::new([
            [4.0_f64, 1.0, -2.0, 2.0],
            [1.0, 2.0, 0.0, 1.0],
            [-2.0, 0.0, 3.0, -2.0],
            [2.0, 1.0, -2.0, -1.0],
        ]);
        let h = a.hessenberg().h();
        let again = h.hessenberg();
        assert_eq!(again.h(), h);
        assert_eq!(again.q(), Matrix::eye());
    }

    #[test]
    fn qr_step_is_similarity() {
        let a = Matrix::new([
            [4.0_f64, 1.0, -2.0],
            [1.0, 2.0, 0.0],
            [-2.0, 0.0, 3.0],
        ]);
        let mut h = a.hessenberg().h();
        let before = h;
        for &shift in &[0.0, 1.5, -0.25] {
            qr_step(&mut h, shift);
            assert_near(h.trace(), before.trace(), TOL, "trace");
            assert_near(h.det(), before.det(), 1e-9, "det");
            assert!(h.is_upper_hessenberg(1e-12));
        }
    }

    #[test]
    fn unshifted_qr_steps_converge_on_symmetric_input() {
        // eigenvalues 1 and 3
        let mut a = Matrix::new([[2.0_f64, 1.0], [1.0, 2.0]]);
        for _ in 0..60 {
            qr_step(&mut a, 0.0);
        }
        assert_near(a[(1, 0)], 0.0, 1e-12, "subdiagonal");
        assert_near(a[(0, 0)], 3.0, 1e-12, "dominant first");
        assert_near(a[(1, 1)], 1.0, 1e-12, "smallest last");
    }

    #[test]
    fn double_shift_step_is_similarity() {
        let a = Matrix::new([[1.0_f64, -2.0, 1.0], [2.0, 1.0, 0.5], [0.0, 0.5, 3.0]]);
        let mut h = a.hessenberg().h();
        let before = h;
        double_shift_qr_step(&mut h, 2.0, 5.0);
        assert_near(h.trace(), before.trace(), TOL, "trace");
        assert_near(h.det(), before.det(), 1e-9, "det");
    }

    #[test]
    fn wilkinson_shift_picks_closest_eigenvalue() {
        // eigenvalues 1 and 6; d = 5 is closer to 6
        let s = wilkinson_shift(2.0_f64, 2.0, 2.0, 5.0).unwrap();
        assert_near(s, 6.0, 1e-14, "shift");
        // diagonal block returns d itself
        assert_eq!(wilkinson_shift(3.0_f64, 0.0, 0.0, 3.0), Some(3.0));
    }
}
