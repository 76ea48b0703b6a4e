use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallmat::linalg::{eigenvalues_qr, hessenberg_in_place, QrIterSettings};
use smallmat::poly::{cubic_roots, cubic_roots_complex, PolySettings};
use smallmat::{Complex, ComplexRoots, Matrix, Matrix3, NewtonSettings, Vector};

const TOL: f64 = 1e-10;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

fn assert_mat_near<const N: usize>(a: &Matrix<f64, N, N>, b: &Matrix<f64, N, N>, tol: f64, msg: &str) {
    for i in 0..N {
        for j in 0..N {
            assert_near(a[(i, j)], b[(i, j)], tol, &format!("{}[({},{})]", msg, i, j));
        }
    }
}

/// Random matrix with entries in [-1, 1] and a dominant diagonal.
fn well_conditioned<const N: usize>(rng: &mut StdRng) -> Matrix<f64, N, N> {
    let mut a = Matrix::from_fn(|_, _| rng.gen_range(-1.0..1.0));
    for i in 0..N {
        a[(i, i)] += 2.0 * N as f64;
    }
    a
}

fn random_matrix<const N: usize>(rng: &mut StdRng) -> Matrix<f64, N, N> {
    Matrix::from_fn(|_, _| rng.gen_range(-1.0..1.0))
}

fn random_vector<const N: usize>(rng: &mut StdRng) -> Vector<f64, N> {
    Vector::from_fn(|_, _| rng.gen_range(-1.0..1.0))
}

// ── LU ───────────────────────────────────────────────────────────────

fn check_lu<const N: usize>(rng: &mut StdRng) {
    for _ in 0..50 {
        let a = well_conditioned::<N>(rng);
        let lu = a.lu().unwrap();
        assert_mat_near(&(lu.p() * a), &(lu.l() * lu.u()), 1e-12, "PA = LU");

        let b = random_vector::<N>(rng);
        let x = lu.solve(&b);
        let ax = a.vecmul(&x);
        for i in 0..N {
            assert_near(ax[i], b[i], 1e-12, "residual");
        }

        let inv = a.inverse().unwrap();
        assert_mat_near(&(a * inv), &Matrix::eye(), 1e-12, "A·A⁻¹");
    }
}

#[test]
fn lu_random_2_3_4() {
    let mut rng = StdRng::seed_from_u64(0);
    check_lu::<2>(&mut rng);
    check_lu::<3>(&mut rng);
    check_lu::<4>(&mut rng);
}

#[test]
fn inverse_known_3x3() {
    let a = Matrix::new([[3.0, 0.0, 2.0], [2.0, 0.0, -2.0], [0.0, 1.0, 1.0]]);
    let expected = Matrix::new([[0.2, 0.2, 0.0], [-0.2, 0.3, 1.0], [0.2, -0.3, 0.0]]);
    assert_mat_near(&a.inverse().unwrap(), &expected, 1e-12, "inverse");
}

// ── QR ───────────────────────────────────────────────────────────────

fn check_qr<const N: usize>(rng: &mut StdRng) {
    for _ in 0..50 {
        let a = random_matrix::<N>(rng);
        let qr = a.qr();
        assert_mat_near(&(qr.q() * qr.r()), &a, 1e-12, "QR = A");
        assert_mat_near(&(qr.q().transpose() * qr.q()), &Matrix::eye(), 1e-12, "QᵀQ = I");
        assert!(qr.r().is_upper_triangular(0.0));
    }
}

#[test]
fn qr_random_2_3_4() {
    let mut rng = StdRng::seed_from_u64(1);
    check_qr::<2>(&mut rng);
    check_qr::<3>(&mut rng);
    check_qr::<4>(&mut rng);
}

// ── Rank ─────────────────────────────────────────────────────────────

/// Sum of `k` random outer products: rank `k` with probability one.
fn rank_k<const N: usize>(rng: &mut StdRng, k: usize) -> Matrix<f64, N, N> {
    let mut a = Matrix::zeros();
    for _ in 0..k {
        let u = random_vector::<N>(rng);
        let v = random_vector::<N>(rng);
        a.rank_one_update(1.0, &u, &v);
    }
    a
}

#[test]
fn rank_of_constructed_matrices() {
    let mut rng = StdRng::seed_from_u64(2);
    for k in 0..=4 {
        for _ in 0..20 {
            let a = rank_k::<4>(&mut rng, k);
            assert_eq!(a.rank(1e-12), k, "rank of sum of {} outer products", k);
        }
    }
}

#[test]
fn rank_invariant_under_transpose_and_swaps() {
    let mut rng = StdRng::seed_from_u64(3);
    for k in 1..=3 {
        for _ in 0..20 {
            let a = rank_k::<4>(&mut rng, k);
            let r = a.rank(1e-12);
            assert_eq!(a.transpose().rank(1e-12), r);

            let mut rows = a;
            rows.swap_rows(0, 3);
            assert_eq!(rows.rank(1e-12), r);

            let mut cols = a;
            cols.swap_cols(1, 2);
            assert_eq!(cols.rank(1e-12), r);
        }
    }
}

#[test]
fn rank_full_for_well_conditioned() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..20 {
        assert_eq!(well_conditioned::<3>(&mut rng).rank_default(), 3);
    }
}

// ── Polynomial roots ─────────────────────────────────────────────────

#[test]
fn cubic_recovers_known_roots() {
    let roots = cubic_roots(1.0, -6.0, 11.0, -6.0, &PolySettings::default());
    assert_eq!(roots.len(), 3);
    for (r, e) in roots.iter().zip([1.0, 2.0, 3.0]) {
        assert_near(*r, e, TOL, "root");
    }

    let mut rng = StdRng::seed_from_u64(5);
    let mut checked = 0;
    while checked < 200 {
        let mut rs = [
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        ];
        rs.sort_by(|a: &f64, b| a.partial_cmp(b).unwrap());
        if rs[1] - rs[0] < 0.1 || rs[2] - rs[1] < 0.1 {
            continue;
        }
        let [a, b, c] = rs;
        let lead = rng.gen_range(0.5..3.0);
        let roots = cubic_roots(
            lead,
            -lead * (a + b + c),
            lead * (a * b + a * c + b * c),
            -lead * a * b * c,
            &PolySettings::default(),
        );
        assert_eq!(roots.len(), 3, "roots of {:?}", rs);
        for (r, e) in roots.iter().zip(rs) {
            assert_near(*r, e, 1e-9, "random root");
        }
        checked += 1;
    }
}

#[test]
fn cubic_repeated_roots_collapse() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..200 {
        let r: f64 = rng.gen_range(-5.0..5.0);
        let s: f64 = rng.gen_range(-5.0..5.0);
        if (r - s).abs() < 0.1 {
            continue;
        }
        // (x - r)²(x - s)
        let roots = cubic_roots(1.0, -(2.0 * r + s), r * r + 2.0 * r * s, -(r * r * s), &PolySettings::default());
        assert_eq!(roots.len(), 2, "double root {} with {}", r, s);
        let (lo, hi) = if r < s { (r, s) } else { (s, r) };
        assert_near(roots.as_slice()[0], lo, 1e-9, "low");
        assert_near(roots.as_slice()[1], hi, 1e-9, "high");
    }
}

#[test]
fn cubic_complex_roots_satisfy_polynomial() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let p = rng.gen_range(-5.0..5.0);
        let q = rng.gen_range(-5.0..5.0);
        let r = rng.gen_range(-5.0..5.0);
        let roots = cubic_roots_complex(p, q, r, &PolySettings::default(), &NewtonSettings::default()).unwrap();
        for z in roots {
            let value = z * z * z + z * z * p + z * q + r;
            assert!(value.norm() < 1e-9, "residual {} at {:?}", value.norm(), z);
        }
        let sum = roots[0] + roots[1] + roots[2];
        assert_near(sum.re, -p, 1e-9, "Vieta sum");
        assert_near(sum.im, 0.0, 1e-9, "Vieta sum imaginary");
    }
}

// ── Complex roots ────────────────────────────────────────────────────

#[test]
fn complex_roots_properties() {
    let mut rng = StdRng::seed_from_u64(8);
    let settings = NewtonSettings::default();
    let w: Complex<f64> = Complex::from_polar(1.0, core::f64::consts::TAU / 3.0);
    for _ in 0..200 {
        let z: Complex<f64> = Complex::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));

        let [s0, s1] = z.square_roots();
        assert!((s0 * s0 - z).norm() < 1e-12);
        assert_eq!(s1, -s0);

        let roots = z.cube_roots(&settings).unwrap();
        for c in roots {
            assert!((c * c * c - z).norm() < 1e-12 * z.norm().max(1.0));
        }
        assert!((roots[0] * w - roots[1]).norm() < 1e-12 * roots[0].norm().max(1.0));
        assert!((roots[0] * w.conj() - roots[2]).norm() < 1e-12 * roots[0].norm().max(1.0));
    }
}

// ── Eigenvalues ──────────────────────────────────────────────────────

fn sorted_re(zs: &[Complex<f64>]) -> Vec<f64> {
    let mut re: Vec<f64> = zs.iter().map(|z| z.re).collect();
    re.sort_by(|a, b| a.partial_cmp(b).unwrap());
    re
}

#[test]
fn eigenvalues_symmetric_repeated() {
    let a = Matrix3::new([[3.0, 2.0, 4.0], [2.0, 0.0, 2.0], [4.0, 2.0, 3.0]]);
    let ev = a.eigenvalues().unwrap();
    let re = sorted_re(&ev);
    for (r, e) in re.iter().zip([-1.0, -1.0, 8.0]) {
        assert_near(*r, e, TOL, "eigenvalue");
    }
}

#[test]
fn closed_form_and_qr_iteration_agree_on_symmetric_3x3() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..50 {
        let b = random_matrix::<3>(&mut rng);
        let a = b + b.transpose();
        let closed = sorted_re(&a.eigenvalues().unwrap());
        let iterated = sorted_re(&eigenvalues_qr(&a, &QrIterSettings::default()).unwrap());
        for (c, i) in closed.iter().zip(&iterated) {
            assert_near(*c, *i, 1e-8, "eigenvalue");
        }
    }
}

#[test]
fn qr_iteration_preserves_trace_and_determinant() {
    let mut rng = StdRng::seed_from_u64(10);
    for _ in 0..50 {
        let a = random_matrix::<4>(&mut rng);
        let ev = eigenvalues_qr(&a, &QrIterSettings::default()).unwrap();
        let sum = ev.iter().fold(Complex::new(0.0, 0.0), |acc, z| acc + z);
        let prod = ev.iter().fold(Complex::new(1.0, 0.0), |acc, z| acc * z);
        assert_near(sum.re, a.trace(), 1e-9, "trace");
        assert_near(sum.im, 0.0, 1e-9, "trace imaginary");
        assert_near(prod.re, a.det(), 1e-9, "det");
        assert_near(prod.im, 0.0, 1e-9, "det imaginary");
    }
}

#[test]
fn hessenberg_idempotent_and_similar() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let a = random_matrix::<4>(&mut rng);
        let mut h = a;
        let mut q = Matrix::zeros();
        hessenberg_in_place(&mut h, &mut q, 1e-14);
        assert!(h.is_upper_hessenberg(0.0));
        assert_mat_near(&(q * h * q.transpose()), &a, 1e-12, "QHQᵀ = A");

        let mut again = h;
        hessenberg_in_place(&mut again, &mut q, 1e-14);
        assert_eq!(again, h);
        assert_eq!(q, Matrix::eye());
    }
}
