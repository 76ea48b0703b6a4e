use crate::matrix::vector::Vector;
use crate::traits::Scalar;
use crate::Matrix;

/// Row order produced by pivoting.
///
/// `perm[i]` is the original row that ends up in position `i`, so applying
/// the permutation to `b` gives `(P·b)[i] = b[perm[i]]`. Always a permutation
/// of `0..N`: the only mutation is [`swap`](Self::swap), which composes with
/// every earlier swap.
///
/// ```
/// use smallmat::linalg::Permutation;
/// use smallmat::Vector;
///
/// let mut p = Permutation::<3>::identity();
/// p.swap(0, 2);
/// assert_eq!(p.as_slice(), &[2, 1, 0]);
/// let b = Vector::from_array([1.0, 2.0, 3.0]);
/// assert_eq!(p.apply(&b).to_array(), [3.0, 2.0, 1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permutation<const N: usize> {
    order: [usize; N],
    even: bool,
}

impl<const N: usize> Permutation<N> {
    pub fn identity() -> Self {
        let mut order = [0usize; N];
        for (i, slot) in order.iter_mut().enumerate() {
            *slot = i;
        }
        Self { order, even: true }
    }

    /// Adopt a row order computed elsewhere. Returns `None` unless `order`
    /// contains each of `0..N` exactly once.
    pub fn from_order(order: [usize; N]) -> Option<Self> {
        if !covers_each_index_once(&order) {
            return None;
        }
        // Parity from cycle decomposition: each cycle of length k is k-1 swaps.
        let mut visited = [false; N];
        let mut swaps = 0usize;
        for start in 0..N {
            let mut i = start;
            let mut len = 0usize;
            while !visited[i] {
                visited[i] = true;
                i = order[i];
                len += 1;
            }
            swaps += len.saturating_sub(1);
        }
        Some(Self {
            order,
            even: swaps % 2 == 0,
        })
    }

    /// Exchange positions `a` and `b`.
    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) {
        if a != b {
            self.order.swap(a, b);
            self.even = !self.even;
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// `true` if the order holds each of `0..N` exactly once.
    #[inline]
    pub fn is_valid(&self) -> bool {
        covers_each_index_once(&self.order)
    }

    /// `true` if an even number of swaps produced this order.
    #[inline]
    pub fn is_even(&self) -> bool {
        self.even
    }

    /// Determinant of the permutation matrix: `+1` or `-1`.
    pub fn sign<T: Scalar>(&self) -> T {
        if self.even {
            T::one()
        } else {
            T::zero() - T::one()
        }
    }

    /// Reorder a vector: `out[i] = v[perm[i]]`.
    pub fn apply<T: Scalar>(&self, v: &Vector<T, N>) -> Vector<T, N> {
        let mut out = Vector::zeros();
        for (i, &src) in self.order.iter().enumerate() {
            out[i] = v[src];
        }
        out
    }

    /// The inverse ordering, undoing [`apply`](Self::apply).
    pub fn inverse(&self) -> Self {
        let mut order = [0usize; N];
        for (i, &src) in self.order.iter().enumerate() {
            order[src] = i;
        }
        Self {
            order,
            even: self.even,
        }
    }

    /// Permutation matrix `P` such that `P·A` reorders the rows of `A`.
    pub fn to_matrix<T: Scalar>(&self) -> Matrix<T, N, N> {
        let mut p = Matrix::zeros();
        for (i, &src) in self.order.iter().enumerate() {
            p[(i, src)] = T::one();
        }
        p
    }
}

fn covers_each_index_once<const N: usize>(order: &[usize; N]) -> bool {
    let mut seen = [false; N];
    for &i in order {
        if i >= N || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

impl<const N: usize> Default for Permutation<N> {
    fn default() -> Self {
        Self::identity()
    }
}
