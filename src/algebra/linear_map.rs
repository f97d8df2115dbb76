use crate::algebra::*;
use std::fmt;

/// A linear map between two finite-dimensional spaces, stored in the
/// most economical of four representations.
///
/// Values are never mutated after construction.   Every combining
/// operation returns a new map, choosing the result representation
/// from the representations of its operands:
///
/// | op  | operands                      | result    |
/// |-----|-------------------------------|-----------|
/// | add | Scalar + Scalar               | Scalar    |
/// | add | Scalar/Diagonal + Diagonal    | Diagonal  |
/// | add | Sparse + Sparse/Scalar/Diag   | Sparse    |
/// | add | Dense + anything              | Dense     |
/// | mul | Scalar * X, X * Scalar        | X scaled  |
/// | mul | Diagonal * Diagonal           | Diagonal  |
/// | mul | Diagonal * Sparse (both ways) | Sparse    |
/// | mul | Sparse * Sparse               | Sparse    |
/// | mul | Dense with anything           | Dense     |
///
/// __Example usage__ :
///
/// ```no_run
/// use proxima::algebra::*;
///
/// let A = LinearMap::Scalar { n: 2, alpha: 2.0 };
/// let B = LinearMap::Diagonal(vec![1.0, 3.0]);
///
/// // Scalar + Diagonal stays diagonal
/// let C = A.add(&B).unwrap();
/// assert_eq!(C, LinearMap::Diagonal(vec![3.0, 5.0]));
///
/// let y = C.apply(&[1.0, 1.0]).unwrap();
/// assert_eq!(y, vec![3.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LinearMap<T = f64> {
    /// General dense matrix
    Dense(Matrix<T>),
    /// General sparse matrix
    Sparse(CscMatrix<T>),
    /// The map `alpha * I` on a space of dimension `n`
    Scalar {
        /// dimension
        n: usize,
        /// multiple of the identity
        alpha: T,
    },
    /// Square diagonal matrix with the given diagonal
    Diagonal(Vec<T>),
}

impl<T> LinearMap<T>
where
    T: FloatT,
{
    /// The identity map of dimension `n`
    pub fn identity(n: usize) -> Self {
        LinearMap::Scalar { n, alpha: T::one() }
    }

    /// Output dimension
    pub fn m(&self) -> usize {
        match self {
            LinearMap::Dense(A) => A.m,
            LinearMap::Sparse(A) => A.m,
            LinearMap::Scalar { n, .. } => *n,
            LinearMap::Diagonal(d) => d.len(),
        }
    }

    /// Input dimension
    pub fn n(&self) -> usize {
        match self {
            LinearMap::Dense(A) => A.n,
            LinearMap::Sparse(A) => A.n,
            LinearMap::Scalar { n, .. } => *n,
            LinearMap::Diagonal(d) => d.len(),
        }
    }

    /// Dense copy of the map
    pub fn as_dense(&self) -> Matrix<T> {
        match self {
            LinearMap::Dense(A) => A.clone(),
            LinearMap::Sparse(A) => A.to_dense(),
            LinearMap::Scalar { n, alpha } => Matrix::from_diag(&vec![*alpha; *n]),
            LinearMap::Diagonal(d) => Matrix::from_diag(d),
        }
    }

    fn as_sparse(&self) -> CscMatrix<T> {
        match self {
            LinearMap::Dense(A) => CscMatrix::from(A),
            LinearMap::Sparse(A) => A.clone(),
            LinearMap::Scalar { n, alpha } => CscMatrix::from_diag(&vec![*alpha; *n]),
            LinearMap::Diagonal(d) => CscMatrix::from_diag(d),
        }
    }

    /// Computes `self * x`
    pub fn apply(&self, x: &[T]) -> Result<Vec<T>, LinearMapError> {
        if x.len() != self.n() {
            return Err(LinearMapError::IncompatibleDimension {
                op: "apply",
                lhs: self.size(),
                rhs: (x.len(), 1),
            });
        }
        let mut y = vec![T::zero(); self.m()];
        self.gemv(&mut y, x, T::one(), T::zero());
        Ok(y)
    }

    /// Transpose of the map.   Scalar and diagonal maps are symmetric
    /// and are returned as copies.
    pub fn transpose(&self) -> Self {
        match self {
            LinearMap::Dense(A) => LinearMap::Dense(A.transpose()),
            LinearMap::Sparse(A) => LinearMap::Sparse(A.transpose()),
            LinearMap::Scalar { .. } | LinearMap::Diagonal(_) => self.clone(),
        }
    }

    /// Inverse of a square, nonsingular map.   Dense and sparse maps
    /// are inverted through a dense LU factorization and produce a
    /// dense result.
    pub fn inverse(&self) -> Result<Self, LinearMapError> {
        if !self.is_square() {
            return Err(LinearMapError::NotSquare {
                m: self.m(),
                n: self.n(),
            });
        }

        match self {
            LinearMap::Scalar { n, alpha } => {
                if *alpha == T::zero() {
                    return Err(LinearMapError::Singular);
                }
                Ok(LinearMap::Scalar {
                    n: *n,
                    alpha: alpha.recip(),
                })
            }
            LinearMap::Diagonal(d) => {
                if d.iter().any(|&x| x == T::zero()) {
                    return Err(LinearMapError::Singular);
                }
                let mut dinv = d.clone();
                dinv.recip();
                Ok(LinearMap::Diagonal(dinv))
            }
            LinearMap::Dense(A) => A.inverse().map(LinearMap::Dense).map_err(|_| LinearMapError::Singular),
            LinearMap::Sparse(A) => A
                .to_dense()
                .inverse()
                .map(LinearMap::Dense)
                .map_err(|_| LinearMapError::Singular),
        }
    }

    /// Computes `self + B`
    pub fn add(&self, B: &Self) -> Result<Self, LinearMapError> {
        if self.size() != B.size() {
            return Err(LinearMapError::IncompatibleDimension {
                op: "add",
                lhs: self.size(),
                rhs: B.size(),
            });
        }

        use LinearMap::*;
        let out = match (self, B) {
            (Scalar { n, alpha: a }, Scalar { alpha: b, .. }) => Scalar {
                n: *n,
                alpha: *a + *b,
            },
            (Scalar { alpha, .. }, Diagonal(d)) | (Diagonal(d), Scalar { alpha, .. }) => {
                let mut out = d.clone();
                out.translate(*alpha);
                Diagonal(out)
            }
            (Diagonal(a), Diagonal(b)) => {
                let mut out = a.clone();
                out.axpby(T::one(), b, T::one());
                Diagonal(out)
            }
            (Sparse(A), Sparse(B)) => Sparse(A + B),
            (Sparse(A), X @ (Scalar { .. } | Diagonal(_)))
            | (X @ (Scalar { .. } | Diagonal(_)), Sparse(A)) => Sparse(A + &X.as_sparse()),
            (A, B) => Dense(&A.as_dense() + &B.as_dense()),
        };
        Ok(out)
    }

    /// Computes `self * B`
    pub fn mul(&self, B: &Self) -> Result<Self, LinearMapError> {
        if self.n() != B.m() {
            return Err(LinearMapError::IncompatibleDimension {
                op: "mul",
                lhs: self.size(),
                rhs: B.size(),
            });
        }

        use LinearMap::*;
        let out = match (self, B) {
            (Scalar { alpha, .. }, X) | (X, Scalar { alpha, .. }) => X.scale(*alpha),
            (Diagonal(a), Diagonal(b)) => {
                let mut out = a.clone();
                out.hadamard(b);
                Diagonal(out)
            }
            (Diagonal(d), Sparse(B)) => {
                let mut out = B.clone();
                out.lscale(d);
                Sparse(out)
            }
            (Sparse(A), Diagonal(d)) => {
                let mut out = A.clone();
                out.rscale(d);
                Sparse(out)
            }
            (Sparse(A), Sparse(B)) => Sparse(A * B),
            (A, B) => Dense(&A.as_dense() * &B.as_dense()),
        };
        Ok(out)
    }

    /// Computes `c * self`
    pub fn scale(&self, c: T) -> Self {
        match self {
            LinearMap::Dense(A) => {
                let mut A = A.clone();
                A.scale(c);
                LinearMap::Dense(A)
            }
            LinearMap::Sparse(A) => {
                let mut A = A.clone();
                A.scale(c);
                LinearMap::Sparse(A)
            }
            LinearMap::Scalar { n, alpha } => LinearMap::Scalar {
                n: *n,
                alpha: *alpha * c,
            },
            LinearMap::Diagonal(d) => {
                let mut d = d.clone();
                d.scale(c);
                LinearMap::Diagonal(d)
            }
        }
    }

    /// Returns `Some(alpha)` if the map is exactly `alpha * I`,
    /// whatever its representation.
    pub fn scalar_value(&self) -> Option<T> {
        match self {
            LinearMap::Scalar { alpha, .. } => Some(*alpha),
            LinearMap::Diagonal(d) => {
                let first = *d.first()?;
                d.iter().all(|&x| x == first).then_some(first)
            }
            LinearMap::Dense(A) => {
                if !A.is_square() || A.n == 0 {
                    return None;
                }
                let alpha = A[(0, 0)];
                for c in 0..A.n {
                    for r in 0..A.m {
                        let expected = if r == c { alpha } else { T::zero() };
                        if A[(r, c)] != expected {
                            return None;
                        }
                    }
                }
                Some(alpha)
            }
            LinearMap::Sparse(A) => {
                if !A.is_square() || A.n == 0 {
                    return None;
                }
                let alpha = A.get_entry((0, 0)).unwrap_or_else(T::zero);
                for col in 0..A.n {
                    if A.get_entry((col, col)).unwrap_or_else(T::zero) != alpha {
                        return None;
                    }
                    for ptr in A.colptr[col]..A.colptr[col + 1] {
                        if A.rowval[ptr] != col && A.nzval[ptr] != T::zero() {
                            return None;
                        }
                    }
                }
                Some(alpha)
            }
        }
    }
}

impl<T: FloatT> MatrixVectorMultiply for LinearMap<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        match self {
            LinearMap::Dense(A) => A.gemv(y, x, a, b),
            LinearMap::Sparse(A) => A.gemv(y, x, a, b),
            LinearMap::Scalar { alpha, .. } => {
                y.axpby(a * *alpha, x, b);
            }
            LinearMap::Diagonal(d) => {
                assert_eq!(x.len(), d.len());
                assert_eq!(y.len(), d.len());
                for ((yi, &xi), &di) in y.iter_mut().zip(x).zip(d) {
                    *yi = a * di * xi + b * (*yi);
                }
            }
        }
    }
}

impl<T> ShapedMatrix for LinearMap<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m()
    }
    fn ncols(&self) -> usize {
        self.n()
    }
}

impl<T> fmt::Display for LinearMap<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinearMap::Dense(A) => write!(f, "dense matrix: m={} n={}", A.m, A.n),
            LinearMap::Sparse(A) => {
                write!(f, "sparse matrix: m={} n={} nnz={}", A.m, A.n, A.nnz())
            }
            LinearMap::Scalar { n, alpha } => {
                write!(f, "scalar matrix: n={} alpha={:.4}", n, alpha)
            }
            LinearMap::Diagonal(d) => write!(f, "diagonal matrix: n={}", d.len()),
        }
    }
}

impl<T> From<Matrix<T>> for LinearMap<T> {
    fn from(A: Matrix<T>) -> Self {
        LinearMap::Dense(A)
    }
}

impl<T> From<CscMatrix<T>> for LinearMap<T> {
    fn from(A: CscMatrix<T>) -> Self {
        LinearMap::Sparse(A)
    }
}
