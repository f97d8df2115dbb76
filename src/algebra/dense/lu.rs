use crate::algebra::*;

// LU factorization with partial pivoting.   Factors are computed
// in place in A, and the solution X of AX = B overwrites B.

struct LuSolver {
    // row permutation workspace
    ipiv: Vec<usize>,
}

impl LuSolver {
    fn new() -> Self {
        let ipiv = vec![];
        Self { ipiv }
    }

    fn lusolve<T: FloatT>(
        &mut self,
        A: &mut Matrix<T>,
        B: &mut Matrix<T>,
    ) -> Result<(), DenseFactorizationError> {
        if !A.is_square() || A.ncols() != B.nrows() {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let n = A.nrows();
        let nrhs = B.ncols();
        self.ipiv.resize(n, 0);

        // pivots smaller than this are treated as exact zeros
        let anorm = A.data().norm_inf();
        let tol = T::epsilon() * anorm * n.as_T();
        if n > 0 && anorm == T::zero() {
            return Err(DenseFactorizationError::LU(0));
        }

        for k in 0..n {
            // find the pivot row in column k
            let mut p = k;
            for i in (k + 1)..n {
                if A[(i, k)].abs() > A[(p, k)].abs() {
                    p = i;
                }
            }
            self.ipiv[k] = p;

            if A[(p, k)].abs() <= tol {
                return Err(DenseFactorizationError::LU(k));
            }

            if p != k {
                for j in 0..n {
                    let (a, b) = (A[(k, j)], A[(p, j)]);
                    A[(k, j)] = b;
                    A[(p, j)] = a;
                }
                for j in 0..nrhs {
                    let (a, b) = (B[(k, j)], B[(p, j)]);
                    B[(k, j)] = b;
                    B[(p, j)] = a;
                }
            }

            // eliminate below the pivot
            let pivot = A[(k, k)];
            for i in (k + 1)..n {
                let l = A[(i, k)] / pivot;
                A[(i, k)] = l;
                for j in (k + 1)..n {
                    let akj = A[(k, j)];
                    A[(i, j)] -= l * akj;
                }
                for j in 0..nrhs {
                    let bkj = B[(k, j)];
                    B[(i, j)] -= l * bkj;
                }
            }
        }

        // back substitution with U
        for j in 0..nrhs {
            for i in (0..n).rev() {
                let mut s = B[(i, j)];
                for c in (i + 1)..n {
                    s -= A[(i, c)] * B[(c, j)];
                }
                B[(i, j)] = s / A[(i, i)];
            }
        }

        Ok(())
    }
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    /// Inverse of a square nonsingular matrix
    pub(crate) fn inverse(&self) -> Result<Self, DenseFactorizationError> {
        let mut A = self.clone();
        let mut B = Matrix::identity(self.nrows());
        LuSolver::new().lusolve(&mut A, &mut B)?;
        Ok(B)
    }

    /// Solution `x` of `self * x = b`
    #[cfg(test)]
    pub(crate) fn solve(&self, b: &[T]) -> Result<Vec<T>, DenseFactorizationError> {
        let mut A = self.clone();
        let mut B = Matrix {
            m: b.len(),
            n: 1,
            data: b.to_vec(),
        };
        LuSolver::new().lusolve(&mut A, &mut B)?;
        Ok(B.data)
    }
}

macro_rules! generate_test_lu {
    ($fxx:ty, $test_name:ident, $tol:expr) => {
        #[test]
        fn $test_name() {
            let mut A = Matrix::<$fxx>::from(&[
                [3., 2., 4.], //
                [2., 0., 2.], //
                [4., 2., 3.], //
            ]);

            let mut B = Matrix::<$fxx>::from(&[
                [-5., 13.], //
                [-2., 4.],  //
                [-2., 9.],  //
            ]);

            let X = Matrix::<$fxx>::from(&[
                [1., -1.], //
                [0., 2.],  //
                [-2., 3.], //
            ]);

            let mut lu = LuSolver::new();
            lu.lusolve(&mut A, &mut B).unwrap();
            assert!(B.is_approx(&X, $tol));
        }
    };
}

generate_test_lu!(f32, test_lu_f32, 1e-5);
generate_test_lu!(f64, test_lu_f64, 1e-12);

#[test]
fn test_lu_singular() {
    let A = Matrix::from(&[
        [1., 2.], //
        [2., 4.], //
    ]);
    assert!(A.inverse().is_err());
    assert!(Matrix::<f64>::zeros((2, 2)).inverse().is_err());
}

#[test]
fn test_dense_inverse() {
    let A = Matrix::from(&[
        [4., 7.], //
        [2., 6.], //
    ]);
    let Ainv = A.inverse().unwrap();
    assert!((&A * &Ainv).is_approx(&Matrix::identity(2), 1e-14));

    let x = A.solve(&[1., 2.]).unwrap();
    assert!(x.norm_inf_diff(&[-0.8, 0.6]) < 1e-14);
}
