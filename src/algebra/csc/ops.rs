use crate::algebra::*;
use std::ops::{Add, Mul};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Allocates a new matrix holding the transpose of `self`
    pub fn transpose(&self) -> Self {
        // count entries per row of self, i.e. per column of the result
        let mut colptr = vec![0usize; self.m + 1];
        for &r in self.rowval.iter() {
            colptr[r + 1] += 1;
        }
        for i in 0..self.m {
            colptr[i + 1] += colptr[i];
        }

        let nnz = self.nnz();
        let mut rowval = vec![0usize; nnz];
        let mut nzval = vec![T::zero(); nnz];
        let mut next = colptr.clone();

        // columns are visited in order, so rows of the result stay sorted
        for col in 0..self.n {
            for ptr in self.colptr[col]..self.colptr[col + 1] {
                let dest = &mut next[self.rowval[ptr]];
                rowval[*dest] = col;
                nzval[*dest] = self.nzval[ptr];
                *dest += 1;
            }
        }

        CscMatrix::new(self.n, self.m, colptr, rowval, nzval)
    }
}

// Sparse sum.   Each output column is the sorted merge of the
// two input columns.
//
// # Panics
// Panics if the dimensions of the operands differ.
impl<T: FloatT> Add for &CscMatrix<T> {
    type Output = CscMatrix<T>;

    fn add(self, B: &CscMatrix<T>) -> CscMatrix<T> {
        let A = self;
        assert_eq!(A.size(), B.size());

        let mut colptr = Vec::with_capacity(A.n + 1);
        let mut rowval = Vec::with_capacity(A.nnz() + B.nnz());
        let mut nzval = Vec::with_capacity(A.nnz() + B.nnz());
        colptr.push(0);

        for col in 0..A.n {
            let (mut i, ilast) = (A.colptr[col], A.colptr[col + 1]);
            let (mut j, jlast) = (B.colptr[col], B.colptr[col + 1]);

            while i < ilast || j < jlast {
                let ra = if i < ilast { A.rowval[i] } else { usize::MAX };
                let rb = if j < jlast { B.rowval[j] } else { usize::MAX };

                if ra == rb {
                    rowval.push(ra);
                    nzval.push(A.nzval[i] + B.nzval[j]);
                    i += 1;
                    j += 1;
                } else if ra < rb {
                    rowval.push(ra);
                    nzval.push(A.nzval[i]);
                    i += 1;
                } else {
                    rowval.push(rb);
                    nzval.push(B.nzval[j]);
                    j += 1;
                }
            }
            colptr.push(rowval.len());
        }

        CscMatrix::new(A.m, A.n, colptr, rowval, nzval)
    }
}

// Sparse product, computed one output column at a time
// with a dense accumulator.
//
// # Panics
// Panics if the inner dimensions of the operands differ.
impl<T: FloatT> Mul for &CscMatrix<T> {
    type Output = CscMatrix<T>;

    fn mul(self, B: &CscMatrix<T>) -> CscMatrix<T> {
        let A = self;
        assert_eq!(A.n, B.m);

        let mut colptr = Vec::with_capacity(B.n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        colptr.push(0);

        let mut work = vec![T::zero(); A.m];
        let mut mark = vec![usize::MAX; A.m];
        let mut rows: Vec<usize> = Vec::with_capacity(A.m);

        for col in 0..B.n {
            rows.clear();
            for pb in B.colptr[col]..B.colptr[col + 1] {
                let k = B.rowval[pb];
                let bkj = B.nzval[pb];
                for pa in A.colptr[k]..A.colptr[k + 1] {
                    let r = A.rowval[pa];
                    if mark[r] != col {
                        mark[r] = col;
                        work[r] = T::zero();
                        rows.push(r);
                    }
                    work[r] += A.nzval[pa] * bkj;
                }
            }
            rows.sort_unstable();
            for &r in rows.iter() {
                rowval.push(r);
                nzval.push(work[r]);
            }
            colptr.push(rowval.len());
        }

        CscMatrix::new(A.m, B.n, colptr, rowval, nzval)
    }
}
