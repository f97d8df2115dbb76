use crate::algebra::*;
use std::ops::{Index, IndexMut};

/// Dense matrix in column major format
///
/// __Example usage__ : To construct the 2 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  4.  6.]
/// ```
///
/// ```no_run
/// use proxima::algebra::Matrix;
///
/// // literal arrays are given row by row
/// let A : Matrix<f64> = Matrix::from(&[
///     [1., 3., 5.],
///     [2., 4., 6.],
/// ]);
///
/// // storage is column major
/// assert_eq!(A.data(), &[1., 2., 3., 4., 5., 6.]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// vector of data in column major format
    pub data: Vec<T>,
}

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn identity(n: usize) -> Self {
        Matrix::from_diag(&vec![T::one(); n])
    }

    /// Square matrix with `d` on the diagonal
    pub fn from_diag(d: &[T]) -> Self {
        let n = d.len();
        let mut mat = Matrix::zeros((n, n));
        for (i, &di) in d.iter().enumerate() {
            mat[(i, i)] = di;
        }
        mat
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// Allocates a new matrix holding the transpose of `self`
    pub fn transpose(&self) -> Self {
        let mut At = Matrix::zeros((self.n, self.m));
        for c in 0..self.n {
            for r in 0..self.m {
                At[(c, r)] = self[(r, c)];
            }
        }
        At
    }

    // every entry of `self` is within `tol` of the matching entry of `B`
    #[cfg(test)]
    pub(crate) fn is_approx(&self, B: &Self, tol: T) -> bool {
        self.size() == B.size() && self.data.norm_inf_diff(&B.data) <= tol
    }
}

impl<T, const M: usize, const N: usize> From<&[[T; N]; M]> for Matrix<T>
where
    T: FloatT,
{
    // literal arrays are row major, storage is column major
    fn from(rows: &[[T; N]; M]) -> Self {
        let mut mat = Matrix::zeros((M, N));
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                mat[(r, c)] = v;
            }
        }
        mat
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> ShapedMatrix for Matrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> std::fmt::Display for Matrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f)?;
        for i in 0..self.nrows() {
            write!(f, "[ ")?;
            for j in 0..self.ncols() {
                write!(f, " {:?}", self[(i, j)])?;
            }
            writeln!(f, "]")?;
        }
        writeln!(f)?;
        Ok(())
    }
}
