use crate::algebra::*;
use std::ops::{Add, Mul};

impl<T: FloatT> MatrixVectorMultiply for Matrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);
        y.scale(b);
        for (col, &xc) in x.iter().enumerate() {
            y.axpby(a * xc, self.col_slice(col), T::one());
        }
    }
}

impl<T: FloatT> MatrixMath for Matrix<T> {
    type T = T;

    //scalar mut operations
    fn scale(&mut self, c: T) {
        self.data.scale(c);
    }

    fn lscale(&mut self, l: &[T]) {
        for col in 0..self.n {
            self.col_slice_mut(col).hadamard(l);
        }
    }

    fn rscale(&mut self, r: &[T]) {
        for (col, val) in r.iter().enumerate() {
            self.col_slice_mut(col).scale(*val);
        }
    }
}

// Elementwise sum.
//
// # Panics
// Panics if the dimensions of the operands differ.
impl<T: FloatT> Add for &Matrix<T> {
    type Output = Matrix<T>;

    fn add(self, B: &Matrix<T>) -> Matrix<T> {
        assert_eq!(self.size(), B.size());
        let mut C = self.clone();
        C.data.axpby(T::one(), &B.data, T::one());
        C
    }
}

// Matrix product.
//
// # Panics
// Panics if the inner dimensions of the operands differ.
impl<T: FloatT> Mul for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, B: &Matrix<T>) -> Matrix<T> {
        assert_eq!(self.n, B.m);
        let mut C = Matrix::zeros((self.m, B.n));
        for col in 0..B.n {
            self.gemv(C.col_slice_mut(col), B.col_slice(col), T::one(), T::zero());
        }
        C
    }
}

#[test]
fn test_dense_gemv() {
    let A = Matrix::from(&[
        [1., 2.], //
        [3., 4.], //
        [5., 6.], //
    ]);

    let mut y = vec![1., 1., 1.];
    A.gemv(&mut y, &[1., -1.], 2., 1.);
    assert_eq!(y, [-1., -1., -1.]);

    let mut y = vec![0.; 3];
    A.gemv(&mut y, &[0., 1.], 1., 0.);
    assert_eq!(y, [2., 4., 6.]);
}

#[test]
fn test_dense_add_mul() {
    let A = Matrix::from(&[[1., 2.], [3., 4.]]);
    let B = Matrix::from(&[[-1., 2.], [-3., 4.]]);

    assert_eq!(&A + &B, Matrix::from(&[[0., 4.], [0., 8.]]));
    assert_eq!(&A * &B, Matrix::from(&[[-7., 10.], [-15., 22.]]));
}

#[test]
#[rustfmt::skip]
fn test_l_r_scalings() {

    let A = Matrix::from(&[
        [-1.,  4.,  6.],
        [ 3., -8.,  7.],
        [ 0.,  4.,  9.],
    ]);

    let lscale = vec![1., -2., 3.];
    let rscale = vec![-2., 1., -3.];

    //right scale
    let mut B = A.clone();
    B.rscale(&rscale);
    let Btest = Matrix::from(&[
        [ 2.,  4.,  -18.],
        [-6., -8.,  -21.],
        [ 0.,  4.,  -27.],
    ]);
    assert_eq!(B,Btest);

    //left scale
    let mut B = A.clone();
    B.lscale(&lscale);
    let Btest = Matrix::from(&[
        [-1.,  4.,   6.],
        [-6., 16., -14.],
        [ 0., 12.,  27.],
    ]);
    assert_eq!(B,Btest);
}
