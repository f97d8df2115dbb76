use crate::algebra::*;
use std::iter::zip;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);

        _scale_output(y, b);

        // if a is zero, we're done
        if a == T::zero() {
            return;
        }

        //y += a*A*x
        for (j, &xj) in x.iter().enumerate() {
            let axj = a * xj;
            for i in self.colptr[j]..self.colptr[j + 1] {
                y[self.rowval[i]] += self.nzval[i] * axj;
            }
        }
    }
}

impl<T: FloatT> MatrixMath for CscMatrix<T> {
    type T = T;

    //scalar mut operations
    fn scale(&mut self, c: T) {
        self.nzval.scale(c);
    }

    fn lscale(&mut self, l: &[T]) {
        for (val, row) in zip(&mut self.nzval, &self.rowval) {
            *val *= l[*row];
        }
    }

    fn rscale(&mut self, r: &[T]) {
        let colptr = &self.colptr;
        let vals = &mut self.nzval;

        for i in 0..self.n {
            vals[colptr[i]..colptr[i + 1]].scale(r[i]);
        }
    }
}

// y = b*y, with the common cases special-cased
fn _scale_output<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == -T::one() {
        y.negate();
    } else if b != T::one() {
        y.scale(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_matrix() -> CscMatrix<f64> {
        // A = [1.  ⋅  2.]
        //     [⋅  3.  ⋅ ]
        CscMatrix::from(&Matrix::from(&[
            [1., 0., 2.], //
            [0., 3., 0.], //
        ]))
    }

    #[test]
    fn test_csc_gemv() {
        let A = test_matrix();

        let mut y = vec![1., 1.];
        A.gemv(&mut y, &[1., 1., 1.], 2., -1.);
        assert_eq!(y, [5., 5.]);

        let mut y = vec![f64::NAN; 2];
        A.gemv(&mut y, &[1., 0., -1.], 1., 0.);
        assert_eq!(y, [-1., 0.]);
    }

    #[test]
    fn test_csc_scalings() {
        let mut A = test_matrix();
        A.lscale(&[2., -1.]);
        A.rscale(&[1., 2., 3.]);
        assert_eq!(
            A.to_dense(),
            Matrix::from(&[
                [2., 0., 12.], //
                [0., -6., 0.], //
            ])
        );

        A.scale(-0.5);
        assert_eq!(A.nzval, vec![-1., 3., -6.]);
    }
}
