#![allow(non_snake_case)]

use crate::algebra::FloatT;
use enum_dispatch::*;

// separable built-in functions
mod exp;
mod logistic;
mod neg_entropy;
mod neg_log;
mod sum_squares;

//flatten all function implementations to appear in this module
pub use exp::*;
pub use logistic::*;
pub use neg_entropy::*;
pub use neg_log::*;
pub use sum_squares::*;

/// A twice differentiable convex function with a diagonal Hessian,
/// as required by the Newton proximal operators.
///
/// Implementations write their results into caller supplied slices,
/// which must have the same length as `x`.

#[enum_dispatch]
pub trait SmoothFunction<T>: Send + Sync
where
    T: FloatT,
{
    /// function value `f(x)`
    fn eval(&self, x: &[T]) -> T;

    /// gradient `∇f(x)`
    fn gradient(&self, x: &[T], g: &mut [T]);

    /// diagonal of the Hessian `∇²f(x)`
    fn hessian_diagonal(&self, x: &[T], h: &mut [T]);

    /// a point `x` of the domain of `f` close to `v`
    fn project_feasible(&self, v: &[T], x: &mut [T]);

    /// true if `x` is in the domain of `f`
    fn in_domain(&self, _x: &[T]) -> bool {
        true
    }
}

/// The built-in separable functions, all of the form
/// `f(x) = weight * Σ φ(xᵢ)`
#[enum_dispatch(SmoothFunction<T>)]
#[derive(Debug, Clone)]
pub enum BuiltinFunction<T>
where
    T: FloatT,
{
    SumSquares(SumSquares<T>),
    SumLogistic(SumLogistic<T>),
    SumNegLog(SumNegLog<T>),
    SumExp(SumExp<T>),
    SumNegEntropy(SumNegEntropy<T>),
}

// Applies `op` elementwise, writing `weight * op(x[i])` into `out[i]`.
pub(crate) fn weighted_map<T: FloatT>(weight: T, x: &[T], out: &mut [T], op: impl Fn(T) -> T) {
    assert_eq!(x.len(), out.len());
    for (o, &xi) in out.iter_mut().zip(x) {
        *o = weight * op(xi);
    }
}

// `weight * Σ op(x[i])`
pub(crate) fn weighted_sum<T: FloatT>(weight: T, x: &[T], op: impl Fn(T) -> T) -> T {
    weight * x.iter().map(|&xi| op(xi)).sum::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;

    // central differences of f and ∇f against the analytic derivatives
    fn check_derivatives(f: &BuiltinFunction<f64>, x: &[f64]) {
        let n = x.len();
        let h = 1e-6;
        let mut g = vec![0.; n];
        let mut hd = vec![0.; n];
        f.gradient(x, &mut g);
        f.hessian_diagonal(x, &mut hd);

        for i in 0..n {
            let mut xp = x.to_vec();
            let mut xm = x.to_vec();
            xp[i] += h;
            xm[i] -= h;

            let fd = (f.eval(&xp) - f.eval(&xm)) / (2. * h);
            assert!((fd - g[i]).abs() < 1e-6 * (1. + g[i].abs()), "{:?}", f);

            let (mut gp, mut gm) = (vec![0.; n], vec![0.; n]);
            f.gradient(&xp, &mut gp);
            f.gradient(&xm, &mut gm);
            let hfd = (gp[i] - gm[i]) / (2. * h);
            assert!((hfd - hd[i]).abs() < 1e-5 * (1. + hd[i].abs()), "{:?}", f);
        }
    }

    #[test]
    fn test_builtin_derivatives() {
        let x = [0.5, 1.5, 2.0];
        let funcs: Vec<BuiltinFunction<f64>> = vec![
            SumSquares::new(2.).into(),
            SumLogistic::new(1.).into(),
            SumNegLog::new(1.).into(),
            SumExp::new(0.5).into(),
            SumNegEntropy::new(1.).into(),
        ];
        for f in funcs.iter() {
            assert!(f.in_domain(&x));
            check_derivatives(f, &x);
        }
    }

    #[test]
    fn test_builtin_projection() {
        let v = [-1., 0., 2.];
        let mut x = [0.; 3];

        let f: BuiltinFunction<f64> = SumNegLog::new(1.).into();
        assert!(!f.in_domain(&v));
        f.project_feasible(&v, &mut x);
        assert!(f.in_domain(&x));
        assert_eq!(x[2], 2.);

        let f: BuiltinFunction<f64> = SumExp::new(1.).into();
        f.project_feasible(&v, &mut x);
        assert_eq!(x, v);
    }
}
