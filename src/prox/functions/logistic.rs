use super::*;
use crate::algebra::*;

/// `f(x) = weight * Σ log(1 + exp(xᵢ))`
#[derive(Debug, Clone)]
pub struct SumLogistic<T> {
    weight: T,
}

impl<T> SumLogistic<T>
where
    T: FloatT,
{
    pub fn new(weight: T) -> Self {
        Self { weight }
    }
}

impl<T> Default for SumLogistic<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(T::one())
    }
}

// log(1 + exp(x)) without overflow for large x
fn softplus<T: FloatT>(x: T) -> T {
    if x > T::zero() {
        x + T::ln_1p(T::exp(-x))
    } else {
        T::ln_1p(T::exp(x))
    }
}

fn sigmoid<T: FloatT>(x: T) -> T {
    if x >= T::zero() {
        T::recip(T::one() + T::exp(-x))
    } else {
        let e = T::exp(x);
        e / (T::one() + e)
    }
}

impl<T> SmoothFunction<T> for SumLogistic<T>
where
    T: FloatT,
{
    fn eval(&self, x: &[T]) -> T {
        weighted_sum(self.weight, x, softplus)
    }

    fn gradient(&self, x: &[T], g: &mut [T]) {
        weighted_map(self.weight, x, g, sigmoid);
    }

    fn hessian_diagonal(&self, x: &[T], h: &mut [T]) {
        weighted_map(self.weight, x, h, |xi| {
            let s = sigmoid(xi);
            s * (T::one() - s)
        });
    }

    fn project_feasible(&self, v: &[T], x: &mut [T]) {
        x.copy_from(v);
    }
}

#[test]
fn test_softplus_large_arguments() {
    assert_eq!(softplus(1000.0_f64), 1000.0);
    assert!(softplus(-1000.0_f64) >= 0.0);
    assert_eq!(sigmoid(1000.0_f64), 1.0);
    assert_eq!(sigmoid(-1000.0_f64), 0.0);
}
