use super::*;
use crate::algebra::*;

/// `f(x) = weight * Σ exp(xᵢ)`
#[derive(Debug, Clone)]
pub struct SumExp<T> {
    weight: T,
}

impl<T> SumExp<T>
where
    T: FloatT,
{
    pub fn new(weight: T) -> Self {
        Self { weight }
    }
}

impl<T> Default for SumExp<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(T::one())
    }
}

impl<T> SmoothFunction<T> for SumExp<T>
where
    T: FloatT,
{
    fn eval(&self, x: &[T]) -> T {
        weighted_sum(self.weight, x, T::exp)
    }

    fn gradient(&self, x: &[T], g: &mut [T]) {
        weighted_map(self.weight, x, g, T::exp);
    }

    fn hessian_diagonal(&self, x: &[T], h: &mut [T]) {
        weighted_map(self.weight, x, h, T::exp);
    }

    fn project_feasible(&self, v: &[T], x: &mut [T]) {
        x.copy_from(v);
    }
}
