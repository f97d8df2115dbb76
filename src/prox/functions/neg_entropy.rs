use super::*;
use crate::algebra::*;

/// `f(x) = weight * Σ xᵢ log(xᵢ)`, with domain `x > 0`
#[derive(Debug, Clone)]
pub struct SumNegEntropy<T> {
    weight: T,
    floor: T,
}

impl<T> SumNegEntropy<T>
where
    T: FloatT,
{
    pub fn new(weight: T) -> Self {
        Self {
            weight,
            floor: (1e-12).as_T(),
        }
    }

    /// Sets the smallest value used by `project_feasible`
    pub fn with_floor(mut self, floor: T) -> Self {
        self.floor = floor;
        self
    }
}

impl<T> Default for SumNegEntropy<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(T::one())
    }
}

impl<T> SmoothFunction<T> for SumNegEntropy<T>
where
    T: FloatT,
{
    fn eval(&self, x: &[T]) -> T {
        if !self.in_domain(x) {
            return T::infinity();
        }
        weighted_sum(self.weight, x, |xi| xi * xi.ln())
    }

    fn gradient(&self, x: &[T], g: &mut [T]) {
        weighted_map(self.weight, x, g, |xi| xi.ln() + T::one());
    }

    fn hessian_diagonal(&self, x: &[T], h: &mut [T]) {
        weighted_map(self.weight, x, h, T::recip);
    }

    fn project_feasible(&self, v: &[T], x: &mut [T]) {
        x.scalarop_from(|vi| T::max(vi, self.floor), v);
    }

    fn in_domain(&self, x: &[T]) -> bool {
        x.iter().all(|&xi| xi > T::zero())
    }
}
