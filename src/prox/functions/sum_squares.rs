use super::*;
use crate::algebra::*;

/// `f(x) = weight * ½ Σ xᵢ²`
#[derive(Debug, Clone)]
pub struct SumSquares<T> {
    weight: T,
}

impl<T> SumSquares<T>
where
    T: FloatT,
{
    pub fn new(weight: T) -> Self {
        Self { weight }
    }
}

impl<T> Default for SumSquares<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(T::one())
    }
}

impl<T> SmoothFunction<T> for SumSquares<T>
where
    T: FloatT,
{
    fn eval(&self, x: &[T]) -> T {
        self.weight * x.sumsq() * (0.5).as_T()
    }

    fn gradient(&self, x: &[T], g: &mut [T]) {
        weighted_map(self.weight, x, g, |xi| xi);
    }

    fn hessian_diagonal(&self, _x: &[T], h: &mut [T]) {
        h.set(self.weight);
    }

    fn project_feasible(&self, v: &[T], x: &mut [T]) {
        x.copy_from(v);
    }
}

#[test]
fn test_sum_squares_eval() {
    let f = SumSquares::<f64>::new(2.0);
    assert_eq!(f.eval(&[1., -2., 3.]), 14.);

    let f = SumSquares::<f32>::default();
    assert_eq!(f.eval(&[3., 4.]), 12.5);
}
