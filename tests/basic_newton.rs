#![allow(non_snake_case)]

use proxima::{algebra::*, prox::*};
use rand::prelude::*;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use std::sync::Arc;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn blockvec(entries: &[(&str, &[f64])]) -> BlockVector<f64> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_vec()))
        .collect()
}

// f applied directly to the variable x
fn identity_arg(lambda: f64, n: usize) -> ProxOperatorArg<f64> {
    ProxOperatorArgBuilder::default()
        .lambda(lambda)
        .affine_arg(AffineOperator::new(
            BlockMatrix::identity([("x", n)]),
            BlockVector::new(),
        ))
        .build()
        .unwrap()
}

fn newton_prox(function: ProxFunctionType, arg: &ProxOperatorArg<f64>) -> Box<dyn ProxOperator<f64>> {
    let registry = ProxRegistry::with_default_operators();
    let mut prox = registry.create(ProxKind::new(function)).unwrap();
    prox.init(arg).unwrap();
    prox
}

// max |x - v + λ∇f(x)|
fn stationarity<F: SmoothFunction<f64>>(f: &F, x: &[f64], v: &[f64], lambda: f64) -> f64 {
    let mut g = vec![0.; x.len()];
    f.gradient(x, &mut g);
    x.iter()
        .zip(v)
        .zip(&g)
        .map(|((xi, vi), gi)| (xi - vi + lambda * gi).abs())
        .fold(0., f64::max)
}

#[test]
fn test_newton_sum_squares() {
    init_logging();

    let prox = newton_prox(ProxFunctionType::SumSquares, &identity_arg(1.0, 2));
    let x = prox.apply(&blockvec(&[("x", &[4., -2.])])).unwrap();
    let x = x.get("x").unwrap();
    assert!((x[0] - 2.).abs() < 1e-10);
    assert!((x[1] + 1.).abs() < 1e-10);

    for lambda in [0.01, 0.5, 20.] {
        let prox = newton_prox(ProxFunctionType::SumSquares, &identity_arg(lambda, 3));
        let v = [1., -3., 0.25];
        let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
        for (xi, vi) in x.get("x").unwrap().iter().zip(v) {
            assert!((xi - vi / (1. + lambda)).abs() < 1e-8);
        }
    }
}

#[test]
fn test_newton_neg_log() {
    init_logging();

    let lambda = 0.5;
    let v = [-2., 0., 1e-3, 3.];
    let prox = newton_prox(ProxFunctionType::SumNegLog, &identity_arg(lambda, v.len()));
    let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();

    for (xi, vi) in x.get("x").unwrap().iter().zip(v) {
        let expected = (vi + (vi * vi + 4. * lambda).sqrt()) / 2.;
        assert!((xi - expected).abs() < 1e-8);
    }
}

#[test]
fn test_newton_separable_builtins() {
    init_logging();

    let v = [-1.5, 0., 0.7, 2.];
    let lambda = 0.8;

    let prox = newton_prox(ProxFunctionType::SumLogistic, &identity_arg(lambda, v.len()));
    let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
    assert!(stationarity(&SumLogistic::default(), x.get("x").unwrap(), &v, lambda) < 1e-8);

    let prox = newton_prox(ProxFunctionType::SumExp, &identity_arg(lambda, v.len()));
    let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
    assert!(stationarity(&SumExp::default(), x.get("x").unwrap(), &v, lambda) < 1e-8);

    let prox = newton_prox(ProxFunctionType::SumNegEntropy, &identity_arg(lambda, v.len()));
    let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
    let x = x.get("x").unwrap();
    assert!(x.iter().all(|&xi| xi > 0.));
    assert!(stationarity(&SumNegEntropy::default(), x, &v, lambda) < 1e-8);
}

#[test]
fn test_newton_scaled_argument() {
    // f(2x) = 2‖x‖², so prox_{λf}(v) = v / (1 + 4λ)
    let mut M = BlockMatrix::new();
    M.insert("u", "x", LinearMap::Scalar { n: 2, alpha: 2. })
        .unwrap();
    let arg = ProxOperatorArgBuilder::default()
        .lambda(1.0)
        .affine_arg(AffineOperator::new(M, BlockVector::new()))
        .build()
        .unwrap();

    let prox = newton_prox(ProxFunctionType::SumSquares, &arg);
    let x = prox.apply(&blockvec(&[("x", &[5., 10.])])).unwrap();
    let x = x.get("x").unwrap();
    assert!((x[0] - 1.).abs() < 1e-10);
    assert!((x[1] - 2.).abs() < 1e-10);
}

#[test]
fn test_newton_offset_argument() {
    // f(x) = ½(x + 1)², so prox_{λf}(v) = (v - λ) / (1 + λ)
    let arg = ProxOperatorArgBuilder::default()
        .lambda(1.0)
        .affine_arg(AffineOperator::new(
            BlockMatrix::identity([("x", 1)]),
            blockvec(&[("x", &[1.])]),
        ))
        .build()
        .unwrap();

    let prox = newton_prox(ProxFunctionType::SumSquares, &arg);
    let x = prox.apply(&blockvec(&[("x", &[3.])])).unwrap();
    assert!((x.get("x").unwrap()[0] - 1.).abs() < 1e-10);
}

#[test]
fn test_newton_several_arguments() {
    let arg = ProxOperatorArgBuilder::default()
        .lambda(3.0)
        .affine_arg(AffineOperator::new(
            BlockMatrix::identity([("x", 1), ("y", 2)]),
            BlockVector::new(),
        ))
        .build()
        .unwrap();

    let prox = newton_prox(ProxFunctionType::SumSquares, &arg);
    let x = prox
        .apply(&blockvec(&[("x", &[4.]), ("y", &[8., -4.])]))
        .unwrap();
    assert!((x.get("x").unwrap()[0] - 1.).abs() < 1e-10);
    assert!((x.get("y").unwrap()[0] - 2.).abs() < 1e-10);
    assert!((x.get("y").unwrap()[1] + 1.).abs() < 1e-10);
}

#[test]
fn test_newton_nonuniform_scaling() {
    let mut M = BlockMatrix::new();
    M.insert("a", "x", LinearMap::Scalar { n: 1, alpha: 2. })
        .unwrap();
    M.insert("b", "y", LinearMap::identity(1)).unwrap();
    let arg = ProxOperatorArgBuilder::default()
        .affine_arg(AffineOperator::new(M, BlockVector::new()))
        .build()
        .unwrap();

    let prox = newton_prox(ProxFunctionType::SumSquares, &arg);
    let result = prox.apply(&blockvec(&[("x", &[1.]), ("y", &[1.])]));
    assert_eq!(result, Err(ProxError::NonUniformScaling));
}

// f(x) = Σ xᵢ⁴/4 + xᵢ²/2
struct QuarticPlusQuadratic;

impl SmoothFunction<f64> for QuarticPlusQuadratic {
    fn eval(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi.powi(4) / 4. + xi * xi / 2.).sum()
    }
    fn gradient(&self, x: &[f64], g: &mut [f64]) {
        for (gi, xi) in g.iter_mut().zip(x) {
            *gi = xi.powi(3) + xi;
        }
    }
    fn hessian_diagonal(&self, x: &[f64], h: &mut [f64]) {
        for (hi, xi) in h.iter_mut().zip(x) {
            *hi = 3. * xi * xi + 1.;
        }
    }
    fn project_feasible(&self, v: &[f64], x: &mut [f64]) {
        x.copy_from_slice(v);
    }
}

#[test]
fn test_newton_user_function() {
    init_logging();

    let f: Arc<dyn SmoothFunction<f64>> = Arc::new(QuarticPlusQuadratic);
    let arg = ProxOperatorArgBuilder::default()
        .lambda(1.0)
        .affine_arg(AffineOperator::new(
            BlockMatrix::identity([("x", 3)]),
            BlockVector::new(),
        ))
        .function(f)
        .build()
        .unwrap();

    let prox = newton_prox(ProxFunctionType::Smooth, &arg);
    let v = [3., 0., -10.];
    let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
    let x = x.get("x").unwrap();

    // x³ + 2x = 3 has the root x = 1
    assert!((x[0] - 1.).abs() < 1e-8);
    assert!(x[1].abs() < 1e-12);
    assert!(stationarity(&QuarticPlusQuadratic, x, &v, 1.0) < 1e-8);
}

#[test]
fn test_newton_missing_function() {
    let registry = ProxRegistry::<f64>::with_default_operators();
    let mut prox = registry
        .create(ProxKind::new(ProxFunctionType::Smooth))
        .unwrap();
    assert_eq!(prox.init(&identity_arg(1.0, 2)), Err(ProxError::MissingFunction));
    assert_eq!(
        prox.apply(&blockvec(&[("x", &[1., 1.])])),
        Err(ProxError::Uninitialized)
    );
}

#[test]
fn test_newton_kernel_direct() {
    let kernel = NewtonProx::with_function(
        Arc::new(SumSquares::new(2.0)) as Arc<dyn SmoothFunction<f64>>,
        NewtonSettings::default(),
    );
    // x - v + 2λx = 0
    let x = kernel.evaluate(&[6.], 1.0).unwrap();
    assert!((x[0] - 2.).abs() < 1e-10);

    let kernel = NewtonProx::<f64>::new(NewtonSettings::default());
    assert_eq!(kernel.evaluate(&[1.], 1.0), Err(ProxError::MissingFunction));
}

fn builtins() -> [(ProxFunctionType, BuiltinFunction<f64>); 5] {
    [
        (ProxFunctionType::SumSquares, SumSquares::default().into()),
        (ProxFunctionType::SumLogistic, SumLogistic::default().into()),
        (ProxFunctionType::SumNegLog, SumNegLog::default().into()),
        (ProxFunctionType::SumExp, SumExp::default().into()),
        (ProxFunctionType::SumNegEntropy, SumNegEntropy::default().into()),
    ]
}

#[test]
fn test_newton_random_builtins() {
    init_logging();

    let mut rng = Xoshiro256StarStar::seed_from_u64(1234);
    for (function, f) in builtins() {
        for _ in 0..50 {
            let n = rng.gen_range(1..5);
            let lambda = rng.gen_range(0.1..3.0);
            // includes points outside the domain of the log and entropy terms
            let v: Vec<f64> = (0..n).map(|_| rng.gen_range(-3.0..3.0)).collect();

            let prox = newton_prox(function, &identity_arg(lambda, n));
            let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
            let x = x.get("x").unwrap();

            assert!(f.in_domain(x), "{:?}: {:?} -> {:?}", function, v, x);
            assert!(
                stationarity(&f, x, &v, lambda) < 1e-6,
                "{:?}: {:?} -> {:?}",
                function,
                v,
                x
            );
        }
    }
}

#[test]
fn test_newton_small_result_far_from_input() {
    // x - v - 1/x = 0 with v = -1e9 has the root x ≈ 1e-9
    let v = [-1e9];
    let prox = newton_prox(ProxFunctionType::SumNegLog, &identity_arg(1.0, 1));
    let x = prox.apply(&blockvec(&[("x", &v)])).unwrap();
    let x = x.get("x").unwrap()[0];

    let kernel = NewtonProx::with_function(
        Arc::new(SumNegLog::default()) as Arc<dyn SmoothFunction<f64>>,
        NewtonSettings::default(),
    );
    let expected = kernel.evaluate(&v, 1.0).unwrap()[0];

    assert!(x > 0.);
    assert_eq!(x, expected);
    assert!((x - 1e-9).abs() < 1e-15);
}

#[test]
fn test_newton_scaled_small_result() {
    // f(2x) = -log(2x), whose prox is that of -log(x)
    let mut M = BlockMatrix::new();
    M.insert("u", "x", LinearMap::Scalar { n: 1, alpha: 2. })
        .unwrap();
    let arg = ProxOperatorArgBuilder::default()
        .lambda(1.0)
        .affine_arg(AffineOperator::new(M, BlockVector::new()))
        .build()
        .unwrap();

    // stationarity x - v - 1/x = 0 for v = -1e8
    let prox = newton_prox(ProxFunctionType::SumNegLog, &arg);
    let x = prox.apply(&blockvec(&[("x", &[-1e8])])).unwrap();
    let x = x.get("x").unwrap()[0];
    assert!(x > 0.);
    assert!((x * 1e8 - 1.).abs() < 1e-6);
}
