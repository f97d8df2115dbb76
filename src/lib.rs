//! __Proxima__ is a proximal operator evaluation engine for splitting
//! based convex solvers such as ADMM.
//!
//! Given a function `f`, a scale `λ > 0` and a point `v`, a proximal
//! operator computes
//!
//! $$
//! \text{prox}_{\lambda f}(v) = \arg\min_x \frac{1}{2\lambda}\\|x - v\\|^2 + f(x).
//! $$
//!
//! Variables are named blocks of a [`BlockVector`](algebra::BlockVector),
//! and affine arguments and constraints are given as
//! [`BlockMatrix`](algebra::BlockMatrix) maps between them.
//!
//! ## Features
//!
//! * __Closed form operators__: linear functions restricted to an affine set
//!   are evaluated directly from a block diagonal inverse computed once.
//!
//! * __Smooth separable functions__: built-in sums of squares, logistic,
//!   negative log, exponential and negative entropy terms, or any user
//!   supplied smooth function with a diagonal Hessian, are evaluated by a
//!   damped Newton method with backtracking line search.
//!
//! * __Epigraph projections__: projection onto `{(t, x) : f(x) ≤ t}` for the
//!   same family of functions, using an arrowhead linear solve at each
//!   Newton step.
//!
//! __Example usage__ :
//!
//! ```no_run
//! use proxima::algebra::*;
//! use proxima::prox::*;
//!
//! let registry = ProxRegistry::<f64>::with_default_operators();
//! let mut prox = registry
//!     .create(ProxKind::new(ProxFunctionType::SumSquares))
//!     .unwrap();
//!
//! let arg = ProxOperatorArgBuilder::default()
//!     .lambda(1.0)
//!     .affine_arg(AffineOperator::new(
//!         BlockMatrix::identity([("x", 2)]),
//!         BlockVector::new(),
//!     ))
//!     .build()
//!     .unwrap();
//! prox.init(&arg).unwrap();
//!
//! let v: BlockVector<f64> = [("x".to_string(), vec![4.0, 2.0])].into_iter().collect();
//! let x = prox.apply(&v).unwrap();
//! assert_eq!(x.get("x").unwrap(), &[2.0, 1.0]);
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

//Rust hates greek characters
#![allow(confusable_idents)]

pub mod algebra;
pub mod prox;
