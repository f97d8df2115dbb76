//! Proxima proximal operators.
//!
//! A proximal operator evaluates
//!
//! $$
//! \text{prox}_{\lambda f}(v) = \arg\min_x \frac{1}{2\lambda}\\|x - v\\|^2 + f(x)
//! $$
//!
//! for a function `f` applied to an affine form `M x + g` of block
//! variables, optionally with an affine constraint `A x = b`.
//!
//! Every operator implements [`ProxOperator`].  It is configured once
//! from a [`ProxOperatorArg`] by `init` and then applied repeatedly.
//! Operators are created by kind from a [`ProxRegistry`].
//!
//! Operators for smooth separable functions are built from a
//! [`VectorProx`] adapter, which handles the affine argument, and a
//! [`VectorProxKernel`] that works in the natural coordinates of the
//! function.  The Newton kernels [`NewtonProx`] and [`NewtonEpigraph`]
//! accept any [`SmoothFunction`] with a diagonal Hessian.

#![allow(non_snake_case)]

mod affine;
mod arg;
mod arrowhead;
mod errors;
mod functions;
mod kinds;
mod newton;
mod registry;
mod settings;
mod traits;
mod vector;

pub use affine::*;
pub use arg::*;
pub use arrowhead::*;
pub use errors::*;
pub use functions::*;
pub use kinds::*;
pub use newton::*;
pub use registry::*;
pub use settings::*;
pub use traits::*;
pub use vector::*;
