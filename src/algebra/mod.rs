//! Proxima algebra module.
//!
//! __NB__: Users will not ordinarily need to interact with this module
//! beyond constructing the [`BlockMatrix`] and [`BlockVector`] arguments
//! of a proximal operator.
//!
//! This module implements the block-structured linear algebra used by
//! the proximal operators.   Block matrices hold one [`LinearMap`] per
//! (row key, column key) pair, and each [`LinearMap`] is one of a dense
//! matrix, a sparse matrix in CSC format, a multiple of the identity or
//! a diagonal matrix.   Combining two maps picks the cheapest
//! representation able to hold the result.
//!
//! All operations are generic over floats implementing [`FloatT`],
//! which is satisfied by both `f32` and `f64`.

#![allow(non_snake_case)]

mod block;
mod csc;
mod dense;
mod error_types;
mod floats;
mod linear_map;
mod math_traits;
mod matrix_traits;
mod vecmath;

pub use block::*;
pub use csc::*;
pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use linear_map::*;
pub use math_traits::*;
pub use matrix_traits::*;

#[cfg(test)]
mod tests;
