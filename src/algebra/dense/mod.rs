mod core;
pub use self::core::*;
mod lu;
mod matrix_math;
