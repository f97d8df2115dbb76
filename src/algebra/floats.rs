#![allow(non_snake_case)]
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Main trait for floating point types used throughout proxima.
///
/// All floating point calculations in the proximal operators and in the
/// block linear algebra are represented internally on values implementing
/// `FloatT`.   Implementations are provided automatically for any type
/// satisfying the trait bounds, which in practice means `f32` and `f64`.
///
/// `FloatT` relies on [`num_traits`](num_traits) for most of its constituent
/// trait bounds.  The `Send + Sync` bounds allow immutable algebra values
/// and initialized operators to be shared across threads.
pub trait FloatT:
    'static
    + Send
    + Sync
    + Float
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
    + std::iter::Sum
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Sync
        + Float
            + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
        + std::iter::Sum
{
}

/// Trait for converting Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// This convenience trait is implemented on f32/64 and usize and is
/// used internally for converting constant primitives to
/// [`FloatT`](crate::algebra::FloatT), e.g. for the default values in
/// [`NewtonSettings`](crate::prox::NewtonSettings).

// NB: `AsFloatT` lets us write (0.5).as_T() on constants,
// rather than T::from_f64(0.5).unwrap()
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(usize, from_usize);
impl_as_FloatT!(f32, from_f32);
impl_as_FloatT!(f64, from_f64);
