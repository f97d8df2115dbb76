use super::ProxKind;
use crate::algebra::{BlockError, LinearMapError};
use thiserror::Error;

/// Error type returned by proximal operator construction, initialization
/// and evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProxError {
    /// `apply` was called before a successful `init`
    #[error("Proximal operator used before initialization")]
    Uninitialized,
    /// The operator needs a smooth function handle and none was supplied
    #[error("No smooth function supplied for a Newton operator")]
    MissingFunction,
    /// No factory is registered for the requested kind
    #[error("No proximal operator registered for {0}")]
    UnregisteredKind(ProxKind),
    /// A factory is already registered for this kind
    #[error("Proximal operator already registered for {0}")]
    DuplicateRegistration(ProxKind),
    /// The Schur complement of an arrowhead system vanished
    #[error("Arrowhead system is singular")]
    DegenerateArrowhead,
    /// The affine argument of `key` is not a scaled orthogonal map
    #[error("Affine argument for {0} is not a multiple of an orthogonal map")]
    NonScalarArgument(String),
    /// Arguments that must share one scaling have different scalings
    #[error("Arguments of the function are scaled non-uniformly")]
    NonUniformScaling,
    /// A kernel did not set the output at this index
    #[error("Missing output value at index {0}")]
    MissingOutput(usize),
    /// The operator argument is malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Failure in a block operation
    #[error(transparent)]
    Block(#[from] BlockError),
    /// Failure in a linear map operation
    #[error(transparent)]
    LinearMap(#[from] LinearMapError),
}
