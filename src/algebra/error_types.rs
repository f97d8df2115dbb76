use thiserror::Error;

/// Error type returned by [`LinearMap`](crate::algebra::LinearMap) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearMapError {
    /// Operands have dimensions that are incompatible for the operation
    #[error("Incompatible dimensions in {op}: {lhs:?} vs {rhs:?}")]
    IncompatibleDimension {
        /// name of the failing operation
        op: &'static str,
        /// (rows, cols) of the left operand
        lhs: (usize, usize),
        /// (rows, cols) of the right operand (or vector length as (len, 1))
        rhs: (usize, usize),
    },
    /// Inverse requested for a non-square map
    #[error("Cannot invert a non-square {m} x {n} map")]
    NotSquare {
        /// number of rows
        m: usize,
        /// number of columns
        n: usize,
    },
    /// Inverse requested for a singular map
    #[error("Map is singular")]
    Singular,
}

/// Error type returned by block-structured linear algebra operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockError {
    /// A block or vector has a dimension that disagrees with the
    /// dimension already declared for its key
    #[error("Dimension mismatch for key {key}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// variable key
        key: String,
        /// declared dimension
        expected: usize,
        /// supplied dimension
        actual: usize,
    },
    /// Inverse requested for a matrix with an off-diagonal block
    #[error("Block matrix is not block diagonal: found block ({row}, {col})")]
    NotBlockDiagonal {
        /// row key of the offending block
        row: String,
        /// column key of the offending block
        col: String,
    },
    /// A per-block operation failed
    #[error("Block ({row}, {col}): {source}")]
    LinearMap {
        /// row key of the failing block
        row: String,
        /// column key of the failing block
        col: String,
        /// underlying failure
        #[source]
        source: LinearMapError,
    },
}

/// Error type returned by dense factorization routines.
#[derive(Error, Debug)]
pub(crate) enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("LU error")]
    LU(usize),
}
