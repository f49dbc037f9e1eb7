//! Errors

use crate::pbrt::Float;
use thiserror::Error;

/// Errors reported by the checked construction APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScatterError {
    /// The aggregate already holds its maximum number of scattering terms.
    #[error("cannot add BxDF: BSDF maximum limit {max} reached")]
    CapacityExceeded { max: usize },

    /// A sample number was outside [0, 1).
    #[error("sample value {value} at index {index} is outside [0, 1)")]
    SampleOutOfRange { index: usize, value: Float },

    /// Measured table dimensions do not match the supplied data.
    #[error("table expects {expected} values but {actual} were supplied")]
    TableSize { expected: usize, actual: usize },

    /// A construction parameter is unusable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for fallible scattering operations.
pub type Result<T> = std::result::Result<T, ScatterError>;
