//! Fluid property errors.

use thiserror::Error;
use tp_core::TpError;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur during species lookup and property evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Species key is not in the registry.
    #[error("Unknown species: {key}")]
    UnknownSpecies { key: String },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Operation not supported (e.g., substance unknown to the backend).
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// Backend (CoolProp) error, including an uninitialized backend.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<FluidError> for TpError {
    fn from(err: FluidError) -> Self {
        match err {
            FluidError::UnknownSpecies { .. } => TpError::InvalidArg {
                what: "unknown species",
            },
            FluidError::NonPhysical { what } => TpError::Invariant { what },
            FluidError::InvalidArg { what } => TpError::InvalidArg { what },
            FluidError::NotSupported { what } => TpError::Invariant { what },
            FluidError::Backend { .. } => TpError::Invariant {
                what: "fluid backend error",
            },
        }
    }
}
