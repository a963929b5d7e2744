//! Error types for process simulation.

use thiserror::Error;
use tp_core::TpError;
use tp_fluids::FluidError;

/// Errors surfaced by `simulate`.
///
/// Only malformed requests fail. Solver non-convergence and real-fluid lookup
/// failures are absorbed into the result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    #[error("Invalid request: {what}")]
    InvalidRequest { what: &'static str },

    #[error("Fluid error: {0}")]
    Fluid(#[from] FluidError),
}

pub type ProcessResult<T> = Result<T, ProcessError>;

impl From<TpError> for ProcessError {
    fn from(e: TpError) -> Self {
        match e {
            TpError::NonFinite { what, .. }
            | TpError::InvalidArg { what }
            | TpError::Invariant { what } => ProcessError::InvalidRequest { what },
        }
    }
}
