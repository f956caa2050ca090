//! Error types for the algorithm builders.

use qalg_ir::{ErrorKind, IrError};
use thiserror::Error;

/// Errors produced while building algorithm circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// A builder argument was rejected (register size, bitstring, constant bit).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),
}

impl AlgoError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AlgoError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            AlgoError::Ir(e) => e.kind(),
        }
    }
}

/// Result type for algorithm builders.
pub type AlgoResult<T> = Result<T, AlgoError>;
