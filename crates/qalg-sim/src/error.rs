//! Error types for the sim crate.

use qalg_ir::{ErrorKind, IrError};
use thiserror::Error;

/// Errors produced while simulating or sampling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit IR error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// A parameter was rejected (zero shots, bad configuration value).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operands or amplitudes do not fit the state they are applied to.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// What the state or matrix required.
        expected: String,
        /// What was supplied.
        got: String,
    },

    /// The register would not fit the configured memory bound.
    #[error("Circuit has {requested} qubits but the simulator is limited to {max}")]
    TooManyQubits {
        /// Qubits requested by the circuit.
        requested: u32,
        /// Configured or addressable limit.
        max: u32,
    },

    /// The statevector norm drifted, so a non-unitary matrix was applied.
    #[error("Statevector norm² is {norm}, outside tolerance {tolerance} of 1")]
    NormalizationFailure {
        /// Observed squared norm.
        norm: f64,
        /// Allowed deviation from 1.
        tolerance: f64,
    },

    /// A probability distribution is empty, negative, or does not sum to 1.
    #[error("Invalid probability distribution: {0}")]
    InvalidDistribution(String),
}

impl SimError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::Ir(e) => e.kind(),
            SimError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            SimError::NormalizationFailure { .. } => ErrorKind::NormalizationFailure,
            SimError::InvalidParameter(_)
            | SimError::TooManyQubits { .. }
            | SimError::InvalidDistribution(_) => ErrorKind::InvalidParameter,
        }
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
