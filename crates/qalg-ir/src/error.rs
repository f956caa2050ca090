//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// The three classes of failure every qalg error falls into.
///
/// None of them is transient: callers should treat any of them as fatal for
/// the requested run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad bitstring, zero qubits, zero shots, bad offset.
    InvalidParameter,
    /// An operand does not fit the register it is applied to.
    DimensionMismatch,
    /// A state lost its unit norm, which means a non-unitary matrix was applied.
    NormalizationFailure,
}

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A parameter was rejected.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Qubit index is outside the circuit.
    #[error(
        "Qubit {qubit} out of range for a {num_qubits}-qubit circuit{}",
        format_gate_context(.gate_name)
    )]
    DimensionMismatch {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },
}

impl IrError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IrError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            IrError::InvalidParameter(_) | IrError::DuplicateQubit { .. } => {
                ErrorKind::InvalidParameter
            }
        }
    }
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_gate_context() {
        let err = IrError::DimensionMismatch {
            qubit: QubitId(7),
            num_qubits: 3,
            gate_name: Some("cx".into()),
        };
        assert_eq!(
            err.to_string(),
            "Qubit q7 out of range for a 3-qubit circuit (gate: cx)"
        );
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);

        let err = IrError::DuplicateQubit {
            qubit: QubitId(1),
            gate_name: None,
        };
        assert_eq!(err.to_string(), "Duplicate qubit q1 in operation");
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }
}
