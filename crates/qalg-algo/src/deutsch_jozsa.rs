//! Deutsch-Jozsa circuit generator.
//!
//! The oracle encodes the linear function f(x) = a·x ⊕ b over `n` input bits.
//! It is constant when `a = 0…0` and balanced otherwise; in the noiseless
//! case the input register measures exactly `a`.

use qalg_ir::{Circuit, QubitId, qubit_range};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bits::parse_bits;
use crate::error::{AlgoError, AlgoResult};

/// Result of a Deutsch-Jozsa run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OracleClass {
    /// f returns the same value for every input.
    Constant,
    /// f returns 0 for exactly half of the inputs.
    Balanced,
}

impl std::fmt::Display for OracleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleClass::Constant => write!(f, "constant"),
            OracleClass::Balanced => write!(f, "balanced"),
        }
    }
}

/// Build the oracle U_f for f(x) = a·x ⊕ b on `n` inputs plus one ancilla.
///
/// The ancilla is qubit `n`. The leftmost character of `a_bits` controls from
/// input qubit `n - 1`, the rightmost from qubit 0.
pub fn linear_oracle(n: u32, a_bits: &str, b: u8) -> AlgoResult<Circuit> {
    check_register(n)?;
    if b > 1 {
        return Err(AlgoError::InvalidParameter(format!(
            "constant bit must be 0 or 1, got {b}"
        )));
    }
    let a = parse_bits(a_bits, n)?;
    let ancilla = QubitId(n);

    let mut oracle = Circuit::new("U_f", n + 1);
    if b == 1 {
        oracle.x(ancilla)?;
    }
    for (q, _) in a.iter().enumerate().filter(|(_, bit)| **bit) {
        oracle.cx(QubitId(q as u32), ancilla)?;
    }
    Ok(oracle)
}

/// Generate a Deutsch-Jozsa circuit for the linear oracle `(a_bits, b)`.
///
/// # Arguments
/// * `n` - Number of input qubits; the circuit has `n + 1` with the ancilla last
/// * `a_bits` - Linear coefficients, most significant qubit first
/// * `b` - Constant term, 0 or 1
///
/// # Returns
/// A circuit that measures only the `n` input qubits.
pub fn deutsch_jozsa_circuit(n: u32, a_bits: &str, b: u8) -> AlgoResult<Circuit> {
    let oracle = linear_oracle(n, a_bits, b)?;
    let ancilla = QubitId(n);

    let mut circuit = Circuit::new("Deutsch-Jozsa", n + 1);

    // Step 1: |0…0⟩ ⊗ |1⟩
    circuit.x(ancilla)?;

    // Step 2: inputs to |+⟩, ancilla to |−⟩
    for q in qubit_range(n + 1) {
        circuit.h(q)?;
    }

    // Step 3: oracle
    circuit.append(&oracle, 0)?;

    // Step 4: interfere the inputs
    for q in qubit_range(n) {
        circuit.h(q)?;
    }

    // Step 5: measure inputs only
    for q in qubit_range(n) {
        circuit.measure(q)?;
    }

    debug!(n, a_bits, b, gates = circuit.num_ops(), "built Deutsch-Jozsa circuit");
    Ok(circuit)
}

/// Decide the oracle class from measured `(bitstring, count)` pairs.
///
/// The oracle is constant exactly when every shot reads all zeros.
pub fn classify<'a, I>(outcomes: I) -> AlgoResult<OracleClass>
where
    I: IntoIterator<Item = (&'a String, &'a u64)>,
{
    let mut seen = false;
    for (bitstring, &count) in outcomes {
        if count == 0 {
            continue;
        }
        seen = true;
        if bitstring.bytes().any(|b| b != b'0') {
            return Ok(OracleClass::Balanced);
        }
    }
    if seen {
        Ok(OracleClass::Constant)
    } else {
        Err(AlgoError::InvalidParameter(
            "no measurement outcomes to classify".into(),
        ))
    }
}

/// The linear coefficients `a` read back from a balanced run.
///
/// Returns the most frequent outcome, or `None` when it is all zeros.
pub fn recovered_secret<'a, I>(outcomes: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a String, &'a u64)>,
{
    outcomes
        .into_iter()
        .filter(|(_, count)| **count > 0)
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .filter(|(bitstring, _)| bitstring.bytes().any(|b| b != b'0'))
        .map(|(bitstring, _)| bitstring.clone())
}

pub(crate) fn check_register(n: u32) -> AlgoResult<()> {
    if n == 0 {
        return Err(AlgoError::InvalidParameter(
            "register must have at least one input qubit".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalg_ir::GateOp;

    #[test]
    fn test_oracle_maps_leftmost_to_highest_qubit() {
        let oracle = linear_oracle(3, "100", 0).unwrap();
        assert_eq!(oracle.num_qubits(), 4);
        assert_eq!(oracle.num_ops(), 1);
        assert_eq!(oracle.ops()[0].qubits(), vec![QubitId(2), QubitId(3)]);
    }

    #[test]
    fn test_oracle_constant_bit_adds_x() {
        let oracle = linear_oracle(2, "00", 1).unwrap();
        assert_eq!(oracle.ops().len(), 1);
        assert!(matches!(
            oracle.ops()[0],
            GateOp::Single { target: QubitId(2), .. }
        ));
        assert_eq!(oracle.name(), "U_f");
    }

    #[test]
    fn test_bad_parameters() {
        assert!(matches!(
            linear_oracle(2, "01", 2),
            Err(AlgoError::InvalidParameter(_))
        ));
        assert!(deutsch_jozsa_circuit(3, "0101", 0).is_err());
        assert!(deutsch_jozsa_circuit(0, "", 0).is_err());
    }

    #[test]
    fn test_circuit_measures_inputs_only() {
        let circuit = deutsch_jozsa_circuit(3, "011", 1).unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(
            circuit.measured_qubits(),
            &[QubitId(0), QubitId(1), QubitId(2)]
        );
        // X + 4 H + oracle (X + 2 CX) + 3 H
        assert_eq!(circuit.num_ops(), 11);
    }

    #[test]
    fn test_classify_and_secret() {
        let zeros = [("000".to_string(), 10u64)];
        assert_eq!(
            classify(zeros.iter().map(|(k, v)| (k, v))).unwrap(),
            OracleClass::Constant
        );
        assert_eq!(recovered_secret(zeros.iter().map(|(k, v)| (k, v))), None);

        let mixed = [("000".to_string(), 1u64), ("110".to_string(), 9u64)];
        assert_eq!(
            classify(mixed.iter().map(|(k, v)| (k, v))).unwrap(),
            OracleClass::Balanced
        );
        assert_eq!(
            recovered_secret(mixed.iter().map(|(k, v)| (k, v))).as_deref(),
            Some("110")
        );

        let empty: [(String, u64); 0] = [];
        assert!(classify(empty.iter().map(|(k, v)| (k, v))).is_err());
    }
}
