//! Grover's search algorithm circuit generator.
//!
//! Grover's algorithm finds a marked item in an unstructured database
//! with O(sqrt(N)) queries, compared to O(N) classically.

use std::f64::consts::PI;

use qalg_ir::{Circuit, QubitId, qubit_range};
use tracing::debug;

use crate::bits::parse_bits;
use crate::deutsch_jozsa::check_register;
use crate::error::AlgoResult;

/// Generate a Grover search circuit.
///
/// # Arguments
/// * `n` - Number of qubits (search space size = 2^n)
/// * `marked` - The state to find, most significant qubit first
/// * `iterations` - Number of Grover iterations; see [`optimal_iterations`]
///
/// # Returns
/// A circuit implementing Grover's algorithm with measurements.
pub fn grover_circuit(n: u32, marked: &str, iterations: u32) -> AlgoResult<Circuit> {
    let oracle = grover_oracle(n, marked)?;
    let diffuser = grover_diffuser(n)?;

    let mut circuit = Circuit::new("Grover", n);

    // Step 1: Initialize superposition with Hadamard on all qubits
    for q in qubit_range(n) {
        circuit.h(q)?;
    }

    // Step 2: Apply Grover iterations
    for _ in 0..iterations {
        circuit.append(&oracle, 0)?;
        circuit.append(&diffuser, 0)?;
    }

    // Step 3: Measure all qubits
    circuit.measure_all()?;

    debug!(n, marked, iterations, gates = circuit.num_ops(), "built Grover circuit");
    Ok(circuit)
}

/// Oracle flipping the phase of `marked`.
///
/// Qubits whose marked bit is 0 are flipped so the marked state maps to
/// |1…1⟩, a multi-controlled Z is applied as H·MCX·H on the last qubit, and
/// the flips are undone.
pub fn grover_oracle(n: u32, marked: &str) -> AlgoResult<Circuit> {
    check_register(n)?;
    let bits = parse_bits(marked, n)?;
    let zeros: Vec<QubitId> = qubit_range(n).filter(|q| !bits[q.index()]).collect();

    let mut oracle = Circuit::new("Oracle", n);
    for &q in &zeros {
        oracle.x(q)?;
    }
    apply_multi_controlled_z(&mut oracle, n)?;
    for &q in &zeros {
        oracle.x(q)?;
    }
    Ok(oracle)
}

/// Diffusion operator 2|s⟩⟨s| − I (up to global phase).
pub fn grover_diffuser(n: u32) -> AlgoResult<Circuit> {
    check_register(n)?;
    let mut diffuser = Circuit::new("Diffuser", n);

    for q in qubit_range(n) {
        diffuser.h(q)?;
    }
    for q in qubit_range(n) {
        diffuser.x(q)?;
    }
    apply_multi_controlled_z(&mut diffuser, n)?;
    for q in qubit_range(n) {
        diffuser.x(q)?;
    }
    for q in qubit_range(n) {
        diffuser.h(q)?;
    }
    Ok(diffuser)
}

/// Phase flip on |1…1⟩: H on the last qubit around an (n-1)-controlled X.
fn apply_multi_controlled_z(circuit: &mut Circuit, n: u32) -> AlgoResult<()> {
    let target = QubitId(n - 1);
    circuit.h(target)?;
    circuit.mcx(qubit_range(n - 1), target)?;
    circuit.h(target)?;
    Ok(())
}

/// Calculate the optimal number of Grover iterations.
///
/// For a single marked item in a space of size N = 2^n the success
/// probability peaks at k = π/(4θ) − 1/2 with θ = asin(1/√N), which is
/// approximately π/4 * sqrt(N) for large N.
pub fn optimal_iterations(n: u32) -> u32 {
    let optimal = (PI / (4.0 * rotation_angle(n)) - 0.5).round() as u32;
    optimal.max(1)
}

/// Probability of measuring the marked state after `iterations` rounds.
///
/// With θ = asin(1/√N) this is sin²((2k + 1)·θ).
pub fn success_probability(n: u32, iterations: u32) -> f64 {
    let theta = rotation_angle(n);
    ((2.0 * f64::from(iterations) + 1.0) * theta).sin().powi(2)
}

/// θ = asin(1/√N) for N = 2^n.
fn rotation_angle(n: u32) -> f64 {
    let size = 2f64.powi(n as i32);
    (1.0 / size.sqrt()).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(optimal_iterations(1), 1);
        assert_eq!(optimal_iterations(2), 1);
        assert_eq!(optimal_iterations(3), 2);
        assert_eq!(optimal_iterations(4), 3);
        assert_eq!(optimal_iterations(10), 25);
    }

    #[test]
    fn test_success_probability() {
        // N = 4: one iteration finds the item with certainty
        assert!((success_probability(2, 1) - 1.0).abs() < 1e-12);
        assert!((success_probability(3, 0) - 0.125).abs() < 1e-12);
        assert!((success_probability(3, 1) - 0.78125).abs() < 1e-12);
    }

    #[test]
    fn test_oracle_structure_for_101() {
        let oracle = grover_oracle(3, "101").unwrap();
        let names: Vec<String> = oracle.ops().iter().map(|op| op.name()).collect();
        assert_eq!(names, vec!["x", "h", "ccx", "h", "x"]);
        assert_eq!(oracle.ops()[0].target(), QubitId(1));
        assert_eq!(oracle.ops()[2].target(), QubitId(2));
    }

    #[test]
    fn test_diffuser_structure() {
        let diffuser = grover_diffuser(3).unwrap();
        // 3 H + 3 X + H + CCX + H + 3 X + 3 H
        assert_eq!(diffuser.num_ops(), 15);
        assert_eq!(diffuser.name(), "Diffuser");
    }

    #[test]
    fn test_circuit_size() {
        let circuit = grover_circuit(3, "101", 2).unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_ops(), 3 + 2 * (5 + 15));
        assert_eq!(circuit.measured_qubits().len(), 3);

        // Per iteration: oracle x,h,ccx,h,x and diffuser 3h,3x,h,ccx,h,3x,3h
        let counts = circuit.gate_counts();
        assert_eq!(counts.get("h"), Some(&(3 + 2 * (2 + 8))));
        assert_eq!(counts.get("x"), Some(&(2 * (2 + 6))));
        assert_eq!(counts.get("ccx"), Some(&(2 * 2)));
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_single_qubit_search_degrades_to_z() {
        let oracle = grover_oracle(1, "1").unwrap();
        let names: Vec<String> = oracle.ops().iter().map(|op| op.name()).collect();
        assert_eq!(names, vec!["h", "x", "h"]);
    }

    #[test]
    fn test_rejects_bad_marked_state() {
        assert!(grover_circuit(3, "10", 1).is_err());
        assert!(grover_circuit(3, "1x1", 1).is_err());
        assert!(grover_circuit(0, "", 1).is_err());
    }
}
