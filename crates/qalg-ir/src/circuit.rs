//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{GateOp, StandardGate};
use crate::qubit::QubitId;

/// A quantum circuit: an ordered gate list over a fixed register plus the
/// set of qubits to measure at the end.
///
/// Measured qubits are kept in declaration order; the `k`-th measured qubit
/// becomes character `k` counted from the right of an outcome bitstring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Width of the register.
    num_qubits: u32,
    /// Gate operations in application order.
    ops: Vec<GateOp>,
    /// Qubits read out after the last gate.
    measured: Vec<QubitId>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            ops: vec![],
            measured: vec![],
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::H, qubit)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::X, qubit)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Y, qubit)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Z, qubit)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::S, qubit)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Sdg, qubit)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::T, qubit)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Tdg, qubit)
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Rx(theta), qubit)
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Ry(theta), qubit)
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::Rz(theta), qubit)
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.single(StandardGate::P(theta), qubit)
    }

    fn single(&mut self, gate: StandardGate, target: QubitId) -> IrResult<&mut Self> {
        self.gate(GateOp::Single { gate, target })
    }

    // =========================================================================
    // Controlled gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(GateOp::Controlled {
            gate: StandardGate::X,
            control,
            target,
        })
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(GateOp::Controlled {
            gate: StandardGate::Z,
            control,
            target,
        })
    }

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.gate(GateOp::MultiControlled {
            gate: StandardGate::X,
            controls: vec![c1, c2],
            target,
        })
    }

    /// Apply an X on `target` controlled by every qubit in `controls`.
    ///
    /// Zero controls yields a plain X and one control a CX.
    pub fn mcx(
        &mut self,
        controls: impl IntoIterator<Item = QubitId>,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        let controls: Vec<_> = controls.into_iter().collect();
        self.gate(GateOp::controlled(StandardGate::X, controls, target))
    }

    /// Append an arbitrary operation after validating its operands.
    pub fn gate(&mut self, op: GateOp) -> IrResult<&mut Self> {
        self.validate_op(&op)?;
        self.ops.push(op);
        Ok(self)
    }

    fn validate_op(&self, op: &GateOp) -> IrResult<()> {
        let operands = op.qubits();
        for (i, &qubit) in operands.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::DimensionMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: Some(op.name()),
                });
            }
            if operands[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(op.name()),
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Inline the gates of `sub` into this circuit, shifting every operand
    /// up by `offset`.
    ///
    /// The sub-circuit keeps no link to the parent; only its gate list is
    /// copied. Sub-circuits carrying measurements cannot be inlined.
    pub fn append(&mut self, sub: &Circuit, offset: u32) -> IrResult<&mut Self> {
        let needed = u64::from(offset) + u64::from(sub.num_qubits);
        if needed > u64::from(self.num_qubits) {
            return Err(IrError::InvalidParameter(format!(
                "sub-circuit '{}' needs {} qubits at offset {}, but '{}' has {}",
                sub.name, sub.num_qubits, offset, self.name, self.num_qubits
            )));
        }
        if !sub.measured.is_empty() {
            return Err(IrError::InvalidParameter(format!(
                "sub-circuit '{}' contains measurements and cannot be inlined",
                sub.name
            )));
        }
        self.ops.extend(sub.ops.iter().map(|op| op.shifted(offset)));
        Ok(self)
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Mark a qubit for measurement after the final gate.
    pub fn measure(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::DimensionMismatch {
                qubit,
                num_qubits: self.num_qubits,
                gate_name: Some("measure".into()),
            });
        }
        if self.measured.contains(&qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: Some("measure".into()),
            });
        }
        self.measured.push(qubit);
        Ok(self)
    }

    /// Measure all qubits not measured yet, in index order.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for qubit in (0..self.num_qubits).map(QubitId) {
            if !self.measured.contains(&qubit) {
                self.measured.push(qubit);
            }
        }
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The operations in application order.
    pub fn ops(&self) -> &[GateOp] {
        &self.ops
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Qubits marked for measurement, in declaration order.
    pub fn measured_qubits(&self) -> &[QubitId] {
        &self.measured
    }

    /// Circuit depth: length of the longest chain of operations sharing qubits.
    pub fn depth(&self) -> usize {
        let mut layer = vec![0usize; self.num_qubits as usize];
        let mut depth = 0;
        for op in &self.ops {
            let qubits = op.qubits();
            let next = qubits
                .iter()
                .map(|q| layer[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in qubits {
                layer[q.index()] = next;
            }
            depth = depth.max(next);
        }
        depth
    }

    /// How many times each gate name occurs.
    pub fn gate_counts(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for op in &self.ops {
            *counts.entry(op.name()).or_insert(0) += 1;
        }
        counts
    }
}
