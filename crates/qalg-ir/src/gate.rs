//! Gate catalog.
//!
//! Every operation in a circuit is a [`GateOp`]: a single-qubit base gate
//! from [`StandardGate`] applied to a target, optionally conditioned on one
//! or more control qubits all being `|1⟩`. CNOT, CZ, Toffoli and the
//! n-controlled NOT are all expressed this way.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;

use crate::matrix::{DenseMatrix, Matrix2};
use crate::qubit::QubitId;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Single-qubit base gates with fixed matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
        }
    }

    /// The 2×2 unitary of this gate.
    pub fn matrix(&self) -> Matrix2 {
        match *self {
            StandardGate::X => [[ZERO, ONE], [ONE, ZERO]],
            StandardGate::Y => [[ZERO, -I], [I, ZERO]],
            StandardGate::Z => [[ONE, ZERO], [ZERO, -ONE]],
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            StandardGate::S => [[ONE, ZERO], [ZERO, I]],
            StandardGate::Sdg => [[ONE, ZERO], [ZERO, -I]],
            StandardGate::T => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)]],
            StandardGate::Tdg => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, -std::f64::consts::FRAC_PI_4)]],
            StandardGate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(theta / 2.0).sin());
                [[c, s], [s, c]]
            }
            StandardGate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                [[c, -s], [s, c]]
            }
            StandardGate::Rz(theta) => [
                [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
                [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
            ],
            StandardGate::P(theta) => [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]],
        }
    }

    /// Whether the matrix is diagonal (only phases, no amplitude mixing).
    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            StandardGate::Z
                | StandardGate::S
                | StandardGate::Sdg
                | StandardGate::T
                | StandardGate::Tdg
                | StandardGate::Rz(_)
                | StandardGate::P(_)
        )
    }
}

/// One operation in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateOp {
    /// A base gate on one qubit.
    Single {
        /// The base gate.
        gate: StandardGate,
        /// Qubit the gate acts on.
        target: QubitId,
    },
    /// A base gate on `target`, applied only where `control` is `|1⟩`.
    Controlled {
        /// The base gate.
        gate: StandardGate,
        /// Control qubit.
        control: QubitId,
        /// Qubit the gate acts on.
        target: QubitId,
    },
    /// A base gate on `target`, applied only where every control is `|1⟩`.
    MultiControlled {
        /// The base gate.
        gate: StandardGate,
        /// Control qubits.
        controls: Vec<QubitId>,
        /// Qubit the gate acts on.
        target: QubitId,
    },
}

impl GateOp {
    /// Construct a gate with any number of controls, choosing the narrowest
    /// variant that fits.
    pub fn controlled(gate: StandardGate, controls: Vec<QubitId>, target: QubitId) -> Self {
        match controls.as_slice() {
            [] => GateOp::Single { gate, target },
            [control] => GateOp::Controlled {
                gate,
                control: *control,
                target,
            },
            _ => GateOp::MultiControlled {
                gate,
                controls,
                target,
            },
        }
    }

    /// The base gate applied to the target.
    #[inline]
    pub fn base(&self) -> StandardGate {
        match self {
            GateOp::Single { gate, .. }
            | GateOp::Controlled { gate, .. }
            | GateOp::MultiControlled { gate, .. } => *gate,
        }
    }

    /// The target qubit.
    #[inline]
    pub fn target(&self) -> QubitId {
        match self {
            GateOp::Single { target, .. }
            | GateOp::Controlled { target, .. }
            | GateOp::MultiControlled { target, .. } => *target,
        }
    }

    /// The control qubits (empty for single-qubit gates).
    #[inline]
    pub fn controls(&self) -> &[QubitId] {
        match self {
            GateOp::Single { .. } => &[],
            GateOp::Controlled { control, .. } => std::slice::from_ref(control),
            GateOp::MultiControlled { controls, .. } => controls,
        }
    }

    /// All operands in matrix order: `controls..., target`.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits = self.controls().to_vec();
        qubits.push(self.target());
        qubits
    }

    /// Number of qubits the operation touches.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.controls().len() as u32 + 1
    }

    /// Conventional name: `h`, `cx`, `cz`, `ccx`, `mcx`, `c<gate>`, `mc<gate>`.
    pub fn name(&self) -> String {
        let base = self.base().name();
        match self.controls().len() {
            0 => base.to_string(),
            1 => format!("c{base}"),
            2 if self.base() == StandardGate::X => "ccx".to_string(),
            _ => format!("mc{base}"),
        }
    }

    /// The full unitary of the operation, operands ordered `controls..., target`.
    ///
    /// Multi-controlled gates are built by adding one control at a time.
    pub fn matrix(&self) -> DenseMatrix {
        let mut matrix = DenseMatrix::from(self.base().matrix());
        for _ in self.controls() {
            matrix = matrix.controlled();
        }
        matrix
    }

    /// This operation with every operand shifted up by `offset`.
    #[must_use]
    pub fn shifted(&self, offset: u32) -> Self {
        match self {
            GateOp::Single { gate, target } => GateOp::Single {
                gate: *gate,
                target: target.offset(offset),
            },
            GateOp::Controlled {
                gate,
                control,
                target,
            } => GateOp::Controlled {
                gate: *gate,
                control: control.offset(offset),
                target: target.offset(offset),
            },
            GateOp::MultiControlled {
                gate,
                controls,
                target,
            } => GateOp::MultiControlled {
                gate: *gate,
                controls: controls.iter().map(|q| q.offset(offset)).collect(),
                target: target.offset(offset),
            },
        }
    }
}
