//! qalg Circuit Intermediate Representation
//!
//! This crate provides the gate catalog and the circuit data structure shared
//! by the algorithm builders (`qalg-algo`) and the statevector simulator
//! (`qalg-sim`).
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], a lane index; qubit 0 is the least-significant
//!   bit of a basis-state index
//! - **Gates**: [`StandardGate`] for single-qubit base gates and [`GateOp`] for
//!   an operation with its operands (single, controlled, multi-controlled)
//! - **Matrices**: [`DenseMatrix`] for full gate unitaries and unitarity checks
//! - **Circuit**: [`Circuit`], an ordered gate list plus measured qubits, with
//!   sub-circuit flattening via [`Circuit::append`]
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qalg_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell_state", 2);
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation gates |
//! | `CX`, `CZ` | 2 | Controlled-NOT and controlled-Z |
//! | `CCX` | 3 | Toffoli gate |
//! | `MCX` | n | n-controlled NOT |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{ErrorKind, IrError, IrResult};
pub use gate::{GateOp, StandardGate};
pub use matrix::{DenseMatrix, Matrix2};
pub use qubit::{QubitId, qubit_range};
