//! qalg Algorithm Circuits
//!
//! Builders for the Deutsch-Jozsa and Grover circuits. Oracles and the Grover
//! diffuser are built as named sub-circuits and flattened into the algorithm
//! circuit with [`Circuit::append`](qalg_ir::Circuit::append).
//!
//! Bitstring parameters are written most significant qubit first, matching
//! the order of measured outcomes: the rightmost character is qubit 0.
//!
//! # Example
//!
//! ```rust
//! use qalg_algo::grover_circuit;
//!
//! let circuit = grover_circuit(3, "101", 1).unwrap();
//! let dist = qalg_sim::simulate(&circuit).unwrap();
//! assert!((dist.get("101") - 0.78125).abs() < 1e-9);
//! ```

pub mod bits;
pub mod deutsch_jozsa;
pub mod error;
pub mod grover;

pub use bits::parse_bits;
pub use deutsch_jozsa::{
    OracleClass, classify, deutsch_jozsa_circuit, linear_oracle, recovered_secret,
};
pub use error::{AlgoError, AlgoResult};
pub use grover::{
    grover_circuit, grover_diffuser, grover_oracle, optimal_iterations, success_probability,
};
