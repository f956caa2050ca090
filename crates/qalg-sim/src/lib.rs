//! qalg Statevector Simulator
//!
//! Exact, noiseless simulation of [`qalg_ir::Circuit`]s and finite-shot
//! sampling of their measurement distributions.
//!
//! # Features
//!
//! - **Exact Simulation**: full statevector, one in-place kernel for every
//!   single, controlled and multi-controlled gate
//! - **Data Parallelism**: gate kernels and the sampler run on rayon above a
//!   configurable register size
//! - **Reproducible Sampling**: a seed fixes the counts regardless of thread
//!   count
//! - **Guards**: register-size limit and norm-drift detection
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 25 | ~512 MB | Slow |
//! | 27+ | ~2 GB+ | Rejected by default (`max_qubits = 26`) |
//!
//! # Example
//!
//! ```rust
//! use qalg_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit.h(QubitId(0)).unwrap().cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure_all().unwrap();
//!
//! let dist = qalg_sim::simulate(&circuit).unwrap();
//! assert!((dist.get("00") - 0.5).abs() < 1e-10);
//!
//! let counts = qalg_sim::sample(&dist, 1000, Some(7)).unwrap();
//! assert_eq!(counts.total_shots(), 1000);
//! assert_eq!(counts.get("01"), 0);
//! ```

pub mod config;
pub mod distribution;
pub mod error;
pub mod result;
pub mod sampler;
pub mod simulator;
pub mod statevector;

pub use config::{NormCheck, SimConfig};
pub use distribution::{ProbabilityDistribution, to_bitstring};
pub use error::{SimError, SimResult};
pub use result::{Counts, ExecutionResult};
pub use sampler::{resolve_seed, sample, sample_with};
pub use simulator::{Simulator, simulate};
pub use statevector::{MAX_ADDRESSABLE_QUBITS, Statevector};
