//! Circuit execution on the statevector engine.

use std::time::Instant;

use qalg_ir::{Circuit, QubitId, qubit_range};
use tracing::{debug, instrument, trace};

use crate::config::{NormCheck, SimConfig};
use crate::distribution::ProbabilityDistribution;
use crate::error::{SimError, SimResult};
use crate::result::{Counts, ExecutionResult};
use crate::sampler::{resolve_seed, sample_with};
use crate::statevector::Statevector;

/// Exact statevector simulator.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimConfig,
}

impl Simulator {
    /// Create a simulator with a validated configuration.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration this simulator runs with.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Evolve |0…0⟩ through every gate of `circuit` and return the final state.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
    pub fn run(&self, circuit: &Circuit) -> SimResult<Statevector> {
        let n = circuit.num_qubits();
        if n == 0 {
            return Err(SimError::InvalidParameter(
                "circuit has no qubits".into(),
            ));
        }
        if n > self.config.max_qubits {
            return Err(SimError::TooManyQubits {
                requested: n,
                max: self.config.max_qubits,
            });
        }

        let parallel = n >= self.config.parallel_threshold;
        let mut state = Statevector::new(n)?;
        for (index, op) in circuit.ops().iter().enumerate() {
            trace!(index, gate = %op.name(), "apply");
            state.apply(op, parallel)?;
            if self.config.norm_check == NormCheck::EveryGate {
                state.check_norm(self.config.norm_tolerance)?;
            }
        }
        if self.config.norm_check == NormCheck::Final {
            state.check_norm(self.config.norm_tolerance)?;
        }

        debug!(gates = circuit.num_ops(), parallel, "statevector ready");
        Ok(state)
    }

    /// Exact outcome distribution of the circuit's measured qubits.
    ///
    /// A circuit without measurements is treated as measuring every qubit.
    pub fn simulate(&self, circuit: &Circuit) -> SimResult<ProbabilityDistribution> {
        let state = self.run(circuit)?;
        let all: Vec<QubitId>;
        let measured = if circuit.measured_qubits().is_empty() {
            all = qubit_range(circuit.num_qubits()).collect();
            &all[..]
        } else {
            circuit.measured_qubits()
        };
        state.marginal(measured, self.config.probability_epsilon)
    }

    /// Draw `shots` samples from a distribution using this simulator's config.
    pub fn sample(
        &self,
        dist: &ProbabilityDistribution,
        shots: u32,
        seed: Option<u64>,
    ) -> SimResult<Counts> {
        sample_with(dist, shots, seed, &self.config)
    }

    /// Simulate and sample in one step, recording the seed and elapsed time.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn execute(
        &self,
        circuit: &Circuit,
        shots: u32,
        seed: Option<u64>,
    ) -> SimResult<ExecutionResult> {
        let start = Instant::now();
        let dist = self.simulate(circuit)?;
        let seed = resolve_seed(seed);
        let counts = self.sample(&dist, shots, Some(seed))?;
        let elapsed = start.elapsed().as_millis() as u64;

        debug!(shots, seed, elapsed_ms = elapsed, "execution complete");
        Ok(ExecutionResult {
            counts,
            shots,
            seed,
            execution_time_ms: Some(elapsed),
        })
    }
}

/// Exact distribution of `circuit` with the default configuration.
pub fn simulate(circuit: &Circuit) -> SimResult<ProbabilityDistribution> {
    Simulator::default().simulate(circuit)
}
