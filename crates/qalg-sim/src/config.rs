//! Simulator configuration.
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables (`QALG_` prefix), via [`SimConfig::merge_env`]
//! 2. Values deserialised by the caller (e.g. a YAML file)
//! 3. Default values

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::statevector::MAX_ADDRESSABLE_QUBITS;

/// When to verify that the statevector is still normalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormCheck {
    /// Never check.
    Off,
    /// Check once after the last gate.
    #[default]
    Final,
    /// Check after every gate (debugging aid, costs one pass per gate).
    EveryGate,
}

impl std::str::FromStr for NormCheck {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(NormCheck::Off),
            "final" => Ok(NormCheck::Final),
            "every_gate" | "every-gate" | "always" => Ok(NormCheck::EveryGate),
            other => Err(SimError::InvalidParameter(format!(
                "unknown norm check mode '{other}'"
            ))),
        }
    }
}

/// Tuning knobs for [`Simulator`](crate::Simulator) and the sampler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Largest register accepted; 2^n amplitudes of 16 bytes each must fit in memory.
    pub max_qubits: u32,
    /// Gate kernels run on the rayon pool from this many qubits upward.
    pub parallel_threshold: u32,
    /// Allowed deviation of the squared norm from 1.
    pub norm_tolerance: f64,
    /// When to run the norm check.
    pub norm_check: NormCheck,
    /// Probabilities below this are treated as exactly zero.
    pub probability_epsilon: f64,
    /// Shots drawn from one derived RNG stream.
    pub sample_chunk: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: 26,
            parallel_threshold: 14,
            norm_tolerance: 1e-9,
            norm_check: NormCheck::Final,
            probability_epsilon: 1e-12,
            sample_chunk: 4096,
        }
    }
}

impl SimConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> SimResult<Self> {
        Self::default().merge_env()
    }

    /// Apply environment overrides on top of `self`.
    ///
    /// Environment variables:
    /// - `QALG_MAX_QUBITS`
    /// - `QALG_PARALLEL_THRESHOLD`
    /// - `QALG_NORM_TOLERANCE`
    /// - `QALG_NORM_CHECK`: `off`, `final` or `every_gate`
    /// - `QALG_SAMPLE_CHUNK`
    pub fn merge_env(mut self) -> SimResult<Self> {
        if let Some(v) = env_parse("QALG_MAX_QUBITS")? {
            self.max_qubits = v;
        }
        if let Some(v) = env_parse("QALG_PARALLEL_THRESHOLD")? {
            self.parallel_threshold = v;
        }
        if let Some(v) = env_parse("QALG_NORM_TOLERANCE")? {
            self.norm_tolerance = v;
        }
        if let Some(v) = env_parse("QALG_NORM_CHECK")? {
            self.norm_check = v;
        }
        if let Some(v) = env_parse("QALG_SAMPLE_CHUNK")? {
            self.sample_chunk = v;
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject values the simulator cannot work with.
    pub fn validate(&self) -> SimResult<()> {
        if self.max_qubits == 0 || self.max_qubits > MAX_ADDRESSABLE_QUBITS {
            return Err(SimError::InvalidParameter(format!(
                "max_qubits must be in 1..={MAX_ADDRESSABLE_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if self.sample_chunk == 0 {
            return Err(SimError::InvalidParameter(
                "sample_chunk must be at least 1".into(),
            ));
        }
        if !(self.norm_tolerance > 0.0) {
            return Err(SimError::InvalidParameter(format!(
                "norm_tolerance must be positive, got {}",
                self.norm_tolerance
            )));
        }
        if !(self.probability_epsilon >= 0.0) {
            return Err(SimError::InvalidParameter(format!(
                "probability_epsilon must be non-negative, got {}",
                self.probability_epsilon
            )));
        }
        Ok(())
    }

    /// Set the qubit limit.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the parallel threshold. `u32::MAX` keeps every kernel sequential.
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: u32) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set the norm check mode.
    #[must_use]
    pub fn with_norm_check(mut self, norm_check: NormCheck) -> Self {
        self.norm_check = norm_check;
        self
    }

    /// Set the number of shots per RNG stream.
    #[must_use]
    pub fn with_sample_chunk(mut self, sample_chunk: u32) -> Self {
        self.sample_chunk = sample_chunk;
        self
    }
}

fn env_parse<T>(key: &str) -> SimResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| SimError::InvalidParameter(format!("{key}={raw}: {e}"))),
        Err(_) => Ok(None),
    }
}
