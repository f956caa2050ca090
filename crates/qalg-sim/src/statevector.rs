//! Statevector simulation engine.

use num_complex::Complex64;
use rayon::prelude::*;

use qalg_ir::{DenseMatrix, GateOp, IrError, Matrix2, QubitId};

use crate::distribution::ProbabilityDistribution;
use crate::error::{SimError, SimResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// Largest register whose amplitude vector fits in the address space.
pub const MAX_ADDRESSABLE_QUBITS: u32 = usize::BITS - 5;

/// A statevector representing a quantum state.
///
/// Bit `q` of an amplitude index is the value of qubit `q`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: u32,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    ///
    /// Fails with [`SimError::TooManyQubits`] above [`MAX_ADDRESSABLE_QUBITS`].
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        let size = dimension(num_qubits)?;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap existing amplitudes. The length must be `2^num_qubits`.
    pub fn from_amplitudes(num_qubits: u32, amplitudes: Vec<Complex64>) -> SimResult<Self> {
        let expected = dimension(num_qubits)?;
        if amplitudes.len() != expected {
            return Err(SimError::DimensionMismatch {
                expected: format!("{expected} amplitudes for {num_qubits} qubits"),
                got: format!("{} amplitudes", amplitudes.len()),
            });
        }
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// All amplitudes, indexed by basis state.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm; 1 for a valid state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.par_iter().map(Complex64::norm_sqr).sum()
    }

    /// Fail with [`SimError::NormalizationFailure`] if the norm drifted.
    pub fn check_norm(&self, tolerance: f64) -> SimResult<()> {
        let norm = self.norm_sqr();
        if (norm - 1.0).abs() > tolerance {
            return Err(SimError::NormalizationFailure { norm, tolerance });
        }
        Ok(())
    }

    /// `|amplitude|²` for every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.par_iter().map(Complex64::norm_sqr).collect()
    }

    // =========================================================================
    // Gate application
    // =========================================================================

    /// Apply one gate operation in place.
    ///
    /// The base gate's 2×2 matrix is applied to every amplitude pair that
    /// differs only in the target bit and has all control bits set; all other
    /// amplitudes pass through unchanged. With `parallel`, disjoint blocks of
    /// the vector are processed on the rayon pool.
    pub fn apply(&mut self, op: &GateOp, parallel: bool) -> SimResult<()> {
        self.validate_op(op)?;

        let ctrl_mask = op.controls().iter().fold(0usize, |mask, q| mask | q.mask());
        let base = op.base();
        apply_controlled(
            &mut self.amplitudes,
            ctrl_mask,
            op.target().index(),
            &base.matrix(),
            base.is_diagonal(),
            parallel,
        );
        Ok(())
    }

    /// Apply an arbitrary `2^k × 2^k` matrix to `qubits`.
    ///
    /// Bit `j` of the matrix's local index corresponds to `qubits[j]`. The
    /// matrix is not checked for unitarity; use [`Self::check_norm`] afterwards
    /// if it comes from an untrusted source.
    pub fn apply_matrix(&mut self, qubits: &[QubitId], matrix: &DenseMatrix) -> SimResult<()> {
        if matrix.num_qubits() as usize != qubits.len() {
            return Err(SimError::DimensionMismatch {
                expected: format!("{}-qubit matrix", qubits.len()),
                got: format!("{}-qubit matrix", matrix.num_qubits()),
            });
        }
        self.validate_operands(qubits, None)?;

        let masks: Vec<usize> = qubits.iter().map(|q| q.mask()).collect();
        let all = masks.iter().fold(0usize, |acc, m| acc | m);
        let dim = matrix.dim();
        // offsets[local] = global bits for the local index
        let offsets: Vec<usize> = (0..dim)
            .map(|local| {
                masks
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| local >> j & 1 == 1)
                    .fold(0usize, |acc, (_, m)| acc | m)
            })
            .collect();

        let mut group = vec![ZERO; dim];
        for base in 0..self.amplitudes.len() {
            if base & all != 0 {
                continue;
            }
            for (slot, &offset) in group.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | offset];
            }
            for (row, &offset) in offsets.iter().enumerate() {
                self.amplitudes[base | offset] = group
                    .iter()
                    .enumerate()
                    .map(|(col, amp)| matrix.get(row, col) * amp)
                    .sum();
            }
        }
        Ok(())
    }

    /// Operand check for the gate hot path; the name is only built on failure.
    fn validate_op(&self, op: &GateOp) -> SimResult<()> {
        let controls = op.controls();
        let target = op.target();
        let operands = controls.iter().copied().chain(std::iter::once(target));
        for (i, qubit) in operands.enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::DimensionMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: Some(op.name()),
                }
                .into());
            }
            if controls[..i.min(controls.len())].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(op.name()),
                }
                .into());
            }
        }
        Ok(())
    }

    fn validate_operands(&self, qubits: &[QubitId], gate_name: Option<&str>) -> SimResult<()> {
        for (i, &qubit) in qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::DimensionMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name.map(str::to_owned),
                }
                .into());
            }
            if qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.map(str::to_owned),
                }
                .into());
            }
        }
        Ok(())
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability distribution over the outcomes of measuring `measured`.
    ///
    /// Unmeasured qubits are summed out. The `k`-th entry of `measured` becomes
    /// character `k` from the right of each outcome bitstring. Probabilities
    /// below `epsilon` are dropped before renormalising.
    pub fn marginal(
        &self,
        measured: &[QubitId],
        epsilon: f64,
    ) -> SimResult<ProbabilityDistribution> {
        self.validate_operands(measured, Some("measure"))?;

        let mut probs = vec![0.0f64; 1usize << measured.len()];
        for (index, p) in self.probabilities().into_iter().enumerate() {
            if p == 0.0 {
                continue;
            }
            let outcome = measured
                .iter()
                .enumerate()
                .fold(0usize, |acc, (slot, q)| acc | ((index >> q.0) & 1) << slot);
            probs[outcome] += p;
        }
        ProbabilityDistribution::from_dense(measured.len(), &probs, epsilon)
    }
}

/// `2^num_qubits`, or [`SimError::TooManyQubits`] past the addressable limit.
fn dimension(num_qubits: u32) -> SimResult<usize> {
    if num_qubits > MAX_ADDRESSABLE_QUBITS {
        return Err(SimError::TooManyQubits {
            requested: num_qubits,
            max: MAX_ADDRESSABLE_QUBITS,
        });
    }
    Ok(1usize << num_qubits)
}

/// Core kernel: 2×2 `m` on the `target` bit wherever every bit of `ctrl_mask` is set.
///
/// The vector splits into blocks of `2^(target+1)` amplitudes; in each block
/// the lower half has the target bit clear and the upper half has it set, so
/// blocks never overlap and need no synchronisation.
fn apply_controlled(
    amps: &mut [Complex64],
    ctrl_mask: usize,
    target: usize,
    m: &Matrix2,
    diagonal: bool,
    parallel: bool,
) {
    let stride = 1usize << target;
    let block = stride << 1;

    let update = |index: usize, a0: &mut Complex64, a1: &mut Complex64| {
        if index & ctrl_mask != ctrl_mask {
            return;
        }
        if diagonal {
            *a0 *= m[0][0];
            *a1 *= m[1][1];
        } else {
            let (x0, x1) = (*a0, *a1);
            *a0 = m[0][0] * x0 + m[0][1] * x1;
            *a1 = m[1][0] * x0 + m[1][1] * x1;
        }
    };

    let num_blocks = amps.len() / block;
    if !parallel {
        for (b, chunk) in amps.chunks_mut(block).enumerate() {
            let (lo, hi) = chunk.split_at_mut(stride);
            for (offset, (a0, a1)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                update(b * block + offset, a0, a1);
            }
        }
    } else if num_blocks >= rayon::current_num_threads() {
        amps.par_chunks_mut(block)
            .enumerate()
            .for_each(|(b, chunk)| {
                let (lo, hi) = chunk.split_at_mut(stride);
                for (offset, (a0, a1)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
                    update(b * block + offset, a0, a1);
                }
            });
    } else {
        // Few large blocks (high target bit): parallelise inside each block.
        for (b, chunk) in amps.chunks_mut(block).enumerate() {
            let (lo, hi) = chunk.split_at_mut(stride);
            lo.par_iter_mut()
                .zip(hi.par_iter_mut())
                .enumerate()
                .for_each(|(offset, (a0, a1))| update(b * block + offset, a0, a1));
        }
    }
}
