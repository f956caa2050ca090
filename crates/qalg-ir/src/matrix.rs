//! Small dense complex matrices for gate definitions.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A 2×2 single-qubit matrix, `m[row][col]`.
pub type Matrix2 = [[Complex64; 2]; 2];

/// A square complex matrix acting on `k` qubits, stored row-major.
///
/// Bit `j` of a row/column index corresponds to operand `j` of the gate
/// that owns the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseMatrix {
    num_qubits: u32,
    data: Vec<Complex64>,
}

impl DenseMatrix {
    /// Identity on `num_qubits` qubits.
    pub fn identity(num_qubits: u32) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = vec![ZERO; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = ONE;
        }
        Self { num_qubits, data }
    }

    /// Number of qubits this matrix acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Side length `2^k`.
    #[inline]
    pub fn dim(&self) -> usize {
        1usize << self.num_qubits
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim() + col]
    }

    /// Add one control as the new lowest operand: `|0⟩⟨0| ⊗ I + |1⟩⟨1| ⊗ U`.
    ///
    /// Applying this `c` times to a base matrix yields the `c`-controlled gate
    /// with operands ordered `controls..., targets`.
    #[must_use]
    pub fn controlled(&self) -> Self {
        let inner = self.dim();
        let dim = inner * 2;
        let mut data = vec![ZERO; dim * dim];
        for i in 0..inner {
            // control = 0: identity on the inner block
            data[(2 * i) * dim + 2 * i] = ONE;
            // control = 1: U on the inner block
            for j in 0..inner {
                data[(2 * i + 1) * dim + (2 * j + 1)] = self.get(i, j);
            }
        }
        Self {
            num_qubits: self.num_qubits + 1,
            data,
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        let dim = self.dim();
        let mut data = vec![ZERO; dim * dim];
        for r in 0..dim {
            for c in 0..dim {
                data[c * dim + r] = self.get(r, c).conj();
            }
        }
        Self {
            num_qubits: self.num_qubits,
            data,
        }
    }

    /// Matrix product `self · other`. Returns `None` on a size mismatch.
    pub fn mul(&self, other: &Self) -> Option<Self> {
        if self.num_qubits != other.num_qubits {
            return None;
        }
        let dim = self.dim();
        let mut data = vec![ZERO; dim * dim];
        for r in 0..dim {
            for k in 0..dim {
                let a = self.get(r, k);
                if a == ZERO {
                    continue;
                }
                for c in 0..dim {
                    data[r * dim + c] += a * other.get(k, c);
                }
            }
        }
        Some(Self {
            num_qubits: self.num_qubits,
            data,
        })
    }

    /// Check `U · U† = I` element-wise within `tol`.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let Some(product) = self.mul(&self.adjoint()) else {
            return false;
        };
        let dim = self.dim();
        (0..dim).all(|r| {
            (0..dim).all(|c| {
                let expected = if r == c { ONE } else { ZERO };
                (product.get(r, c) - expected).norm() <= tol
            })
        })
    }
}

impl From<Matrix2> for DenseMatrix {
    fn from(m: Matrix2) -> Self {
        Self {
            num_qubits: 1,
            data: vec![m[0][0], m[0][1], m[1][0], m[1][1]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> DenseMatrix {
        DenseMatrix::from([[ZERO, ONE], [ONE, ZERO]])
    }

    #[test]
    fn test_identity_is_unitary() {
        for k in 0..4 {
            assert!(DenseMatrix::identity(k).is_unitary(1e-12));
        }
    }

    #[test]
    fn test_controlled_x_is_cnot() {
        // operands [control, target]: index = c + 2·t
        let cx = x().controlled();
        assert_eq!(cx.num_qubits(), 2);
        // |c=1,t=0⟩ (index 1) ↔ |c=1,t=1⟩ (index 3)
        assert_eq!(cx.get(3, 1), ONE);
        assert_eq!(cx.get(1, 3), ONE);
        assert_eq!(cx.get(0, 0), ONE);
        assert_eq!(cx.get(2, 2), ONE);
        assert_eq!(cx.get(1, 1), ZERO);
        assert!(cx.is_unitary(1e-12));
    }

    #[test]
    fn test_recursive_controls_grow_dimension() {
        let ccx = x().controlled().controlled();
        assert_eq!(ccx.num_qubits(), 3);
        assert_eq!(ccx.dim(), 8);
        // both controls set (bits 0,1), target bit 2 flips: 3 ↔ 7
        assert_eq!(ccx.get(7, 3), ONE);
        assert_eq!(ccx.get(3, 7), ONE);
        assert!(ccx.is_unitary(1e-12));
    }

    #[test]
    fn test_non_unitary_detected() {
        let m = DenseMatrix::from([[ONE, ONE], [ZERO, ONE]]);
        assert!(!m.is_unitary(1e-9));
    }
}
