//! Qubit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a qubit lane in the joint state.
///
/// Qubit 0 is the least-significant bit of a basis-state index and therefore
/// the rightmost character of a printed bitstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The index as a `usize`, for addressing amplitude bits.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Single-bit mask selecting this qubit in a basis-state index.
    #[inline]
    pub fn mask(self) -> usize {
        1usize << self.0
    }

    /// This qubit shifted up by `offset` lanes.
    #[inline]
    #[must_use]
    pub fn offset(self, offset: u32) -> Self {
        QubitId(self.0 + offset)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// Iterate over the qubits `0..n`.
pub fn qubit_range(n: u32) -> impl Iterator<Item = QubitId> + Clone {
    (0..n).map(QubitId)
}
