//! Bitstring parameters.
//!
//! Bitstrings are written most significant qubit first: character `i` of an
//! `n`-character string belongs to qubit `n - 1 - i`, the same order in which
//! measurement outcomes are printed.

use crate::error::{AlgoError, AlgoResult};

/// Parse an `n`-character `0`/`1` string into per-qubit bits.
///
/// The returned vector is indexed by qubit, so `bits[0]` is the rightmost
/// character.
pub fn parse_bits(bits: &str, n: u32) -> AlgoResult<Vec<bool>> {
    if bits.len() != n as usize {
        return Err(AlgoError::InvalidParameter(format!(
            "bitstring '{bits}' has length {}, expected {n}",
            bits.len()
        )));
    }
    bits.bytes()
        .rev()
        .map(|b| match b {
            b'0' => Ok(false),
            b'1' => Ok(true),
            other => Err(AlgoError::InvalidParameter(format!(
                "bitstring '{bits}' contains '{}', only '0' and '1' are allowed",
                char::from(other)
            ))),
        })
        .collect()
}
