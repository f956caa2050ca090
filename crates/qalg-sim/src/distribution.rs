//! Probability distributions over measurement outcomes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Allowed deviation of a user-supplied distribution's total from 1.
const TOTAL_TOLERANCE: f64 = 1e-6;

/// Outcome bitstring → probability, with every outcome the same width.
///
/// The rightmost character of an outcome is the first measured qubit.
/// Outcomes with zero probability are not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityDistribution {
    width: usize,
    probs: BTreeMap<String, f64>,
}

impl ProbabilityDistribution {
    /// Build from explicit `(bitstring, probability)` pairs.
    ///
    /// Every bitstring must have `width` characters of `0`/`1`, probabilities
    /// must be finite and non-negative, and the total must be 1 within 1e-6.
    /// Repeated outcomes are summed.
    pub fn new(
        width: usize,
        entries: impl IntoIterator<Item = (String, f64)>,
    ) -> SimResult<Self> {
        let mut probs = BTreeMap::new();
        for (outcome, p) in entries {
            if outcome.len() != width || !outcome.bytes().all(|b| b == b'0' || b == b'1') {
                return Err(SimError::InvalidDistribution(format!(
                    "outcome '{outcome}' is not a {width}-bit string"
                )));
            }
            if !p.is_finite() || p < 0.0 {
                return Err(SimError::InvalidDistribution(format!(
                    "probability {p} for '{outcome}'"
                )));
            }
            if p > 0.0 {
                *probs.entry(outcome).or_insert(0.0) += p;
            }
        }

        let dist = Self { width, probs };
        let total = dist.total();
        if (total - 1.0).abs() > TOTAL_TOLERANCE {
            return Err(SimError::InvalidDistribution(format!(
                "probabilities sum to {total}"
            )));
        }
        Ok(dist)
    }

    /// Build from a dense vector indexed by outcome value.
    ///
    /// Entries below `epsilon` are dropped and the rest renormalised.
    pub(crate) fn from_dense(width: usize, dense: &[f64], epsilon: f64) -> SimResult<Self> {
        let kept: f64 = dense.iter().filter(|&&p| p >= epsilon && p > 0.0).sum();
        if !(kept > 0.0) {
            return Err(SimError::InvalidDistribution(
                "no outcome has non-zero probability".into(),
            ));
        }

        let probs = dense
            .iter()
            .enumerate()
            .filter(|&(_, &p)| p >= epsilon && p > 0.0)
            .map(|(outcome, &p)| (to_bitstring(outcome, width), p / kept))
            .collect();
        Ok(Self { width, probs })
    }

    /// Number of measured bits per outcome.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Probability of `outcome`, 0 if it never occurs.
    pub fn get(&self, outcome: &str) -> f64 {
        self.probs.get(outcome).copied().unwrap_or(0.0)
    }

    /// Outcomes with non-zero probability, in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probs.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Number of outcomes with non-zero probability.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Never true for a distribution built by [`Self::new`] or by simulation.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.probs.values().sum()
    }

    /// The most probable outcome. Ties go to the lexicographically smallest.
    pub fn most_likely(&self) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for (outcome, p) in self.iter() {
            if best.is_none_or(|(_, bp)| p > bp) {
                best = Some((outcome, p));
            }
        }
        best
    }

    /// Probability that measured bit `slot` reads 1 (slot 0 = rightmost).
    pub fn bit_marginal(&self, slot: usize) -> f64 {
        if slot >= self.width {
            return 0.0;
        }
        let pos = self.width - 1 - slot;
        self.probs
            .iter()
            .filter(|(k, _)| k.as_bytes()[pos] == b'1')
            .map(|(_, &p)| p)
            .sum()
    }
}

/// `value` as a `width`-character bitstring, most significant bit first.
pub fn to_bitstring(value: usize, width: usize) -> String {
    (0..width)
        .rev()
        .map(|bit| if value >> bit & 1 == 1 { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bitstring() {
        assert_eq!(to_bitstring(0b101, 3), "101");
        assert_eq!(to_bitstring(1, 4), "0001");
        assert_eq!(to_bitstring(0, 0), "");
    }

    #[test]
    fn test_new_validates() {
        assert!(ProbabilityDistribution::new(2, [("00".into(), 0.5), ("11".into(), 0.5)]).is_ok());
        assert!(ProbabilityDistribution::new(2, [("0".into(), 1.0)]).is_err());
        assert!(ProbabilityDistribution::new(1, [("0".into(), -0.1), ("1".into(), 1.1)]).is_err());
        assert!(ProbabilityDistribution::new(1, [("0".into(), 0.4)]).is_err());
        assert!(ProbabilityDistribution::new(1, [("x".into(), 1.0)]).is_err());
    }

    #[test]
    fn test_from_dense_clips_and_renormalises() {
        let dist = ProbabilityDistribution::from_dense(2, &[0.5, 1e-15, 0.0, 0.5], 1e-12).unwrap();
        assert_eq!(dist.len(), 2);
        assert_eq!(dist.get("01"), 0.0);
        assert!((dist.get("00") - 0.5).abs() < 1e-15);
        assert!((dist.total() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_most_likely_and_bit_marginal() {
        let dist = ProbabilityDistribution::new(
            2,
            [("01".into(), 0.25), ("10".into(), 0.75)],
        )
        .unwrap();
        assert_eq!(dist.most_likely(), Some(("10", 0.75)));
        assert!((dist.bit_marginal(0) - 0.25).abs() < 1e-15);
        assert!((dist.bit_marginal(1) - 0.75).abs() < 1e-15);
    }
}
