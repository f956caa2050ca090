//! Sampled measurement results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Measurement counts: outcome bitstring → number of shots.
///
/// Bitstrings use the same order as [`ProbabilityDistribution`](crate::ProbabilityDistribution):
/// the rightmost character is the first measured qubit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(FxHashMap<String, u64>);

impl Counts {
    /// Create empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create counts from `(bitstring, count)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, u64)>) -> Self {
        let mut counts = Self::new();
        for (bitstring, count) in pairs {
            counts.insert(bitstring, count);
        }
        counts
    }

    /// Add `count` shots to `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Shots recorded for `bitstring`, 0 if never seen.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of shots.
    pub fn total_shots(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True before any shot is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(bitstring, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.0.iter()
    }

    /// Outcomes by descending count, ties broken by bitstring.
    pub fn sorted(&self) -> Vec<(&String, &u64)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&String, &u64)> {
        self.sorted().into_iter().next()
    }

    /// Fraction of shots that produced `bitstring`.
    pub fn frequency(&self, bitstring: &str) -> f64 {
        let total = self.total_shots();
        if total == 0 {
            return 0.0;
        }
        self.get(bitstring) as f64 / total as f64
    }
}

/// Outcome of [`Simulator::execute`](crate::Simulator::execute).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Sampled counts.
    pub counts: Counts,
    /// Number of shots requested.
    pub shots: u32,
    /// Seed the sampler used; pass it back to reproduce `counts`.
    pub seed: u64,
    /// Wall-clock time for simulation plus sampling.
    pub execution_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_accumulates() {
        let mut counts = Counts::new();
        counts.insert("01", 3);
        counts.insert("01", 2);
        counts.insert("10", 1);
        assert_eq!(counts.get("01"), 5);
        assert_eq!(counts.get("11"), 0);
        assert_eq!(counts.total_shots(), 6);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_sorted_breaks_ties_by_bitstring() {
        let counts = Counts::from_pairs([("11", 10), ("00", 10), ("01", 30)]);
        let sorted: Vec<_> = counts.sorted().into_iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(sorted, vec!["01", "00", "11"]);
        assert_eq!(counts.most_frequent().map(|(k, _)| k.as_str()), Some("01"));
    }

    #[test]
    fn test_insert_accumulates_and_frequency() {
        let mut a = Counts::from_pairs([("0", 1)]);
        a.insert("0".to_string(), 1);
        a.insert("1".to_string(), 2);
        assert_eq!(a.get("0"), 2);
        assert!((a.frequency("1") - 0.5).abs() < 1e-12);
        assert_eq!(Counts::new().frequency("0"), 0.0);
    }

    #[test]
    fn test_serde_is_a_plain_map() {
        let counts = Counts::from_pairs([("00000", 1024)]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"00000":1024}"#);
        let back: Counts = serde_json::from_str(&json).unwrap();
        assert_eq!(back, counts);
    }
}
