//! Finite-shot sampling from a probability distribution.
//!
//! Shots are split into fixed-size chunks of [`SimConfig::sample_chunk`]. Chunk
//! `k` draws from its own `StdRng` seeded with a value derived from the base
//! seed and `k`, and the per-chunk tallies are summed. The result therefore
//! depends only on the seed and the chunk size, never on how many threads
//! rayon happens to use.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::config::SimConfig;
use crate::distribution::ProbabilityDistribution;
use crate::error::{SimError, SimResult};
use crate::result::Counts;

/// Draw `shots` outcomes with the default configuration.
///
/// With `seed: None` a fresh seed is taken from the OS.
pub fn sample(dist: &ProbabilityDistribution, shots: u32, seed: Option<u64>) -> SimResult<Counts> {
    sample_with(dist, shots, seed, &SimConfig::default())
}

/// Draw `shots` outcomes using `config` for chunking and tolerances.
///
/// A distribution whose most likely outcome has probability within
/// `norm_tolerance` of 1 yields all shots on that outcome.
#[instrument(skip(dist, config), fields(outcomes = dist.len()))]
pub fn sample_with(
    dist: &ProbabilityDistribution,
    shots: u32,
    seed: Option<u64>,
    config: &SimConfig,
) -> SimResult<Counts> {
    if shots == 0 {
        return Err(SimError::InvalidParameter(
            "shots must be at least 1".into(),
        ));
    }
    config.validate()?;

    let Some((top, top_p)) = dist.most_likely() else {
        return Err(SimError::InvalidDistribution(
            "cannot sample from an empty distribution".into(),
        ));
    };
    if top_p >= 1.0 - config.norm_tolerance {
        debug!(outcome = top, "degenerate distribution, no draws needed");
        return Ok(Counts::from_pairs([(top, u64::from(shots))]));
    }

    let base_seed = resolve_seed(seed);
    let (outcomes, weights): (Vec<&str>, Vec<f64>) = dist.iter().unzip();
    let index = WeightedIndex::new(&weights)
        .map_err(|e| SimError::InvalidDistribution(e.to_string()))?;

    let chunk = config.sample_chunk;
    let num_chunks = shots.div_ceil(chunk);
    let tally = (0..num_chunks)
        .into_par_iter()
        .map(|k| {
            let len = chunk.min(shots - k * chunk);
            let mut rng = StdRng::seed_from_u64(stream_seed(base_seed, u64::from(k)));
            let mut tally = vec![0u64; outcomes.len()];
            for _ in 0..len {
                tally[index.sample(&mut rng)] += 1;
            }
            tally
        })
        .reduce(
            || vec![0u64; outcomes.len()],
            |mut acc, part| {
                for (a, p) in acc.iter_mut().zip(part) {
                    *a += p;
                }
                acc
            },
        );

    let counts = Counts::from_pairs(
        outcomes
            .into_iter()
            .zip(tally)
            .filter(|&(_, n)| n > 0),
    );
    debug!(
        base_seed,
        chunks = num_chunks,
        distinct = counts.len(),
        "sampling complete"
    );
    Ok(counts)
}

/// The given seed, or a fresh one from OS entropy.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| StdRng::from_entropy().next_u64())
}

/// SplitMix64 finaliser over `base` and the stream index.
fn stream_seed(base: u64, stream: u64) -> u64 {
    let mut z = base.wrapping_add(stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fair_coin() -> ProbabilityDistribution {
        ProbabilityDistribution::new(1, [("0".into(), 0.5), ("1".into(), 0.5)]).unwrap()
    }

    #[test]
    fn test_zero_shots_rejected() {
        let err = sample(&fair_coin(), 0, Some(1)).unwrap_err();
        assert!(matches!(err, SimError::InvalidParameter(_)));
    }

    #[test]
    fn test_same_seed_same_counts() {
        let a = sample(&fair_coin(), 5000, Some(42)).unwrap();
        let b = sample(&fair_coin(), 5000, Some(42)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.total_shots(), 5000);
    }

    #[test]
    fn test_degenerate_is_exact() {
        let dist = ProbabilityDistribution::new(3, [("101".into(), 1.0)]).unwrap();
        let counts = sample(&dist, 2048, None).unwrap();
        assert_eq!(counts.get("101"), 2048);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_stream_seeds_differ() {
        assert_ne!(stream_seed(7, 0), stream_seed(7, 1));
        assert_ne!(stream_seed(7, 0), stream_seed(8, 0));
    }
}
