//! Tests for finite-shot sampling.

use qalg_ir::{Circuit, QubitId};
use qalg_sim::{ProbabilityDistribution, SimConfig, SimError, sample, sample_with, simulate};

fn skewed() -> ProbabilityDistribution {
    ProbabilityDistribution::new(
        2,
        [
            ("00".to_string(), 0.1),
            ("01".to_string(), 0.2),
            ("10".to_string(), 0.3),
            ("11".to_string(), 0.4),
        ],
    )
    .unwrap()
}

#[test]
fn counts_sum_to_shots() {
    for shots in [1_u32, 7, 4096, 4097, 10_000] {
        let counts = sample(&skewed(), shots, Some(3)).unwrap();
        assert_eq!(counts.total_shots(), u64::from(shots));
    }
}

#[test]
fn only_supported_outcomes_appear() {
    let dist = ProbabilityDistribution::new(
        2,
        [("00".to_string(), 0.5), ("11".to_string(), 0.5)],
    )
    .unwrap();
    let counts = sample(&dist, 20_000, Some(11)).unwrap();
    assert_eq!(counts.get("01") + counts.get("10"), 0);
    assert_eq!(counts.len(), 2);
}

#[test]
fn fixed_seed_is_reproducible() {
    let a = sample(&skewed(), 50_000, Some(2024)).unwrap();
    let b = sample(&skewed(), 50_000, Some(2024)).unwrap();
    assert_eq!(a, b);

    let c = sample(&skewed(), 50_000, Some(2025)).unwrap();
    assert_ne!(a, c);
}

#[test]
fn thread_count_does_not_change_counts() {
    let run_with = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| sample(&skewed(), 100_000, Some(99)).unwrap())
    };
    assert_eq!(run_with(1), run_with(4));
}

#[test]
fn frequencies_approach_probabilities() {
    let counts = sample(&skewed(), 200_000, Some(5)).unwrap();
    for (outcome, p) in skewed().iter() {
        assert!((counts.frequency(outcome) - p).abs() < 0.01, "{outcome}");
    }
}

#[test]
fn degenerate_distribution_is_exact_for_any_chunking() {
    let mut circuit = Circuit::new("x", 3);
    circuit.x(QubitId(0)).unwrap().x(QubitId(2)).unwrap();
    circuit.measure_all().unwrap();
    let dist = simulate(&circuit).unwrap();

    let config = SimConfig::default().with_sample_chunk(1);
    let counts = sample_with(&dist, 2048, None, &config).unwrap();
    assert_eq!(counts.get("101"), 2048);
    assert_eq!(counts.len(), 1);
}

#[test]
fn zero_shots_is_invalid() {
    let err = sample(&skewed(), 0, None).unwrap_err();
    assert!(matches!(err, SimError::InvalidParameter(_)));
    assert_eq!(err.kind(), qalg_ir::ErrorKind::InvalidParameter);
}
