//! Property-based tests for the Deutsch-Jozsa pipeline.
//!
//! For every register size and linear oracle, the noiseless circuit must
//! measure the oracle's coefficient string on every shot.

use proptest::prelude::*;
use qalg_algo::deutsch_jozsa_circuit;
use qalg_sim::{sample, simulate};

/// A register size in 1..=8 paired with a coefficient string of that length.
fn arb_secret() -> impl Strategy<Value = (u32, String)> {
    (1_u32..=8).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(prop::bool::ANY, n as usize)
                .prop_map(|bits| bits.iter().map(|&b| if b { '1' } else { '0' }).collect()),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn secret_is_recovered_exactly(
        (n, a_bits) in arb_secret(),
        b in 0_u8..=1,
        shots in 1_u32..5000,
        seed in any::<u64>(),
    ) {
        let circuit = deutsch_jozsa_circuit(n, &a_bits, b).unwrap();
        let dist = simulate(&circuit).unwrap();
        let counts = sample(&dist, shots, Some(seed)).unwrap();
        prop_assert_eq!(counts.len(), 1);
        prop_assert_eq!(counts.get(&a_bits), u64::from(shots));
    }

    #[test]
    fn constant_oracle_always_reads_zero(n in 1_u32..=8, b in 0_u8..=1) {
        let zeros = "0".repeat(n as usize);
        let circuit = deutsch_jozsa_circuit(n, &zeros, b).unwrap();
        let dist = simulate(&circuit).unwrap();
        prop_assert!((dist.get(&zeros) - 1.0).abs() < 1e-9);
    }
}
