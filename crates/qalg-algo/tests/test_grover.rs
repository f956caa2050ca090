//! End-to-end Grover runs through the simulator and sampler.

use qalg_algo::{grover_circuit, optimal_iterations, success_probability};
use qalg_ir::ErrorKind;
use qalg_sim::{sample, simulate};

#[test]
fn three_qubit_single_iteration_probability() {
    let circuit = grover_circuit(3, "101", 1).unwrap();
    let dist = simulate(&circuit).unwrap();

    let expected = (3.0 * (1.0 / 8.0_f64.sqrt()).asin()).sin().powi(2);
    assert!((dist.get("101") - expected).abs() < 1e-6);
    assert!((dist.get("101") - success_probability(3, 1)).abs() < 1e-9);

    // the remaining mass is spread evenly over the other seven states
    let rest = (1.0 - expected) / 7.0;
    for (outcome, p) in dist.iter().filter(|(o, _)| *o != "101") {
        assert!((p - rest).abs() < 1e-9, "{outcome}");
    }
}

#[test]
fn fixed_seed_sampling_is_reproducible() {
    let circuit = grover_circuit(3, "101", 1).unwrap();
    let dist = simulate(&circuit).unwrap();
    let a = sample(&dist, 2048, Some(17)).unwrap();
    let b = sample(&dist, 2048, Some(17)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.total_shots(), 2048);
    assert_eq!(a.most_frequent().map(|(k, _)| k.as_str()), Some("101"));
}

#[test]
fn probability_follows_closed_form_for_every_marked_state() {
    let n = 4;
    let k = optimal_iterations(n);
    for value in 0..(1usize << n) {
        let marked = qalg_sim::to_bitstring(value, n as usize);
        let dist = simulate(&grover_circuit(n, &marked, k).unwrap()).unwrap();
        assert!(
            (dist.get(&marked) - success_probability(n, k)).abs() < 1e-9,
            "{marked}"
        );
    }
}

#[test]
fn zero_iterations_is_uniform() {
    let dist = simulate(&grover_circuit(3, "011", 0).unwrap()).unwrap();
    assert_eq!(dist.len(), 8);
    for (_, p) in dist.iter() {
        assert!((p - 0.125).abs() < 1e-12);
    }
}

#[test]
fn two_qubits_one_iteration_is_certain() {
    let circuit = grover_circuit(2, "10", 1).unwrap();
    let counts = sample(&simulate(&circuit).unwrap(), 500, None).unwrap();
    assert_eq!(counts.get("10"), 500);
}

#[test]
fn invalid_marked_state() {
    let err = grover_circuit(3, "1011", 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}
