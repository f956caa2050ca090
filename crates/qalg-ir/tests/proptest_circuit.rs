//! Property-based tests for circuit construction and flattening.

use proptest::prelude::*;
use qalg_ir::{Circuit, GateOp, IrError, QubitId, StandardGate};

/// A gate on a register of `n` qubits with distinct operands.
fn arb_gate(n: u32) -> impl Strategy<Value = GateOp> {
    let base = prop_oneof![
        Just(StandardGate::X),
        Just(StandardGate::H),
        Just(StandardGate::S),
        Just(StandardGate::Z),
        (-3.0_f64..3.0).prop_map(StandardGate::Ry),
    ];
    (base, Just((0..n).collect::<Vec<u32>>()).prop_shuffle(), 0..n).prop_map(
        |(gate, order, num_controls)| {
            let num_controls = num_controls as usize;
            let controls = order[..num_controls].iter().copied().map(QubitId).collect();
            GateOp::controlled(gate, controls, QubitId(order[num_controls]))
        },
    )
}

/// A measurement-free sub-circuit of 1..=4 qubits.
fn arb_sub_circuit() -> impl Strategy<Value = Circuit> {
    (1_u32..=4).prop_flat_map(|n| {
        prop::collection::vec(arb_gate(n), 0..=8).prop_map(move |ops| {
            let mut circuit = Circuit::new("sub", n);
            for op in ops {
                circuit.gate(op).unwrap();
            }
            circuit
        })
    })
}

proptest! {
    #[test]
    fn append_shifts_every_operand(sub in arb_sub_circuit(), offset in 0_u32..4) {
        let mut parent = Circuit::new("parent", sub.num_qubits() + offset);
        parent.append(&sub, offset).unwrap();

        prop_assert_eq!(parent.num_ops(), sub.num_ops());
        for (outer, inner) in parent.ops().iter().zip(sub.ops()) {
            let shifted: Vec<QubitId> = inner.qubits().iter().map(|q| q.offset(offset)).collect();
            prop_assert_eq!(outer.qubits(), shifted);
            prop_assert_eq!(outer.base(), inner.base());
        }
    }

    #[test]
    fn append_rejects_overflow(sub in arb_sub_circuit(), missing in 1_u32..3) {
        let width = sub.num_qubits() + 2;
        let mut parent = Circuit::new("parent", width);
        let offset = 2 + missing;
        let result = parent.append(&sub, offset);
        prop_assert!(matches!(result, Err(IrError::InvalidParameter(_))));
        prop_assert_eq!(parent.num_ops(), 0);
    }

    #[test]
    fn every_op_matrix_is_unitary(op in (1_u32..=4).prop_flat_map(arb_gate)) {
        let matrix = op.matrix();
        prop_assert_eq!(matrix.num_qubits(), op.num_qubits());
        prop_assert!(matrix.is_unitary(1e-10));
    }
}
