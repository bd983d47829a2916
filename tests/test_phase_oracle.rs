use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use num_complex::Complex64;

use qoracle_rs::apply::apply;
use qoracle_rs::bits::FixedPointFormat;
use qoracle_rs::circuit::{control, put, Circuit, PositionedGate};
use qoracle_rs::gate::Gate;
use qoracle_rs::oracle::{ComplexPhaseOracle, RandomVariableEncoder};
use qoracle_rs::register::{RegisterGate, Registers, SelectionRegisters, WireMap};
use qoracle_rs::state::State;
use qoracle_rs::testing::{register_amplitudes, GateHelper};

/// Minimal encoder: copies the selection register onto the target register
/// with CNOTs, so the "random variable" is the selection index itself read
/// as a fixed-point number.
struct DummySelect {
    bits_before_decimal: usize,
    bits_after_decimal: usize,
    controlled: bool,
}

impl DummySelect {
    fn new(bits_before_decimal: usize, bits_after_decimal: usize, controlled: bool) -> Self {
        DummySelect {
            bits_before_decimal,
            bits_after_decimal,
            controlled,
        }
    }

    fn bitsize(&self) -> usize {
        self.bits_before_decimal + self.bits_after_decimal
    }
}

impl RandomVariableEncoder for DummySelect {
    fn control_registers(&self) -> Registers {
        if self.controlled {
            Registers::build(&[("control", 1)])
        } else {
            Registers::default()
        }
    }

    fn selection_registers(&self) -> SelectionRegisters {
        SelectionRegisters::build(&[("selection", self.bitsize(), 1 << self.bitsize())])
    }

    fn target_registers(&self) -> Registers {
        Registers::build(&[("target", self.bitsize())])
    }

    fn fixed_point_format(&self) -> FixedPointFormat {
        FixedPointFormat::new(self.bits_before_decimal, self.bits_after_decimal)
    }

    fn decompose(&self, wires: &WireMap) -> Vec<PositionedGate> {
        wires
            .wires("selection")
            .into_iter()
            .zip(wires.wires("target"))
            .map(|(s, t)| control(vec![s], vec![t], Gate::X))
            .collect()
    }
}

/// Uniform superposition on the selection wires, then the oracle's
/// decomposition, returns the amplitude per selection value.
fn prepared_amplitudes(helper: &GateHelper, control_on: bool) -> Vec<Complex64> {
    let selection = helper.register("selection");
    let dims = vec![2; helper.num_wires()];

    let mut gates: Vec<PositionedGate> = Vec::new();
    if control_on {
        gates.push(put(vec![helper.register("control").start], Gate::X));
    }
    gates.extend(selection.clone().map(|w| put(vec![w], Gate::H)));
    gates.extend(helper.circuit().gates.iter().cloned());
    let circuit = Circuit::new(dims.clone(), gates).unwrap();

    let final_state = apply(&circuit, &State::zero_state(&dims));
    register_amplitudes(&final_state, &selection)
}

fn check_phase_oracle(bits_before_decimal: usize, bits_after_decimal: usize, arctan_bitsize: usize) {
    let bitsize = bits_before_decimal + bits_after_decimal;
    let oracle = ComplexPhaseOracle::new(
        DummySelect::new(bits_before_decimal, bits_after_decimal, false),
        arctan_bitsize,
    );
    let helper = GateHelper::new(&oracle).unwrap();
    let prepared = prepared_amplitudes(&helper, false);

    let norm = 1.0 / ((1usize << bitsize) as f64).sqrt();
    let abs_tol = 1.0 / (1usize << bitsize) as f64;
    for x in 0..(1usize << bitsize) {
        let x_float = x as f64 / (1u64 << bits_after_decimal) as f64;
        let exact = -2.0 * x_float.atan() / PI;
        let approx = oracle.rotation_phase(x);
        assert_abs_diff_eq!(exact, approx, epsilon = abs_tol);

        let expected = Complex64::from_polar(norm, approx * PI);
        assert!(
            (prepared[x] - expected).norm() < 1e-8,
            "selection value {}: got {:?}, expected {:?}",
            x,
            prepared[x],
            expected
        );
    }
}

#[test]
fn test_phase_oracle() {
    for bits_before_decimal in [2, 3] {
        for bits_after_decimal in [0, 1, 2] {
            check_phase_oracle(bits_before_decimal, bits_after_decimal, 8);
        }
    }
}

#[test]
fn test_phase_oracle_idle_control() {
    // control wire left at |0>: the phase kick never fires, amplitudes stay real
    let bitsize = 3;
    let oracle = ComplexPhaseOracle::new(DummySelect::new(2, 1, true), 8);
    let helper = GateHelper::new(&oracle).unwrap();
    let prepared = prepared_amplitudes(&helper, false);

    let norm = 1.0 / ((1usize << bitsize) as f64).sqrt();
    for (x, amp) in prepared.iter().enumerate() {
        assert!(
            (amp - Complex64::new(norm, 0.0)).norm() < 1e-8,
            "selection value {}: got {:?}",
            x,
            amp
        );
    }
}

#[test]
fn test_phase_oracle_active_control() {
    // control wire flipped to |1>: same phases as the uncontrolled oracle
    let bitsize = 3;
    let controlled = ComplexPhaseOracle::new(DummySelect::new(2, 1, true), 8);
    let helper = GateHelper::new(&controlled).unwrap();
    let prepared = prepared_amplitudes(&helper, true);

    let norm = 1.0 / ((1usize << bitsize) as f64).sqrt();
    for x in 0..(1usize << bitsize) {
        let expected = Complex64::from_polar(norm, controlled.rotation_phase(x) * PI);
        assert!(
            (prepared[x] - expected).norm() < 1e-8,
            "selection value {}: got {:?}, expected {:?}",
            x,
            prepared[x],
            expected
        );
    }
}

#[test]
fn test_phase_oracle_consistent_protocols() {
    let oracle = ComplexPhaseOracle::new(DummySelect::new(3, 0, true), 5);
    let expected: Vec<String> = ["@", "ROTy", "ROTy", "ROTy"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(oracle.wire_symbols(), expected);

    // uncontrolled oracle draws only rotation symbols
    let plain = ComplexPhaseOracle::new(DummySelect::new(3, 0, false), 5);
    assert_eq!(plain.wire_symbols(), vec!["ROTy"; 3]);
}

#[test]
fn test_gate_helper_layout() {
    let oracle = ComplexPhaseOracle::new(DummySelect::new(2, 1, true), 4);
    let helper = GateHelper::new(&oracle).unwrap();
    // declared registers first, ancilla target after
    assert_eq!(helper.register("control"), 0..1);
    assert_eq!(helper.register("selection"), 1..4);
    assert_eq!(helper.register("target"), 4..7);
    assert_eq!(helper.num_wires(), 7);
}
