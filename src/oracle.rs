//! Phase-encoding oracle for mean estimation.
//!
//! [`ComplexPhaseOracle`] turns an encoder of a classical random variable
//! into a gate that kicks the phase `exp(i·π·φ(x))` onto each selection
//! value `x`, where `φ(x)` is a fixed-width binary truncation of
//! `-2·arctan(x)/π`. The arctangent circuit itself is not decomposed into
//! elementary rotations here; a diagonal unitary with identical action on
//! the register stands in for it.

use std::f64::consts::PI;

use ndarray::Array2;
use num_complex::Complex64;

use crate::bits::{float_from_fixed_point_bits, iter_bits_fixed_point, FixedPointFormat};
use crate::circuit::PositionedGate;
use crate::gate::Gate;
use crate::register::{Register, RegisterGate, Registers, SelectionRegisters, WireMap};

/// A gate that encodes a classical random variable into a target register,
/// indexed by a selection register.
///
/// The target register holds a fixed-point sample of the variable;
/// `fixed_point_format` says how its bits split around the binary point.
pub trait RandomVariableEncoder {
    fn control_registers(&self) -> Registers;

    fn selection_registers(&self) -> SelectionRegisters;

    fn target_registers(&self) -> Registers;

    /// Fixed-point interpretation of the target register value.
    fn fixed_point_format(&self) -> FixedPointFormat;

    fn decompose(&self, wires: &WireMap) -> Vec<PositionedGate>;
}

/// Phase oracle over a [`RandomVariableEncoder`].
///
/// Declared registers are the encoder's control and selection registers; the
/// encoder's target registers are borrowed as ancillas during decomposition.
#[derive(Debug, Clone)]
pub struct ComplexPhaseOracle<E> {
    encoder: E,
    arctan_bitsize: usize,
}

impl<E: RandomVariableEncoder> ComplexPhaseOracle<E> {
    /// # Panics
    /// Panics if the encoder's fixed-point format does not cover its target
    /// registers exactly.
    pub fn new(encoder: E, arctan_bitsize: usize) -> Self {
        assert_eq!(
            encoder.fixed_point_format().total_bits(),
            encoder.target_registers().total_bits(),
            "fixed-point format width must match the target register width"
        );
        ComplexPhaseOracle {
            encoder,
            arctan_bitsize,
        }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    pub fn arctan_bitsize(&self) -> usize {
        self.arctan_bitsize
    }

    /// The phase encoded for raw target value `raw`: the sign-adjusted
    /// `arctan_bitsize`-bit truncation of `-2·arctan(x)/π`, with `x` the
    /// fixed-point decoding of `raw`.
    pub fn rotation_phase(&self, raw: usize) -> f64 {
        let x = self.encoder.fixed_point_format().value(raw);
        let theta = -2.0 * x.atan() / PI;
        let bits: Vec<bool> = iter_bits_fixed_point(theta.abs(), self.arctan_bitsize).collect();
        let magnitude = float_from_fixed_point_bits(&bits);
        if theta < 0.0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Diagonal unitary on the target register: diag entries
    /// `exp(i·π·rotation_phase(z))`.
    fn phase_kick_gate(&self) -> Gate {
        let bitsize = self.encoder.fixed_point_format().total_bits();
        let dim = 1usize << bitsize;
        let mut matrix = Array2::zeros((dim, dim));
        for z in 0..dim {
            matrix[[z, z]] = Complex64::from_polar(1.0, PI * self.rotation_phase(z));
        }
        Gate::Custom {
            matrix,
            is_diagonal: true,
            label: format!("ROT[{}]", self.arctan_bitsize),
        }
    }

    fn register_wires(&self, registers: &Registers, wires: &WireMap) -> Vec<usize> {
        registers
            .iter()
            .flat_map(|reg| wires.wires(&reg.name))
            .collect()
    }
}

impl<E: RandomVariableEncoder> RegisterGate for ComplexPhaseOracle<E> {
    fn registers(&self) -> Registers {
        let mut registers: Vec<Register> = self.encoder.control_registers().iter().cloned().collect();
        registers.extend(self.encoder.selection_registers().as_registers().iter().cloned());
        Registers::new(registers)
    }

    fn ancilla_registers(&self) -> Registers {
        self.encoder.target_registers()
    }

    fn decompose(&self, wires: &WireMap) -> Vec<PositionedGate> {
        let mut gates = self.encoder.decompose(wires);

        let target_wires = self.register_wires(&self.encoder.target_registers(), wires);
        let control_wires = self.register_wires(&self.encoder.control_registers(), wires);
        let configs = vec![true; control_wires.len()];
        gates.push(PositionedGate::new(
            self.phase_kick_gate(),
            target_wires,
            control_wires,
            configs,
        ));
        gates
    }

    fn wire_symbols(&self) -> Vec<String> {
        let controls = self.encoder.control_registers().total_bits();
        let selections = self.encoder.selection_registers().total_bits();
        let mut symbols = vec!["@".to_string(); controls];
        symbols.extend(std::iter::repeat("ROTy".to_string()).take(selections));
        symbols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FormatOnly(FixedPointFormat);

    impl RandomVariableEncoder for FormatOnly {
        fn control_registers(&self) -> Registers {
            Registers::default()
        }
        fn selection_registers(&self) -> SelectionRegisters {
            let bits = self.0.total_bits();
            SelectionRegisters::build(&[("selection", bits, 1 << bits)])
        }
        fn target_registers(&self) -> Registers {
            Registers::build(&[("target", self.0.total_bits())])
        }
        fn fixed_point_format(&self) -> FixedPointFormat {
            self.0
        }
        fn decompose(&self, _wires: &WireMap) -> Vec<PositionedGate> {
            vec![]
        }
    }

    #[test]
    fn test_rotation_phase_truncates_within_tolerance() {
        let oracle = ComplexPhaseOracle::new(FormatOnly(FixedPointFormat::new(3, 1)), 8);
        for raw in 0..16usize {
            let x = raw as f64 / 2.0;
            let exact = -2.0 * x.atan() / PI;
            let approx = oracle.rotation_phase(raw);
            assert!(
                (exact - approx).abs() <= 1.0 / 16.0,
                "raw = {}: exact {} vs approx {}",
                raw,
                exact,
                approx
            );
            // truncation never overshoots the magnitude
            assert!(approx.abs() <= exact.abs() + 1e-15);
        }
    }

    #[test]
    fn test_rotation_phase_sign() {
        let oracle = ComplexPhaseOracle::new(FormatOnly(FixedPointFormat::new(2, 0)), 8);
        assert_eq!(oracle.rotation_phase(0), 0.0);
        for raw in 1..4usize {
            assert!(oracle.rotation_phase(raw) < 0.0);
        }
    }

    #[test]
    fn test_phase_kick_gate_is_diagonal() {
        let oracle = ComplexPhaseOracle::new(FormatOnly(FixedPointFormat::new(2, 0)), 4);
        let gate = oracle.phase_kick_gate();
        assert!(gate.is_diagonal());
        assert_eq!(gate.num_sites(2), 2);
        // unit modulus on the diagonal
        if let Gate::Custom { matrix, .. } = gate {
            for z in 0..4 {
                assert!((matrix[[z, z]].norm() - 1.0).abs() < 1e-12);
            }
        }
    }
}
