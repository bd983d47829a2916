//! Helpers for exercising register gates in tests.

use std::ops::Range;

use num_complex::Complex64;

use crate::circuit::{Circuit, CircuitError};
use crate::index::{iter_basis, ravel};
use crate::register::{RegisterGate, WireMap};
use crate::state::State;

/// Lays a register gate out on concrete wires and exposes its decomposition
/// as a runnable circuit.
///
/// Declared registers come first in diagram order, ancilla registers after.
pub struct GateHelper {
    wires: WireMap,
    circuit: Circuit,
}

impl GateHelper {
    pub fn new(gate: &impl RegisterGate) -> Result<Self, CircuitError> {
        let declared = gate.registers();
        let ancilla = gate.ancilla_registers();
        let wires = WireMap::layout(declared.iter().cloned().chain(ancilla.iter().cloned()));
        let dims = vec![2; wires.num_wires()];
        let circuit = Circuit::new(dims, gate.decompose(&wires))?;
        Ok(GateHelper { wires, circuit })
    }

    pub fn wires(&self) -> &WireMap {
        &self.wires
    }

    pub fn num_wires(&self) -> usize {
        self.wires.num_wires()
    }

    /// Wire range of a named register.
    ///
    /// # Panics
    /// Panics if the gate declares no register with that name.
    pub fn register(&self, name: &str) -> Range<usize> {
        self.wires
            .get(name)
            .unwrap_or_else(|| panic!("no register named '{}'", name))
    }

    /// The gate's decomposition on all laid-out wires.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }
}

/// Amplitude per value of a wire range, summing over all other wires.
///
/// This is the reshape-and-sum step used to read a phase off a register that
/// stays correlated with ancillas: for each value of the wires in `range`
/// (row-major within the range), sum the amplitudes of every basis state
/// carrying that value.
pub fn register_amplitudes(state: &State, range: &Range<usize>) -> Vec<Complex64> {
    let reg_dims: Vec<usize> = range.clone().map(|w| state.dims[w]).collect();
    let reg_size: usize = reg_dims.iter().product();
    let mut amps = vec![Complex64::new(0.0, 0.0); reg_size];
    for (flat, multi) in iter_basis(&state.dims) {
        let vals: Vec<usize> = range.clone().map(|w| multi[w]).collect();
        amps[ravel(&vals, &reg_dims)] += state.data[flat];
    }
    amps
}
