//! State vector simulation by amplitude gather/scatter.
//!
//! Each gate touches only the amplitude groups selected by its target sites;
//! control sites gate whether a group is transformed at all. Diagonal gates
//! take a multiply-only fast path.

use ndarray::Array1;
use num_complex::Complex64;

use crate::circuit::{Circuit, PositionedGate};
use crate::index::{iter_basis, ravel, unravel};
use crate::state::State;

fn controls_active(multi: &[usize], control_locs: &[usize], control_configs: &[bool]) -> bool {
    control_locs
        .iter()
        .zip(control_configs.iter())
        .all(|(&loc, &cfg)| multi[loc] == cfg as usize)
}

fn apply_diagonal(dims: &[usize], data: &mut Array1<Complex64>, pg: &PositionedGate) {
    let target_dims: Vec<usize> = pg.target_locs.iter().map(|&loc| dims[loc]).collect();
    let matrix = pg.gate.matrix(dims[pg.target_locs[0]]);

    for (flat, multi) in iter_basis(dims) {
        if !controls_active(&multi, &pg.control_locs, &pg.control_configs) {
            continue;
        }
        let target_vals: Vec<usize> = pg.target_locs.iter().map(|&loc| multi[loc]).collect();
        let k = ravel(&target_vals, &target_dims);
        data[flat] *= matrix[[k, k]];
    }
}

fn apply_general(dims: &[usize], data: &mut Array1<Complex64>, pg: &PositionedGate) {
    let target_dims: Vec<usize> = pg.target_locs.iter().map(|&loc| dims[loc]).collect();
    let target_dim: usize = target_dims.iter().product();
    let matrix = pg.gate.matrix(dims[pg.target_locs[0]]);
    debug_assert_eq!(matrix.nrows(), target_dim);

    // sites the gate does not target, in ascending order
    let others: Vec<usize> = (0..dims.len())
        .filter(|site| !pg.target_locs.contains(site))
        .collect();
    let other_dims: Vec<usize> = others.iter().map(|&site| dims[site]).collect();

    let mut full = vec![0usize; dims.len()];
    for (_, other_vals) in iter_basis(&other_dims) {
        for (pos, &site) in others.iter().enumerate() {
            full[site] = other_vals[pos];
        }
        if !controls_active(&full, &pg.control_locs, &pg.control_configs) {
            continue;
        }

        // flat indices of the amplitude group, one per target configuration
        let flat_indices: Vec<usize> = (0..target_dim)
            .map(|k| {
                let target_vals = unravel(k, &target_dims);
                for (pos, &site) in pg.target_locs.iter().enumerate() {
                    full[site] = target_vals[pos];
                }
                ravel(&full, dims)
            })
            .collect();

        let old: Vec<Complex64> = flat_indices.iter().map(|&idx| data[idx]).collect();
        for (r, &idx) in flat_indices.iter().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (c, &amp) in old.iter().enumerate() {
                acc += matrix[[r, c]] * amp;
            }
            data[idx] = acc;
        }
    }
}

/// Apply a circuit to a quantum state, returning the new state.
pub fn apply(circuit: &Circuit, state: &State) -> State {
    assert_eq!(
        circuit.dims, state.dims,
        "circuit dims {:?} do not match state dims {:?}",
        circuit.dims, state.dims
    );
    let mut data = state.data.clone();
    for pg in &circuit.gates {
        if pg.gate.is_diagonal() {
            apply_diagonal(&circuit.dims, &mut data, pg);
        } else {
            apply_general(&circuit.dims, &mut data, pg);
        }
    }
    State {
        dims: circuit.dims.clone(),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{control, put};
    use crate::gate::Gate;

    #[test]
    fn test_anti_control_triggers_on_zero() {
        // X on qubit 1, triggered when qubit 0 is |0>
        let dims = vec![2, 2];
        let pg = PositionedGate::new(Gate::X, vec![1], vec![0], vec![false]);
        let circuit = Circuit::new(dims.clone(), vec![pg]).unwrap();

        let result = apply(&circuit, &State::zero_state(&dims));
        assert!((result.data[1].re - 1.0).abs() < 1e-12); // |01>

        let result = apply(&circuit, &State::product_state(&dims, &[1, 0]));
        assert!((result.data[2].re - 1.0).abs() < 1e-12); // |10> untouched
    }

    #[test]
    fn test_diagonal_fast_path_matches_general() {
        // Z applied through both code paths gives the same state
        let dims = vec![2, 2];
        let circuit = Circuit::new(dims.clone(), vec![put(vec![0], Gate::H), put(vec![1], Gate::H)])
            .unwrap();
        let plus = apply(&circuit, &State::zero_state(&dims));

        let diag = Circuit::new(dims.clone(), vec![control(vec![0], vec![1], Gate::Z)]).unwrap();
        let result = apply(&diag, &plus);
        // only |11> picks up a sign
        assert!((result.data[3].re + 0.5).abs() < 1e-12);
        assert!((result.data[0].re - 0.5).abs() < 1e-12);
    }
}
