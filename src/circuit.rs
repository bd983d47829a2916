use std::collections::HashSet;
use std::fmt;

use crate::gate::Gate;

/// Error types for circuit validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// control_configs length does not match control_locs length
    ControlConfigLengthMismatch {
        control_locs_len: usize,
        control_configs_len: usize,
    },
    /// A location index is out of range
    LocOutOfRange { loc: usize, num_sites: usize },
    /// Overlap between target_locs and control_locs
    OverlappingLocs { overlapping: Vec<usize> },
    /// Control site does not have dimension 2
    ControlSiteNotQubit { loc: usize, dim: usize },
    /// Named gate target site does not have dimension 2
    NamedGateTargetNotQubit { loc: usize, dim: usize },
    /// Gate matrix size does not match the product of target site dimensions
    MatrixSizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::ControlConfigLengthMismatch {
                control_locs_len,
                control_configs_len,
            } => write!(
                f,
                "control_configs length ({}) does not match control_locs length ({})",
                control_configs_len, control_locs_len
            ),
            CircuitError::LocOutOfRange { loc, num_sites } => {
                write!(f, "location {} is out of range (num_sites = {})", loc, num_sites)
            }
            CircuitError::OverlappingLocs { overlapping } => write!(
                f,
                "target_locs and control_locs overlap at locations: {:?}",
                overlapping
            ),
            CircuitError::ControlSiteNotQubit { loc, dim } => write!(
                f,
                "control site at location {} has dimension {} (must be 2)",
                loc, dim
            ),
            CircuitError::NamedGateTargetNotQubit { loc, dim } => write!(
                f,
                "named gate target site at location {} has dimension {} (must be 2)",
                loc, dim
            ),
            CircuitError::MatrixSizeMismatch { expected, actual } => write!(
                f,
                "gate matrix size {} does not match product of target site dimensions {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for CircuitError {}

/// A gate placed at specific locations in a circuit.
#[derive(Debug, Clone)]
pub struct PositionedGate {
    pub gate: Gate,
    pub target_locs: Vec<usize>,
    pub control_locs: Vec<usize>,
    /// Which control value (|1> for true) triggers the gate, per control site.
    pub control_configs: Vec<bool>,
}

impl PositionedGate {
    pub fn new(
        gate: Gate,
        target_locs: Vec<usize>,
        control_locs: Vec<usize>,
        control_configs: Vec<bool>,
    ) -> Self {
        PositionedGate {
            gate,
            target_locs,
            control_locs,
            control_configs,
        }
    }
}

/// A quantum circuit: a sequence of positioned gates on a register of qudits.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// The local dimension of each site (e.g., [2, 2, 2] for 3 qubits).
    pub dims: Vec<usize>,
    pub gates: Vec<PositionedGate>,
}

impl Circuit {
    /// Creates a new Circuit with validation.
    ///
    /// # Errors
    /// Returns a `CircuitError` if any validation rule is violated.
    pub fn new(dims: Vec<usize>, gates: Vec<PositionedGate>) -> Result<Self, CircuitError> {
        let num_sites = dims.len();

        for pg in &gates {
            if pg.control_configs.len() != pg.control_locs.len() {
                return Err(CircuitError::ControlConfigLengthMismatch {
                    control_locs_len: pg.control_locs.len(),
                    control_configs_len: pg.control_configs.len(),
                });
            }

            for &loc in pg.target_locs.iter().chain(pg.control_locs.iter()) {
                if loc >= num_sites {
                    return Err(CircuitError::LocOutOfRange { loc, num_sites });
                }
            }

            let target_set: HashSet<usize> = pg.target_locs.iter().copied().collect();
            let overlapping: Vec<usize> = pg
                .control_locs
                .iter()
                .filter(|loc| target_set.contains(loc))
                .copied()
                .collect();
            if !overlapping.is_empty() {
                return Err(CircuitError::OverlappingLocs { overlapping });
            }

            for &loc in &pg.control_locs {
                if dims[loc] != 2 {
                    return Err(CircuitError::ControlSiteNotQubit { loc, dim: dims[loc] });
                }
            }

            if !matches!(pg.gate, Gate::Custom { .. }) {
                for &loc in &pg.target_locs {
                    if dims[loc] != 2 {
                        return Err(CircuitError::NamedGateTargetNotQubit {
                            loc,
                            dim: dims[loc],
                        });
                    }
                }
            }

            let target_dim_product: usize = pg.target_locs.iter().map(|&loc| dims[loc]).product();
            let matrix_size = pg.gate.matrix(dims[pg.target_locs[0]]).nrows();
            if matrix_size != target_dim_product {
                return Err(CircuitError::MatrixSizeMismatch {
                    expected: target_dim_product,
                    actual: matrix_size,
                });
            }
        }

        Ok(Circuit { dims, gates })
    }

    /// Number of sites in the circuit.
    pub fn num_sites(&self) -> usize {
        self.dims.len()
    }

    /// Total Hilbert space dimension (product of all site dimensions).
    pub fn total_dim(&self) -> usize {
        self.dims.iter().product()
    }

    /// Return the adjoint circuit U†: gates reversed and each replaced with
    /// its adjoint. For a unitary circuit U, U† U = I.
    pub fn dagger(&self) -> Result<Self, CircuitError> {
        let gates: Vec<PositionedGate> = self
            .gates
            .iter()
            .rev()
            .map(|pg| PositionedGate {
                gate: pg.gate.dagger(),
                target_locs: pg.target_locs.clone(),
                control_locs: pg.control_locs.clone(),
                control_configs: pg.control_configs.clone(),
            })
            .collect();
        Circuit::new(self.dims.clone(), gates)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nqubits: {}", self.num_sites())?;
        for pg in &self.gates {
            if pg.control_locs.is_empty() {
                writeln!(f, "  {} @ q[{}]", pg.gate, format_locs(&pg.target_locs))?;
            } else {
                writeln!(
                    f,
                    "  C(q[{}]) {} @ q[{}]",
                    format_locs(&pg.control_locs),
                    pg.gate,
                    format_locs(&pg.target_locs)
                )?;
            }
        }
        Ok(())
    }
}

fn format_locs(locs: &[usize]) -> String {
    locs.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
}

/// Place a gate on target locations (no controls).
///
/// # Example
/// ```
/// use qoracle_rs::circuit::put;
/// use qoracle_rs::gate::Gate;
/// let pg = put(vec![0], Gate::H);
/// assert_eq!(pg.target_locs, vec![0]);
/// assert!(pg.control_locs.is_empty());
/// ```
pub fn put(target_locs: Vec<usize>, gate: Gate) -> PositionedGate {
    PositionedGate::new(gate, target_locs, vec![], vec![])
}

/// Place a controlled gate with active-high controls (trigger on |1⟩).
///
/// # Example
/// ```
/// use qoracle_rs::circuit::control;
/// use qoracle_rs::gate::Gate;
/// let cnot = control(vec![0], vec![1], Gate::X);
/// assert_eq!(cnot.control_locs, vec![0]);
/// assert_eq!(cnot.control_configs, vec![true]);
/// ```
pub fn control(ctrl_locs: Vec<usize>, target_locs: Vec<usize>, gate: Gate) -> PositionedGate {
    let configs = vec![true; ctrl_locs.len()];
    PositionedGate::new(gate, target_locs, ctrl_locs, configs)
}
