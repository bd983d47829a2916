//! JSON interchange for circuits.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::circuit::{Circuit, PositionedGate};
use crate::gate::Gate;

#[derive(Serialize, Deserialize)]
struct CircuitJson {
    dims: Vec<usize>,
    gates: Vec<GateJson>,
}

#[derive(Serialize, Deserialize)]
struct GateJson {
    gate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Vec<f64>>,
    targets: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    controls: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    control_configs: Option<Vec<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    /// Custom gate matrix, row-major, entries as [re, im].
    #[serde(skip_serializing_if = "Option::is_none")]
    matrix: Option<Vec<Vec<[f64; 2]>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_diagonal: Option<bool>,
}

/// Error type for circuit deserialization.
#[derive(Debug)]
pub enum JsonError {
    Parse(serde_json::Error),
    UnknownGate(String),
    MissingField { gate: String, field: &'static str },
    Invalid(String),
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonError::Parse(err) => write!(f, "JSON parse error: {}", err),
            JsonError::UnknownGate(name) => write!(f, "unknown gate type: {}", name),
            JsonError::MissingField { gate, field } => {
                write!(f, "gate '{}' is missing required field '{}'", gate, field)
            }
            JsonError::Invalid(msg) => write!(f, "invalid circuit: {}", msg),
        }
    }
}

impl std::error::Error for JsonError {}

impl From<serde_json::Error> for JsonError {
    fn from(err: serde_json::Error) -> Self {
        JsonError::Parse(err)
    }
}

fn gate_to_json(pg: &PositionedGate) -> GateJson {
    let (name, params, label, matrix, is_diagonal) = match &pg.gate {
        Gate::X => ("X", None, None, None, None),
        Gate::Y => ("Y", None, None, None, None),
        Gate::Z => ("Z", None, None, None, None),
        Gate::H => ("H", None, None, None, None),
        Gate::S => ("S", None, None, None, None),
        Gate::T => ("T", None, None, None, None),
        Gate::Phase(theta) => ("Phase", Some(vec![*theta]), None, None, None),
        Gate::Rx(theta) => ("Rx", Some(vec![*theta]), None, None, None),
        Gate::Ry(theta) => ("Ry", Some(vec![*theta]), None, None, None),
        Gate::Rz(theta) => ("Rz", Some(vec![*theta]), None, None, None),
        Gate::Custom {
            matrix,
            is_diagonal,
            label,
        } => {
            let rows: Vec<Vec<[f64; 2]>> = (0..matrix.nrows())
                .map(|r| (0..matrix.ncols()).map(|c| [matrix[[r, c]].re, matrix[[r, c]].im]).collect())
                .collect();
            (
                "Custom",
                None,
                Some(label.clone()),
                Some(rows),
                Some(*is_diagonal),
            )
        }
    };

    GateJson {
        gate: name.to_string(),
        params,
        targets: pg.target_locs.clone(),
        controls: if pg.control_locs.is_empty() {
            None
        } else {
            Some(pg.control_locs.clone())
        },
        control_configs: if pg.control_locs.is_empty() {
            None
        } else {
            Some(pg.control_configs.clone())
        },
        label,
        matrix,
        is_diagonal,
    }
}

fn param(gj: &GateJson) -> Result<f64, JsonError> {
    gj.params
        .as_ref()
        .and_then(|p| p.first())
        .copied()
        .ok_or(JsonError::MissingField {
            gate: gj.gate.clone(),
            field: "params",
        })
}

fn gate_from_json(gj: &GateJson) -> Result<PositionedGate, JsonError> {
    let gate = match gj.gate.as_str() {
        "X" => Gate::X,
        "Y" => Gate::Y,
        "Z" => Gate::Z,
        "H" => Gate::H,
        "S" => Gate::S,
        "T" => Gate::T,
        "Phase" => Gate::Phase(param(gj)?),
        "Rx" => Gate::Rx(param(gj)?),
        "Ry" => Gate::Ry(param(gj)?),
        "Rz" => Gate::Rz(param(gj)?),
        "Custom" => {
            let rows = gj.matrix.as_ref().ok_or(JsonError::MissingField {
                gate: gj.gate.clone(),
                field: "matrix",
            })?;
            let n = rows.len();
            let mut entries = Vec::with_capacity(n * n);
            for row in rows {
                if row.len() != n {
                    return Err(JsonError::Invalid(format!(
                        "custom matrix is not square: {} rows, row of length {}",
                        n,
                        row.len()
                    )));
                }
                entries.extend(row.iter().map(|&[re, im]| Complex64::new(re, im)));
            }
            let matrix = Array2::from_shape_vec((n, n), entries)
                .map_err(|e| JsonError::Invalid(e.to_string()))?;
            Gate::Custom {
                matrix,
                is_diagonal: gj.is_diagonal.unwrap_or(false),
                label: gj.label.clone().unwrap_or_default(),
            }
        }
        other => return Err(JsonError::UnknownGate(other.to_string())),
    };

    let controls = gj.controls.clone().unwrap_or_default();
    let configs = gj
        .control_configs
        .clone()
        .unwrap_or_else(|| vec![true; controls.len()]);
    Ok(PositionedGate::new(gate, gj.targets.clone(), controls, configs))
}

/// Serialize a circuit to a JSON string.
pub fn circuit_to_json(circuit: &Circuit) -> String {
    let json = CircuitJson {
        dims: circuit.dims.clone(),
        gates: circuit.gates.iter().map(gate_to_json).collect(),
    };
    serde_json::to_string_pretty(&json).expect("circuit serialization cannot fail")
}

/// Deserialize a circuit from a JSON string, revalidating it.
pub fn circuit_from_json(json: &str) -> Result<Circuit, JsonError> {
    let parsed: CircuitJson = serde_json::from_str(json)?;
    let gates = parsed
        .gates
        .iter()
        .map(gate_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    Circuit::new(parsed.dims, gates).map_err(|e| JsonError::Invalid(e.to_string()))
}
