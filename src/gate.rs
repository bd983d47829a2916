use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

/// Quantum gate enum: named single-qubit gates plus arbitrary custom gates.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    X,
    Y,
    Z,
    H,
    S,
    T,
    /// Phase gate diag(1, e^(iθ)).
    Phase(f64),
    Rx(f64),
    Ry(f64),
    Rz(f64),
    Custom {
        matrix: Array2<Complex64>,
        is_diagonal: bool,
        label: String,
    },
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gate::X => write!(f, "X"),
            Gate::Y => write!(f, "Y"),
            Gate::Z => write!(f, "Z"),
            Gate::H => write!(f, "H"),
            Gate::S => write!(f, "S"),
            Gate::T => write!(f, "T"),
            Gate::Phase(theta) => write!(f, "Phase({:.4})", theta),
            Gate::Rx(theta) => write!(f, "Rx({:.4})", theta),
            Gate::Ry(theta) => write!(f, "Ry({:.4})", theta),
            Gate::Rz(theta) => write!(f, "Rz({:.4})", theta),
            Gate::Custom { label, .. } => write!(f, "{}", label),
        }
    }
}

fn mat2(entries: [Complex64; 4]) -> Array2<Complex64> {
    Array2::from_shape_vec((2, 2), entries.to_vec()).unwrap()
}

impl Gate {
    /// Matrix representation of the gate for local dimension `d`.
    ///
    /// # Panics
    /// Panics if `d != 2` for named (non-Custom) gate variants.
    pub fn matrix(&self, d: usize) -> Array2<Complex64> {
        if let Gate::Custom { matrix, .. } = self {
            return matrix.clone();
        }
        assert!(d == 2, "Named gates only support d=2, got d={}", d);

        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            Gate::X => mat2([zero, one, one, zero]),
            Gate::Y => mat2([zero, -i, i, zero]),
            Gate::Z => mat2([one, zero, zero, -one]),
            Gate::H => {
                let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
                mat2([s, s, s, -s])
            }
            Gate::S => mat2([one, zero, zero, i]),
            Gate::T => mat2([one, zero, zero, Complex64::from_polar(1.0, FRAC_PI_4)]),
            Gate::Phase(theta) => mat2([one, zero, zero, Complex64::from_polar(1.0, *theta)]),
            Gate::Rx(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let ms = Complex64::new(0.0, -(theta / 2.0).sin());
                mat2([c, ms, ms, c])
            }
            Gate::Ry(theta) => {
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                mat2([c, -s, s, c])
            }
            Gate::Rz(theta) => mat2([
                Complex64::from_polar(1.0, -theta / 2.0),
                zero,
                zero,
                Complex64::from_polar(1.0, theta / 2.0),
            ]),
            Gate::Custom { .. } => unreachable!(),
        }
    }

    /// Number of sites the gate acts on, for local dimension `d`.
    pub fn num_sites(&self, d: usize) -> usize {
        match self {
            Gate::Custom { matrix, .. } => {
                let dim = matrix.nrows();
                assert_eq!(
                    matrix.nrows(),
                    matrix.ncols(),
                    "Custom gate matrix must be square, got {}x{}",
                    matrix.nrows(),
                    matrix.ncols()
                );
                // dim = d^n, solve for n
                let mut n = 0usize;
                let mut power = 1usize;
                while power < dim {
                    power *= d;
                    n += 1;
                }
                assert_eq!(power, dim, "Matrix dimension {} is not a power of d={}", dim, d);
                n
            }
            _ => 1,
        }
    }

    /// Whether the gate matrix is diagonal in the computational basis.
    pub fn is_diagonal(&self) -> bool {
        match self {
            Gate::Z | Gate::S | Gate::T | Gate::Phase(_) | Gate::Rz(_) => true,
            Gate::Custom { is_diagonal, .. } => *is_diagonal,
            _ => false,
        }
    }

    /// The adjoint (conjugate transpose). For unitary gates this is the
    /// inverse: U† U = I.
    pub fn dagger(&self) -> Self {
        match self {
            // Hermitian gates are their own adjoint
            Gate::X | Gate::Y | Gate::Z | Gate::H => self.clone(),
            Gate::S => Gate::Phase(-FRAC_PI_2),
            Gate::T => Gate::Phase(-FRAC_PI_4),
            Gate::Phase(theta) => Gate::Phase(-theta),
            Gate::Rx(theta) => Gate::Rx(-theta),
            Gate::Ry(theta) => Gate::Ry(-theta),
            Gate::Rz(theta) => Gate::Rz(-theta),
            Gate::Custom {
                matrix,
                is_diagonal,
                label,
            } => {
                let (rows, cols) = matrix.dim();
                let mut adjoint = Array2::zeros((cols, rows));
                for r in 0..rows {
                    for c in 0..cols {
                        adjoint[[c, r]] = matrix[[r, c]].conj();
                    }
                }
                Gate::Custom {
                    matrix: adjoint,
                    // diagonal structure survives transposition
                    is_diagonal: *is_diagonal,
                    label: format!("{}†", label),
                }
            }
        }
    }
}
