use ndarray::Array1;
use num_complex::Complex64;

#[derive(Debug, Clone)]
pub struct State {
    pub dims: Vec<usize>,
    pub data: Array1<Complex64>,
}

impl State {
    pub fn new(dims: Vec<usize>, data: Array1<Complex64>) -> Self {
        let total: usize = dims.iter().product();
        assert_eq!(data.len(), total, "data length {} does not match dims {:?}", data.len(), dims);
        State { dims, data }
    }

    /// Creates |0,0,...,0> state (first basis element = 1, rest = 0)
    pub fn zero_state(dims: &[usize]) -> Self {
        let total: usize = dims.iter().product();
        let mut data = Array1::zeros(total);
        data[0] = Complex64::new(1.0, 0.0);
        State {
            dims: dims.to_vec(),
            data,
        }
    }

    /// Creates |i_0, i_1, ..., i_{n-1}> state (row-major ordering).
    pub fn product_state(dims: &[usize], levels: &[usize]) -> Self {
        assert_eq!(dims.len(), levels.len(), "dims and levels must have the same length");
        for (i, (&level, &dim)) in levels.iter().zip(dims.iter()).enumerate() {
            assert!(level < dim, "level[{}] = {} is out of range for dim = {}", i, level, dim);
        }

        let index = crate::index::ravel(levels, dims);
        let total: usize = dims.iter().product();
        let mut data = Array1::zeros(total);
        data[index] = Complex64::new(1.0, 0.0);
        State {
            dims: dims.to_vec(),
            data,
        }
    }

    /// Creates the uniform superposition over all basis states, amplitude
    /// `1/sqrt(total_dim)` everywhere. On qubits this equals H applied to
    /// every wire of |0...0>.
    pub fn uniform_state(dims: &[usize]) -> Self {
        let total: usize = dims.iter().product();
        let amp = Complex64::new(1.0 / (total as f64).sqrt(), 0.0);
        State {
            dims: dims.to_vec(),
            data: Array1::from_elem(total, amp),
        }
    }

    /// L2 norm of the state vector
    pub fn norm(&self) -> f64 {
        self.data.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt()
    }

    /// Length of the data vector
    pub fn total_dim(&self) -> usize {
        self.data.len()
    }
}
