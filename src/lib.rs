pub mod apply;
pub mod bits;
pub mod circuit;
pub mod gate;
pub mod index;
pub mod json;
pub mod oracle;
pub mod register;
pub mod state;
pub mod testing;

pub use apply::apply;
pub use circuit::{control, put, Circuit, CircuitError, PositionedGate};
pub use gate::Gate;
pub use json::{circuit_from_json, circuit_to_json};
pub use oracle::{ComplexPhaseOracle, RandomVariableEncoder};
pub use register::{Register, RegisterGate, Registers, SelectionRegister, SelectionRegisters, WireMap};
pub use state::State;
