//! Named qubit registers and gates declared over them.
//!
//! Composite gates (oracles) are specified against named registers rather
//! than raw wire indices. A [`WireMap`] pins an ordered register list to
//! concrete wire positions so the gate can decompose into positioned gates.

use std::ops::Range;

use crate::circuit::PositionedGate;

/// A named group of qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub bitsize: usize,
}

impl Register {
    pub fn new(name: impl Into<String>, bitsize: usize) -> Self {
        Register {
            name: name.into(),
            bitsize,
        }
    }
}

/// An ordered collection of registers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registers {
    registers: Vec<Register>,
}

impl Registers {
    pub fn new(registers: Vec<Register>) -> Self {
        Registers { registers }
    }

    /// Build registers from `(name, bitsize)` pairs.
    ///
    /// # Example
    /// ```
    /// use qoracle_rs::register::Registers;
    /// let regs = Registers::build(&[("selection", 3), ("target", 3)]);
    /// assert_eq!(regs.total_bits(), 6);
    /// ```
    pub fn build(specs: &[(&str, usize)]) -> Self {
        Registers {
            registers: specs
                .iter()
                .map(|&(name, bitsize)| Register::new(name, bitsize))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Register> {
        self.registers.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Register> {
        self.registers.iter().find(|r| r.name == name)
    }

    pub fn total_bits(&self) -> usize {
        self.registers.iter().map(|r| r.bitsize).sum()
    }
}

/// A register whose value ranges over a selection index rather than all bit
/// patterns. `iteration_length` bounds the meaningful values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRegister {
    pub name: String,
    pub bitsize: usize,
    pub iteration_length: usize,
}

impl SelectionRegister {
    /// # Panics
    /// Panics if `iteration_length` does not fit in `bitsize` bits.
    pub fn new(name: impl Into<String>, bitsize: usize, iteration_length: usize) -> Self {
        assert!(
            iteration_length <= 1 << bitsize,
            "iteration_length {} does not fit in {} bits",
            iteration_length,
            bitsize
        );
        SelectionRegister {
            name: name.into(),
            bitsize,
            iteration_length,
        }
    }

    pub fn as_register(&self) -> Register {
        Register::new(self.name.clone(), self.bitsize)
    }
}

/// An ordered collection of selection registers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRegisters {
    registers: Vec<SelectionRegister>,
}

impl SelectionRegisters {
    pub fn new(registers: Vec<SelectionRegister>) -> Self {
        SelectionRegisters { registers }
    }

    /// Build from `(name, bitsize, iteration_length)` triples.
    pub fn build(specs: &[(&str, usize, usize)]) -> Self {
        SelectionRegisters {
            registers: specs
                .iter()
                .map(|&(name, bitsize, len)| SelectionRegister::new(name, bitsize, len))
                .collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionRegister> {
        self.registers.iter()
    }

    pub fn total_bits(&self) -> usize {
        self.registers.iter().map(|r| r.bitsize).sum()
    }

    /// Forget the iteration lengths.
    pub fn as_registers(&self) -> Registers {
        Registers::new(self.registers.iter().map(|r| r.as_register()).collect())
    }
}

/// Assignment of consecutive wire indices to an ordered register list.
#[derive(Debug, Clone)]
pub struct WireMap {
    ranges: Vec<(String, Range<usize>)>,
    num_wires: usize,
}

impl WireMap {
    /// Lay out registers onto wires in order, starting at wire 0.
    ///
    /// # Panics
    /// Panics on duplicate register names.
    pub fn layout(registers: impl IntoIterator<Item = Register>) -> Self {
        let mut ranges: Vec<(String, Range<usize>)> = Vec::new();
        let mut next = 0usize;
        for reg in registers {
            assert!(
                ranges.iter().all(|(name, _)| *name != reg.name),
                "duplicate register name '{}'",
                reg.name
            );
            ranges.push((reg.name, next..next + reg.bitsize));
            next += reg.bitsize;
        }
        WireMap { ranges, num_wires: next }
    }

    pub fn num_wires(&self) -> usize {
        self.num_wires
    }

    pub fn get(&self, name: &str) -> Option<Range<usize>> {
        self.ranges
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, range)| range.clone())
    }

    /// Wire indices of a register, most significant bit first.
    ///
    /// # Panics
    /// Panics if no register with that name was laid out.
    pub fn wires(&self, name: &str) -> Vec<usize> {
        self.get(name)
            .unwrap_or_else(|| panic!("no register named '{}'", name))
            .collect()
    }
}

/// A composite gate declared over named registers.
///
/// `registers()` lists the wires the gate is drawn on, in diagram order;
/// `ancilla_registers()` lists work registers its decomposition borrows,
/// laid out after the declared ones. `wire_symbols()` gives the diagram
/// label for each declared wire.
pub trait RegisterGate {
    fn registers(&self) -> Registers;

    fn ancilla_registers(&self) -> Registers {
        Registers::default()
    }

    fn decompose(&self, wires: &WireMap) -> Vec<PositionedGate>;

    fn wire_symbols(&self) -> Vec<String>;
}
