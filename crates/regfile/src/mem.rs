use std::collections::BTreeMap;

use regvalue::RegisterValue;
use thiserror;

use crate::register::{Register, RegisterId};

/// Concrete store result type
pub type Result<T> = std::result::Result<T, Error>;

/// Possible concrete store errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value cannot be represented in the register
    #[error("value {value:#x} exceeds maximum {max:#x} of register {register}")]
    OutOfRange {
        register: String,
        value: RegisterValue,
        max: RegisterValue,
    },
}

/// Concrete register values keyed on the root register owning the storage.
///
/// Non-root registers are views into the storage of their root: reading one extracts its bit
/// range from the root value and writing one replaces only that bit range. Roots that were never
/// written hold zero.
#[derive(Clone, Debug, Default)]
pub struct ConcreteStore {
    roots: BTreeMap<RegisterId, RegisterValue>,
}

impl ConcreteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value of the register. Immutable registers always read zero.
    pub fn read(&self, register: &Register) -> RegisterValue {
        if !register.is_mutable() {
            return RegisterValue::ZERO;
        }

        let bitvector = register.bitvector();
        self.roots
            .get(&register.root_id())
            .map(|root| root.extract(bitvector.high(), bitvector.low()))
            .unwrap_or_default()
    }

    /// Write the value of the register. Only the bits of the register are replaced within the
    /// storage of its root.
    ///
    /// Values exceeding the maximum of the register are rejected without modifying the store.
    /// Writes to immutable registers are accepted and discarded.
    pub fn write(&mut self, register: &Register, value: RegisterValue) -> Result<()> {
        let max = register.max_value();
        if value > max {
            return Err(Error::OutOfRange {
                register: register.name().to_string(),
                value,
                max,
            });
        }

        if !register.is_mutable() {
            log::debug!("discarding write of {value:#x} to immutable register {register}");
            return Ok(());
        }

        log::trace!("{register} <- {value:#x}");
        let bitvector = register.bitvector();
        let root = self.roots.entry(register.root_id()).or_default();
        *root = root.insert(bitvector.high(), bitvector.low(), value);

        Ok(())
    }

    /// Reset every register to zero.
    pub fn reset(&mut self) {
        self.roots.clear();
    }

    /// Root registers that currently hold a non-zero value.
    pub fn live_roots(&self) -> impl Iterator<Item = (RegisterId, RegisterValue)> + '_ {
        self.roots
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(&id, &value)| (id, value))
    }
}
