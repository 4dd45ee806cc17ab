//! This crate models the architectural registers of a target CPU for binary analysis. It tracks
//! the concrete value of every register and keeps registers that share physical storage
//! consistent with one another.
//!
//! ### Catalog
//!
//! Each [arch::Architecture] has a [catalog::Catalog] describing every register it defines. A
//! register is either a *root*, which owns a block of storage, or a bit-field view into the
//! storage of its root. For example on x86-64 `ah` is bits `[8, 15]` of the root `rax`, while on
//! x86 the same register is a view into `eax`.
//!
//! ### Register file
//!
//! The [context::RegisterFile] is the entry point used by instruction semantics and symbolic
//! execution. Selecting an architecture rebuilds the catalog and zeroes all register state.
//! Register descriptors handed out before the switch are rejected afterwards since their bit
//! layout may no longer apply.
//!
//! Symbolic register state is owned by an external [symbolic::SymbolicEngine]. The register file
//! only forwards queries and assignments to it.

/// Supported architectures and their register tables.
pub mod arch;

/// Per-architecture collection of register descriptors.
pub mod catalog;

/// Register file used by instruction semantics to read and write registers.
pub mod context;

/// Concrete register storage with bit-field aliasing between overlapping registers.
pub mod mem;

/// Register descriptors, bit ranges, and overlap checks.
pub mod register;

/// Interface to the symbolic engine that tracks symbolic register expressions.
pub mod symbolic;

pub use arch::Architecture;
pub use catalog::Catalog;
pub use context::{RegisterFile, RegisterKey};
pub use mem::ConcreteStore;
pub use register::{overlaps, BitVector, OperandKind, Register, RegisterId};
pub use regvalue::RegisterValue;
pub use symbolic::{NoSymbolicEngine, SymbolicEngine};

#[cfg(all(test, feature = "x86", feature = "aarch64", feature = "riscv"))]
mod test_fixture;

#[cfg(test)]
mod tests;
