use std::collections::BTreeSet;
use std::convert::Infallible;

use regvalue::RegisterValue;

use crate::register::{Register, RegisterId};

/// Symbolic engine tracking symbolic expressions assigned to registers.
///
/// The register file never builds expressions itself. Instruction semantics produce them and the
/// register file forwards them here. Expressions are always assigned to root registers; views are
/// resolved by the register file by extracting their bit range from the evaluated root.
pub trait SymbolicEngine {
    type Expression;

    /// Record the expression as the current symbolic value of the root register.
    fn assign_register(&mut self, register: &Register, expression: Self::Expression);

    /// The expression currently assigned to the root register, if any.
    fn register_expression(&self, register: &Register) -> Option<&Self::Expression>;

    /// Identifiers of the root registers with an assigned expression.
    fn symbolic_registers(&self) -> BTreeSet<RegisterId>;

    /// Evaluate the expression to a concrete value under the current model.
    fn evaluate(&self, expression: &Self::Expression) -> RegisterValue;

    /// Drop the expression of the root register so that it is represented by its concrete value.
    fn concretize_register(&mut self, register: &Register);

    /// Drop every register expression.
    fn concretize_all(&mut self);
}

/// Symbolic engine used when symbolic execution is disabled. No expression can be constructed
/// so every register is concrete.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoSymbolicEngine;

impl SymbolicEngine for NoSymbolicEngine {
    type Expression = Infallible;

    fn assign_register(&mut self, _register: &Register, expression: Self::Expression) {
        match expression {}
    }

    fn register_expression(&self, _register: &Register) -> Option<&Self::Expression> {
        None
    }

    fn symbolic_registers(&self) -> BTreeSet<RegisterId> {
        BTreeSet::new()
    }

    fn evaluate(&self, expression: &Self::Expression) -> RegisterValue {
        match *expression {}
    }

    fn concretize_register(&mut self, _register: &Register) {}

    fn concretize_all(&mut self) {}
}
