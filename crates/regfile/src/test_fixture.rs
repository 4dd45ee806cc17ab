use std::collections::{BTreeMap, BTreeSet};

use regvalue::RegisterValue;

use crate::register::{Register, RegisterId};
use crate::symbolic::SymbolicEngine;

/// Symbolic engine whose expressions are constants. Records every assignment so tests can
/// observe what the register file forwards.
#[derive(Clone, Debug, Default)]
pub struct ConstantEngine {
    expressions: BTreeMap<RegisterId, RegisterValue>,
    pub assignments: usize,
}

impl SymbolicEngine for ConstantEngine {
    type Expression = RegisterValue;

    fn assign_register(&mut self, register: &Register, expression: Self::Expression) {
        self.assignments += 1;
        self.expressions.insert(register.id(), expression);
    }

    fn register_expression(&self, register: &Register) -> Option<&Self::Expression> {
        self.expressions.get(&register.id())
    }

    fn symbolic_registers(&self) -> BTreeSet<RegisterId> {
        self.expressions.keys().copied().collect()
    }

    fn evaluate(&self, expression: &Self::Expression) -> RegisterValue {
        *expression
    }

    fn concretize_register(&mut self, register: &Register) {
        self.expressions.remove(&register.id());
    }

    fn concretize_all(&mut self) {
        self.expressions.clear();
    }
}
