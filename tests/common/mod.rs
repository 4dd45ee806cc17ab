#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use regfile::{Architecture, Register, RegisterFile, RegisterId, RegisterValue, SymbolicEngine};

/// Expression tree built by [Processor] for the results of executed instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Constant(RegisterValue),

    /// Sum of the operands truncated to the given number of bits
    Add(Box<Expr>, Box<Expr>, u32),
}

/// Symbolic engine evaluating [Expr] trees under a fixed model.
#[derive(Clone, Debug, Default)]
pub struct ExpressionEngine {
    registers: BTreeMap<RegisterId, Expr>,
}

impl ExpressionEngine {
    fn eval(expression: &Expr) -> RegisterValue {
        match expression {
            Expr::Constant(value) => *value,
            Expr::Add(lhs, rhs, bits) => {
                Self::eval(lhs).wrapping_add(Self::eval(rhs)) & RegisterValue::mask(*bits)
            }
        }
    }
}

impl SymbolicEngine for ExpressionEngine {
    type Expression = Expr;

    fn assign_register(&mut self, register: &Register, expression: Expr) {
        self.registers.insert(register.id(), expression);
    }

    fn register_expression(&self, register: &Register) -> Option<&Expr> {
        self.registers.get(&register.id())
    }

    fn symbolic_registers(&self) -> BTreeSet<RegisterId> {
        self.registers.keys().copied().collect()
    }

    fn evaluate(&self, expression: &Expr) -> RegisterValue {
        Self::eval(expression)
    }

    fn concretize_register(&mut self, register: &Register) {
        self.registers.remove(&register.id());
    }

    fn concretize_all(&mut self) {
        self.registers.clear();
    }
}

/// Executes a handful of AArch64 instructions directly against a [RegisterFile]. Only `ADD`
/// (shifted register) without a shift is understood.
pub struct Processor {
    registers: RegisterFile<ExpressionEngine>,
}

impl Processor {
    pub fn new(architecture: Architecture) -> Self {
        let mut registers = RegisterFile::with_symbolic_engine(ExpressionEngine::default());
        registers
            .set_architecture(architecture)
            .expect("failed to select architecture");

        Processor { registers }
    }

    pub fn registers(&self) -> &RegisterFile<ExpressionEngine> {
        &self.registers
    }

    pub fn register(&self, name: &str) -> Register {
        self.registers
            .register(name)
            .unwrap_or_else(|err| panic!("failed to resolve {name}: {err}"))
    }

    pub fn write_register(&mut self, name: &str, value: impl Into<RegisterValue>) {
        let register = self.register(name);
        self.registers
            .set_concrete_register_value(&register, value)
            .expect("failed to write register");
    }

    pub fn read_register(&self, name: &str) -> RegisterValue {
        let register = self.register(name);
        self.registers
            .concrete_register_value(&register)
            .expect("failed to read register")
    }

    pub fn symbolic_value(&self, name: &str) -> RegisterValue {
        let register = self.register(name);
        self.registers
            .symbolic_register_value(&register)
            .expect("failed to evaluate register")
    }

    pub fn symbolic_registers(&self) -> Vec<&'static str> {
        self.registers
            .symbolic_registers()
            .expect("architecture must be set")
            .iter()
            .map(Register::name)
            .collect()
    }

    /// Execute a single little-endian encoded instruction and advance the program counter.
    pub fn execute(&mut self, instruction: [u8; 4]) -> Result<(), String> {
        let word = u32::from_le_bytes(instruction);
        let (prefix, zero_register) = match word >> 24 {
            0x8b => ("x", "xzr"),
            0x0b => ("w", "wzr"),
            _ => return Err(format!("unsupported instruction {word:#010x}")),
        };

        if (word >> 10) & 0x3f != 0 || (word >> 21) & 0x1 != 0 {
            return Err(format!("shifted operands are not supported: {word:#010x}"));
        }

        let operand = |index: u32| match (word >> index) & 0x1f {
            31 => zero_register.to_string(),
            n => format!("{prefix}{n}"),
        };

        let rd = self.register(&operand(0));
        let rn = self.register(&operand(5));
        let rm = self.register(&operand(16));
        let bits = rd.bit_size();

        let sum = self
            .value_of(&rn)?
            .wrapping_add(self.value_of(&rm)?)
            & RegisterValue::mask(bits);
        let expression = Expr::Add(
            Box::new(self.expression_of(&rn)?),
            Box::new(self.expression_of(&rm)?),
            bits,
        );

        // Writes to a 32-bit register clear the upper half of its 64-bit root
        let root = self.registers.parent_register(&rd).map_err(|err| err.to_string())?;
        self.registers
            .set_concrete_register_value(&root, sum)
            .map_err(|err| err.to_string())?;
        self.registers
            .assign_symbolic_expression_to_register(&root, expression)
            .map_err(|err| err.to_string())?;

        self.advance_pc()
    }

    fn advance_pc(&mut self) -> Result<(), String> {
        let pc = self.registers.program_counter().map_err(|err| err.to_string())?;
        let next = self
            .value_of(&pc)?
            .wrapping_add(RegisterValue::from(4u8))
            & pc.max_value();
        self.registers
            .set_concrete_register_value(&pc, next)
            .map_err(|err| err.to_string())?;
        self.registers
            .assign_symbolic_expression_to_register(&pc, Expr::Constant(next))
            .map_err(|err| err.to_string())
    }

    fn value_of(&self, register: &Register) -> Result<RegisterValue, String> {
        self.registers
            .concrete_register_value(register)
            .map_err(|err| err.to_string())
    }

    fn expression_of(&self, register: &Register) -> Result<Expr, String> {
        let expression = self
            .registers
            .symbolic_register(register)
            .map_err(|err| err.to_string())?;

        match expression {
            Some(expression) if register.is_root() => Ok(expression.clone()),
            _ => Ok(Expr::Constant(
                self.registers
                    .symbolic_register_value(register)
                    .map_err(|err| err.to_string())?,
            )),
        }
    }
}
