use thiserror;

use regvalue::RegisterValue;

use crate::arch::Architecture;
use crate::catalog::Catalog;
use crate::mem::ConcreteStore;
use crate::register::{Register, RegisterId};
use crate::symbolic::{NoSymbolicEngine, SymbolicEngine};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The architecture cannot be selected
    #[error(transparent)]
    Architecture(#[from] crate::arch::Error),

    /// Error occurred while accessing concrete register storage
    #[error(transparent)]
    Store(#[from] crate::mem::Error),

    #[error("register {0} does not exist in the active architecture")]
    UnknownRegister(String),

    #[error("register {0} was resolved before the architecture was last selected")]
    StaleRegister(String),

    #[error("no architecture has been selected")]
    ArchitectureNotSet,

    #[error("register {0} is not a root register")]
    NotRootRegister(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Key used to resolve a register in the active catalog.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegisterKey<'a> {
    Name(&'a str),
    Id(RegisterId),
}

impl<'a> From<&'a str> for RegisterKey<'a> {
    fn from(name: &'a str) -> Self {
        RegisterKey::Name(name)
    }
}

impl<'a> From<&'a String> for RegisterKey<'a> {
    fn from(name: &'a String) -> Self {
        RegisterKey::Name(name)
    }
}

impl From<RegisterId> for RegisterKey<'_> {
    fn from(id: RegisterId) -> Self {
        RegisterKey::Id(id)
    }
}

/// Register state of a single analysis context.
///
/// Holds the catalog of the active architecture, the concrete value of every register, and the
/// symbolic engine tracking symbolic register expressions. Every operation taking a [Register]
/// requires the descriptor to come from the active catalog. Descriptors obtained before the most
/// recent [RegisterFile::set_architecture] are rejected with [Error::StaleRegister].
pub struct RegisterFile<S: SymbolicEngine = NoSymbolicEngine> {
    catalog: Option<Catalog>,
    store: ConcreteStore,
    symbolic: S,
}

impl<S: SymbolicEngine + Default> Default for RegisterFile<S> {
    fn default() -> Self {
        Self::with_symbolic_engine(S::default())
    }
}

impl RegisterFile {
    /// Create a register file with symbolic tracking disabled and no architecture selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_architecture(architecture: Architecture) -> Result<Self> {
        let mut registers = Self::new();
        registers.set_architecture(architecture)?;
        Ok(registers)
    }
}

impl<S: SymbolicEngine> RegisterFile<S> {
    pub fn with_symbolic_engine(symbolic: S) -> Self {
        Self {
            catalog: None,
            store: ConcreteStore::new(),
            symbolic,
        }
    }

    pub fn symbolic_engine(&self) -> &S {
        &self.symbolic
    }

    pub fn symbolic_engine_mut(&mut self) -> &mut S {
        &mut self.symbolic
    }

    /// Select the active architecture. The catalog is rebuilt and all concrete and symbolic
    /// register state is cleared. Previously resolved registers are no longer valid.
    ///
    /// If the architecture is not supported the current architecture remains active.
    pub fn set_architecture(&mut self, architecture: Architecture) -> Result<()> {
        let catalog = Catalog::build(architecture)?;
        log::debug!(
            "selected architecture {architecture} with {len} registers",
            len = catalog.len()
        );

        self.catalog = Some(catalog);
        self.store.reset();
        self.symbolic.concretize_all();
        Ok(())
    }

    pub fn architecture(&self) -> Option<Architecture> {
        self.catalog.as_ref().map(Catalog::architecture)
    }

    pub fn is_architecture_valid(&self) -> bool {
        self.catalog.is_some()
    }

    /// Return to the initial state with no architecture selected.
    pub fn reset(&mut self) {
        log::debug!("resetting register file");
        self.catalog = None;
        self.store.reset();
        self.symbolic.concretize_all();
    }

    /// Catalog of the active architecture.
    pub fn registers(&self) -> Result<&Catalog> {
        self.catalog.as_ref().ok_or(Error::ArchitectureNotSet)
    }

    /// Resolve a register by name, alias, or identifier.
    pub fn register<'a>(&self, key: impl Into<RegisterKey<'a>>) -> Result<Register> {
        let catalog = self.registers()?;
        let register = match key.into() {
            RegisterKey::Name(name) => catalog
                .get(name)
                .ok_or_else(|| Error::UnknownRegister(name.to_string()))?,
            RegisterKey::Id(id) => catalog
                .by_id(id)
                .ok_or_else(|| Error::UnknownRegister(id.to_string()))?,
        };

        Ok(register.clone())
    }

    /// Every register of the active architecture, including views and flags.
    pub fn all_registers(&self) -> Result<Vec<Register>> {
        Ok(self.registers()?.registers().cloned().collect())
    }

    /// The root register holding the storage of the given register. For example `ah` resolves to
    /// `rax` on x86-64 and to `eax` on x86.
    pub fn parent_register(&self, register: &Register) -> Result<Register> {
        let catalog = self.catalog_of(register)?;
        self.root_of(catalog, register).cloned()
    }

    /// Every root register of the active architecture.
    pub fn parent_registers(&self) -> Result<Vec<Register>> {
        Ok(self.registers()?.roots().cloned().collect())
    }

    pub fn program_counter(&self) -> Result<Register> {
        self.registers()?
            .program_counter()
            .cloned()
            .ok_or_else(|| Error::UnknownRegister("program counter".to_string()))
    }

    pub fn stack_pointer(&self) -> Result<Register> {
        self.registers()?
            .stack_pointer()
            .cloned()
            .ok_or_else(|| Error::UnknownRegister("stack pointer".to_string()))
    }

    pub fn gpr_bit_size(&self) -> Result<u32> {
        Ok(self.registers()?.architecture().gpr_bit_size())
    }

    pub fn gpr_size(&self) -> Result<u32> {
        Ok(self.registers()?.architecture().gpr_size())
    }

    /// Whether the register belongs to the active architecture.
    pub fn is_register_valid(&self, register: &Register) -> bool {
        self.catalog
            .as_ref()
            .is_some_and(|catalog| catalog.contains(register))
    }

    /// Whether the register is a valid register of the active architecture other than a flag.
    pub fn is_register(&self, register: &Register) -> bool {
        self.is_register_valid(register) && !register.is_flag()
    }

    /// Whether the register is a valid flag of the active architecture.
    pub fn is_flag(&self, register: &Register) -> bool {
        self.is_register_valid(register) && register.is_flag()
    }

    /// Whether writes to the register take effect. Hardwired registers such as `xzr` are not
    /// mutable.
    pub fn is_mutable(&self, register: &Register) -> Result<bool> {
        self.catalog_of(register)?;
        Ok(register.is_mutable())
    }

    /// Whether the two registers share any storage in the active architecture. Fails with
    /// [Error::StaleRegister] if either register is not from the active catalog.
    pub fn is_overlap_with(&self, register: &Register, other: &Register) -> Result<bool> {
        self.catalog_of(register)?;
        self.catalog_of(other)?;
        Ok(register.is_overlap_with(other))
    }

    pub fn concrete_register_value(&self, register: &Register) -> Result<RegisterValue> {
        self.catalog_of(register)?;
        Ok(self.store.read(register))
    }

    /// Write the concrete value of the register.
    ///
    /// Fails without modifying any register if the value exceeds the maximum of the register.
    /// Writes to immutable registers succeed but have no effect.
    pub fn set_concrete_register_value(
        &mut self,
        register: &Register,
        value: impl Into<RegisterValue>,
    ) -> Result<()> {
        self.catalog_of(register)?;
        self.store.write(register, value.into())?;
        Ok(())
    }

    /// Forward the symbolic expression of a root register to the symbolic engine. Assignments to
    /// immutable registers are discarded.
    pub fn assign_symbolic_expression_to_register(
        &mut self,
        register: &Register,
        expression: S::Expression,
    ) -> Result<()> {
        self.catalog_of(register)?;
        if !register.is_root() {
            return Err(Error::NotRootRegister(register.name().to_string()));
        }

        if !register.is_mutable() {
            log::debug!("discarding symbolic assignment to immutable register {register}");
            return Ok(());
        }

        log::trace!("assigning symbolic expression to {register}");
        self.symbolic.assign_register(register, expression);
        Ok(())
    }

    /// Symbolic expression of the root register holding the storage of the given register.
    pub fn symbolic_register(&self, register: &Register) -> Result<Option<&S::Expression>> {
        let catalog = self.catalog_of(register)?;
        let root = self.root_of(catalog, register)?;
        Ok(self.symbolic.register_expression(root))
    }

    /// Evaluate the symbolic value of the register. Registers without a symbolic expression
    /// evaluate to their concrete value.
    pub fn symbolic_register_value(&self, register: &Register) -> Result<RegisterValue> {
        let catalog = self.catalog_of(register)?;
        let root = self.root_of(catalog, register)?;
        match self.symbolic.register_expression(root) {
            Some(expression) if register.is_mutable() => {
                let value = self.symbolic.evaluate(expression) & root.max_value();
                let bitvector = register.bitvector();
                Ok(value.extract(bitvector.high(), bitvector.low()))
            }
            _ => Ok(self.store.read(register)),
        }
    }

    /// Root registers of the active architecture with a symbolic expression.
    pub fn symbolic_registers(&self) -> Result<Vec<Register>> {
        let catalog = self.registers()?;
        Ok(self
            .symbolic
            .symbolic_registers()
            .into_iter()
            .filter_map(|id| catalog.by_id(id))
            .cloned()
            .collect())
    }

    pub fn is_register_symbolized(&self, register: &Register) -> Result<bool> {
        Ok(self.symbolic_register(register)?.is_some())
    }

    /// Drop the symbolic expression of the root holding the register.
    pub fn concretize_register(&mut self, register: &Register) -> Result<()> {
        let catalog = self.catalog_of(register)?;
        let root = self.root_of(catalog, register)?.clone();
        self.symbolic.concretize_register(&root);
        Ok(())
    }

    pub fn concretize_all_registers(&mut self) {
        self.symbolic.concretize_all();
    }

    /// Catalog of the register if it is the active catalog.
    fn catalog_of(&self, register: &Register) -> Result<&Catalog> {
        let catalog = self.registers()?;
        if catalog.contains(register) {
            Ok(catalog)
        } else {
            Err(Error::StaleRegister(register.name().to_string()))
        }
    }

    fn root_of<'c>(&self, catalog: &'c Catalog, register: &Register) -> Result<&'c Register> {
        catalog
            .root_of(register)
            .ok_or_else(|| Error::StaleRegister(register.name().to_string()))
    }
}
