use std::collections::HashMap;

use crate::arch::{self, Architecture};
use crate::register::{BitVector, CatalogId, Register, RegisterId};

/// Complete set of register descriptors for one architecture.
///
/// A catalog is built from static per-architecture tables. Lookups accept the canonical name of
/// a register as well as any alias the architecture defines, such as `lr` for `x30` on AArch64.
#[derive(Debug)]
pub struct Catalog {
    id: CatalogId,
    architecture: Architecture,
    registers: Vec<Register>,
    names: HashMap<&'static str, RegisterId>,
    program_counter: Option<RegisterId>,
    stack_pointer: Option<RegisterId>,
}

impl Catalog {
    /// Build the catalog for the given architecture. Fails if the register tables of the
    /// architecture were not compiled in.
    pub fn build(architecture: Architecture) -> arch::Result<Self> {
        let mut builder = CatalogBuilder::new(architecture);
        architecture.describe(&mut builder)?;
        Ok(builder.finish())
    }

    pub fn id(&self) -> CatalogId {
        self.id
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    /// Number of registers, aliases excluded.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Look up a register by name or alias. Names are matched case-insensitively.
    pub fn get(&self, name: &str) -> Option<&Register> {
        let id = match self.names.get(name) {
            Some(id) => Some(id),
            None => self.names.get(name.to_ascii_lowercase().as_str()),
        };

        id.and_then(|id| self.by_id(*id))
    }

    pub fn by_id(&self, id: RegisterId) -> Option<&Register> {
        self.registers.get(id.index())
    }

    /// Whether the register descriptor was produced by this catalog.
    pub fn contains(&self, register: &Register) -> bool {
        register.catalog == self.id
    }

    /// All registers ordered by identifier.
    pub fn registers(&self) -> impl Iterator<Item = &Register> {
        self.registers.iter()
    }

    /// Registers that own their storage.
    pub fn roots(&self) -> impl Iterator<Item = &Register> {
        self.registers.iter().filter(|register| register.is_root())
    }

    pub fn flags(&self) -> impl Iterator<Item = &Register> {
        self.registers.iter().filter(|register| register.is_flag())
    }

    /// Root register holding the storage of the given register. Returns `None` if the register
    /// is not from this catalog.
    pub fn root_of(&self, register: &Register) -> Option<&Register> {
        if self.contains(register) {
            self.by_id(register.root)
        } else {
            None
        }
    }

    /// All names and aliases that resolve to the given register.
    pub fn names_of(&self, register: &Register) -> Vec<&'static str> {
        if !self.contains(register) {
            return Vec::new();
        }

        let mut names = self
            .names
            .iter()
            .filter(|(_, id)| **id == register.id)
            .map(|(&name, _)| name)
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    pub fn program_counter(&self) -> Option<&Register> {
        self.program_counter.and_then(|id| self.by_id(id))
    }

    pub fn stack_pointer(&self) -> Option<&Register> {
        self.stack_pointer.and_then(|id| self.by_id(id))
    }
}

/// Incrementally assembles a [Catalog] from the register tables of an architecture.
///
/// The tables are static, so malformed entries are programming errors and cause a panic.
pub(crate) struct CatalogBuilder {
    id: CatalogId,
    architecture: Architecture,
    registers: Vec<Register>,
    names: HashMap<&'static str, RegisterId>,
    program_counter: Option<RegisterId>,
    stack_pointer: Option<RegisterId>,
}

// Each architecture family uses a different subset of the builder
#[cfg_attr(
    not(all(feature = "x86", feature = "aarch64", feature = "riscv")),
    allow(dead_code)
)]
impl CatalogBuilder {
    pub(crate) fn new(architecture: Architecture) -> Self {
        Self {
            id: CatalogId::next(),
            architecture,
            registers: Vec::new(),
            names: HashMap::new(),
            program_counter: None,
            stack_pointer: None,
        }
    }

    /// Add a register owning `bit_size` bits of storage.
    pub(crate) fn root(&mut self, name: &'static str, bit_size: u32) -> RegisterId {
        self.push(name, BitVector::new(bit_size - 1, 0), None, true, false)
    }

    /// Add a root register whose value is hardwired to zero.
    pub(crate) fn immutable_root(&mut self, name: &'static str, bit_size: u32) -> RegisterId {
        self.push(name, BitVector::new(bit_size - 1, 0), None, false, false)
    }

    /// Add a single-bit flag owning its own storage.
    pub(crate) fn flag_root(&mut self, name: &'static str) -> RegisterId {
        self.push(name, BitVector::new(0, 0), None, true, true)
    }

    /// Add a view over bits `[low, high]` of `root`. The view inherits the mutability of its
    /// root.
    pub(crate) fn field(
        &mut self,
        name: &'static str,
        root: RegisterId,
        high: u32,
        low: u32,
    ) -> RegisterId {
        let mutable = self.check_root(name, root, high);
        self.push(name, BitVector::new(high, low), Some(root), mutable, false)
    }

    /// Add a single-bit flag stored at `bit` of `root`.
    pub(crate) fn flag(&mut self, name: &'static str, root: RegisterId, bit: u32) -> RegisterId {
        let mutable = self.check_root(name, root, bit);
        self.push(name, BitVector::new(bit, bit), Some(root), mutable, true)
    }

    /// Make an additional name resolve to an existing register.
    pub(crate) fn alias(&mut self, alias: &'static str, id: RegisterId) {
        let previous = self.names.insert(alias, id);
        assert!(
            previous.is_none(),
            "duplicate register name {alias} in {arch}",
            arch = self.architecture
        );
    }

    pub(crate) fn program_counter(&mut self, id: RegisterId) {
        self.program_counter = Some(id);
    }

    pub(crate) fn stack_pointer(&mut self, id: RegisterId) {
        self.stack_pointer = Some(id);
    }

    pub(crate) fn finish(self) -> Catalog {
        Catalog {
            id: self.id,
            architecture: self.architecture,
            registers: self.registers,
            names: self.names,
            program_counter: self.program_counter,
            stack_pointer: self.stack_pointer,
        }
    }

    /// Confirm `root` owns its storage and is wide enough to hold bit `high`. Returns the
    /// mutability of the root.
    fn check_root(&self, name: &str, root: RegisterId, high: u32) -> bool {
        let root = &self.registers[root.index()];
        assert!(root.is_root(), "{name} must be a view of a root register");
        assert!(
            high < root.bit_size(),
            "{name} exceeds the {bits} bits of {root_name}",
            bits = root.bit_size(),
            root_name = root.name
        );
        root.mutable
    }

    fn push(
        &mut self,
        name: &'static str,
        bitvector: BitVector,
        root: Option<RegisterId>,
        mutable: bool,
        flag: bool,
    ) -> RegisterId {
        let id = RegisterId::new(self.registers.len());
        self.registers.push(Register {
            id,
            name,
            architecture: self.architecture,
            bitvector,
            root: root.unwrap_or(id),
            mutable,
            flag,
            catalog: self.id,
        });
        self.alias(name, id);
        id
    }
}
