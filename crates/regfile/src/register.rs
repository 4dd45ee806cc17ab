use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use regvalue::RegisterValue;

use crate::arch::Architecture;

/// Identifier of a register within the catalog of one architecture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterId(usize);

impl RegisterId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a single catalog build. Every build receives a distinct identity, even when the
/// same architecture is selected again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatalogId(u64);

impl CatalogId {
    pub(crate) fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Kind of an instruction operand. Registers are always [OperandKind::Register]; the other kinds
/// are used by the rest of the analysis engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OperandKind {
    Invalid,
    Immediate,
    Memory,
    Register,
}

/// Inclusive bit range `[low, high]` of a register within the storage of its root.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitVector {
    high: u32,
    low: u32,
}

impl BitVector {
    pub fn new(high: u32, low: u32) -> Self {
        assert!(low <= high, "invalid bit range [{high}..{low}]");
        Self { high, low }
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    /// Number of bits in the range.
    pub fn size(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Largest unsigned value representable in the range.
    pub fn max_value(&self) -> RegisterValue {
        RegisterValue::mask(self.size())
    }

    /// Whether the two ranges share at least one bit position.
    pub fn intersects(&self, other: &BitVector) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bv[{}..{}]", self.high, self.low)
    }
}

/// Descriptor of a single architectural register.
///
/// Descriptors are produced by a [crate::catalog::Catalog] and remain tied to it. Two descriptors
/// are equal only if they come from the same catalog build and name the same register.
#[derive(Clone, Debug)]
pub struct Register {
    pub(crate) id: RegisterId,
    pub(crate) name: &'static str,
    pub(crate) architecture: Architecture,
    pub(crate) bitvector: BitVector,
    pub(crate) root: RegisterId,
    pub(crate) mutable: bool,
    pub(crate) flag: bool,
    pub(crate) catalog: CatalogId,
}

impl Register {
    pub fn id(&self) -> RegisterId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn bitvector(&self) -> BitVector {
        self.bitvector
    }

    pub fn bit_size(&self) -> u32 {
        self.bitvector.size()
    }

    /// Size in bytes, rounded up for registers that are not a whole number of bytes.
    pub fn size(&self) -> u32 {
        self.bit_size().div_ceil(u8::BITS)
    }

    pub fn max_value(&self) -> RegisterValue {
        self.bitvector.max_value()
    }

    /// Identifier of the register owning the storage of this register.
    pub fn root_id(&self) -> RegisterId {
        self.root
    }

    pub fn is_root(&self) -> bool {
        self.root == self.id
    }

    /// Immutable registers are hardwired constants such as the AArch64 zero register.
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    pub fn is_flag(&self) -> bool {
        self.flag
    }

    pub fn kind(&self) -> OperandKind {
        OperandKind::Register
    }

    pub fn catalog_id(&self) -> CatalogId {
        self.catalog
    }

    /// See [overlaps]. Use [crate::RegisterFile::is_overlap_with] to also reject registers of
    /// an inactive catalog.
    pub fn is_overlap_with(&self, other: &Register) -> bool {
        overlaps(self, other)
    }
}

/// Whether two registers share any bit of storage. Registers of different catalogs or with
/// different roots never overlap.
///
/// Only the descriptors are compared. Whether their catalog is still the active one is not
/// checked here; [crate::RegisterFile::is_overlap_with] reports that as
/// [crate::context::Error::StaleRegister].
pub fn overlaps(a: &Register, b: &Register) -> bool {
    a.catalog == b.catalog && a.root == b.root && a.bitvector.intersects(&b.bitvector)
}

impl PartialEq for Register {
    fn eq(&self, other: &Self) -> bool {
        self.catalog == other.catalog && self.id == other.id
    }
}

impl Eq for Register {}

impl Hash for Register {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.catalog.hash(state);
        self.id.hash(state);
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.name, self.bit_size(), self.bitvector)
    }
}
