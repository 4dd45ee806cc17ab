use std::fmt;
use std::str::FromStr;

use thiserror;

use crate::catalog::CatalogBuilder;

#[cfg(feature = "aarch64")]
mod aarch64;
#[cfg(feature = "riscv")]
mod riscv;
#[cfg(feature = "x86")]
mod x86;

/// Architecture result type
pub type Result<T> = std::result::Result<T, Error>;

/// Possible architecture errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The architecture is unknown or its register tables were not compiled in
    #[error("unsupported architecture: {0}")]
    UnsupportedArchitecture(String),
}

/// Instruction set architectures with a register catalog.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Architecture {
    X86,
    X86_64,
    AArch64,
    Riscv32,
    Riscv64,
}

impl Architecture {
    pub const ALL: [Architecture; 5] = [
        Architecture::X86,
        Architecture::X86_64,
        Architecture::AArch64,
        Architecture::Riscv32,
        Architecture::Riscv64,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X86_64 => "x86_64",
            Architecture::AArch64 => "aarch64",
            Architecture::Riscv32 => "riscv32",
            Architecture::Riscv64 => "riscv64",
        }
    }

    /// Width of a general-purpose register in bits.
    pub fn gpr_bit_size(&self) -> u32 {
        match self {
            Architecture::X86 | Architecture::Riscv32 => 32,
            Architecture::X86_64 | Architecture::AArch64 | Architecture::Riscv64 => 64,
        }
    }

    /// Width of a general-purpose register in bytes.
    pub fn gpr_size(&self) -> u32 {
        self.gpr_bit_size() / u8::BITS
    }

    /// Whether the register tables for this architecture are compiled in.
    pub fn is_supported(&self) -> bool {
        match self {
            Architecture::X86 | Architecture::X86_64 => cfg!(feature = "x86"),
            Architecture::AArch64 => cfg!(feature = "aarch64"),
            Architecture::Riscv32 | Architecture::Riscv64 => cfg!(feature = "riscv"),
        }
    }

    /// Add every register of this architecture to the builder.
    #[cfg_attr(
        not(all(feature = "x86", feature = "aarch64", feature = "riscv")),
        allow(unused_variables)
    )]
    pub(crate) fn describe(&self, builder: &mut CatalogBuilder) -> Result<()> {
        match self {
            #[cfg(feature = "x86")]
            Architecture::X86 => {
                x86::describe(builder, x86::Mode::Protected);
                Ok(())
            }
            #[cfg(feature = "x86")]
            Architecture::X86_64 => {
                x86::describe(builder, x86::Mode::Long);
                Ok(())
            }
            #[cfg(feature = "aarch64")]
            Architecture::AArch64 => {
                aarch64::describe(builder);
                Ok(())
            }
            #[cfg(feature = "riscv")]
            Architecture::Riscv32 => {
                riscv::describe(builder, riscv::Xlen::Rv32);
                Ok(())
            }
            #[cfg(feature = "riscv")]
            Architecture::Riscv64 => {
                riscv::describe(builder, riscv::Xlen::Rv64);
                Ok(())
            }
            #[allow(unreachable_patterns)]
            _ => Err(Error::UnsupportedArchitecture(self.to_string())),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "i686" => Ok(Architecture::X86),
            "x86_64" | "x86-64" | "amd64" => Ok(Architecture::X86_64),
            "aarch64" | "arm64" => Ok(Architecture::AArch64),
            "riscv32" | "rv32" => Ok(Architecture::Riscv32),
            "riscv64" | "rv64" => Ok(Architecture::Riscv64),
            _ => Err(Error::UnsupportedArchitecture(name.to_string())),
        }
    }
}
