use crate::arch::{self, Architecture};
use crate::catalog::Catalog;

fn catalog(architecture: Architecture) -> Catalog {
    Catalog::build(architecture).expect("failed to build catalog")
}

#[test]
fn every_architecture_builds() -> arch::Result<()> {
    for architecture in Architecture::ALL {
        assert!(architecture.is_supported());
        let catalog = Catalog::build(architecture)?;
        assert_eq!(catalog.architecture(), architecture);
        assert!(!catalog.is_empty());
        assert!(catalog.program_counter().is_some(), "{architecture} pc");
        assert!(catalog.stack_pointer().is_some(), "{architecture} sp");
    }

    Ok(())
}

#[test]
fn catalog_invariants() {
    for architecture in Architecture::ALL {
        let catalog = catalog(architecture);
        for register in catalog.registers() {
            let root = catalog.root_of(register).expect("root must exist");
            assert!(root.is_root(), "{register} root {root} is not a root");
            assert_eq!(root.bitvector().low(), 0);
            assert!(register.bitvector().high() < root.bit_size(), "{register}");
            assert_eq!(register.architecture(), architecture);
            assert_eq!(register.catalog_id(), catalog.id());
            assert_eq!(register.name(), register.name().to_ascii_lowercase());
            assert_eq!(catalog.get(register.name()), Some(register));
            assert_eq!(catalog.by_id(register.id()), Some(register));

            if !root.is_mutable() {
                assert!(!register.is_mutable(), "{register} view of immutable root");
            }

            if register.is_flag() {
                assert_eq!(register.bit_size(), 1, "{register} flag must be a single bit");
            }
        }
    }
}

#[test]
fn rebuilt_catalogs_are_distinct() {
    let first = catalog(Architecture::X86_64);
    let second = catalog(Architecture::X86_64);
    assert_ne!(first.id(), second.id());

    let rax = first.get("rax").unwrap();
    assert!(first.contains(rax));
    assert!(!second.contains(rax));
    assert_ne!(second.get("rax"), Some(rax));
    assert!(second.root_of(rax).is_none());
}

#[test]
fn x86_64_general_purpose_registers() {
    let catalog = catalog(Architecture::X86_64);
    let rax = catalog.get("rax").unwrap();
    assert!(rax.is_root());
    assert_eq!(rax.bit_size(), 64);

    let cases = [("eax", 31, 0), ("ax", 15, 0), ("ah", 15, 8), ("al", 7, 0)];
    for (name, high, low) in cases {
        let register = catalog.get(name).unwrap();
        assert_eq!(register.root_id(), rax.id(), "{name}");
        assert_eq!(register.bitvector().high(), high, "{name}");
        assert_eq!(register.bitvector().low(), low, "{name}");
    }

    for name in ["dil", "sil", "bpl", "spl", "r8", "r15d", "r12w", "r9b", "cr8"] {
        assert!(catalog.get(name).is_some(), "{name}");
    }

    assert_eq!(catalog.program_counter().unwrap().name(), "rip");
    assert_eq!(catalog.stack_pointer().unwrap().name(), "rsp");
}

#[test]
fn x86_general_purpose_registers() {
    let catalog = catalog(Architecture::X86);
    let eax = catalog.get("eax").unwrap();
    assert!(eax.is_root());
    assert_eq!(eax.bit_size(), 32);
    assert_eq!(catalog.get("ah").unwrap().root_id(), eax.id());

    for name in ["rax", "r8", "r8d", "dil", "sil", "rip", "rflags", "zmm0", "ymm8", "cr8"] {
        assert!(catalog.get(name).is_none(), "{name} is long mode only");
    }

    assert_eq!(catalog.program_counter().unwrap().name(), "eip");
    assert_eq!(catalog.stack_pointer().unwrap().name(), "esp");
}

#[test]
fn x86_flags_share_eflags() {
    let catalog = catalog(Architecture::X86_64);
    let rflags = catalog.get("rflags").unwrap();
    let eflags = catalog.get("eflags").unwrap();
    assert_eq!(eflags.root_id(), rflags.id());
    assert!(!rflags.is_flag());
    assert!(!eflags.is_flag());

    let zf = catalog.get("zf").unwrap();
    assert!(zf.is_flag());
    assert_eq!(zf.root_id(), rflags.id());
    assert_eq!(zf.bitvector().low(), 6);

    let flags = catalog.flags().map(|flag| flag.name()).collect::<Vec<_>>();
    assert_eq!(flags.len(), 16);
    for name in ["cf", "pf", "af", "zf", "sf", "tf", "if", "df", "of"] {
        assert!(flags.contains(&name), "{name}");
    }

    let catalog = self::catalog(Architecture::X86);
    let eflags = catalog.get("eflags").unwrap();
    assert!(eflags.is_root());
    assert_eq!(catalog.get("cf").unwrap().root_id(), eflags.id());
}

#[test]
fn x86_vector_registers() {
    let catalog = catalog(Architecture::X86_64);
    assert_eq!(catalog.get("zmm2").unwrap().bit_size(), 512);
    assert_eq!(catalog.get("ymm1").unwrap().bit_size(), 256);
    assert_eq!(catalog.get("xmm31").unwrap().bit_size(), 128);
    assert_eq!(
        catalog.get("xmm3").unwrap().root_id(),
        catalog.get("zmm3").unwrap().id()
    );

    let catalog = self::catalog(Architecture::X86);
    let xmm1 = catalog.get("xmm1").unwrap();
    assert_eq!(xmm1.bit_size(), 128);
    assert_eq!(xmm1.root_id(), catalog.get("ymm1").unwrap().id());
    assert!(catalog.get("xmm8").is_none());
}

#[test]
fn x87_registers_alias_mmx() {
    let catalog = catalog(Architecture::X86);
    let st0 = catalog.get("st0").unwrap();
    let mm0 = catalog.get("mm0").unwrap();
    assert_eq!(st0.bit_size(), 80);
    assert_eq!(st0.size(), 10);
    assert_eq!(mm0.root_id(), st0.id());
    assert_eq!(mm0.bit_size(), 64);
}

#[test]
fn aarch64_registers() {
    let catalog = catalog(Architecture::AArch64);
    let x0 = catalog.get("x0").unwrap();
    let w0 = catalog.get("w0").unwrap();
    assert_eq!(w0.root_id(), x0.id());
    assert_eq!(w0.bit_size(), 32);

    let xzr = catalog.get("xzr").unwrap();
    let wzr = catalog.get("wzr").unwrap();
    assert!(!xzr.is_mutable());
    assert!(!wzr.is_mutable());
    assert_eq!(wzr.root_id(), xzr.id());

    assert_eq!(catalog.get("lr").unwrap(), catalog.get("x30").unwrap());
    assert_eq!(catalog.get("fp").unwrap(), catalog.get("x29").unwrap());
    assert_eq!(
        catalog.names_of(catalog.get("x30").unwrap()),
        vec!["lr", "x30"]
    );

    for flag in ["n", "z", "c", "v"] {
        let flag = catalog.get(flag).unwrap();
        assert!(flag.is_flag());
        assert!(flag.is_root());
    }

    assert_eq!(catalog.get("spsr").unwrap().bit_size(), 32);
    assert_eq!(catalog.get("q31").unwrap().bit_size(), 128);
    assert_eq!(
        catalog.get("b7").unwrap().root_id(),
        catalog.get("q7").unwrap().id()
    );
    assert_eq!(catalog.program_counter().unwrap().name(), "pc");
    assert_eq!(catalog.stack_pointer().unwrap().name(), "sp");
}

#[test]
fn riscv_registers() {
    for (architecture, xlen) in [(Architecture::Riscv32, 32), (Architecture::Riscv64, 64)] {
        let catalog = catalog(architecture);
        let x0 = catalog.get("x0").unwrap();
        assert!(!x0.is_mutable());
        assert_eq!(x0.bit_size(), xlen);
        assert_eq!(catalog.get("zero"), Some(x0));
        assert_eq!(catalog.get("a0"), catalog.get("x10"));
        assert_eq!(catalog.get("fp"), catalog.get("s0"));
        assert_eq!(catalog.get("pc").unwrap().bit_size(), xlen);
        assert_eq!(catalog.get("f31").unwrap().bit_size(), 64);
        assert_eq!(catalog.get("fa0"), catalog.get("f10"));
        assert_eq!(catalog.stack_pointer().unwrap().name(), "x2");

        let fcsr = catalog.get("fcsr").unwrap();
        for flag in ["nx", "uf", "of", "dz", "nv"] {
            let flag = catalog.get(flag).unwrap();
            assert!(flag.is_flag());
            assert_eq!(flag.root_id(), fcsr.id());
        }
    }
}

#[test]
fn lookup_is_case_insensitive() {
    let catalog = catalog(Architecture::X86_64);
    assert_eq!(catalog.get("RAX"), catalog.get("rax"));
    assert_eq!(catalog.get("Zmm0"), catalog.get("zmm0"));
    assert!(catalog.get("nonexistent").is_none());
}

#[test]
fn parse_architecture() -> arch::Result<()> {
    assert_eq!("x86_64".parse::<Architecture>()?, Architecture::X86_64);
    assert_eq!("AMD64".parse::<Architecture>()?, Architecture::X86_64);
    assert_eq!("arm64".parse::<Architecture>()?, Architecture::AArch64);
    assert_eq!("rv32".parse::<Architecture>()?, Architecture::Riscv32);
    for architecture in Architecture::ALL {
        assert_eq!(architecture.to_string().parse::<Architecture>()?, architecture);
    }

    assert_eq!(
        "mips".parse::<Architecture>(),
        Err(arch::Error::UnsupportedArchitecture("mips".to_string()))
    );
    Ok(())
}

#[test]
fn gpr_sizes() {
    assert_eq!(Architecture::X86.gpr_bit_size(), 32);
    assert_eq!(Architecture::X86.gpr_size(), 4);
    assert_eq!(Architecture::X86_64.gpr_size(), 8);
    assert_eq!(Architecture::AArch64.gpr_bit_size(), 64);
    assert_eq!(Architecture::Riscv32.gpr_bit_size(), 32);
    assert_eq!(Architecture::Riscv64.gpr_bit_size(), 64);
}
