use crate::catalog::CatalogBuilder;

/// Width of the integer registers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Xlen {
    Rv32,
    Rv64,
}

const X: [&str; 32] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7",
    "x8", "x9", "x10", "x11", "x12", "x13", "x14", "x15",
    "x16", "x17", "x18", "x19", "x20", "x21", "x22", "x23",
    "x24", "x25", "x26", "x27", "x28", "x29", "x30", "x31",
];

const ABI: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2",
    "s0", "s1", "a0", "a1", "a2", "a3", "a4", "a5",
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

const F: [&str; 32] = [
    "f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7",
    "f8", "f9", "f10", "f11", "f12", "f13", "f14", "f15",
    "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23",
    "f24", "f25", "f26", "f27", "f28", "f29", "f30", "f31",
];

const FABI: [&str; 32] = [
    "ft0", "ft1", "ft2", "ft3", "ft4", "ft5", "ft6", "ft7",
    "fs0", "fs1", "fa0", "fa1", "fa2", "fa3", "fa4", "fa5",
    "fa6", "fa7", "fs2", "fs3", "fs4", "fs5", "fs6", "fs7",
    "fs8", "fs9", "fs10", "fs11", "ft8", "ft9", "ft10", "ft11",
];

/// Accrued floating-point exception flags with their bit position in fcsr.
const FFLAGS: [(&str, u32); 5] = [("nx", 0), ("uf", 1), ("of", 2), ("dz", 3), ("nv", 4)];

/// Floating-point registers hold the raw bits of the widest supported format (D extension).
const FLEN: u32 = 64;

pub(crate) fn describe(builder: &mut CatalogBuilder, xlen: Xlen) {
    let xlen = match xlen {
        Xlen::Rv32 => 32,
        Xlen::Rv64 => 64,
    };

    for (i, (x, abi)) in X.into_iter().zip(ABI).enumerate() {
        // x0 is hardwired to zero
        let register = if i == 0 {
            builder.immutable_root(x, xlen)
        } else {
            builder.root(x, xlen)
        };
        builder.alias(abi, register);

        match abi {
            "sp" => builder.stack_pointer(register),
            "s0" => builder.alias("fp", register),
            _ => (),
        }
    }

    let pc = builder.root("pc", xlen);
    builder.program_counter(pc);

    for (f, abi) in F.into_iter().zip(FABI) {
        let register = builder.root(f, FLEN);
        builder.alias(abi, register);
    }

    let fcsr = builder.root("fcsr", 32);
    builder.field("fflags", fcsr, 4, 0);
    builder.field("frm", fcsr, 7, 5);
    for (flag, bit) in FFLAGS {
        builder.flag(flag, fcsr, bit);
    }
}
