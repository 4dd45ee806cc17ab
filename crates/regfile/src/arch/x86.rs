use crate::catalog::CatalogBuilder;

/// Operating mode selecting the x86 register set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// 32-bit registers (x86)
    Protected,
    /// 64-bit registers (x86-64)
    Long,
}

/// Legacy general-purpose registers as (64-bit, 32-bit, 16-bit, high byte, low byte). The low
/// bytes of the index and pointer registers only exist in long mode.
const LEGACY_GPRS: [(&str, &str, &str, Option<&str>, &str); 8] = [
    ("rax", "eax", "ax", Some("ah"), "al"),
    ("rbx", "ebx", "bx", Some("bh"), "bl"),
    ("rcx", "ecx", "cx", Some("ch"), "cl"),
    ("rdx", "edx", "dx", Some("dh"), "dl"),
    ("rdi", "edi", "di", None, "dil"),
    ("rsi", "esi", "si", None, "sil"),
    ("rbp", "ebp", "bp", None, "bpl"),
    ("rsp", "esp", "sp", None, "spl"),
];

/// Long mode general-purpose registers as (64-bit, 32-bit, 16-bit, 8-bit).
const EXTENDED_GPRS: [(&str, &str, &str, &str); 8] = [
    ("r8", "r8d", "r8w", "r8b"),
    ("r9", "r9d", "r9w", "r9b"),
    ("r10", "r10d", "r10w", "r10b"),
    ("r11", "r11d", "r11w", "r11b"),
    ("r12", "r12d", "r12w", "r12b"),
    ("r13", "r13d", "r13w", "r13b"),
    ("r14", "r14d", "r14w", "r14b"),
    ("r15", "r15d", "r15w", "r15b"),
];

/// Status and control flags with their bit position in eflags.
const FLAGS: [(&str, u32); 16] = [
    ("cf", 0),
    ("pf", 2),
    ("af", 4),
    ("zf", 6),
    ("sf", 7),
    ("tf", 8),
    ("if", 9),
    ("df", 10),
    ("of", 11),
    ("nt", 14),
    ("rf", 16),
    ("vm", 17),
    ("ac", 18),
    ("vif", 19),
    ("vip", 20),
    ("id", 21),
];

const SEGMENTS: [&str; 6] = ["cs", "ds", "es", "fs", "gs", "ss"];

const CONTROL: [&str; 4] = ["cr0", "cr2", "cr3", "cr4"];

const DEBUG: [&str; 6] = ["dr0", "dr1", "dr2", "dr3", "dr6", "dr7"];

/// Number of vector registers addressable in protected mode.
const PROTECTED_VECTORS: usize = 8;

const ST: [&str; 8] = [
    "st0", "st1", "st2", "st3", "st4", "st5", "st6", "st7",
];

const MM: [&str; 8] = [
    "mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7",
];

const ZMM: [&str; 32] = [
    "zmm0", "zmm1", "zmm2", "zmm3", "zmm4", "zmm5", "zmm6", "zmm7",
    "zmm8", "zmm9", "zmm10", "zmm11", "zmm12", "zmm13", "zmm14", "zmm15",
    "zmm16", "zmm17", "zmm18", "zmm19", "zmm20", "zmm21", "zmm22", "zmm23",
    "zmm24", "zmm25", "zmm26", "zmm27", "zmm28", "zmm29", "zmm30", "zmm31",
];

const YMM: [&str; 32] = [
    "ymm0", "ymm1", "ymm2", "ymm3", "ymm4", "ymm5", "ymm6", "ymm7",
    "ymm8", "ymm9", "ymm10", "ymm11", "ymm12", "ymm13", "ymm14", "ymm15",
    "ymm16", "ymm17", "ymm18", "ymm19", "ymm20", "ymm21", "ymm22", "ymm23",
    "ymm24", "ymm25", "ymm26", "ymm27", "ymm28", "ymm29", "ymm30", "ymm31",
];

const XMM: [&str; 32] = [
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7",
    "xmm8", "xmm9", "xmm10", "xmm11", "xmm12", "xmm13", "xmm14", "xmm15",
    "xmm16", "xmm17", "xmm18", "xmm19", "xmm20", "xmm21", "xmm22", "xmm23",
    "xmm24", "xmm25", "xmm26", "xmm27", "xmm28", "xmm29", "xmm30", "xmm31",
];

pub(crate) fn describe(builder: &mut CatalogBuilder, mode: Mode) {
    let gpr_bits = match mode {
        Mode::Protected => 32,
        Mode::Long => 64,
    };

    for (qword, dword, word, high, low) in LEGACY_GPRS {
        let root = match mode {
            Mode::Protected => builder.root(dword, 32),
            Mode::Long => {
                let root = builder.root(qword, 64);
                builder.field(dword, root, 31, 0);
                root
            }
        };

        builder.field(word, root, 15, 0);
        if let Some(high) = high {
            builder.field(high, root, 15, 8);
            builder.field(low, root, 7, 0);
        } else if mode == Mode::Long {
            builder.field(low, root, 7, 0);
        }

        if word == "sp" {
            builder.stack_pointer(root);
        }
    }

    if mode == Mode::Long {
        for (qword, dword, word, byte) in EXTENDED_GPRS {
            let root = builder.root(qword, 64);
            builder.field(dword, root, 31, 0);
            builder.field(word, root, 15, 0);
            builder.field(byte, root, 7, 0);
        }
    }

    let ip = match mode {
        Mode::Protected => builder.root("eip", 32),
        Mode::Long => {
            let rip = builder.root("rip", 64);
            builder.field("eip", rip, 31, 0);
            rip
        }
    };
    builder.field("ip", ip, 15, 0);
    builder.program_counter(ip);

    let flags = match mode {
        Mode::Protected => builder.root("eflags", 32),
        Mode::Long => {
            let rflags = builder.root("rflags", 64);
            builder.field("eflags", rflags, 31, 0);
            rflags
        }
    };
    for (flag, bit) in FLAGS {
        builder.flag(flag, flags, bit);
    }

    for segment in SEGMENTS {
        builder.root(segment, 16);
    }

    for register in CONTROL {
        builder.root(register, gpr_bits);
    }
    if mode == Mode::Long {
        builder.root("cr8", 64);
    }

    for register in DEBUG {
        builder.root(register, gpr_bits);
    }

    // MMX registers alias the significand of the x87 stack registers
    for (st, mm) in ST.into_iter().zip(MM) {
        let root = builder.root(st, 80);
        builder.field(mm, root, 63, 0);
    }
    builder.root("fcw", 16);
    builder.root("fsw", 16);
    builder.root("mxcsr", 32);

    match mode {
        Mode::Protected => {
            for (ymm, xmm) in YMM.into_iter().zip(XMM).take(PROTECTED_VECTORS) {
                let root = builder.root(ymm, 256);
                builder.field(xmm, root, 127, 0);
            }
        }
        Mode::Long => {
            for ((zmm, ymm), xmm) in ZMM.into_iter().zip(YMM).zip(XMM) {
                let root = builder.root(zmm, 512);
                builder.field(ymm, root, 255, 0);
                builder.field(xmm, root, 127, 0);
            }
        }
    }
}
