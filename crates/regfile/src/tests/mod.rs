#[cfg(all(feature = "x86", feature = "aarch64", feature = "riscv"))]
mod catalog;
