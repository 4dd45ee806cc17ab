//! Unsigned integer values wide enough to hold the largest architectural register.
//!
//! Registers range from single-bit flags up to 512-bit vector registers. A [RegisterValue] holds
//! any of them and offers the bit-field operations needed to treat a narrower register as a view
//! over a wider one.

mod convert;

mod value;

pub use value::*;
