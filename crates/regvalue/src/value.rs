use std::cmp::Ordering;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

use thiserror;

/// Value conversion result type
pub type Result<T> = std::result::Result<T, Error>;

/// Possible value conversion errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value has more significant bits than the target can hold
    #[error("value {value:#x} does not fit in {bits} bits")]
    Overflow { value: RegisterValue, bits: u32 },

    /// More bytes were provided than a value can hold
    #[error("expected at most {max} bytes, got {actual}")]
    TooManyBytes { max: usize, actual: usize },
}

const LIMBS: usize = 8;

/// Unsigned 512-bit value stored as little-endian 64-bit limbs.
///
/// All arithmetic wraps at 512 bits. Registers narrower than that are expected to mask values
/// with [RegisterValue::mask] or to reject values that do not [fit](RegisterValue::fits).
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct RegisterValue {
    pub(crate) limbs: [u64; LIMBS],
}

impl RegisterValue {
    pub const BITS: u32 = u64::BITS * LIMBS as u32;
    pub const BYTES: usize = (Self::BITS / u8::BITS) as usize;
    pub const ZERO: Self = Self { limbs: [0; LIMBS] };
    pub const MAX: Self = Self {
        limbs: [u64::MAX; LIMBS],
    };

    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// The value `(1 << bits) - 1`. Saturates at [Self::MAX] for `bits >= 512`.
    pub fn mask(bits: u32) -> Self {
        if bits >= Self::BITS {
            return Self::MAX;
        }

        let mut limbs = [0; LIMBS];
        let full = (bits / u64::BITS) as usize;
        let partial = bits % u64::BITS;
        for limb in limbs.iter_mut().take(full) {
            *limb = u64::MAX;
        }

        if partial > 0 {
            limbs[full] = u64::MAX >> (u64::BITS - partial);
        }

        Self { limbs }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&limb| limb == 0)
    }

    /// Number of bits needed to represent this value. Zero needs no bits.
    pub fn significant_bits(&self) -> u32 {
        self.limbs
            .iter()
            .rposition(|&limb| limb != 0)
            .map(|index| index as u32 * u64::BITS + (u64::BITS - self.limbs[index].leading_zeros()))
            .unwrap_or(0)
    }

    /// Whether this value is representable in `bits` bits without truncation.
    pub fn fits(&self, bits: u32) -> bool {
        self.significant_bits() <= bits
    }

    pub fn bit(&self, index: u32) -> bool {
        if index >= Self::BITS {
            return false;
        }

        let limb = self.limbs[(index / u64::BITS) as usize];
        (limb >> (index % u64::BITS)) & 1 == 1
    }

    /// Read the bit-field `[low, high]` (inclusive) shifted down to bit 0.
    pub fn extract(&self, high: u32, low: u32) -> Self {
        assert!(
            low <= high && high < Self::BITS,
            "invalid bit range [{high}..{low}]"
        );
        (*self >> low) & Self::mask(high - low + 1)
    }

    /// Replace the bit-field `[low, high]` (inclusive) with the low bits of `field`. Bits outside
    /// of the range are left untouched.
    pub fn insert(&self, high: u32, low: u32, field: Self) -> Self {
        assert!(
            low <= high && high < Self::BITS,
            "invalid bit range [{high}..{low}]"
        );
        let mask = Self::mask(high - low + 1) << low;
        (*self & !mask) | ((field << low) & mask)
    }

    pub fn wrapping_add(self, rhs: Self) -> Self {
        let mut limbs = [0; LIMBS];
        let mut carry = false;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let (sum, c1) = self.limbs[i].overflowing_add(rhs.limbs[i]);
            let (sum, c2) = sum.overflowing_add(u64::from(carry));
            *limb = sum;
            carry = c1 || c2;
        }

        Self { limbs }
    }

    /// Divide by a single limb, returning the quotient and remainder.
    fn div_rem(&self, divisor: u64) -> (Self, u64) {
        let divisor = u128::from(divisor);
        let mut quotient = [0; LIMBS];
        let mut remainder = 0u128;
        for i in (0..LIMBS).rev() {
            let dividend = (remainder << u64::BITS) | u128::from(self.limbs[i]);
            // Quotient of each step is below 2^64 since remainder < divisor
            quotient[i] = (dividend / divisor) as u64;
            remainder = dividend % divisor;
        }

        (Self { limbs: quotient }, remainder as u64)
    }

    fn hex_digits(&self) -> String {
        match self.limbs.iter().rposition(|&limb| limb != 0) {
            None => "0".to_string(),
            Some(top) => {
                let mut digits = format!("{:x}", self.limbs[top]);
                for limb in self.limbs[..top].iter().rev() {
                    digits.push_str(&format!("{limb:016x}"));
                }
                digits
            }
        }
    }
}

impl Ord for RegisterValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs.iter().rev().cmp(other.limbs.iter().rev())
    }
}

impl PartialOrd for RegisterValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! impl_bitwise_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for RegisterValue {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                let mut limbs = self.limbs;
                for (limb, rhs) in limbs.iter_mut().zip(rhs.limbs) {
                    *limb = *limb $op rhs;
                }
                Self { limbs }
            }
        }
    };
}

impl_bitwise_op!(BitAnd, bitand, &);
impl_bitwise_op!(BitOr, bitor, |);
impl_bitwise_op!(BitXor, bitxor, ^);

impl Not for RegisterValue {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            limbs: self.limbs.map(|limb| !limb),
        }
    }
}

impl Shl<u32> for RegisterValue {
    type Output = Self;

    fn shl(self, shift: u32) -> Self {
        if shift >= Self::BITS {
            return Self::ZERO;
        }

        let limb_shift = (shift / u64::BITS) as usize;
        let bit_shift = shift % u64::BITS;
        let mut limbs = [0; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate().skip(limb_shift) {
            let source = i - limb_shift;
            *limb = self.limbs[source] << bit_shift;
            if bit_shift > 0 && source > 0 {
                *limb |= self.limbs[source - 1] >> (u64::BITS - bit_shift);
            }
        }

        Self { limbs }
    }
}

impl Shr<u32> for RegisterValue {
    type Output = Self;

    fn shr(self, shift: u32) -> Self {
        if shift >= Self::BITS {
            return Self::ZERO;
        }

        let limb_shift = (shift / u64::BITS) as usize;
        let bit_shift = shift % u64::BITS;
        let mut limbs = [0; LIMBS];
        for (i, limb) in limbs.iter_mut().enumerate().take(LIMBS - limb_shift) {
            let source = i + limb_shift;
            *limb = self.limbs[source] >> bit_shift;
            if bit_shift > 0 && source + 1 < LIMBS {
                *limb |= self.limbs[source + 1] << (u64::BITS - bit_shift);
            }
        }

        Self { limbs }
    }
}

impl fmt::Display for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Largest power of ten that fits in a limb
        const CHUNK: u64 = 10_000_000_000_000_000_000;

        let mut chunks = Vec::new();
        let mut rest = *self;
        while !rest.is_zero() {
            let (quotient, remainder) = rest.div_rem(CHUNK);
            chunks.push(remainder);
            rest = quotient;
        }

        let mut digits = chunks
            .pop()
            .map(|chunk| chunk.to_string())
            .unwrap_or_else(|| "0".to_string());
        for chunk in chunks.iter().rev() {
            digits.push_str(&format!("{chunk:019}"));
        }

        f.pad_integral(true, "", &digits)
    }
}

impl fmt::LowerHex for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits())
    }
}

impl fmt::UpperHex for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(true, "0x", &self.hex_digits().to_uppercase())
    }
}

impl fmt::Debug for RegisterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegisterValue({self:#x})")
    }
}
