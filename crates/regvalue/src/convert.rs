use crate::value::{Error, RegisterValue, Result};

impl RegisterValue {
    /// Create a value from its little-endian byte representation. Fewer than
    /// [RegisterValue::BYTES] bytes are zero-extended.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > Self::BYTES {
            return Err(Error::TooManyBytes {
                max: Self::BYTES,
                actual: bytes.len(),
            });
        }

        let mut value = Self::ZERO;
        for (i, &byte) in bytes.iter().enumerate() {
            value.limbs[i / 8] |= u64::from(byte) << (8 * (i % 8));
        }

        Ok(value)
    }

    /// Little-endian byte representation of the full 512-bit value.
    pub fn to_le_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0; Self::BYTES];
        for (chunk, limb) in bytes.chunks_exact_mut(8).zip(self.limbs) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }

        bytes
    }
}

impl TryFrom<&[u8]> for RegisterValue {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_le_bytes(bytes)
    }
}

impl From<u128> for RegisterValue {
    fn from(value: u128) -> Self {
        let mut result = Self::ZERO;
        result.limbs[0] = value as u64;
        result.limbs[1] = (value >> u64::BITS) as u64;
        result
    }
}

impl TryFrom<RegisterValue> for u128 {
    type Error = Error;

    fn try_from(value: RegisterValue) -> Result<Self> {
        if value.fits(u128::BITS) {
            Ok(u128::from(value.limbs[0]) | (u128::from(value.limbs[1]) << u64::BITS))
        } else {
            Err(Error::Overflow {
                value,
                bits: u128::BITS,
            })
        }
    }
}

impl From<bool> for RegisterValue {
    fn from(value: bool) -> Self {
        u64::from(value).into()
    }
}

impl TryFrom<RegisterValue> for bool {
    type Error = Error;

    fn try_from(value: RegisterValue) -> Result<Self> {
        if value.fits(1) {
            Ok(value.bit(0))
        } else {
            Err(Error::Overflow { value, bits: 1 })
        }
    }
}

macro_rules! impl_from_value {
    ($type:ty) => {
        impl From<$type> for RegisterValue {
            fn from(value: $type) -> Self {
                let mut result = Self::ZERO;
                result.limbs[0] = value.into();
                result
            }
        }

        impl TryFrom<RegisterValue> for $type {
            type Error = Error;

            fn try_from(value: RegisterValue) -> Result<Self> {
                if value.fits(<$type>::BITS) {
                    // Lossless since the value fits
                    Ok(value.limbs[0] as $type)
                } else {
                    Err(Error::Overflow {
                        value,
                        bits: <$type>::BITS,
                    })
                }
            }
        }
    };
}

impl_from_value!(u64);
impl_from_value!(u32);
impl_from_value!(u16);
impl_from_value!(u8);
