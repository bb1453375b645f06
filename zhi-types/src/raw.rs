//! decoding and encoding of raw big-endian bytes

/// A fixed-width value stored big-endian in font data.
///
/// Every field the reader pulls out of a font goes through this trait, so
/// byte order is handled in exactly one place.
pub trait Scalar: Sized + Copy {
    /// The raw byte representation of this type.
    type Raw: Copy + Default + AsRef<[u8]> + AsMut<[u8]>;

    /// The number of bytes this type occupies in font data.
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self::Raw>();

    /// Create an instance of this type from raw big-endian bytes
    fn from_raw(raw: Self::Raw) -> Self;

    /// Encode this type as raw big-endian bytes
    fn to_raw(self) -> Self::Raw;

    /// Decode from a slice, which must be exactly `RAW_BYTE_LEN` bytes long.
    fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::RAW_BYTE_LEN {
            return None;
        }
        let mut raw = Self::Raw::default();
        raw.as_mut().copy_from_slice(bytes);
        Some(Self::from_raw(raw))
    }
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl Scalar for $ty {
            type Raw = $raw;

            fn from_raw(raw: $raw) -> $ty {
                <$ty>::from_be_bytes(raw)
            }

            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(u64, [u8; 8]);

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn big_endian_order() {
        assert_eq!(u16::read(&[0x12, 0x34]), Some(0x1234));
        assert_eq!(i16::read(&[0xFF, 0xFE]), Some(-2));
        assert_eq!(u32::read(&[0, 1, 0, 0]), Some(0x10000));
        assert_eq!(0x0102_u16.to_raw(), [1, 2]);
    }

    #[test]
    fn wrong_length() {
        assert_eq!(u16::read(&[1]), None);
        assert_eq!(u32::read(&[1, 2, 3, 4, 5]), None);
        assert_eq!(u8::RAW_BYTE_LEN, 1);
        assert_eq!(u64::RAW_BYTE_LEN, 8);
    }
}
