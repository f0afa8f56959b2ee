//! raw big-endian scalar types

/// An unaligned big-endian unsigned 16-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::AnyBitPattern)]
#[repr(transparent)]
pub struct U16Be([u8; 2]);

/// An unaligned big-endian unsigned 32-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::AnyBitPattern)]
#[repr(transparent)]
pub struct U32Be([u8; 4]);

/// An unaligned big-endian signed 16-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::AnyBitPattern)]
#[repr(transparent)]
pub struct I16Be([u8; 2]);

impl U16Be {
    #[inline]
    pub fn get(self) -> u16 {
        u16::from_be_bytes(self.0)
    }
}

impl U32Be {
    #[inline]
    pub fn get(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl I16Be {
    #[inline]
    pub fn get(self) -> i16 {
        i16::from_be_bytes(self.0)
    }
}

impl std::fmt::Debug for U16Be {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl std::fmt::Debug for U32Be {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl std::fmt::Debug for I16Be {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

/// A type that can be read out of a big-endian byte buffer at some
/// position.
pub trait ReadScalar: Sized {
    /// The number of bytes occupied by this type in the font file.
    const RAW_BYTE_LEN: usize;

    /// Interpret the first `RAW_BYTE_LEN` bytes of `bytes` as `Self`.
    ///
    /// Returns `None` if `bytes` is too short.
    fn read(bytes: &[u8]) -> Option<Self>;
}

macro_rules! int_read_scalar {
    ($ty:ty, $len:literal) => {
        impl ReadScalar for $ty {
            const RAW_BYTE_LEN: usize = $len;

            #[inline]
            fn read(bytes: &[u8]) -> Option<Self> {
                bytes.get(..$len).map(|b| {
                    <$ty>::from_be_bytes(b.try_into().unwrap())
                })
            }
        }
    };
}

int_read_scalar!(u8, 1);
int_read_scalar!(i8, 1);
int_read_scalar!(u16, 2);
int_read_scalar!(i16, 2);
int_read_scalar!(u32, 4);
int_read_scalar!(i32, 4);
int_read_scalar!(i64, 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn be_slices_reinterpret_in_place() {
        let bytes = [0x12u8, 0x34, 0xff, 0xfe];
        let words: &[U16Be] = bytemuck::cast_slice(&bytes);
        assert_eq!(words[0].get(), 0x1234);
        assert_eq!(words[1].get(), 0xfffe);
        let signed: &[I16Be] = bytemuck::cast_slice(&bytes);
        assert_eq!(signed[1].get(), -2);
    }

    #[test]
    fn scalar_reads() {
        let bytes = [0x00u8, 0x01, 0x00, 0x00];
        assert_eq!(u32::read(&bytes), Some(0x00010000));
        assert_eq!(u16::read(&bytes), Some(1));
        assert_eq!(i16::read(&bytes[2..]), Some(0));
        assert_eq!(u32::read(&bytes[1..]), None);
    }
}
