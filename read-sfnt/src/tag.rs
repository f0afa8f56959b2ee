use std::fmt::{Debug, Display, Formatter};

use crate::raw::ReadScalar;

/// An OpenType tag: a 4-byte array of printable ASCII.
///
/// We do not enforce the printable-ASCII constraint, since malformed
/// fonts can contain arbitrary bytes here and those still need to be
/// representable (if only so we can report them in errors).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Create a tag from raw big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Tag(bytes)
    }

    /// The tag as raw big-endian bytes.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The tag as a big-endian `u32`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl ReadScalar for Tag {
    const RAW_BYTE_LEN: usize = 4;

    fn read(bytes: &[u8]) -> Option<Self> {
        bytes.get(..4).map(|b| Tag(b.try_into().unwrap()))
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&[u8; 4]> for Tag {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        &self.0 == *other
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        for byte in self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u32() {
        let tag = Tag::new(b"glyf");
        assert_eq!(Tag::from_be_bytes(tag.to_u32().to_be_bytes()), tag);
        assert_eq!(tag.to_string(), "glyf");
    }

    #[test]
    fn non_printable_bytes_are_escaped() {
        let tag = Tag::from_be_bytes([b'a', 0, b'c', b'd']);
        assert_eq!(tag.to_string(), "a\\x00cd");
    }
}
