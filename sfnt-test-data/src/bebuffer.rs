//! A builder for big-endian binary test data.

/// A simple big-endian buffer of bytes, for building binary test data.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write any scalar into the buffer in big-endian order.
    pub fn push(mut self, item: impl BeData) -> Self {
        item.write_be(&mut self.data);
        self
    }

    /// Write multiple scalars into the buffer.
    pub fn extend<T: BeData>(mut self, items: impl IntoIterator<Item = T>) -> Self {
        for item in items {
            item.write_be(&mut self.data);
        }
        self
    }

    /// Pad the buffer with zeros to a multiple of `alignment`.
    pub fn align(mut self, alignment: usize) -> Self {
        while self.data.len() % alignment != 0 {
            self.data.push(0);
        }
        self
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for BeBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// A scalar that knows its big-endian encoding.
pub trait BeData {
    fn write_be(&self, buffer: &mut Vec<u8>);
}

macro_rules! be_data_int {
    ($($ty:ty),*) => {
        $(
            impl BeData for $ty {
                fn write_be(&self, buffer: &mut Vec<u8>) {
                    buffer.extend_from_slice(&self.to_be_bytes());
                }
            }
        )*
    };
}

be_data_int!(u8, i8, u16, i16, u32, i32, u64, i64);

impl BeData for [u8; 4] {
    fn write_be(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self);
    }
}

impl BeData for &[u8] {
    fn write_be(&self, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_scalars() {
        let buf = BeBuffer::new()
            .push(1u16)
            .push(-2i16)
            .push(*b"glyf")
            .extend([1u8, 2, 3])
            .align(4);
        assert_eq!(
            buf.as_ref(),
            &[0, 1, 0xff, 0xfe, b'g', b'l', b'y', b'f', 1, 2, 3, 0]
        );
    }
}
