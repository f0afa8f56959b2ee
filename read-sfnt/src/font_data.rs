//! raw font bytes

use std::ops::{Bound, Range, RangeBounds};

use crate::raw::ReadScalar;
use crate::read::ReadError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice that provides convenience
/// methods for parsing that data. All reads are bounds checked; a read
/// past the end of the buffer is a [`ReadError`], never a panic.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The remaining data starting at `pos`, or `None` if `pos` is out
    /// of bounds.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(|bytes| FontData { bytes })
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    /// Read a scalar at the provided location in the data.
    pub fn read_at<T: ReadScalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Interpret the bytes at the provided range as a slice of raw
    /// big-endian values.
    ///
    /// Fails if the range is out of bounds or its length is not a
    /// multiple of `size_of::<T>()`.
    pub fn read_array<T: bytemuck::AnyBitPattern>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::MalformedData("misaligned array"))
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// A cursor positioned at `pos`, for sequential decoding.
    pub fn cursor(&self, pos: usize) -> Cursor<'a> {
        Cursor {
            data: *self,
            pos,
        }
    }

    fn check_bound(&self, bound: Bound<&usize>) -> bool {
        match bound {
            Bound::Unbounded => true,
            Bound::Included(i) => *i <= self.bytes.len(),
            Bound::Excluded(i) => *i <= self.bytes.len(),
        }
    }

    /// `true` if `range` lies entirely within the data.
    pub fn in_bounds(&self, range: impl RangeBounds<usize>) -> bool {
        self.check_bound(range.start_bound()) && self.check_bound(range.end_bound())
    }
}

/// A cursor over font data, for decoding variable-length streams such
/// as glyph flag and coordinate arrays.
#[derive(Clone)]
pub struct Cursor<'a> {
    data: FontData<'a>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Read a scalar at the current position and advance past it.
    pub fn read<T: ReadScalar>(&mut self) -> Result<T, ReadError> {
        let value = self.data.read_at::<T>(self.pos)?;
        self.pos += T::RAW_BYTE_LEN;
        Ok(value)
    }

    /// Advance the position by `n` bytes.
    ///
    /// The position is allowed to move past the end of the data; the
    /// next read will report `OutOfBounds`.
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    /// The current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_checked_reads() {
        let data = FontData::new(&[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(data.read_at::<u16>(0), Ok(0xdead));
        assert_eq!(data.read_at::<u16>(2), Ok(0xbeef));
        assert_eq!(data.read_at::<u32>(1), Err(ReadError::OutOfBounds));
        assert!(data.slice(2..8).is_none());
    }

    #[test]
    fn cursor_advances() {
        let data = FontData::new(&[0, 1, 0, 2, 0xff]);
        let mut cursor = data.cursor(0);
        assert_eq!(cursor.read::<u16>(), Ok(1));
        assert_eq!(cursor.read::<u16>(), Ok(2));
        assert_eq!(cursor.read::<u8>(), Ok(0xff));
        assert_eq!(cursor.read::<u8>(), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn read_array_rejects_ragged_ranges() {
        use crate::raw::U16Be;
        let data = FontData::new(&[0, 1, 0, 2, 0]);
        let array = data.read_array::<U16Be>(0..4).unwrap();
        assert_eq!(array[1].get(), 2);
        assert!(data.read_array::<U16Be>(0..5).is_err());
    }
}
