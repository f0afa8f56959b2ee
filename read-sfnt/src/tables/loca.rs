//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use crate::font_data::FontData;
use crate::glyph_id::GlyphId;
use crate::raw::{U16Be, U32Be};
use crate::read::ReadError;
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"loca");

/// The [loca] table.
///
/// [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca
#[derive(Clone)]
pub enum Loca<'a> {
    Short(&'a [U16Be]),
    Long(&'a [U32Be]),
}

impl<'a> Loca<'a> {
    /// Reads the offset array.
    ///
    /// `is_long` is `index_to_loc_format == 1` from the `head` table.
    pub fn read(data: FontData<'a>, is_long: bool) -> Result<Self, ReadError> {
        if is_long {
            data.read_array(0..data.len()).map(Loca::Long)
        } else {
            data.read_array(0..data.len()).map(Loca::Short)
        }
    }

    /// The number of glyphs covered (one less than the offset count,
    /// because of the trailing sentinel).
    pub fn len(&self) -> usize {
        match self {
            Loca::Short(data) => data.len().saturating_sub(1),
            Loca::Long(data) => data.len().saturating_sub(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The raw byte offset at `idx`, relative to the start of `glyf`.
    pub fn get_raw(&self, idx: usize) -> Option<u32> {
        match self {
            Loca::Short(data) => data.get(idx).map(|x| x.get() as u32 * 2),
            Loca::Long(data) => data.get(idx).map(|x| x.get()),
        }
    }

    /// The offset of a glyph's outline data, or `None` for a glyph with
    /// no outline.
    ///
    /// Empty glyphs are encoded as a pair of equal offsets; those, and
    /// any non-monotonic pair, normalize to `None` so callers never
    /// dereference them.
    pub fn outline_offset(&self, glyph_id: GlyphId) -> Option<u32> {
        let idx = glyph_id.to_u16() as usize;
        let start = self.get_raw(idx)?;
        let end = self.get_raw(idx + 1)?;
        (start < end).then_some(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_glyphs_normalize_to_none() {
        // short offsets (stored halved): 0, 10, 10, 24
        let bytes = [0x00u8, 0x00, 0x00, 0x05, 0x00, 0x05, 0x00, 0x0c];
        let loca = Loca::read(FontData::new(&bytes), false).unwrap();
        assert_eq!(loca.len(), 3);
        assert_eq!(loca.outline_offset(GlyphId::new(0)), Some(0));
        assert_eq!(loca.outline_offset(GlyphId::new(1)), None);
        assert_eq!(loca.outline_offset(GlyphId::new(2)), Some(10));
        assert_eq!(loca.outline_offset(GlyphId::new(3)), None);
    }

    #[test]
    fn long_offsets_are_not_scaled() {
        let bytes = [
            0x00u8, 0x00, 0x00, 0x00, // 0
            0x00, 0x00, 0x00, 0x30, // 48
        ];
        let loca = Loca::read(FontData::new(&bytes), true).unwrap();
        assert_eq!(loca.outline_offset(GlyphId::new(0)), Some(0));
    }
}
