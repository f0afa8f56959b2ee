//! The [hmtx (Horizontal Metrics)][hmtx] table
//!
//! [hmtx]: https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx

use crate::font_data::FontData;
use crate::glyph_id::GlyphId;
use crate::raw::{I16Be, U16Be};
use crate::read::ReadError;
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"hmtx");

/// An advance width and left side bearing pair.
#[derive(Clone, Copy, Debug, bytemuck::AnyBitPattern)]
#[repr(C)]
pub struct LongMetric {
    advance_width: U16Be,
    left_side_bearing: I16Be,
}

impl LongMetric {
    pub fn advance_width(&self) -> u16 {
        self.advance_width.get()
    }

    pub fn left_side_bearing(&self) -> i16 {
        self.left_side_bearing.get()
    }
}

/// The [hmtx] table.
///
/// [hmtx]: https://docs.microsoft.com/en-us/typography/opentype/spec/hmtx
#[derive(Clone)]
pub struct Hmtx<'a> {
    metrics: &'a [LongMetric],
}

impl<'a> Hmtx<'a> {
    /// Reads the long metric array.
    ///
    /// `number_of_h_metrics` comes from the `hhea` table. Glyphs past
    /// the end of the array share the last entry's advance, per spec.
    pub fn read(data: FontData<'a>, number_of_h_metrics: u16) -> Result<Self, ReadError> {
        let len = number_of_h_metrics as usize * std::mem::size_of::<LongMetric>();
        let metrics = data.read_array(0..len)?;
        Ok(Hmtx { metrics })
    }

    pub fn metrics(&self) -> &'a [LongMetric] {
        self.metrics
    }

    /// The advance width of a glyph, in font units.
    pub fn advance(&self, glyph_id: GlyphId) -> u16 {
        let index = (glyph_id.to_u16() as usize).min(self.metrics.len().saturating_sub(1));
        self.metrics
            .get(index)
            .map(LongMetric::advance_width)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_glyphs_share_last_advance() {
        // two long metrics: (500, 10) and (600, -4)
        let bytes = [0x01u8, 0xf4, 0x00, 0x0a, 0x02, 0x58, 0xff, 0xfc];
        let hmtx = Hmtx::read(FontData::new(&bytes), 2).unwrap();
        assert_eq!(hmtx.advance(GlyphId::new(0)), 500);
        assert_eq!(hmtx.advance(GlyphId::new(1)), 600);
        assert_eq!(hmtx.advance(GlyphId::new(40)), 600);
        assert_eq!(hmtx.metrics()[1].left_side_bearing(), -4);
    }
}
