//! The [hhea (Horizontal Header)][hhea] table
//!
//! [hhea]: https://docs.microsoft.com/en-us/typography/opentype/spec/hhea

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"hhea");

/// The [hhea] table.
///
/// [hhea]: https://docs.microsoft.com/en-us/typography/opentype/spec/hhea
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hhea {
    pub version: u32,
    /// Typographic ascent.
    pub ascender: i16,
    /// Typographic descent.
    pub descender: i16,
    /// Typographic line gap.
    pub line_gap: i16,
    /// Maximum advance width value in the `hmtx` table.
    pub advance_width_max: u16,
    /// Minimum left side bearing value in the `hmtx` table.
    pub min_left_side_bearing: i16,
    /// Minimum right side bearing value.
    pub min_right_side_bearing: i16,
    /// `max(lsb + (x_max - x_min))`.
    pub x_max_extent: i16,
    /// Number of long metric entries in the `hmtx` table.
    pub number_of_h_metrics: u16,
}

impl FontRead<'_> for Hhea {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Hhea {
            version: data.read_at(0)?,
            ascender: data.read_at(4)?,
            descender: data.read_at(6)?,
            line_gap: data.read_at(8)?,
            advance_width_max: data.read_at(10)?,
            min_left_side_bearing: data.read_at(12)?,
            min_right_side_bearing: data.read_at(14)?,
            x_max_extent: data.read_at(16)?,
            number_of_h_metrics: data.read_at(34)?,
        })
    }
}
