//! The [head (Font Header)][head] table
//!
//! [head]: https://docs.microsoft.com/en-us/typography/opentype/spec/head

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"head");

/// The [head] table.
///
/// [head]: https://docs.microsoft.com/en-us/typography/opentype/spec/head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    pub version: u32,
    pub font_revision: u32,
    pub checksum_adjustment: u32,
    pub magic_number: u32,
    pub flags: u16,
    pub units_per_em: u16,
    /// Seconds since 1904-01-01, per LONGDATETIME.
    pub created: i64,
    pub modified: i64,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub lowest_rec_ppem: u16,
    pub font_direction_hint: i16,
    pub index_to_loc_format: i16,
    pub glyph_data_format: i16,
}

impl FontRead<'_> for Head {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Head {
            version: data.read_at(0)?,
            font_revision: data.read_at(4)?,
            checksum_adjustment: data.read_at(8)?,
            magic_number: data.read_at(12)?,
            flags: data.read_at(16)?,
            units_per_em: data.read_at(18)?,
            created: data.read_at(20)?,
            modified: data.read_at(28)?,
            x_min: data.read_at(36)?,
            y_min: data.read_at(38)?,
            x_max: data.read_at(40)?,
            y_max: data.read_at(42)?,
            mac_style: data.read_at(44)?,
            lowest_rec_ppem: data.read_at(46)?,
            font_direction_hint: data.read_at(48)?,
            index_to_loc_format: data.read_at(50)?,
            glyph_data_format: data.read_at(52)?,
        })
    }
}

impl Head {
    /// `true` if the `loca` table uses 32-bit offsets.
    pub fn has_long_loca(&self) -> bool {
        self.index_to_loc_format == 1
    }
}
