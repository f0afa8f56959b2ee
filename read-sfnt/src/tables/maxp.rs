//! The [maxp (Maximum Profile)][maxp] table
//!
//! [maxp]: https://docs.microsoft.com/en-us/typography/opentype/spec/maxp

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"maxp");

/// The [maxp] table.
///
/// Only the fields common to version 0.5 and 1.0 are exposed; the
/// rasterizer has no use for the rest.
///
/// [maxp]: https://docs.microsoft.com/en-us/typography/opentype/spec/maxp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Maxp {
    pub version: u32,
    pub num_glyphs: u16,
}

impl FontRead<'_> for Maxp {
    fn read(data: FontData) -> Result<Self, ReadError> {
        Ok(Maxp {
            version: data.read_at(0)?,
            num_glyphs: data.read_at(4)?,
        })
    }
}
