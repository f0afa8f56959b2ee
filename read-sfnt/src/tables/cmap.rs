//! The [cmap (Character to Glyph Index Mapping)][cmap] table
//!
//! Only [Format 4][fmt4] subtables with a Unicode BMP encoding are
//! supported; nothing else is attempted.
//!
//! [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
//! [fmt4]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values

use crate::font_data::FontData;
use crate::glyph_id::GlyphId;
use crate::raw::{I16Be, U16Be};
use crate::read::{FontRead, ReadError};
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"cmap");

/// Platform/encoding pairs that qualify as Unicode BMP mappings.
const WINDOWS_UNICODE_BMP: (u16, u16) = (3, 1);
const UNICODE_BMP: (u16, u16) = (0, 3);

/// The [cmap] table header: a list of encoding records.
///
/// [cmap]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap
#[derive(Clone)]
pub struct Cmap<'a> {
    data: FontData<'a>,
    num_tables: u16,
}

impl<'a> FontRead<'a> for Cmap<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let _version: u16 = data.read_at(0)?;
        let num_tables = data.read_at(2)?;
        Ok(Cmap { data, num_tables })
    }
}

impl<'a> Cmap<'a> {
    /// Returns the first Format 4 subtable with a Unicode BMP encoding.
    ///
    /// Fonts without one cannot be rendered by this stack and fail at
    /// font-open time.
    pub fn unicode_bmp_format4(&self) -> Result<Cmap4<'a>, ReadError> {
        let mut record = 4usize;
        for _ in 0..self.num_tables {
            let platform_id: u16 = self.data.read_at(record)?;
            let encoding_id: u16 = self.data.read_at(record + 2)?;
            let pair = (platform_id, encoding_id);
            if pair == WINDOWS_UNICODE_BMP || pair == UNICODE_BMP {
                let offset: u32 = self.data.read_at(record + 4)?;
                let data = self
                    .data
                    .split_off(offset as usize)
                    .ok_or(ReadError::OutOfBounds)?;
                return Cmap4::read(data);
            }
            record += 8;
        }
        Err(ReadError::MalformedData("no unicode bmp cmap subtable"))
    }
}

/// A [Format 4][fmt4] subtable: segment mapping to delta values.
///
/// [fmt4]: https://docs.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values
#[derive(Clone)]
pub struct Cmap4<'a> {
    seg_count: usize,
    end_code: &'a [U16Be],
    start_code: &'a [U16Be],
    id_delta: &'a [I16Be],
    id_range_offsets: &'a [U16Be],
    glyph_id_array: &'a [U16Be],
}

impl<'a> FontRead<'a> for Cmap4<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let format: u16 = data.read_at(0)?;
        if format != 4 {
            return Err(ReadError::InvalidFormat(format as i64));
        }
        let length: u16 = data.read_at(2)?;
        let seg_count_x2 = data.read_at::<u16>(6)? as usize;
        let seg_count = seg_count_x2 / 2;
        let end_code = data.read_array(14..14 + seg_count_x2)?;
        // one reserved pad word sits between end_code and start_code
        let start = 16 + seg_count_x2;
        let start_code = data.read_array(start..start + seg_count_x2)?;
        let delta_start = start + seg_count_x2;
        let id_delta = data.read_array(delta_start..delta_start + seg_count_x2)?;
        let range_start = delta_start + seg_count_x2;
        let id_range_offsets = data.read_array(range_start..range_start + seg_count_x2)?;
        let array_start = range_start + seg_count_x2;
        let array_end = (length as usize).min(data.len()).max(array_start);
        let glyph_id_array = data.read_array(array_start..array_end & !1)?;
        Ok(Cmap4 {
            seg_count,
            end_code,
            start_code,
            id_delta,
            id_range_offsets,
            glyph_id_array,
        })
    }
}

impl<'a> Cmap4<'a> {
    pub fn seg_count(&self) -> usize {
        self.seg_count
    }

    /// Maps a codepoint to a glyph identifier.
    pub fn map_codepoint(&self, codepoint: u32) -> Option<GlyphId> {
        if codepoint > 0xFFFF {
            return None;
        }
        let codepoint = codepoint as u16;
        let mut lo = 0;
        let mut hi = self.seg_count;
        while lo < hi {
            let i = (lo + hi) / 2;
            if codepoint < self.start_code.get(i)?.get() {
                hi = i;
            } else if codepoint > self.end_code.get(i)?.get() {
                lo = i + 1;
            } else {
                return self.glyph_id_at(codepoint, i);
            }
        }
        None
    }

    /// Resolves the glyph id for `codepoint` within segment `index`.
    ///
    /// When `id_delta` is zero the id comes from `glyph_id_array` via
    /// the range offset; otherwise it is `(codepoint + id_delta) mod
    /// 65536`.
    fn glyph_id_at(&self, codepoint: u16, index: usize) -> Option<GlyphId> {
        let delta = self.id_delta.get(index)?.get();
        if delta != 0 {
            return Some(GlyphId::new(
                (codepoint as i32 + delta as i32) as u16,
            ));
        }
        let start = self.start_code.get(index)?.get();
        let raw = self.id_range_offsets.get(index)?.get() as usize;
        // normalize the stored byte offset into an index into
        // glyph_id_array; a stored zero means the segment starts at the
        // front of the array
        let base = if raw == 0 {
            0
        } else {
            (raw / 2 + index).checked_sub(self.seg_count)?
        };
        let gid = self
            .glyph_id_array
            .get(base + (codepoint - start) as usize)?
            .get();
        Some(GlyphId::new(gid))
    }

    /// Returns an iterator over every (codepoint, glyph id) pair the
    /// subtable declares, in segment order.
    pub fn iter(&self) -> Cmap4Iter<'a, '_> {
        Cmap4Iter {
            subtable: self,
            segment: 0,
            code: self.start_code.first().map(|c| c.get() as u32).unwrap_or(0),
        }
    }
}

/// Iterator over the (codepoint, glyph id) pairs of a Format 4
/// subtable.
pub struct Cmap4Iter<'a, 'b> {
    subtable: &'b Cmap4<'a>,
    segment: usize,
    code: u32,
}

impl Iterator for Cmap4Iter<'_, '_> {
    type Item = (u32, GlyphId);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.segment >= self.subtable.seg_count {
                return None;
            }
            let end = self.subtable.end_code.get(self.segment)?.get() as u32;
            if self.code > end {
                self.segment += 1;
                self.code = self.subtable.start_code.get(self.segment)?.get() as u32;
                continue;
            }
            let code = self.code;
            self.code += 1;
            if let Some(gid) = self.subtable.glyph_id_at(code as u16, self.segment) {
                return Some((code, gid));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sfnt_test_data::cmap4_a_to_z;

    #[test]
    fn delta_zero_reads_glyph_id_array() {
        let bytes = cmap4_a_to_z();
        let subtable = Cmap4::read(FontData::new(&bytes)).unwrap();
        assert_eq!(subtable.map_codepoint('A' as u32), Some(GlyphId::new(1)));
        assert_eq!(subtable.map_codepoint('Z' as u32), Some(GlyphId::new(0)));
        assert_eq!(subtable.map_codepoint('@' as u32), None);
    }

    #[test]
    fn delta_segments_wrap_mod_65536() {
        let bytes = cmap4_a_to_z();
        let subtable = Cmap4::read(FontData::new(&bytes)).unwrap();
        // the space segment maps with a negative delta
        assert_eq!(subtable.map_codepoint(0x20), Some(GlyphId::new(2)));
        // the 0xffff sentinel segment resolves to notdef by wrapping
        assert_eq!(subtable.map_codepoint(0xffff), Some(GlyphId::NOTDEF));
    }

    #[test]
    fn iterates_all_segments() {
        let bytes = cmap4_a_to_z();
        let subtable = Cmap4::read(FontData::new(&bytes)).unwrap();
        let pairs: Vec<_> = subtable.iter().collect();
        // space + 26 letters + sentinel
        assert_eq!(pairs.len(), 28);
        assert_eq!(pairs[0], (0x20, GlyphId::new(2)));
        assert_eq!(pairs[1], ('A' as u32, GlyphId::new(1)));
    }
}
