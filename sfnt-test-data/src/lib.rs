//! Shared binary test data for font parsing and rasterization.
//!
//! Everything here is synthesized at runtime from annotated builders so
//! the byte layout stays legible next to the parsers it exercises. The
//! crate is a dev-dependency only; nothing in it ships.

#![forbid(unsafe_code)]

mod bebuffer;

pub use bebuffer::{BeBuffer, BeData};

/// Glyph ids used by [`test_font`] and friends.
pub mod gids {
    pub const NOTDEF: u16 = 0;
    /// Mapped from 'A'; a 600x700 square.
    pub const SQUARE: u16 = 1;
    /// Mapped from ' '; no outline.
    pub const SPACE: u16 = 2;
    /// A 200x200 square, the base of the composite colon.
    pub const DOT: u16 = 3;
    /// Mapped from ':'; two translated copies of [`DOT`].
    pub const COLON: u16 = 4;
    /// The `vert` substitute for [`COLON`].
    pub const VERTICAL_COLON: u16 = 5;
}

/// Character advances in [`test_font`], in font units, indexed by glyph
/// id.
pub const TEST_ADVANCES: [u16; 6] = [500, 800, 300, 250, 300, 300];

/// A standalone cmap Format 4 subtable.
///
/// Three segments: a space mapped by delta, A-Z resolved through
/// `glyph_id_array` (only 'A' maps to a real glyph), and the 0xffff
/// sentinel whose delta of 1 wraps to notdef.
pub fn cmap4_a_to_z() -> Vec<u8> {
    let mut glyph_id_array = [0u16; 26];
    glyph_id_array[0] = 1; // 'A'
    BeBuffer::new()
        .push(4u16) // format
        .push(92u16) // length
        .push(0u16) // language
        .push(6u16) // segCountX2
        .push(4u16) // searchRange
        .push(1u16) // entrySelector
        .push(2u16) // rangeShift
        .extend([0x20u16, 0x5a, 0xffff]) // endCode
        .push(0u16) // reservedPad
        .extend([0x20u16, 0x41, 0xffff]) // startCode
        .extend([2i16 - 0x20, 0, 1]) // idDelta
        .extend([0u16, 4, 0]) // idRangeOffsets
        .extend(glyph_id_array)
        .to_vec()
}

/// A simple glyph: one counter-clockwise square contour, all points on
/// curve, all coordinates stored as 16-bit deltas.
pub fn simple_square_glyph() -> Vec<u8> {
    BeBuffer::new()
        .push(1i16) // numberOfContours
        .extend([100i16, 0, 700, 700]) // xMin, yMin, xMax, yMax
        .push(3u16) // endPtsOfContours
        .push(0u16) // instructionLength
        .extend([1u8, 1, 1, 1]) // flags: on curve, long vectors
        .extend([100i16, 0, 600, 0]) // x deltas
        .extend([0i16, 700, 0, -700]) // y deltas
        .to_vec()
}

/// A 200x200 on-curve square, used as a composite component.
pub fn simple_dot_glyph() -> Vec<u8> {
    BeBuffer::new()
        .push(1i16)
        .extend([0i16, 0, 200, 200])
        .push(3u16)
        .push(0u16)
        .extend([1u8, 1, 1, 1])
        .extend([0i16, 0, 200, 0])
        .extend([0i16, 200, 0, -200])
        .to_vec()
}

/// A composite glyph: two copies of [`simple_dot_glyph`]'s id, the
/// second shifted up by 500 units.
pub fn composite_colon_glyph() -> Vec<u8> {
    composite_colon_of(gids::DOT)
}

fn composite_colon_of(component: u16) -> Vec<u8> {
    const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
    const MORE_COMPONENTS: u16 = 0x0020;
    BeBuffer::new()
        .push(-1i16) // numberOfContours
        .extend([0i16, 0, 200, 700]) // bounding box
        .push(ARG_1_AND_2_ARE_WORDS | MORE_COMPONENTS)
        .push(component)
        .extend([0i16, 0])
        .push(ARG_1_AND_2_ARE_WORDS)
        .push(component)
        .extend([0i16, 500])
        .to_vec()
}

/// A standalone GSUB table: one `vert` feature under `DFLT`, reached
/// through one Type 1 Format 2 lookup substituting 4 -> 10 and 5 -> 11.
pub fn gsub_vert_single_subst() -> Vec<u8> {
    gsub_single_subst(*b"vert", &[(4, 10), (5, 11)])
}

/// Builds a GSUB table with a single feature whose one lookup holds the
/// given substitution pairs in a Format 2 subtable.
pub fn gsub_single_subst(feature: [u8; 4], pairs: &[(u16, u16)]) -> Vec<u8> {
    let script_list = BeBuffer::new()
        .push(1u16) // scriptCount
        .push(*b"DFLT")
        .push(8u16) // script table offset
        // script table
        .push(4u16) // defaultLangSysOffset
        .push(0u16) // langSysCount
        // default lang sys
        .push(0u16) // lookupOrderOffset
        .push(0xffffu16) // requiredFeatureIndex
        .push(1u16) // featureIndexCount
        .push(0u16); // featureIndices[0]
    let feature_list = BeBuffer::new()
        .push(1u16) // featureCount
        .push(feature)
        .push(8u16) // feature table offset
        // feature table
        .push(0u16) // featureParamsOffset
        .push(1u16) // lookupIndexCount
        .push(0u16); // lookupListIndices[0]
    let coverage_offset = 6 + pairs.len() as u16 * 2;
    let lookup_list = BeBuffer::new()
        .push(1u16) // lookupCount
        .push(4u16) // lookup table offset
        // lookup table
        .push(1u16) // lookupType: single substitution
        .push(0u16) // lookupFlag
        .push(1u16) // subTableCount
        .push(8u16) // subtable offset
        // SingleSubstFormat2
        .push(2u16)
        .push(coverage_offset)
        .push(pairs.len() as u16)
        .extend(pairs.iter().map(|(_, substitute)| *substitute))
        // CoverageFormat1
        .push(1u16)
        .push(pairs.len() as u16)
        .extend(pairs.iter().map(|(target, _)| *target));

    let script_list_offset = 10u16;
    let feature_list_offset = script_list_offset + script_list.len() as u16;
    let lookup_list_offset = feature_list_offset + feature_list.len() as u16;
    BeBuffer::new()
        .push(0x00010000u32) // version
        .push(script_list_offset)
        .push(feature_list_offset)
        .push(lookup_list_offset)
        .push(script_list.as_ref())
        .push(feature_list.as_ref())
        .push(lookup_list.as_ref())
        .to_vec()
}

/// A builder for assembling complete sfnt files from raw table data.
#[derive(Debug, Default)]
pub struct FontBuilder {
    tables: Vec<([u8; 4], Vec<u8>)>,
}

impl FontBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_table(mut self, tag: [u8; 4], data: Vec<u8>) -> Self {
        self.tables.push((tag, data));
        self
    }

    /// Serializes the font: sfnt header, directory sorted by tag, and
    /// table data aligned to 4 bytes.
    pub fn build(mut self) -> Vec<u8> {
        self.tables.sort_by_key(|(tag, _)| *tag);
        let num_tables = self.tables.len() as u16;
        let entry_selector = num_tables.checked_ilog2().unwrap_or(0) as u16;
        let search_range = 16 * (1 << entry_selector);
        let mut header = BeBuffer::new()
            .push(0x00010000u32)
            .push(num_tables)
            .push(search_range)
            .push(entry_selector)
            .push(num_tables * 16 - search_range);
        let mut data_offset = 12 + self.tables.len() as u32 * 16;
        let mut body = BeBuffer::new();
        for (tag, data) in &self.tables {
            header = header
                .push(*tag)
                .push(table_checksum(data))
                .push(data_offset)
                .push(data.len() as u32);
            body = body.push(data.as_slice()).align(4);
            data_offset += data.len().next_multiple_of(4) as u32;
        }
        header.push(body.as_ref()).to_vec()
    }
}

/// The sfnt table checksum: a wrapping sum of the data as big-endian
/// u32s, zero padded.
fn table_checksum(data: &[u8]) -> u32 {
    let mut sum = 0u32;
    for chunk in data.chunks(4) {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum = sum.wrapping_add(u32::from_be_bytes(word));
    }
    sum
}

fn head_table(index_to_loc_format: i16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x00010000u32) // version
        .push(0x00010000u32) // fontRevision
        .push(0u32) // checksumAdjustment
        .push(0x5F0F3CF5u32) // magicNumber
        .push(0u16) // flags
        .push(1000u16) // unitsPerEm
        .push(0i64) // created
        .push(0i64) // modified
        .extend([0i16, -200, 800, 800]) // font bounding box
        .push(0u16) // macStyle
        .push(8u16) // lowestRecPPEM
        .push(2i16) // fontDirectionHint
        .push(index_to_loc_format)
        .push(0i16) // glyphDataFormat
        .to_vec()
}

fn hhea_table(number_of_h_metrics: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x00010000u32)
        .extend([800i16, -200, 0]) // ascender, descender, lineGap
        .push(800u16) // advanceWidthMax
        .extend([0i16, 0, 800]) // min side bearings, xMaxExtent
        .extend([1i16, 0, 0]) // caret slope rise/run/offset
        .extend([0i16; 4]) // reserved
        .push(0i16) // metricDataFormat
        .push(number_of_h_metrics)
        .to_vec()
}

fn maxp_table(num_glyphs: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(0x00010000u32)
        .push(num_glyphs)
        .extend([0u16; 13]) // remaining version 1.0 fields
        .to_vec()
}

fn hmtx_table(advances: &[u16]) -> Vec<u8> {
    let mut buffer = BeBuffer::new();
    for advance in advances {
        buffer = buffer.push(*advance).push(0i16);
    }
    buffer.to_vec()
}

/// The glyf data and matching short loca offsets for the standard test
/// glyph set (see [`gids`]).
fn glyf_and_loca() -> (Vec<u8>, Vec<u8>) {
    let records = [
        Vec::new(), // notdef: empty
        simple_square_glyph(),
        Vec::new(), // space: empty
        simple_dot_glyph(),
        composite_colon_glyph(),
        simple_dot_glyph(), // stands in for a vertical colon
    ];
    let mut glyf = BeBuffer::new();
    let mut loca = BeBuffer::new().push(0u16);
    for record in &records {
        glyf = glyf.push(record.as_slice()).align(4);
        loca = loca.push((glyf.len() / 2) as u16);
    }
    (glyf.to_vec(), loca.to_vec())
}

/// A cmap table holding one (3, 1) Format 4 subtable mapping ' ', ':',
/// and 'A'..'Z' over the standard test glyph set.
fn cmap_table() -> Vec<u8> {
    let mut glyph_id_array = [0u16; 26];
    glyph_id_array[0] = gids::SQUARE;
    let subtable = BeBuffer::new()
        .push(4u16) // format
        .push(100u16) // length
        .push(0u16) // language
        .push(8u16) // segCountX2
        .push(8u16) // searchRange
        .push(2u16) // entrySelector
        .push(0u16) // rangeShift
        .extend([0x20u16, 0x3a, 0x5a, 0xffff]) // endCode
        .push(0u16) // reservedPad
        .extend([0x20u16, 0x3a, 0x41, 0xffff]) // startCode
        .extend([
            gids::SPACE as i16 - 0x20,
            gids::COLON as i16 - 0x3a,
            0,
            1,
        ]) // idDelta
        .extend([0u16, 0, 4, 0]) // idRangeOffsets
        .extend(glyph_id_array);
    BeBuffer::new()
        .push(0u16) // version
        .push(1u16) // numTables
        .push(3u16) // platformId
        .push(1u16) // encodingId
        .push(12u32) // subtable offset
        .push(subtable.as_ref())
        .to_vec()
}

/// A complete TrueType font with the standard test glyph set.
pub fn test_font() -> Vec<u8> {
    test_font_builder().build()
}

/// [`test_font`] plus a GSUB `vert` feature substituting the colon for
/// its vertical form.
pub fn test_font_with_gsub() -> Vec<u8> {
    test_font_builder()
        .add_table(
            *b"GSUB",
            gsub_single_subst(*b"vert", &[(gids::COLON, gids::VERTICAL_COLON)]),
        )
        .build()
}

fn test_font_builder() -> FontBuilder {
    let (glyf, loca) = glyf_and_loca();
    FontBuilder::new()
        .add_table(*b"head", head_table(0))
        .add_table(*b"hhea", hhea_table(TEST_ADVANCES.len() as u16))
        .add_table(*b"maxp", maxp_table(TEST_ADVANCES.len() as u16))
        .add_table(*b"hmtx", hmtx_table(&TEST_ADVANCES))
        .add_table(*b"cmap", cmap_table())
        .add_table(*b"loca", loca)
        .add_table(*b"glyf", glyf)
}

/// A TrueType collection holding `fonts` in order.
///
/// Each member font's table record offsets are rebased to be absolute
/// within the collection file, as the format requires.
pub fn collection(fonts: &[Vec<u8>]) -> Vec<u8> {
    let header_len = 12 + fonts.len() as u32 * 4;
    let mut offsets = Vec::with_capacity(fonts.len());
    let mut offset = header_len;
    for font in fonts {
        offsets.push(offset);
        offset += font.len().next_multiple_of(4) as u32;
    }
    let mut buffer = BeBuffer::new()
        .push(*b"ttcf")
        .push(0x00010000u32)
        .push(fonts.len() as u32)
        .extend(offsets.iter().copied());
    for (font, base) in fonts.iter().zip(&offsets) {
        let mut rebased = font.clone();
        let num_tables = u16::from_be_bytes([rebased[4], rebased[5]]) as usize;
        for i in 0..num_tables {
            let field = 12 + i * 16 + 8;
            let old = u32::from_be_bytes(rebased[field..field + 4].try_into().unwrap());
            rebased[field..field + 4].copy_from_slice(&(old + base).to_be_bytes());
        }
        buffer = buffer.push(rebased.as_slice()).align(4);
    }
    buffer.to_vec()
}

/// A two-member collection of [`test_font`].
pub fn test_collection() -> Vec<u8> {
    collection(&[test_font(), test_font()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_is_sorted_and_aligned() {
        let font = test_font();
        assert_eq!(&font[0..4], &0x00010000u32.to_be_bytes());
        let num_tables = u16::from_be_bytes([font[4], font[5]]) as usize;
        assert_eq!(num_tables, 7);
        let mut tags = Vec::new();
        for i in 0..num_tables {
            let record = 12 + i * 16;
            tags.push(font[record..record + 4].to_vec());
            let offset =
                u32::from_be_bytes(font[record + 8..record + 12].try_into().unwrap());
            assert_eq!(offset % 4, 0);
        }
        let mut sorted = tags.clone();
        sorted.sort();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn collection_rebases_offsets() {
        let ttc = test_collection();
        assert_eq!(&ttc[0..4], b"ttcf");
        let second = u32::from_be_bytes(ttc[16..20].try_into().unwrap()) as usize;
        let record_offset =
            u32::from_be_bytes(ttc[second + 12 + 8..second + 12 + 12].try_into().unwrap());
        assert!(record_offset as usize > second);
    }
}
