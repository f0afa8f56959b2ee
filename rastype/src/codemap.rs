//! Character and glyph lookup tables built from the cmap.
//!
//! Glyph lookups happen once per character drawn, so the maps are flat
//! arrays chunked by the high byte of the key; a chunk is allocated
//! only when a font actually maps codes in its range. A value of zero
//! means "absent" throughout (glyph zero is notdef, whose offset is
//! never a draw target by code).

use read_sfnt::tables::{cmap, glyf, head, loca, maxp};
use read_sfnt::{FontRead, FontRef, GlyphId, ReadError};

/// A sparse u16-keyed map: 256 lazily allocated chunks of 256 entries.
struct ChunkedMap {
    chunks: Vec<Option<Box<[u32; 256]>>>,
}

impl ChunkedMap {
    fn new() -> Self {
        let mut chunks = Vec::with_capacity(256);
        chunks.resize_with(256, || None);
        ChunkedMap { chunks }
    }

    fn get(&self, key: u32) -> u32 {
        if key > 0xFFFF {
            return 0;
        }
        match &self.chunks[(key >> 8) as usize] {
            Some(chunk) => chunk[(key & 0xFF) as usize],
            None => 0,
        }
    }

    fn set(&mut self, key: u32, value: u32) {
        if key > 0xFFFF {
            return;
        }
        let chunk = self.chunks[(key >> 8) as usize]
            .get_or_insert_with(|| Box::new([0u32; 256]));
        chunk[(key & 0xFF) as usize] = value;
    }
}

/// The character and glyph lookup tables for one font.
///
/// Three maps are maintained: character code to absolute glyph-outline
/// offset (the draw path), glyph id to absolute offset (composite
/// components and substitutes), and character code to glyph id
/// (metrics and substitution).
pub struct CodeMap {
    code_offsets: ChunkedMap,
    glyph_offsets: ChunkedMap,
    glyph_ids: ChunkedMap,
}

impl CodeMap {
    /// Builds the maps from the font's Format 4 cmap subtable.
    ///
    /// Offsets are absolute within the font file: the glyf table base
    /// plus the glyph's loca offset. Codes whose glyph has no outline
    /// are recorded with an absent offset but keep their glyph id.
    pub fn from_font(font: &FontRef) -> Result<CodeMap, ReadError> {
        let subtable = cmap::Cmap::read(font.expect_table_data(cmap::TAG)?)?
            .unicode_bmp_format4()?;
        let head = head::Head::read(font.expect_table_data(head::TAG)?)?;
        let loca = loca::Loca::read(
            font.expect_table_data(loca::TAG)?,
            head.has_long_loca(),
        )?;
        let maxp = maxp::Maxp::read(font.expect_table_data(maxp::TAG)?)?;
        let glyf_base = font
            .table_offset(glyf::TAG)
            .ok_or(ReadError::TableIsMissing(glyf::TAG))?;

        let mut map = CodeMap {
            code_offsets: ChunkedMap::new(),
            glyph_offsets: ChunkedMap::new(),
            glyph_ids: ChunkedMap::new(),
        };
        // every glyph gets an offset entry: composite components and
        // substitution targets need not be cmap-mapped
        let num_glyphs = (maxp.num_glyphs as usize).min(loca.len());
        for glyph in 0..num_glyphs {
            let glyph_id = GlyphId::new(glyph as u16);
            let offset = loca
                .outline_offset(glyph_id)
                .map(|offset| glyf_base + offset)
                .unwrap_or(0);
            map.glyph_offsets.set(glyph as u32, offset);
        }
        for (code, glyph_id) in subtable.iter() {
            map.code_offsets.set(code, map.glyph_offset(glyph_id));
            map.glyph_ids.set(code, glyph_id.to_u16() as u32);
        }
        Ok(map)
    }

    /// The absolute outline offset for a character code, or 0.
    pub fn code_offset(&self, code: u32) -> u32 {
        self.code_offsets.get(code)
    }

    /// The absolute outline offset for a glyph id, or 0.
    pub fn glyph_offset(&self, glyph_id: GlyphId) -> u32 {
        self.glyph_offsets.get(glyph_id.to_u16() as u32)
    }

    /// The glyph id mapped to a character code; notdef when unmapped.
    pub fn glyph_id(&self, code: u32) -> GlyphId {
        GlyphId::new(self.glyph_ids.get(code) as u16)
    }

    /// Installs an alternate mapping for `code`, unless the cmap
    /// already maps it. Used for substitution-derived presentation
    /// forms.
    pub fn install_alternate(&mut self, code: u32, offset: u32) {
        if self.code_offsets.get(code) == 0 {
            self.code_offsets.set(code, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use read_sfnt::FontData;
    use sfnt_test_data::{gids, test_font, test_font_with_gsub};

    fn codemap(bytes: &[u8]) -> CodeMap {
        let font = FontRef::new(FontData::new(bytes)).unwrap();
        CodeMap::from_font(&font).unwrap()
    }

    #[test]
    fn maps_codes_and_glyph_ids() {
        let bytes = test_font();
        let map = codemap(&bytes);
        assert_eq!(map.glyph_id('A' as u32), GlyphId::new(gids::SQUARE));
        assert_eq!(map.glyph_id(':' as u32), GlyphId::new(gids::COLON));
        assert_eq!(map.glyph_id('~' as u32), GlyphId::NOTDEF);
        // 'A' has an outline; its offset through both maps agrees
        let by_code = map.code_offset('A' as u32);
        assert_ne!(by_code, 0);
        assert_eq!(by_code, map.glyph_offset(GlyphId::new(gids::SQUARE)));
        // the composite component glyph is reachable by id even though
        // no code maps to it
        assert_ne!(map.glyph_offset(GlyphId::new(gids::DOT)), 0);
    }

    #[test]
    fn last_glyph_has_an_offset() {
        let bytes = test_font_with_gsub();
        let map = codemap(&bytes);
        // the substitute is the final entry in loca
        assert_ne!(map.glyph_offset(GlyphId::new(gids::VERTICAL_COLON)), 0);
    }

    #[test]
    fn empty_glyphs_have_absent_offsets() {
        let bytes = test_font();
        let map = codemap(&bytes);
        // space maps to a glyph id but has no outline
        assert_eq!(map.glyph_id(0x20), GlyphId::new(gids::SPACE));
        assert_eq!(map.code_offset(0x20), 0);
    }

    #[test]
    fn alternates_never_overwrite() {
        let bytes = test_font();
        let mut map = codemap(&bytes);
        let original = map.code_offset('A' as u32);
        map.install_alternate('A' as u32, 12345);
        assert_eq!(map.code_offset('A' as u32), original);
        map.install_alternate(0xFE13, 12345);
        assert_eq!(map.code_offset(0xFE13), 12345);
    }
}
