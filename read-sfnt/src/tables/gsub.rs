//! The [GSUB (Glyph Substitution)][gsub] table
//!
//! Support is deliberately narrow: only [Type 1 (Single
//! Substitution)][single] lookups reached through a script's default
//! language system are collected. That is enough to resolve the
//! one-to-one feature mappings used here, such as `vert`.
//!
//! [gsub]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub
//! [single]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub#SS

use std::collections::HashMap;

use crate::font_data::FontData;
use crate::glyph_id::GlyphId;
use crate::read::{FontRead, ReadError};
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"GSUB");

const SINGLE_SUBST_LOOKUP_TYPE: u16 = 1;

/// The GSUB table header.
#[derive(Clone)]
pub struct Gsub<'a> {
    data: FontData<'a>,
    script_list_offset: u16,
    feature_list_offset: u16,
    lookup_list_offset: u16,
}

impl<'a> FontRead<'a> for Gsub<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let _version: u32 = data.read_at(0)?;
        let script_list_offset = data.read_at(4)?;
        let feature_list_offset = data.read_at(6)?;
        let lookup_list_offset = data.read_at(8)?;
        Ok(Gsub {
            data,
            script_list_offset,
            feature_list_offset,
            lookup_list_offset,
        })
    }
}

impl<'a> Gsub<'a> {
    /// Collects every single-substitution pair reachable from `feature`
    /// under `script`'s default language system.
    ///
    /// Falls back to the `DFLT` script when `script` is absent. Returns
    /// an empty map when neither script nor feature is present; a
    /// missing table is not an error for callers.
    pub fn single_substitutions(
        &self,
        script: Tag,
        feature: Tag,
    ) -> Result<HashMap<GlyphId, GlyphId>, ReadError> {
        let mut substitutions = HashMap::new();
        let Some(lang_sys) = self
            .default_lang_sys(script)?
            .or(self.default_lang_sys(Tag::new(b"DFLT"))?)
        else {
            return Ok(substitutions);
        };
        let feature_list = self
            .data
            .split_off(self.feature_list_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        let feature_count: u16 = feature_list.read_at(0)?;
        let lookup_list = self
            .data
            .split_off(self.lookup_list_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;

        let index_count: u16 = lang_sys.read_at(4)?;
        for i in 0..index_count as usize {
            let feature_index: u16 = lang_sys.read_at(6 + i * 2)?;
            if feature_index >= feature_count {
                continue;
            }
            let record = 2 + feature_index as usize * 6;
            let tag: Tag = feature_list.read_at(record)?;
            if tag != feature {
                continue;
            }
            let feature_offset: u16 = feature_list.read_at(record + 4)?;
            let feature_table = feature_list
                .split_off(feature_offset as usize)
                .ok_or(ReadError::OutOfBounds)?;
            let lookup_index_count: u16 = feature_table.read_at(2)?;
            for j in 0..lookup_index_count as usize {
                let lookup_index: u16 = feature_table.read_at(4 + j * 2)?;
                self.collect_lookup(lookup_list, lookup_index, &mut substitutions)?;
            }
        }
        Ok(substitutions)
    }

    /// Resolve the default language system table for `script`.
    fn default_lang_sys(&self, script: Tag) -> Result<Option<FontData<'a>>, ReadError> {
        let script_list = self
            .data
            .split_off(self.script_list_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        let script_count: u16 = script_list.read_at(0)?;
        for i in 0..script_count as usize {
            let record = 2 + i * 6;
            let tag: Tag = script_list.read_at(record)?;
            if tag != script {
                continue;
            }
            let script_offset: u16 = script_list.read_at(record + 4)?;
            let script_table = script_list
                .split_off(script_offset as usize)
                .ok_or(ReadError::OutOfBounds)?;
            let default_lang_sys: u16 = script_table.read_at(0)?;
            if default_lang_sys == 0 {
                return Ok(None);
            }
            return Ok(script_table.split_off(default_lang_sys as usize));
        }
        Ok(None)
    }

    /// Walk one lookup and record its pairs if it is a single
    /// substitution.
    fn collect_lookup(
        &self,
        lookup_list: FontData<'a>,
        lookup_index: u16,
        substitutions: &mut HashMap<GlyphId, GlyphId>,
    ) -> Result<(), ReadError> {
        let lookup_count: u16 = lookup_list.read_at(0)?;
        if lookup_index >= lookup_count {
            return Ok(());
        }
        let lookup_offset: u16 = lookup_list.read_at(2 + lookup_index as usize * 2)?;
        let lookup = lookup_list
            .split_off(lookup_offset as usize)
            .ok_or(ReadError::OutOfBounds)?;
        let lookup_type: u16 = lookup.read_at(0)?;
        if lookup_type != SINGLE_SUBST_LOOKUP_TYPE {
            return Ok(());
        }
        let subtable_count: u16 = lookup.read_at(4)?;
        for i in 0..subtable_count as usize {
            let subtable_offset: u16 = lookup.read_at(6 + i * 2)?;
            let subtable = lookup
                .split_off(subtable_offset as usize)
                .ok_or(ReadError::OutOfBounds)?;
            collect_single_subst(subtable, substitutions)?;
        }
        Ok(())
    }
}

/// Record the pairs of one SingleSubst subtable.
fn collect_single_subst(
    subtable: FontData,
    substitutions: &mut HashMap<GlyphId, GlyphId>,
) -> Result<(), ReadError> {
    let format: u16 = subtable.read_at(0)?;
    let coverage_offset: u16 = subtable.read_at(2)?;
    let coverage = subtable
        .split_off(coverage_offset as usize)
        .ok_or(ReadError::OutOfBounds)?;
    let covered = coverage_glyphs(coverage)?;
    match format {
        1 => {
            let delta: i16 = subtable.read_at(4)?;
            for gid in covered {
                let substitute = gid.to_u16().wrapping_add(delta as u16);
                substitutions.insert(gid, GlyphId::new(substitute));
            }
        }
        2 => {
            let glyph_count: u16 = subtable.read_at(4)?;
            for (i, gid) in covered.into_iter().enumerate() {
                if i >= glyph_count as usize {
                    break;
                }
                let substitute: u16 = subtable.read_at(6 + i * 2)?;
                substitutions.insert(gid, GlyphId::new(substitute));
            }
        }
        other => return Err(ReadError::InvalidFormat(other as i64)),
    }
    Ok(())
}

/// Expand a [coverage table][cov] into the glyphs it covers, in
/// coverage order.
///
/// [cov]: https://docs.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table
fn coverage_glyphs(coverage: FontData) -> Result<Vec<GlyphId>, ReadError> {
    let format: u16 = coverage.read_at(0)?;
    let mut glyphs = Vec::new();
    match format {
        1 => {
            let glyph_count: u16 = coverage.read_at(2)?;
            for i in 0..glyph_count as usize {
                glyphs.push(GlyphId::new(coverage.read_at(4 + i * 2)?));
            }
        }
        2 => {
            let range_count: u16 = coverage.read_at(2)?;
            for i in 0..range_count as usize {
                let record = 4 + i * 6;
                let start: u16 = coverage.read_at(record)?;
                let end: u16 = coverage.read_at(record + 2)?;
                if end < start {
                    return Err(ReadError::MalformedData("descending coverage range"));
                }
                for gid in start..=end {
                    glyphs.push(GlyphId::new(gid));
                }
            }
        }
        other => return Err(ReadError::InvalidFormat(other as i64)),
    }
    Ok(glyphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::gsub_vert_single_subst;

    #[test]
    fn vert_feature_collects_pairs() {
        let bytes = gsub_vert_single_subst();
        let gsub = Gsub::read(FontData::new(&bytes)).unwrap();
        let map = gsub
            .single_substitutions(Tag::new(b"DFLT"), Tag::new(b"vert"))
            .unwrap();
        assert_eq!(map.get(&GlyphId::new(4)), Some(&GlyphId::new(10)));
        assert_eq!(map.get(&GlyphId::new(5)), Some(&GlyphId::new(11)));
    }

    #[test]
    fn unknown_feature_is_empty() {
        let bytes = gsub_vert_single_subst();
        let gsub = Gsub::read(FontData::new(&bytes)).unwrap();
        let map = gsub
            .single_substitutions(Tag::new(b"DFLT"), Tag::new(b"liga"))
            .unwrap();
        assert!(map.is_empty());
    }
}
