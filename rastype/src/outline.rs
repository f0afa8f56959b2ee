//! Glyph outline loading.
//!
//! Turns glyf records into flat contour lists ready for scan
//! conversion, splicing composite components in place.

use read_sfnt::tables::glyf::{BoundingBox, Glyph, GlyphPoint};
use read_sfnt::{FontData, FontRead, ReadError};

use crate::codemap::CodeMap;

/// Composite chains deeper than this are treated as malformed. Real
/// fonts nest two or three levels at most.
const MAX_COMPONENT_DEPTH: u32 = 8;

/// A fully loaded glyph outline in font units.
#[derive(Clone, Debug)]
pub struct Outline {
    pub bbox: BoundingBox,
    pub contours: Vec<Vec<GlyphPoint>>,
}

impl Outline {
    /// Loads the outline at `offset` (absolute within `file`),
    /// resolving composite components through the code map.
    ///
    /// Returns `None` for any malformed glyph: an unresolvable or
    /// overly deep component chain, or a decode error. The caller
    /// falls back to its space glyph in that case.
    pub fn load(file: FontData, offset: u32, codemap: &CodeMap) -> Option<Outline> {
        let mut contours = Vec::new();
        let bbox = load_into(file, offset, 0, 0, codemap, 0, &mut contours).ok()?;
        Some(Outline { bbox, contours })
    }
}

/// Appends the contours of one glyph record, translated by (dx, dy),
/// and returns that record's own header bounding box.
///
/// A composite reports its own header box, never a child's.
fn load_into(
    file: FontData,
    offset: u32,
    dx: i32,
    dy: i32,
    codemap: &CodeMap,
    depth: u32,
    out: &mut Vec<Vec<GlyphPoint>>,
) -> Result<BoundingBox, ReadError> {
    if depth > MAX_COMPONENT_DEPTH {
        return Err(ReadError::MalformedData("component chain too deep"));
    }
    let data = file
        .split_off(offset as usize)
        .ok_or(ReadError::OutOfBounds)?;
    match Glyph::read(data)? {
        Glyph::Simple(simple) => {
            let mut contours = simple.contours()?;
            if dx != 0 || dy != 0 {
                for contour in &mut contours {
                    for point in contour {
                        point.x += dx;
                        point.y += dy;
                    }
                }
            }
            out.extend(contours);
            Ok(simple.bounding_box())
        }
        Glyph::Composite(composite) => {
            for component in composite.components() {
                let component = component?;
                let child = codemap.glyph_offset(component.glyph_id);
                if child == 0 {
                    return Err(ReadError::MalformedData("unresolved component"));
                }
                load_into(
                    file,
                    child,
                    dx + component.dx,
                    dy + component.dy,
                    codemap,
                    depth + 1,
                    out,
                )?;
            }
            Ok(composite.bounding_box())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use read_sfnt::FontRef;
    use sfnt_test_data::test_font;

    fn load(code: u32) -> Outline {
        let bytes = test_font();
        let font = FontRef::new(FontData::new(&bytes)).unwrap();
        let codemap = CodeMap::from_font(&font).unwrap();
        let offset = codemap.code_offset(code);
        assert_ne!(offset, 0);
        Outline::load(FontData::new(&bytes), offset, &codemap).unwrap()
    }

    #[test]
    fn simple_outline_in_font_units() {
        let outline = load('A' as u32);
        assert_eq!(outline.contours.len(), 1);
        assert_eq!(outline.bbox.x_max, 700);
        assert_eq!(outline.bbox.y_max, 700);
    }

    #[test]
    fn composite_splices_translated_children() {
        let outline = load(':' as u32);
        assert_eq!(outline.contours.len(), 2);
        // the second dot sits 500 units above the first
        let y0 = outline.contours[0][0].y;
        let y1 = outline.contours[1][0].y;
        assert_eq!(y1 - y0, 500);
        // the composite keeps its own header box, not the last child's
        assert_eq!(outline.bbox.y_max, 700);
        assert_eq!(outline.bbox.x_max, 200);
    }
}
