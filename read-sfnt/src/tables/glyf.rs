//! The [glyf (Glyph Data)][glyf] table
//!
//! [glyf]: https://docs.microsoft.com/en-us/typography/opentype/spec/glyf

use crate::font_data::{Cursor, FontData};
use crate::glyph_id::GlyphId;
use crate::read::{FontRead, ReadError};
use crate::tag::Tag;

pub const TAG: Tag = Tag::new(b"glyf");

/// Flags used by simple glyph descriptions.
pub mod simple_flags {
    pub const ON_CURVE_POINT: u8 = 0x01;
    pub const X_SHORT_VECTOR: u8 = 0x02;
    pub const Y_SHORT_VECTOR: u8 = 0x04;
    pub const REPEAT_FLAG: u8 = 0x08;
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: u8 = 0x10;
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: u8 = 0x20;
}

/// Flags used by composite glyph descriptions.
pub mod composite_flags {
    pub const ARG_1_AND_2_ARE_WORDS: u16 = 0x0001;
    pub const WE_HAVE_A_SCALE: u16 = 0x0008;
    pub const MORE_COMPONENTS: u16 = 0x0020;
    pub const WE_HAVE_AN_X_AND_Y_SCALE: u16 = 0x0040;
    pub const WE_HAVE_A_TWO_BY_TWO: u16 = 0x0080;
}

/// The bounding box stored in a glyph header, in font units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

/// A point in a decoded simple glyph outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphPoint {
    pub x: i32,
    pub y: i32,
    pub on_curve: bool,
}

/// A single glyph description from the glyf table.
#[derive(Clone)]
pub enum Glyph<'a> {
    Simple(SimpleGlyph<'a>),
    Composite(CompositeGlyph<'a>),
}

impl<'a> FontRead<'a> for Glyph<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let number_of_contours: i16 = data.read_at(0)?;
        let bbox = BoundingBox {
            x_min: data.read_at(2)?,
            y_min: data.read_at(4)?,
            x_max: data.read_at(6)?,
            y_max: data.read_at(8)?,
        };
        let data = data.split_off(10).ok_or(ReadError::OutOfBounds)?;
        if number_of_contours >= 0 {
            Ok(Glyph::Simple(SimpleGlyph {
                data,
                bbox,
                number_of_contours: number_of_contours as u16,
            }))
        } else {
            Ok(Glyph::Composite(CompositeGlyph { data, bbox }))
        }
    }
}

impl Glyph<'_> {
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Glyph::Simple(simple) => simple.bbox,
            Glyph::Composite(composite) => composite.bbox,
        }
    }
}

/// A simple glyph: contours described directly by flag, x and y runs.
#[derive(Clone)]
pub struct SimpleGlyph<'a> {
    data: FontData<'a>,
    bbox: BoundingBox,
    number_of_contours: u16,
}

impl<'a> SimpleGlyph<'a> {
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn number_of_contours(&self) -> u16 {
        self.number_of_contours
    }

    /// Decodes the contours into absolute points.
    ///
    /// Flags are run-length expanded, then the x and y delta runs are
    /// accumulated into absolute coordinates and split at the contour
    /// end points.
    pub fn contours(&self) -> Result<Vec<Vec<GlyphPoint>>, ReadError> {
        let mut cursor = self.data.cursor(0);
        let mut end_points = Vec::with_capacity(self.number_of_contours as usize);
        for _ in 0..self.number_of_contours {
            end_points.push(cursor.read::<u16>()? as usize);
        }
        let point_count = match end_points.last() {
            Some(last) => last + 1,
            None => return Ok(Vec::new()),
        };
        let instruction_length = cursor.read::<u16>()? as usize;
        cursor.skip(instruction_length);

        let mut flags = Vec::with_capacity(point_count);
        while flags.len() < point_count {
            let flag = cursor.read::<u8>()?;
            flags.push(flag);
            if flag & simple_flags::REPEAT_FLAG != 0 {
                let repeat = cursor.read::<u8>()?;
                for _ in 0..repeat {
                    flags.push(flag);
                }
            }
        }
        flags.truncate(point_count);

        let mut points: Vec<GlyphPoint> = flags
            .iter()
            .map(|flag| GlyphPoint {
                x: 0,
                y: 0,
                on_curve: flag & simple_flags::ON_CURVE_POINT != 0,
            })
            .collect();

        let mut x = 0i32;
        for (point, flag) in points.iter_mut().zip(&flags) {
            x += read_delta(
                &mut cursor,
                *flag,
                simple_flags::X_SHORT_VECTOR,
                simple_flags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            )?;
            point.x = x;
        }
        let mut y = 0i32;
        for (point, flag) in points.iter_mut().zip(&flags) {
            y += read_delta(
                &mut cursor,
                *flag,
                simple_flags::Y_SHORT_VECTOR,
                simple_flags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            )?;
            point.y = y;
        }

        let mut contours = Vec::with_capacity(end_points.len());
        let mut start = 0;
        for end in end_points {
            if end + 1 < start || end >= point_count {
                return Err(ReadError::MalformedData("contour end points not ascending"));
            }
            contours.push(points[start..=end].to_vec());
            start = end + 1;
        }
        Ok(contours)
    }
}

/// Reads one coordinate delta according to its flag bits.
fn read_delta(
    cursor: &mut Cursor,
    flag: u8,
    short_bit: u8,
    same_or_positive_bit: u8,
) -> Result<i32, ReadError> {
    if flag & short_bit != 0 {
        let value = cursor.read::<u8>()? as i32;
        if flag & same_or_positive_bit != 0 {
            Ok(value)
        } else {
            Ok(-value)
        }
    } else if flag & same_or_positive_bit != 0 {
        Ok(0)
    } else {
        Ok(cursor.read::<i16>()? as i32)
    }
}

/// A composite glyph: a list of components referencing other glyphs.
#[derive(Clone)]
pub struct CompositeGlyph<'a> {
    data: FontData<'a>,
    bbox: BoundingBox,
}

/// One component of a composite glyph.
///
/// Transform fields beyond the x/y offset are parsed past but ignored;
/// component outlines are placed by translation only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Component {
    pub glyph_id: GlyphId,
    pub dx: i32,
    pub dy: i32,
}

impl<'a> CompositeGlyph<'a> {
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    pub fn components(&self) -> ComponentIter<'a> {
        ComponentIter {
            cursor: self.data.cursor(0),
            done: false,
        }
    }
}

/// Iterator over the components of a composite glyph.
pub struct ComponentIter<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl ComponentIter<'_> {
    fn read_component(&mut self) -> Result<Component, ReadError> {
        use composite_flags::*;
        let flags = self.cursor.read::<u16>()?;
        let glyph_id = GlyphId::new(self.cursor.read::<u16>()?);
        let (dx, dy) = if flags & ARG_1_AND_2_ARE_WORDS != 0 {
            (
                self.cursor.read::<i16>()? as i32,
                self.cursor.read::<i16>()? as i32,
            )
        } else {
            (
                self.cursor.read::<i8>()? as i32,
                self.cursor.read::<i8>()? as i32,
            )
        };
        if flags & WE_HAVE_A_SCALE != 0 {
            self.cursor.skip(2);
        } else if flags & WE_HAVE_AN_X_AND_Y_SCALE != 0 {
            self.cursor.skip(4);
        } else if flags & WE_HAVE_A_TWO_BY_TWO != 0 {
            self.cursor.skip(8);
        }
        if flags & MORE_COMPONENTS == 0 {
            self.done = true;
        }
        Ok(Component { glyph_id, dx, dy })
    }
}

impl Iterator for ComponentIter<'_> {
    type Item = Result<Component, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let component = self.read_component();
        if component.is_err() {
            self.done = true;
        }
        Some(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfnt_test_data::{composite_colon_glyph, simple_square_glyph};

    #[test]
    fn simple_square_decodes_to_one_contour() {
        let bytes = simple_square_glyph();
        let glyph = Glyph::read(FontData::new(&bytes)).unwrap();
        let Glyph::Simple(simple) = glyph else {
            panic!("expected a simple glyph");
        };
        assert_eq!(simple.bounding_box().x_max, 700);
        let contours = simple.contours().unwrap();
        assert_eq!(contours.len(), 1);
        assert_eq!(
            contours[0],
            vec![
                GlyphPoint { x: 100, y: 0, on_curve: true },
                GlyphPoint { x: 100, y: 700, on_curve: true },
                GlyphPoint { x: 700, y: 700, on_curve: true },
                GlyphPoint { x: 700, y: 0, on_curve: true },
            ]
        );
    }

    #[test]
    fn composite_lists_offset_components() {
        let bytes = composite_colon_glyph();
        let glyph = Glyph::read(FontData::new(&bytes)).unwrap();
        let Glyph::Composite(composite) = glyph else {
            panic!("expected a composite glyph");
        };
        let components: Vec<_> = composite
            .components()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].dy, 0);
        assert_eq!(components[1].dy, 500);
        assert_eq!(components[0].glyph_id, components[1].glyph_id);
    }
}
