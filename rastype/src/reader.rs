//! The top-level [`FontReader`].
//!
//! A reader owns one font byte buffer and all mutable rendering state
//! for it: the code-to-offset map, the glyph cache, and the options it
//! was created with. Opening is lazy and happens on the first measure,
//! draw, or bitmap request; a font that fails to open leaves the
//! reader permanently inert, with every call returning an empty
//! result instead of an error.

use read_sfnt::tables::{gsub, head, hhea, hmtx};
use read_sfnt::{FontData, FontRead, FontRef, ReadError, Tag};

use crate::bmp;
use crate::cache::{Glyph, GlyphCache};
use crate::codemap::CodeMap;
use crate::outline::Outline;
use crate::raster::Bitmap;
use crate::shape::{CharacterIterator, VERTICAL_FORMS};

const DEFAULT_GLYPH_QUOTA: usize = 1024;
const DEFAULT_COLORS: [u32; 2] = [0xffffff, 0x000000];
const DFLT: Tag = Tag::new(b"DFLT");
const VERT: Tag = Tag::new(b"vert");

/// Rendering options, fixed at reader construction.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Upper bound on cached glyphs before LRU compaction.
    pub glyph_quota: usize,
    /// Lay text out top to bottom in a fixed right-hand column.
    pub vertical: bool,
    /// Fill only span boundaries, for inspecting scanline output.
    pub debug_edges: bool,
    /// Which font to use when the buffer is a TTC collection.
    pub collection_index: u32,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            glyph_quota: DEFAULT_GLYPH_QUOTA,
            vertical: false,
            debug_edges: false,
            collection_index: 0,
        }
    }
}

/// Per-font state built by a successful open.
struct OpenFont {
    codemap: CodeMap,
    /// Pixels per font unit at size 1.
    scale: f64,
    space_advance: u16,
    cache: GlyphCache,
    /// The vertical-forms lookup is tried at most once.
    vert_backfilled: bool,
}

enum State {
    Unopened,
    Failed,
    Open(OpenFont),
}

/// Parses a font and renders text from it.
pub struct FontReader<'a> {
    data: FontData<'a>,
    options: Options,
    state: State,
}

impl<'a> FontReader<'a> {
    pub fn new(data: &'a [u8]) -> FontReader<'a> {
        Self::with_options(data, Options::default())
    }

    pub fn with_options(data: &'a [u8], options: Options) -> FontReader<'a> {
        FontReader {
            data: FontData::new(data),
            options,
            state: State::Unopened,
        }
    }

    /// Parses the font headers needed for rendering. Idempotent: a
    /// second call returns the first outcome without re-parsing, and a
    /// failed open is permanent.
    pub fn open(&mut self) -> bool {
        match self.state {
            State::Open(_) => true,
            State::Failed => false,
            State::Unopened => match self.open_font() {
                Ok(font) => {
                    self.state = State::Open(font);
                    true
                }
                Err(_) => {
                    self.state = State::Failed;
                    false
                }
            },
        }
    }

    fn open_font(&self) -> Result<OpenFont, ReadError> {
        let font = FontRef::from_index(self.data, self.options.collection_index)?;
        let head = head::Head::read(font.expect_table_data(head::TAG)?)?;
        if head.units_per_em == 0 {
            return Err(ReadError::MalformedData("unitsPerEm is zero"));
        }
        let codemap = CodeMap::from_font(&font)?;
        let hhea = hhea::Hhea::read(font.expect_table_data(hhea::TAG)?)?;
        let hmtx = hmtx::Hmtx::read(
            font.expect_table_data(hmtx::TAG)?,
            hhea.number_of_h_metrics,
        )?;
        let space_advance = hmtx.advance(codemap.glyph_id(0x20));
        Ok(OpenFont {
            codemap,
            scale: 1.0 / head.units_per_em as f64,
            space_advance,
            cache: GlyphCache::new(self.options.glyph_quota),
            vert_backfilled: false,
        })
    }

    /// Measures `text` (UTF-16, logical order) at `font_size` pixels.
    ///
    /// Returns cumulative advances in visual order: a leading `0.0`,
    /// then one entry per character. Empty when the font cannot be
    /// opened.
    pub fn measure(&mut self, text: &[u16], font_size: f64) -> Vec<f64> {
        if !self.open() {
            return Vec::new();
        }
        let (data, options) = (self.data, self.options);
        let State::Open(font) = &mut self.state else {
            return Vec::new();
        };
        let run = CharacterIterator::new(text, 0, options.vertical);
        let scale = font_size * font.scale;
        let mut widths = Vec::with_capacity(run.len() + 1);
        let mut x = 0.0;
        widths.push(x);
        for code in run.iter() {
            x += resolve(font, data, &options, code).advance(scale);
            widths.push(x);
        }
        widths
    }

    /// Rasterizes `text` into `buffer`, a packed 1-bit bitmap of the
    /// given pixel dimensions with bottom-up rows. Returns the total
    /// advance drawn, or `0.0` when the font cannot be opened.
    ///
    /// Horizontal layout draws along the baseline at the bottom edge
    /// and stops once the pen passes the right edge. Vertical layout
    /// draws down a fixed column at the right edge, one em per
    /// character, and stops at the bottom edge.
    pub fn draw(
        &mut self,
        text: &[u16],
        font_size: f64,
        buffer: &mut [u8],
        width: usize,
        height: usize,
    ) -> f64 {
        if !self.open() {
            return 0.0;
        }
        let (data, options) = (self.data, self.options);
        let State::Open(font) = &mut self.state else {
            return 0.0;
        };
        let run = CharacterIterator::new(text, 0, options.vertical);
        let mut bitmap = Bitmap::new(buffer, width, height, options.debug_edges);
        let scale = font_size * font.scale;
        if options.vertical {
            let x = width as f64 - font_size;
            let mut y = height as f64 - font_size;
            let mut drawn = 0.0;
            for code in run.iter() {
                if y < 0.0 {
                    break;
                }
                let frame = font.cache.next_frame();
                resolve(font, data, &options, code).draw(scale, &mut bitmap, x, y as i32, frame);
                y -= font_size;
                drawn += font_size;
            }
            return drawn;
        }
        let mut x = 0.0;
        for code in run.iter() {
            if x >= width as f64 {
                break;
            }
            let frame = font.cache.next_frame();
            x += resolve(font, data, &options, code).draw(scale, &mut bitmap, x, 0, frame);
        }
        x
    }

    /// Renders `text` and returns it as a BMP data URI.
    ///
    /// Two palette colors produce a 1-bit image (width padded to a
    /// multiple of 32); up to sixteen produce a 16-color image built
    /// by supersampling at four times the size and averaging 4x4
    /// blocks. More than sixteen colors, or a failed draw, yields an
    /// empty string.
    pub fn get_bitmap(
        &mut self,
        text: &[u16],
        font_size: f64,
        width: usize,
        height: usize,
        colors: &[u32],
    ) -> String {
        let colors = if colors.is_empty() {
            &DEFAULT_COLORS
        } else {
            colors
        };
        let (width, height, font_size, gray) = match colors.len() {
            0..=2 => ((width + 31) & !31, height, font_size, false),
            3..=16 => (((width + 1) >> 1) << 3, height << 2, font_size * 4.0, true),
            _ => return String::new(),
        };
        let mut data = vec![0u8; (width >> 3) * height];
        if self.draw(text, font_size, &mut data, width, height) <= 0.0 {
            return String::new();
        }
        if gray {
            bmp::gray_data_uri(&data, width, height, colors)
        } else {
            bmp::mono_data_uri(&data, width, height, colors)
        }
    }
}

/// Returns the cached glyph for `code`, loading it on a miss.
///
/// An unmapped code or an undecodable outline resolves to the space
/// placeholder. Codes in the vertical-forms block additionally try the
/// font's `vert` substitution lookup before falling back.
fn resolve<'b>(
    font: &'b mut OpenFont,
    data: FontData,
    options: &Options,
    code: u32,
) -> &'b mut Glyph {
    if font.codemap.code_offset(code) == 0
        && (0xfe10..=0xfe19).contains(&code)
        && !font.vert_backfilled
    {
        backfill_vertical_forms(font, data, options.collection_index);
    }
    let OpenFont {
        codemap,
        space_advance,
        cache,
        ..
    } = font;
    let offset = codemap.code_offset(code);
    cache.get_or_insert_with(code, || {
        if offset != 0 {
            if let Some(outline) = Outline::load(data, offset, codemap) {
                return Glyph::outline(outline);
            }
        }
        Glyph::space(*space_advance)
    })
}

/// Maps vertical presentation forms through the font's `vert` feature:
/// for each unmapped U+FE1x code whose base punctuation has a
/// substitute glyph, the substitute's outline offset is installed as
/// an alternate. Fonts without GSUB are left as they are.
fn backfill_vertical_forms(font: &mut OpenFont, data: FontData, collection_index: u32) {
    font.vert_backfilled = true;
    let Ok(font_ref) = FontRef::from_index(data, collection_index) else {
        return;
    };
    let Some(gsub_data) = font_ref.table_data(gsub::TAG) else {
        return;
    };
    let Ok(table) = gsub::Gsub::read(gsub_data) else {
        return;
    };
    let Ok(substitutions) = table.single_substitutions(DFLT, VERT) else {
        return;
    };
    for &(base, form) in VERTICAL_FORMS.iter() {
        if font.codemap.code_offset(form) != 0 {
            continue;
        }
        let base_glyph = font.codemap.glyph_id(base);
        if let Some(substitute) = substitutions.get(&base_glyph) {
            let offset = font.codemap.glyph_offset(*substitute);
            if offset != 0 {
                font.codemap.install_alternate(form, offset);
            }
        }
    }
}
