//! Text rendering for TrueType fonts.
//!
//! This crate turns raw font bytes and a UTF-16 string into a packed
//! bitmap or a BMP data URI, with no OS font facilities involved. It
//! sits on top of [`read_sfnt`] for binary parsing and adds the
//! mutable machinery rendering needs: a chunked codepoint map, outline
//! loading with composite resolution, a scanline rasterizer, script
//! shaping and reordering, a bounded glyph cache, and BMP encoding.
//!
//! The entry point is [`FontReader`]:
//!
//! ```no_run
//! use rastype::FontReader;
//!
//! # let font_bytes: &[u8] = &[];
//! let mut reader = FontReader::new(font_bytes);
//! let text: Vec<u16> = "hello".encode_utf16().collect();
//! let uri = reader.get_bitmap(&text, 24.0, 256, 32, &[0xffffff, 0x000000]);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bmp;
mod cache;
mod codemap;
mod outline;
mod raster;
mod reader;
mod shape;

pub use reader::{FontReader, Options};
pub use shape::CharacterIterator;
