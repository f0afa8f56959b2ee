//! Reading SFNT font files.
//!
//! This crate parses the binary tables of TrueType fonts (and TrueType
//! collections) needed to map characters to glyphs and to fetch glyph
//! outlines. All parsing is zero-copy over borrowed bytes and every
//! read is bounds checked; malformed input produces a [`ReadError`],
//! never a panic.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod font_ref;
mod glyph_id;
mod raw;
mod read;
mod tag;

pub mod tables;

pub use font_data::{Cursor, FontData};
pub use font_ref::{CollectionRef, FontRef, TableRecord};
pub use glyph_id::GlyphId;
pub use raw::{I16Be, ReadScalar, U16Be, U32Be};
pub use read::{FontRead, ReadError};
pub use tag::Tag;
