//! Traits and errors for interpreting font data.

use crate::font_data::FontData;
use crate::tag::Tag;

/// A type that can be read from raw table data.
///
/// This is implemented by tables that are self-describing: that is,
/// tables that do not need external state in order to interpret their
/// underlying bytes. Tables that do (for instance `hmtx`, which needs
/// counts from `hhea` and `maxp`) provide their own `read` constructors
/// that take those arguments.
pub trait FontRead<'a>: Sized {
    /// Read an instance of `Self` from the provided data, performing
    /// validation.
    ///
    /// The data is expected to begin at the first byte of the table.
    fn read(data: FontData<'a>) -> Result<Self, ReadError>;
}

/// An error that occurs when reading font data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    OutOfBounds,
    // i64 is flexible enough to store any format value we might see
    InvalidFormat(i64),
    InvalidSfnt(u32),
    InvalidTtc(Tag),
    InvalidCollectionIndex(u32),
    TableIsMissing(Tag),
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::InvalidFormat(x) => write!(f, "Invalid format '{x}'"),
            ReadError::InvalidSfnt(ver) => write!(f, "Invalid sfnt version 0x{ver:08X}"),
            ReadError::InvalidTtc(tag) => write!(f, "Invalid ttc tag {tag}"),
            ReadError::InvalidCollectionIndex(ix) => {
                write!(f, "Invalid index {ix} for font collection")
            }
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::MalformedData(msg) => write!(f, "Malformed data: '{msg}'"),
        }
    }
}

impl std::error::Error for ReadError {}
