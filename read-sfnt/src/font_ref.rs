//! The sfnt table directory and TrueType collection header.

use crate::font_data::FontData;
use crate::read::ReadError;
use crate::tag::Tag;

/// The OpenType sfnt version (1.0).
const SFNT_VERSION: u32 = 0x00010000;
/// The legacy Macintosh 'true' sfnt version, accepted for compatibility.
const TRUE_VERSION: u32 = 0x74727565;
/// The 'ttcf' tag marking a TrueType collection.
const TTC_TAG: Tag = Tag::new(b"ttcf");

/// A single table record in the font directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

/// A reference to an in-memory font.
///
/// This is the entry point for accessing the tables of a single font.
/// For TrueType collections (`.ttc`), use [`FontRef::from_index`] or
/// [`CollectionRef`] to select a member font.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    records: Vec<TableRecord>,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font.
    ///
    /// If the data is a font collection, this returns the font at
    /// index 0.
    pub fn new(data: FontData<'a>) -> Result<Self, ReadError> {
        let tag = data.read_at::<u32>(0)?;
        if tag == TTC_TAG.to_u32() {
            CollectionRef::new(data)?.get(0)
        } else {
            Self::with_offset(data, 0)
        }
    }

    /// Creates a new reference to the font at `index` within the given
    /// data, which may be a single font or a collection.
    pub fn from_index(data: FontData<'a>, index: u32) -> Result<Self, ReadError> {
        let tag = data.read_at::<u32>(0)?;
        if tag == TTC_TAG.to_u32() {
            CollectionRef::new(data)?.get(index)
        } else if index == 0 {
            Self::with_offset(data, 0)
        } else {
            Err(ReadError::InvalidCollectionIndex(index))
        }
    }

    /// Reads a table directory beginning at `offset` within `data`.
    ///
    /// `data` is the whole font file; table record offsets are relative
    /// to its start.
    fn with_offset(data: FontData<'a>, offset: usize) -> Result<Self, ReadError> {
        let version = data.read_at::<u32>(offset)?;
        if version != SFNT_VERSION && version != TRUE_VERSION {
            return Err(ReadError::InvalidSfnt(version));
        }
        let num_tables = data.read_at::<u16>(offset + 4)?;
        let mut records = Vec::with_capacity(num_tables as usize);
        let mut record_offset = offset + 12;
        for _ in 0..num_tables {
            records.push(TableRecord {
                tag: data.read_at::<Tag>(record_offset)?,
                checksum: data.read_at::<u32>(record_offset + 4)?,
                offset: data.read_at::<u32>(record_offset + 8)?,
                length: data.read_at::<u32>(record_offset + 12)?,
            });
            record_offset += 16;
        }
        Ok(FontRef { data, records })
    }

    /// The records of the table directory, in file order.
    pub fn table_records(&self) -> &[TableRecord] {
        &self.records
    }

    /// The raw data of the whole font file.
    pub fn offset_data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the data for the table with the given tag, if present.
    ///
    /// The returned data is sliced to the table's declared length,
    /// clamped to the end of the file.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let record = self.records.iter().find(|record| record.tag == tag)?;
        let start = record.offset as usize;
        let end = start.checked_add(record.length as usize)?;
        self.data
            .slice(start..end.min(self.data.len()))
            .filter(|data| !data.is_empty())
    }

    pub fn expect_table_data(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.table_data(tag).ok_or(ReadError::TableIsMissing(tag))
    }

    /// The absolute byte offset of the table with this tag, if present.
    pub fn table_offset(&self, tag: Tag) -> Option<u32> {
        self.records
            .iter()
            .find(|record| record.tag == tag)
            .map(|record| record.offset)
    }
}

/// A reference to an in-memory TrueType collection.
#[derive(Clone, Copy)]
pub struct CollectionRef<'a> {
    data: FontData<'a>,
    num_fonts: u32,
}

impl<'a> CollectionRef<'a> {
    /// Creates a new reference to an in-memory font collection.
    pub fn new(data: FontData<'a>) -> Result<Self, ReadError> {
        let tag = data.read_at::<Tag>(0)?;
        if tag != TTC_TAG {
            return Err(ReadError::InvalidTtc(tag));
        }
        // header version 1.0 or 2.0; field is unused beyond validation
        let version = data.read_at::<u32>(4)?;
        if version != 0x00010000 && version != 0x00020000 {
            return Err(ReadError::InvalidFormat(version as i64));
        }
        let num_fonts = data.read_at::<u32>(8)?;
        Ok(CollectionRef { data, num_fonts })
    }

    /// The number of fonts in the collection.
    pub fn len(&self) -> u32 {
        self.num_fonts
    }

    pub fn is_empty(&self) -> bool {
        self.num_fonts == 0
    }

    /// Returns the font at `index` within the collection.
    pub fn get(&self, index: u32) -> Result<FontRef<'a>, ReadError> {
        if index >= self.num_fonts {
            return Err(ReadError::InvalidCollectionIndex(index));
        }
        let offset = self.data.read_at::<u32>(12 + index as usize * 4)?;
        FontRef::with_offset(self.data, offset as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_sfnt_version() {
        let bytes = 0x00020000u32.to_be_bytes();
        let mut data = bytes.to_vec();
        data.extend_from_slice(&[0; 8]);
        assert!(matches!(
            FontRef::new(FontData::new(&data)),
            Err(ReadError::InvalidSfnt(0x00020000))
        ));
    }

    #[test]
    fn accepts_legacy_true_version() {
        let mut data = b"true".to_vec();
        data.extend_from_slice(&[0; 8]); // zero tables
        assert!(FontRef::new(FontData::new(&data)).is_ok());
    }

    #[test]
    fn collection_index_out_of_range() {
        let mut data = b"ttcf".to_vec();
        data.extend_from_slice(&0x00010000u32.to_be_bytes());
        data.extend_from_slice(&1u32.to_be_bytes());
        data.extend_from_slice(&12u32.to_be_bytes());
        let collection = CollectionRef::new(FontData::new(&data)).unwrap();
        assert_eq!(collection.len(), 1);
        assert!(matches!(
            collection.get(1),
            Err(ReadError::InvalidCollectionIndex(1))
        ));
    }
}
