//! The sfnt [table directory](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory)

use types::Tag;

use crate::font_data::{ByteSource, Cursor};
use crate::read::ReadError;

/// The size in bytes of the header preceding the table records.
pub const HEADER_LEN: u64 = 12;
/// The size in bytes of one table record.
pub const TABLE_RECORD_LEN: u64 = 16;

/// One entry of the table directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    /// Offset of the table from the start of the font data.
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    fn read<S: ByteSource + ?Sized>(cursor: &mut Cursor<S>) -> Result<Self, ReadError> {
        Ok(TableRecord {
            tag: cursor.read()?,
            checksum: cursor.read_u32()?,
            offset: cursor.read_u32()?,
            length: cursor.read_u32()?,
        })
    }
}

/// The header of the table directory, with lazy access to its records.
pub struct TableDirectory<'a, S: ?Sized> {
    source: &'a S,
    sfnt_version: Tag,
    num_tables: u16,
    records_start: u64,
}

impl<'a, S: ByteSource + ?Sized> TableDirectory<'a, S> {
    /// Read the directory at the start of `source`.
    pub fn read(source: &'a S) -> Result<Self, ReadError> {
        Self::read_at(source, 0)
    }

    /// Read a directory that begins at `offset`.
    pub fn read_at(source: &'a S, offset: u64) -> Result<Self, ReadError> {
        let mut cursor = Cursor::at(source, offset)?;
        let sfnt_version = cursor.read()?;
        let num_tables = cursor.read_u16()?;
        cursor.skip::<u16>()?; // searchRange
        cursor.skip::<u16>()?; // entrySelector
        cursor.skip::<u16>()?; // rangeShift
        Ok(TableDirectory {
            source,
            sfnt_version,
            num_tables,
            records_start: cursor.position(),
        })
    }

    /// The scaler type, e.g. `0x00010000` or `true` for TrueType outlines.
    pub fn sfnt_version(&self) -> Tag {
        self.sfnt_version
    }

    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    /// Iterate over the table records in file order.
    pub fn records(&self) -> TableRecords<'a, S> {
        TableRecords {
            cursor: Cursor::at(self.source, self.records_start).ok(),
            remaining: self.num_tables,
        }
    }

    /// Scan every record for the tables the outline reader needs.
    ///
    /// When a tag appears more than once the last record wins. Other tags
    /// are ignored.
    pub fn required_tables(&self) -> Result<RequiredTables, ReadError> {
        let mut cmap = None;
        let mut glyf = None;
        let mut loca = None;
        let mut head = None;
        for record in self.records() {
            let record = record?;
            let slot = match &record.tag.to_be_bytes() {
                b"cmap" => &mut cmap,
                b"glyf" => &mut glyf,
                b"loca" => &mut loca,
                b"head" => &mut head,
                _ => continue,
            };
            log::debug!(
                "found '{}' at 0x{:08X} ({} bytes)",
                record.tag,
                record.offset,
                record.length
            );
            *slot = Some(record);
        }
        Ok(RequiredTables {
            cmap: cmap.ok_or(ReadError::TableIsMissing(CMAP))?,
            glyf: glyf.ok_or(ReadError::TableIsMissing(GLYF))?,
            loca: loca.ok_or(ReadError::TableIsMissing(LOCA))?,
            head: head.ok_or(ReadError::TableIsMissing(HEAD))?,
        })
    }
}

const CMAP: Tag = Tag::new(b"cmap");
const GLYF: Tag = Tag::new(b"glyf");
const LOCA: Tag = Tag::new(b"loca");
const HEAD: Tag = Tag::new(b"head");

/// The directory records for the four tables the reader uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequiredTables {
    pub cmap: TableRecord,
    pub glyf: TableRecord,
    pub loca: TableRecord,
    pub head: TableRecord,
}

/// Iterator over the records of a [`TableDirectory`].
///
/// Stops after the first error.
pub struct TableRecords<'a, S: ?Sized> {
    cursor: Option<Cursor<'a, S>>,
    remaining: u16,
}

impl<S: ByteSource + ?Sized> Iterator for TableRecords<'_, S> {
    type Item = Result<TableRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let Some(cursor) = self.cursor.as_mut() else {
            self.remaining = 0;
            return Some(Err(ReadError::OutOfBounds));
        };
        self.remaining -= 1;
        let record = TableRecord::read(cursor);
        if record.is_err() {
            self.remaining = 0;
        }
        Some(record)
    }
}
