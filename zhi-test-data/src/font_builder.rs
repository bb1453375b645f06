//! A builder for complete sfnt files

use std::collections::BTreeMap;

use zhi_types::{Tag, TT_SFNT_VERSION};

use crate::bebuffer::BeBuffer;

const TABLE_RECORD_LEN: usize = 16;

/// Build a font from some set of raw tables.
///
/// Tables are written in tag order, each padded to four bytes, after a
/// directory with correct checksums and search hints.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    tables: BTreeMap<Tag, Vec<u8>>,
}

impl FontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Vec<u8>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&self) -> Vec<u8> {
        let num_tables = self.tables.len() as u16;
        let entry_selector = num_tables.checked_ilog2().unwrap_or(0) as u16;
        let search_range = (1u16 << entry_selector) * TABLE_RECORD_LEN as u16;
        let range_shift = (num_tables * TABLE_RECORD_LEN as u16).saturating_sub(search_range);

        let mut directory = BeBuffer::new()
            .push(TT_SFNT_VERSION)
            .push(num_tables)
            .push(search_range)
            .push(entry_selector)
            .push(range_shift);

        let mut position = (12 + self.tables.len() * TABLE_RECORD_LEN) as u32;
        for (tag, data) in &self.tables {
            directory = directory
                .push(*tag)
                .push(checksum(data))
                .push(position)
                .push(data.len() as u32);
            position += round4(data.len()) as u32;
        }

        let mut font = directory.into_vec();
        for data in self.tables.values() {
            font.extend_from_slice(data);
            font.resize(round4(font.len()), 0);
        }
        font
    }
}

/// <https://github.com/google/woff2/blob/a0d0ed7da27b708c0a4e96ad7a998bddc933c06e/src/round.h#L19>
fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

/// The sum of the table as big-endian u32s, zero padded.
fn checksum(data: &[u8]) -> u32 {
    data.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}
