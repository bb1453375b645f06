//! The [head](https://docs.microsoft.com/en-us/typography/opentype/spec/head) table
//!
//! Only `indexToLocFormat` is read; everything before it is skipped by
//! width and nothing (not even the magic number) is validated.

use crate::font_data::{ByteSource, Cursor};
use crate::read::ReadError;

/// Byte offset of `indexToLocFormat` from the start of the table.
pub const INDEX_TO_LOC_FORMAT_OFFSET: u64 = 50;

/// Read the raw `indexToLocFormat` field of the `head` table at `head_offset`.
///
/// Use [`LocFormat::from_index_to_loc_format`](super::loca::LocFormat::from_index_to_loc_format)
/// to interpret the result.
pub fn read_index_to_loc_format<S: ByteSource + ?Sized>(
    source: &S,
    head_offset: u32,
) -> Result<i16, ReadError> {
    let mut cursor = Cursor::at(source, head_offset.into())?;
    cursor.skip::<u32>()?; // version
    cursor.skip::<u32>()?; // fontRevision
    cursor.skip::<u32>()?; // checksumAdjustment
    cursor.skip::<u32>()?; // magicNumber
    cursor.skip::<u16>()?; // flags
    cursor.skip::<u16>()?; // unitsPerEm
    cursor.skip::<u64>()?; // created
    cursor.skip::<u64>()?; // modified
    cursor.skip::<i16>()?; // xMin
    cursor.skip::<i16>()?; // yMin
    cursor.skip::<i16>()?; // xMax
    cursor.skip::<i16>()?; // yMax
    cursor.skip::<u16>()?; // macStyle
    cursor.skip::<u16>()?; // lowestRecPPEM
    cursor.skip::<i16>()?; // fontDirectionHint
    debug_assert_eq!(
        cursor.position() - u64::from(head_offset),
        INDEX_TO_LOC_FORMAT_OFFSET
    );
    cursor.read_i16()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhi_test_data::{be_buffer, head::head_table};

    #[test]
    fn reads_index_to_loc_format() {
        let short = head_table(0);
        assert_eq!(read_index_to_loc_format(short.as_slice(), 0), Ok(0));
        let long = head_table(1);
        assert_eq!(read_index_to_loc_format(long.as_slice(), 0), Ok(1));
    }

    #[test]
    fn honours_table_offset() {
        let mut data = vec![0xAA; 6];
        data.extend_from_slice(&head_table(1));
        assert_eq!(read_index_to_loc_format(data.as_slice(), 6), Ok(1));
    }

    #[test]
    fn magic_is_not_checked() {
        let mut head = head_table(0);
        head[12..16].copy_from_slice(&[0, 0, 0, 0]);
        assert_eq!(read_index_to_loc_format(head.as_slice(), 0), Ok(0));
    }

    #[test]
    fn other_values_are_returned_raw() {
        let mut head = head_table(0);
        head[50..52].copy_from_slice(&(-3i16).to_be_bytes());
        assert_eq!(read_index_to_loc_format(head.as_slice(), 0), Ok(-3));
    }

    #[test]
    fn truncated() {
        let buf = be_buffer! { 0x00010000u32, 0u32, 0u32, 0x5F0F3CF5u32 };
        assert_eq!(
            read_index_to_loc_format(buf.as_slice(), 0),
            Err(ReadError::OutOfBounds)
        );
    }
}
