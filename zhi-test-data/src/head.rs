//! head table data

use crate::be_buffer;

/// A 54-byte version 1.0 `head` table.
///
/// Fields the reader never looks at hold recognisable values, so a reader
/// that lands on the wrong field returns something obviously wrong.
pub fn head_table(index_to_loc_format: i16) -> Vec<u8> {
    be_buffer! {
        0x00010000u32,      // version 1.0
        0x00028000u32,      // fontRevision 2.5
        0xB1B0AFBAu32,      // checksumAdjustment
        0x5F0F3CF5u32,      // magicNumber
        0x000Bu16,          // flags
        1000u16,            // unitsPerEm
        0x0000_0000_DEAD_BEEFu64, // created
        0x0000_0000_FEED_FACEu64, // modified
        (-120i16),          // xMin
        (-250i16),          // yMin
        1200i16,            // xMax
        900i16,             // yMax
        0u16,               // macStyle
        8u16,               // lowestRecPPEM
        2i16,               // fontDirectionHint
        index_to_loc_format,
        0i16                // glyphDataFormat
    }
    .into_vec()
}

#[cfg(test)]
mod tests {
    #[test]
    fn layout() {
        let head = super::head_table(1);
        assert_eq!(head.len(), 54);
        assert_eq!(head[12..16], [0x5F, 0x0F, 0x3C, 0xF5]);
        assert_eq!(head[50..52], [0, 1]);
    }
}
