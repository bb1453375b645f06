//! cmap test data for scenarios not readily produced with a font compiler

use crate::{be_buffer, bebuffer::BeBuffer};

/// One segment of a format 4 subtable.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub start: u16,
    pub end: u16,
    pub id_delta: i16,
    /// Index of the segment's first entry in the glyph id array, if it maps
    /// through the array.
    pub array_index: Option<u16>,
}

impl Segment {
    /// A segment mapping by `idDelta` alone.
    pub fn delta(start: u16, end: u16, id_delta: i16) -> Self {
        Segment {
            start,
            end,
            id_delta,
            array_index: None,
        }
    }

    /// A segment mapping through the glyph id array, starting at
    /// `array_index`.
    pub fn array(start: u16, end: u16, id_delta: i16, array_index: u16) -> Self {
        Segment {
            start,
            end,
            id_delta,
            array_index: Some(array_index),
        }
    }
}

/// Compile a format 4 subtable.
///
/// `idRangeOffset` is computed for segments with an array index; the search
/// hints are filled in even though the reader ignores them.
pub fn format4(segments: &[Segment], glyph_ids: &[u16]) -> Vec<u8> {
    let seg_count = segments.len() as u16;
    let length = 16 + 8 * seg_count + 2 * glyph_ids.len() as u16;
    let entry_selector = seg_count.checked_ilog2().unwrap_or(0) as u16;
    let search_range = 2 * (1u16 << entry_selector);
    let range_offsets = segments.iter().enumerate().map(|(i, seg)| {
        seg.array_index
            .map(|ix| 2 * (seg_count - i as u16) + 2 * ix)
            .unwrap_or(0)
    });
    be_buffer! {
        4u16,                   // format
        length,
        0u16,                   // language
        (seg_count * 2),        // segCountX2
        search_range,
        entry_selector,
        (seg_count * 2 - search_range) // rangeShift
    }
    .extend(segments.iter().map(|seg| seg.end))
    .push(0u16) // reservedPad
    .extend(segments.iter().map(|seg| seg.start))
    .extend(segments.iter().map(|seg| seg.id_delta))
    .extend(range_offsets)
    .extend(glyph_ids.iter().copied())
    .into_vec()
}

/// A format 4 subtable with every kind of segment.
///
/// | segment | codepoints | mapping |
/// |---|---|---|
/// | 0 | `' '` | idDelta -31 → 1 |
/// | 1 | `'A'..='B'` | idDelta -63 → 2, 3 |
/// | 2 | `'a'..='c'` | glyph id array `[2, 0, 3]` |
/// | 3 | `'~'` | glyph id array `[3]` with idDelta 1 |
/// | 4 | `0xFFFF` | terminator, idDelta 1 → 0 |
pub fn format4_fixture() -> Vec<u8> {
    format4(
        &[
            Segment::delta(0x20, 0x20, -31),
            Segment::delta(0x41, 0x42, -63),
            Segment::array(0x61, 0x63, 0, 0),
            Segment::array(0x7E, 0x7E, 1, 3),
            Segment::delta(0xFFFF, 0xFFFF, 1),
        ],
        &[2, 0, 3, 3],
    )
}

/// A format 0 (byte encoding) subtable mapping every code to glyph 1.
pub fn format0() -> Vec<u8> {
    be_buffer! {
        0u16,       // format
        262u16,     // length
        0u16        // language
    }
    .extend([1u8; 256])
    .into_vec()
}

/// A format 6 (trimmed table) subtable mapping `'A'..='C'` to glyphs 1..=3.
pub fn format6() -> Vec<u8> {
    be_buffer! {
        6u16,       // format
        16u16,      // length
        0u16,       // language
        0x41u16,    // firstCode
        3u16,       // entryCount
        [1u16, 2, 3]
    }
    .into_vec()
}

/// Assemble a `cmap` table from `(platformID, encodingID, subtable)`
/// triples, with subtables stored in the same order as their records.
pub fn cmap_table(subtables: &[(u16, u16, Vec<u8>)]) -> Vec<u8> {
    let mut offset = 4 + 8 * subtables.len() as u32;
    let mut buf = be_buffer! {
        0u16, // version
        (subtables.len() as u16)
    };
    for (platform_id, encoding_id, data) in subtables {
        buf = buf.push(*platform_id).push(*encoding_id).push(offset);
        offset += data.len() as u32;
    }
    subtables
        .iter()
        .fold(buf, |buf: BeBuffer, (_, _, data)| buf.extend_bytes(data))
        .into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format4_layout() {
        let data = format4_fixture();
        // header, 4 arrays of 5 segments, reservedPad, 4 glyph ids
        assert_eq!(data.len(), 14 + 40 + 2 + 8);
        assert_eq!(data[2..4], (data.len() as u16).to_be_bytes());
        // segCountX2, searchRange, entrySelector, rangeShift
        assert_eq!(data[6..14], [0, 10, 0, 8, 0, 2, 0, 2]);
        // idRangeOffset[2] and [3]
        assert_eq!(data[50..54], [0, 6, 0, 10]);
    }

    #[test]
    fn record_offsets() {
        let data = cmap_table(&[(1, 0, format0()), (3, 1, format6())]);
        assert_eq!(data[0..4], [0, 0, 0, 2]);
        assert_eq!(data[8..12], 20u32.to_be_bytes());
        assert_eq!(data[16..20], (20u32 + 262).to_be_bytes());
        assert_eq!(data.len(), 20 + 262 + 16);
    }
}
