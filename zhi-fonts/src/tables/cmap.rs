//! The [cmap](https://docs.microsoft.com/en-us/typography/opentype/spec/cmap) table
//!
//! Only [format 4] subtables are supported. The segment arrays are never
//! loaded; each field is read from its computed address when it is needed.
//!
//! [format 4]: https://learn.microsoft.com/en-us/typography/opentype/spec/cmap#format-4-segment-mapping-to-delta-values

use types::GlyphId;

use crate::font_data::{ByteSource, Cursor};
use crate::read::ReadError;

/// Size of an encoding record: platformID, encodingID, subtableOffset.
const ENCODING_RECORD_LEN: u64 = 8;
/// Offset of the endCode array from the start of a format 4 subtable.
const END_CODES_OFFSET: u64 = 14;

/// How to treat `idDelta` when a segment maps through the glyph id array.
///
/// The OpenType specification adds `idDelta` to a nonzero value found in the
/// glyph id array; some early readers returned the array value unchanged.
/// The two agree whenever such segments have an `idDelta` of zero, which is
/// what font compilers emit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphArrayDelta {
    /// `(value + idDelta) mod 65536`, as specified.
    #[default]
    Apply,
    /// The array value as stored.
    Ignore,
}

/// Returns `true` for the Unicode encodings a format 4 subtable is accepted
/// from: any platform 0 encoding, Windows BMP (3, 1) and Windows full
/// repertoire (3, 10).
pub fn is_unicode_encoding(platform_id: u16, encoding_id: u16) -> bool {
    matches!((platform_id, encoding_id), (0, _) | (3, 1) | (3, 10))
}

/// Map a code point to a glyph using the `cmap` table at `cmap_offset`.
///
/// Returns [`GlyphId::NOTDEF`] if the font has no usable format 4 subtable or
/// the subtable does not map `codepoint`.
pub fn map_codepoint<S: ByteSource + ?Sized>(
    source: &S,
    cmap_offset: u32,
    codepoint: u32,
) -> Result<GlyphId, ReadError> {
    map_codepoint_with(source, cmap_offset, codepoint, GlyphArrayDelta::default())
}

/// Like [`map_codepoint`], choosing how glyph id array values are adjusted.
pub fn map_codepoint_with<S: ByteSource + ?Sized>(
    source: &S,
    cmap_offset: u32,
    codepoint: u32,
    delta: GlyphArrayDelta,
) -> Result<GlyphId, ReadError> {
    let codepoint = check_codepoint(codepoint)?;
    match Cmap4::find(source, cmap_offset)? {
        Some(subtable) => subtable
            .with_glyph_array_delta(delta)
            .lookup(codepoint),
        None => {
            log::debug!("no unicode format 4 subtable in cmap");
            Ok(GlyphId::NOTDEF)
        }
    }
}

fn check_codepoint(codepoint: u32) -> Result<u16, ReadError> {
    u16::try_from(codepoint).map_err(|_| ReadError::UnicodeOutOfRange(codepoint))
}

/// An encoding record from the `cmap` header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    /// Offset of the subtable from the start of the `cmap` table.
    pub subtable_offset: u32,
}

impl EncodingRecord {
    /// `true` if a format 4 subtable behind this record may be used for
    /// lookups.
    pub fn is_unicode(&self) -> bool {
        is_unicode_encoding(self.platform_id, self.encoding_id)
    }
}

/// Read the encoding records of the `cmap` table at `cmap_offset`, in file
/// order.
pub fn encoding_records<S: ByteSource + ?Sized>(
    source: &S,
    cmap_offset: u32,
) -> Result<Vec<EncodingRecord>, ReadError> {
    let mut cursor = Cursor::at(source, cmap_offset.into())?;
    cursor.skip::<u16>()?; // version
    let num_tables = cursor.read_u16()?;
    (0..num_tables)
        .map(|_| {
            Ok(EncodingRecord {
                platform_id: cursor.read_u16()?,
                encoding_id: cursor.read_u16()?,
                subtable_offset: cursor.read_u32()?,
            })
        })
        .collect()
}

/// A located format 4 subtable.
pub struct Cmap4<'a, S: ?Sized> {
    source: &'a S,
    /// Absolute position of the subtable's format field.
    offset: u64,
    seg_count: u16,
    delta: GlyphArrayDelta,
}

impl<S: ?Sized> Clone for Cmap4<'_, S> {
    fn clone(&self) -> Self {
        Cmap4 {
            source: self.source,
            offset: self.offset,
            seg_count: self.seg_count,
            delta: self.delta,
        }
    }
}

impl<'a, S: ByteSource + ?Sized> Cmap4<'a, S> {
    /// Find the first format 4 subtable with a Unicode encoding.
    ///
    /// Encoding records are visited in file order; records with another
    /// encoding, or whose subtable has another format, are skipped.
    pub fn find(source: &'a S, cmap_offset: u32) -> Result<Option<Self>, ReadError> {
        let mut cursor = Cursor::at(source, cmap_offset.into())?;
        cursor.skip::<u16>()?; // version
        let num_tables = cursor.read_u16()?;
        let records_start = cursor.position();
        for i in 0..u64::from(num_tables) {
            cursor.seek(records_start + i * ENCODING_RECORD_LEN)?;
            let platform_id = cursor.read_u16()?;
            let encoding_id = cursor.read_u16()?;
            let subtable_offset = cursor.read_u32()?;
            if !is_unicode_encoding(platform_id, encoding_id) {
                continue;
            }
            let offset = u64::from(cmap_offset) + u64::from(subtable_offset);
            cursor.seek(offset)?;
            let format = cursor.read_u16()?;
            if format != 4 {
                log::debug!("skipping format {format} subtable ({platform_id}, {encoding_id})");
                continue;
            }
            cursor.skip::<u16>()?; // length
            cursor.skip::<u16>()?; // language
            let seg_count = cursor.read_u16()? / 2;
            log::debug!(
                "using format 4 subtable ({platform_id}, {encoding_id}) with {seg_count} segments"
            );
            return Ok(Some(Cmap4 {
                source,
                offset,
                seg_count,
                delta: GlyphArrayDelta::default(),
            }));
        }
        Ok(None)
    }

    /// Set how glyph id array values are adjusted.
    pub fn with_glyph_array_delta(mut self, delta: GlyphArrayDelta) -> Self {
        self.delta = delta;
        self
    }

    /// The number of segments, `segCountX2 / 2`.
    pub fn seg_count(&self) -> u16 {
        self.seg_count
    }

    fn end_codes(&self) -> u64 {
        self.offset + END_CODES_OFFSET
    }

    // endCode is followed by a two byte reservedPad
    fn start_codes(&self) -> u64 {
        self.end_codes() + 2 * u64::from(self.seg_count) + 2
    }

    fn id_deltas(&self) -> u64 {
        self.start_codes() + 2 * u64::from(self.seg_count)
    }

    fn id_range_offsets(&self) -> u64 {
        self.id_deltas() + 2 * u64::from(self.seg_count)
    }

    fn read_field(&self, array: u64, index: u16) -> Result<u16, ReadError> {
        Cursor::at(self.source, array + 2 * u64::from(index))?.read_u16()
    }

    /// Map a code point to a glyph.
    ///
    /// Segments are scanned in order and the scan stops at the first segment
    /// whose end code is not less than `codepoint`. If that segment starts
    /// after `codepoint` the result is [`GlyphId::NOTDEF`], even if a later
    /// segment would cover it.
    pub fn map_codepoint(&self, codepoint: u32) -> Result<GlyphId, ReadError> {
        self.lookup(check_codepoint(codepoint)?)
    }

    fn lookup(&self, codepoint: u16) -> Result<GlyphId, ReadError> {
        let mut end_codes = Cursor::at(self.source, self.end_codes())?;
        for index in 0..self.seg_count {
            let end_code = end_codes.read_u16()?;
            if end_code < codepoint {
                continue;
            }
            let start_code = self.read_field(self.start_codes(), index)?;
            log::trace!("U+{codepoint:04X}: stopped at segment {index} [{start_code}, {end_code}]");
            if start_code > codepoint {
                return Ok(GlyphId::NOTDEF);
            }
            return self.lookup_glyph_id(codepoint, index, start_code);
        }
        Ok(GlyphId::NOTDEF)
    }

    /// Does the final phase of glyph id lookup, once the segment is known.
    ///
    /// Shared between lookup and [`Cmap4Iter`].
    fn lookup_glyph_id(
        &self,
        codepoint: u16,
        index: u16,
        start_code: u16,
    ) -> Result<GlyphId, ReadError> {
        let id_delta = self.read_field(self.id_deltas(), index)?;
        let range_offset_pos = self.id_range_offsets() + 2 * u64::from(index);
        let id_range_offset = Cursor::at(self.source, range_offset_pos)?.read_u16()?;
        if id_range_offset == 0 {
            return Ok(GlyphId::new(codepoint.wrapping_add(id_delta)));
        }
        let glyph_pos = range_offset_pos
            + u64::from(id_range_offset)
            + 2 * u64::from(codepoint - start_code);
        let glyph = Cursor::at(self.source, glyph_pos)?.read_u16()?;
        if glyph == 0 {
            return Ok(GlyphId::NOTDEF);
        }
        Ok(GlyphId::new(match self.delta {
            GlyphArrayDelta::Apply => glyph.wrapping_add(id_delta),
            GlyphArrayDelta::Ignore => glyph,
        }))
    }

    fn code_range(&self, index: u16) -> Result<(u16, u16), ReadError> {
        Ok((
            self.read_field(self.start_codes(), index)?,
            self.read_field(self.end_codes(), index)?,
        ))
    }

    /// Returns an iterator over all (codepoint, glyph identifier) pairs
    /// in the subtable, skipping code points mapped to the missing glyph.
    ///
    /// The pairs are exactly those [`map_codepoint`](Self::map_codepoint)
    /// maps to a nonzero glyph.
    pub fn iter(&self) -> Cmap4Iter<'a, S> {
        Cmap4Iter {
            subtable: self.clone(),
            cur_range: 0..0,
            cur_start_code: 0,
            next_range_ix: 0,
            covered_below: 0,
            failed: false,
        }
    }
}

/// Iterator over all (codepoint, glyph identifier) pairs in
/// the subtable.
///
/// Segments are visited in file order. A code point already reached by the
/// end code of an earlier segment is skipped, since a lookup stops at that
/// segment. Iteration ends after the first read error.
pub struct Cmap4Iter<'a, S: ?Sized> {
    subtable: Cmap4<'a, S>,
    cur_range: std::ops::Range<u32>,
    cur_start_code: u16,
    next_range_ix: u16,
    // one past the largest end code seen so far
    covered_below: u32,
    failed: bool,
}

impl<S: ByteSource + ?Sized> Cmap4Iter<'_, S> {
    fn next_pair(&mut self) -> Result<Option<(u32, GlyphId)>, ReadError> {
        loop {
            if let Some(codepoint) = self.cur_range.next() {
                let glyph_id = self.subtable.lookup_glyph_id(
                    codepoint as u16,
                    self.next_range_ix - 1,
                    self.cur_start_code,
                )?;
                if glyph_id.is_notdef() {
                    continue;
                }
                return Ok(Some((codepoint, glyph_id)));
            }
            if self.next_range_ix >= self.subtable.seg_count {
                return Ok(None);
            }
            let (start, end) = self.subtable.code_range(self.next_range_ix)?;
            self.next_range_ix += 1;
            self.cur_start_code = start;
            // Use end + 1 here because the range in the table is inclusive
            let end = u32::from(end) + 1;
            self.cur_range = u32::from(start).max(self.covered_below)..end;
            self.covered_below = self.covered_below.max(end);
        }
    }
}

impl<S: ByteSource + ?Sized> Iterator for Cmap4Iter<'_, S> {
    type Item = Result<(u32, GlyphId), ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.next_pair();
        self.failed = next.is_err();
        next.transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::CountingSource;
    use zhi_test_data::cmap::{self, Segment};

    /// `{0x41..=0x41, delta -63}` plus the 0xFFFF terminator.
    fn single_segment_cmap() -> Vec<u8> {
        let subtable = cmap::format4(
            &[
                Segment::delta(0x41, 0x41, -63),
                Segment::delta(0xFFFF, 0xFFFF, 1),
            ],
            &[],
        );
        cmap::cmap_table(&[(3, 1, subtable)])
    }

    #[test]
    fn delta_segment() {
        let data = single_segment_cmap();
        assert_eq!(map_codepoint(data.as_slice(), 0, 0x41), Ok(GlyphId::new(2)));
    }

    #[test]
    fn one_shot_stop_at_terminator() {
        let data = single_segment_cmap();
        // the terminator is the first segment with end >= 0x42, and starts after it
        assert_eq!(map_codepoint(data.as_slice(), 0, 0x42), Ok(GlyphId::NOTDEF));
        assert_eq!(map_codepoint(data.as_slice(), 0, 0x20), Ok(GlyphId::NOTDEF));
    }

    #[test]
    fn terminator_wraps_to_zero() {
        let data = single_segment_cmap();
        assert_eq!(map_codepoint(data.as_slice(), 0, 0xFFFF), Ok(GlyphId::NOTDEF));
    }

    #[test]
    fn out_of_range_without_io() {
        let data = single_segment_cmap();
        let source = CountingSource::new(&data);
        assert_eq!(
            map_codepoint(&source, 0, 0x10000),
            Err(ReadError::UnicodeOutOfRange(0x10000))
        );
        assert_eq!(source.reads(), 0);
        // an empty source proves it too: any read would be out of bounds
        assert_eq!(
            map_codepoint(&[0u8; 0][..], 0, 0x1F600),
            Err(ReadError::UnicodeOutOfRange(0x1F600))
        );
    }

    #[test]
    fn unsorted_segments_stop_early() {
        // 0x50 is covered by the second segment, but the first one already
        // has end >= 0x50 and starts after it
        let subtable = cmap::format4(
            &[
                Segment::delta(0x60, 0x70, 0),
                Segment::delta(0x40, 0x58, 5),
                Segment::delta(0xFFFF, 0xFFFF, 1),
            ],
            &[],
        );
        let data = cmap::cmap_table(&[(0, 3, subtable)]);
        assert_eq!(map_codepoint(data.as_slice(), 0, 0x50), Ok(GlyphId::NOTDEF));
        assert_eq!(map_codepoint(data.as_slice(), 0, 0x65), Ok(GlyphId::new(0x65)));
    }

    #[test]
    fn glyph_id_array() {
        let data = cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]);
        let map = |cp| map_codepoint(data.as_slice(), 0, cp).unwrap().to_u16();
        assert_eq!(map(0x20), 1);
        assert_eq!(map(0x41), 2);
        assert_eq!(map(0x42), 3);
        assert_eq!(map(0x61), 2);
        // an explicit zero in the glyph id array
        assert_eq!(map(0x62), 0);
        assert_eq!(map(0x63), 3);
        assert_eq!(map(0x64), 0);
    }

    #[test]
    fn glyph_array_delta_modes() {
        let data = cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]);
        // '~' maps through the glyph id array with an idDelta of 1
        let apply = map_codepoint_with(data.as_slice(), 0, 0x7E, GlyphArrayDelta::Apply);
        assert_eq!(apply, Ok(GlyphId::new(4)));
        let ignore = map_codepoint_with(data.as_slice(), 0, 0x7E, GlyphArrayDelta::Ignore);
        assert_eq!(ignore, Ok(GlyphId::new(3)));
    }

    #[test]
    fn subtable_selection() {
        let mac_roman = cmap::format0();
        let format6 = cmap::format6();
        let unicode = cmap::format4(
            &[
                Segment::delta(0x41, 0x41, 7),
                Segment::delta(0xFFFF, 0xFFFF, 1),
            ],
            &[],
        );
        let data = cmap::cmap_table(&[
            (1, 0, mac_roman),
            (3, 10, format6),
            (3, 1, unicode),
        ]);
        let subtable = Cmap4::find(data.as_slice(), 0).unwrap().unwrap();
        assert_eq!(subtable.seg_count(), 2);
        assert_eq!(subtable.map_codepoint(0x41), Ok(GlyphId::new(0x48)));
    }

    #[test]
    fn no_usable_subtable() {
        let data = cmap::cmap_table(&[(1, 0, cmap::format0()), (3, 0, cmap::format4_fixture())]);
        assert!(Cmap4::find(data.as_slice(), 0).unwrap().is_none());
        assert_eq!(map_codepoint(data.as_slice(), 0, 0x41), Ok(GlyphId::NOTDEF));
    }

    #[test]
    fn offset_cmap() {
        let mut data = vec![0u8; 10];
        data.extend(cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]));
        assert_eq!(map_codepoint(data.as_slice(), 10, 0x42), Ok(GlyphId::new(3)));
    }

    #[test]
    fn records() {
        let data = cmap::cmap_table(&[(1, 0, cmap::format0()), (3, 1, cmap::format4_fixture())]);
        let records = encoding_records(data.as_slice(), 0).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!((records[0].platform_id, records[0].encoding_id), (1, 0));
        assert_eq!((records[1].platform_id, records[1].encoding_id), (3, 1));
        assert!(records[1].subtable_offset > records[0].subtable_offset);
        assert!(!records[0].is_unicode());
        assert!(records[1].is_unicode());
    }

    #[test]
    fn truncated_subtable() {
        let mut data = cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]);
        data.truncate(data.len() - 12);
        // the glyph id array is gone
        assert_eq!(
            map_codepoint(data.as_slice(), 0, 0x61),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn iter() {
        let data = cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]);
        let subtable = Cmap4::find(data.as_slice(), 0).unwrap().unwrap();
        let pairs = subtable
            .iter()
            .map(|pair| pair.map(|(cp, gid)| (cp, gid.to_u16())))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(
            pairs,
            [(0x20, 1), (0x41, 2), (0x42, 3), (0x61, 2), (0x63, 3), (0x7E, 4)]
        );
    }

    #[test]
    fn iter_reports_truncation() {
        let mut data = cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]);
        data.truncate(data.len() - 4);
        let subtable = Cmap4::find(data.as_slice(), 0).unwrap().unwrap();
        let pairs = subtable.iter().collect::<Vec<_>>();
        assert_eq!(pairs.last(), Some(&Err(ReadError::OutOfBounds)));
        assert_eq!(
            pairs.iter().filter(|pair| pair.is_err()).count(),
            1,
            "iteration stops after the first error"
        );
        assert!(pairs[..pairs.len() - 1].iter().all(Result::is_ok));
    }

    #[test]
    fn iter_follows_lookup_stop() {
        let subtable = cmap::format4(
            &[
                Segment::delta(0x60, 0x62, 0),
                Segment::delta(0x40, 0x61, 5),
                Segment::delta(0x60, 0x64, 0x10),
                Segment::delta(0xFFFF, 0xFFFF, 1),
            ],
            &[],
        );
        let data = cmap::cmap_table(&[(0, 3, subtable)]);
        let subtable = Cmap4::find(data.as_slice(), 0).unwrap().unwrap();
        let pairs = subtable
            .iter()
            .map(|pair| pair.map(|(cp, gid)| (cp, gid.to_u16())))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        // the second segment is wholly shadowed; the third contributes only
        // what lies past the first one's end
        assert_eq!(
            pairs,
            [(0x60, 0x60), (0x61, 0x61), (0x62, 0x62), (0x63, 0x73), (0x64, 0x74)]
        );
        for cp in 0x30..0x70 {
            let expected = pairs
                .iter()
                .find(|(pair_cp, _)| *pair_cp == cp)
                .map_or(0, |(_, gid)| *gid);
            assert_eq!(subtable.map_codepoint(cp).unwrap().to_u16(), expected, "U+{cp:04X}");
        }
    }
}
