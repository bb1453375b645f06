//! The per-font summary every lookup starts from

use types::{GlyphId, Tag, TRUE_SFNT_VERSION, TT_SFNT_VERSION};

use crate::font_data::ByteSource;
use crate::read::ReadError;
use crate::tables::cmap::{self, GlyphArrayDelta};
use crate::tables::directory::{TableDirectory, TableRecord};
use crate::tables::glyf::{self, GlyphOutline};
use crate::tables::head;
use crate::tables::loca::{self, LocFormat};

/// Where the `cmap`, `glyf`, `loca` and `head` tables live, and how `loca`
/// is encoded.
///
/// Built once with [`FontInfo::read`]. It holds no reference to the font
/// data, so it can be copied freely and shared between threads; every
/// lookup takes the byte source it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontInfo {
    sfnt_version: Tag,
    num_tables: u16,
    cmap: TableRecord,
    glyf: TableRecord,
    loca: TableRecord,
    head: TableRecord,
    index_to_loc_format: i16,
    loc_format: LocFormat,
}

impl FontInfo {
    /// Read the table directory and `head` table of the font in `source`.
    ///
    /// Fails with [`ReadError::TableIsMissing`] if any of the four tables
    /// is absent.
    pub fn read<S: ByteSource + ?Sized>(source: &S) -> Result<Self, ReadError> {
        let directory = TableDirectory::read(source)?;
        let sfnt_version = directory.sfnt_version().to_u32();
        if sfnt_version != TT_SFNT_VERSION && sfnt_version != TRUE_SFNT_VERSION {
            log::warn!("unexpected sfnt version 0x{sfnt_version:08X}");
        }
        let tables = directory.required_tables()?;
        let index_to_loc_format = head::read_index_to_loc_format(source, tables.head.offset)?;
        let loc_format = LocFormat::from_index_to_loc_format(index_to_loc_format);
        log::debug!(
            "font '{}' with {} tables, {:?} loca",
            directory.sfnt_version(),
            directory.num_tables(),
            loc_format
        );
        Ok(FontInfo {
            sfnt_version: directory.sfnt_version(),
            num_tables: directory.num_tables(),
            cmap: tables.cmap,
            glyf: tables.glyf,
            loca: tables.loca,
            head: tables.head,
            index_to_loc_format,
            loc_format,
        })
    }

    /// The scaler type from the start of the font.
    pub fn sfnt_version(&self) -> Tag {
        self.sfnt_version
    }

    /// The number of tables in the directory, including those not used here.
    pub fn num_tables(&self) -> u16 {
        self.num_tables
    }

    pub fn cmap(&self) -> TableRecord {
        self.cmap
    }

    pub fn glyf(&self) -> TableRecord {
        self.glyf
    }

    pub fn loca(&self) -> TableRecord {
        self.loca
    }

    pub fn head(&self) -> TableRecord {
        self.head
    }

    /// The `indexToLocFormat` value as stored in `head`.
    pub fn index_to_loc_format(&self) -> i16 {
        self.index_to_loc_format
    }

    pub fn loc_format(&self) -> LocFormat {
        self.loc_format
    }

    /// Map a code point to a glyph through the font's format 4 `cmap`.
    pub fn map_codepoint<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        codepoint: u32,
    ) -> Result<GlyphId, ReadError> {
        cmap::map_codepoint(source, self.cmap.offset, codepoint)
    }

    /// Like [`map_codepoint`](Self::map_codepoint), choosing how glyph id
    /// array values are adjusted.
    pub fn map_codepoint_with<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        codepoint: u32,
        delta: GlyphArrayDelta,
    ) -> Result<GlyphId, ReadError> {
        cmap::map_codepoint_with(source, self.cmap.offset, codepoint, delta)
    }

    /// The offset of a glyph's data relative to the start of `glyf`.
    pub fn glyph_offset<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        glyph: GlyphId,
    ) -> Result<u32, ReadError> {
        loca::resolve(source, glyph, self.loca.offset, self.loc_format)
    }

    /// Decode the outline of a simple glyph.
    ///
    /// A glyph whose `loca` range is empty has no data and yields an empty
    /// outline.
    pub fn outline<S: ByteSource + ?Sized>(
        &self,
        source: &S,
        glyph: GlyphId,
    ) -> Result<GlyphOutline, ReadError> {
        let range = loca::resolve_range(source, glyph, self.loca.offset, self.loc_format)?;
        if range.is_empty() {
            log::debug!("{glyph} has no outline data");
            return Ok(GlyphOutline::default());
        }
        glyf::decode(source, u64::from(self.glyf.offset) + u64::from(range.start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::glyf::CurvePoint;
    use crate::test_helpers::CountingSource;
    use pretty_assertions::assert_eq;
    use zhi_test_data::glyf as fixtures;
    use zhi_test_data::{simple_font, FontBuilder};

    #[test]
    fn read_short_font() {
        let font = simple_font(0);
        let info = FontInfo::read(font.as_slice()).unwrap();
        assert_eq!(info.sfnt_version(), Tag::from_u32(types::TT_SFNT_VERSION));
        // cmap, glyf, head, loca and name
        assert_eq!(info.num_tables(), 5);
        assert_eq!(info.loc_format(), LocFormat::Short);
        assert_eq!(info.index_to_loc_format(), 0);
        assert_eq!(info.cmap().tag, Tag::new(b"cmap"));
        assert_eq!(info.head().length, 54);
    }

    #[test]
    fn long_and_short_agree() {
        let short = simple_font(0);
        let long = simple_font(1);
        let short_info = FontInfo::read(short.as_slice()).unwrap();
        let long_info = FontInfo::read(long.as_slice()).unwrap();
        assert_eq!(long_info.loc_format(), LocFormat::Long);
        for gid in 0..fixtures::NUM_GLYPHS {
            let gid = GlyphId::new(gid);
            assert_eq!(
                short_info.glyph_offset(short.as_slice(), gid),
                long_info.glyph_offset(long.as_slice(), gid),
            );
        }
    }

    #[test]
    fn unknown_loc_format_is_long() {
        let font = simple_font(1);
        let mut data = font.to_vec();
        let head = FontInfo::read(data.as_slice()).unwrap().head().offset as usize;
        data[head + 50..head + 52].copy_from_slice(&7i16.to_be_bytes());
        let info = FontInfo::read(data.as_slice()).unwrap();
        assert_eq!(info.index_to_loc_format(), 7);
        assert_eq!(info.loc_format(), LocFormat::Long);
    }

    #[test]
    fn missing_table() {
        let mut builder = FontBuilder::new();
        builder.add_raw(Tag::new(b"cmap"), vec![0; 4]);
        builder.add_raw(Tag::new(b"head"), zhi_test_data::head::head_table(0));
        builder.add_raw(Tag::new(b"loca"), vec![0; 4]);
        let font = builder.build();
        assert_eq!(
            FontInfo::read(font.as_slice()),
            Err(ReadError::TableIsMissing(Tag::new(b"glyf")))
        );
    }

    #[test]
    fn codepoint_to_outline() {
        let font = simple_font(0);
        let info = FontInfo::read(font.as_slice()).unwrap();
        let gid = info.map_codepoint(font.as_slice(), 'A' as u32).unwrap();
        assert_eq!(gid, GlyphId::new(fixtures::TRIANGLE));
        let outline = info.outline(font.as_slice(), gid).unwrap();
        assert_eq!(
            outline.contours[0].points,
            [
                CurvePoint::on_curve(5, 5),
                CurvePoint::on_curve(5, 8),
                CurvePoint::on_curve(7, 8)
            ]
        );
    }

    #[test]
    fn glyph_array_delta_through_font() {
        let font = simple_font(0);
        let info = FontInfo::read(font.as_slice()).unwrap();
        let source = font.as_slice();
        assert_eq!(info.map_codepoint(source, '~' as u32), Ok(GlyphId::new(4)));
        assert_eq!(
            info.map_codepoint_with(source, '~' as u32, GlyphArrayDelta::Ignore),
            Ok(GlyphId::new(3))
        );
    }

    #[test]
    fn empty_glyph_reads_nothing_from_glyf() {
        let font = simple_font(0);
        let info = FontInfo::read(font.as_slice()).unwrap();
        let source = CountingSource::new(font.as_slice());
        let outline = info
            .outline(&source, GlyphId::new(fixtures::EMPTY))
            .unwrap();
        assert!(outline.is_empty());
        // two loca entries
        assert_eq!(source.reads(), 2);
    }

    #[test]
    fn composite_glyph() {
        let font = simple_font(1);
        let info = FontInfo::read(font.as_slice()).unwrap();
        assert_eq!(
            info.outline(font.as_slice(), GlyphId::new(fixtures::COMPOSITE)),
            Err(ReadError::UnsupportedGlyph(-1))
        );
        // the failure does not affect other lookups
        let outline = info
            .outline(font.as_slice(), GlyphId::new(fixtures::TWO_CONTOURS))
            .unwrap();
        assert_eq!(outline.contours.len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let font = simple_font(0);
        let info = FontInfo::read(font.as_slice()).unwrap();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""sfnt_version":"{0x00}{0x01}{0x00}{0x00}""#), "{json}");
        let back: FontInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip_apple_scaler() {
        let mut font = simple_font(1);
        font[..4].copy_from_slice(b"true");
        let info = FontInfo::read(font.as_slice()).unwrap();
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""sfnt_version":"true""#), "{json}");
        let back: FontInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sfnt_version(), Tag::new(b"true"));
        assert_eq!(back, info);
    }
}
