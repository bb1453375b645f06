//! The [loca (Index to Location)][loca] table
//!
//! [loca]: https://docs.microsoft.com/en-us/typography/opentype/spec/loca

use std::ops::Range;

use types::GlyphId;

use crate::font_data::{ByteSource, Cursor};
use crate::read::ReadError;

/// The width of entries in the `loca` table, from `head.indexToLocFormat`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocFormat {
    /// 16-bit entries holding half the byte offset.
    Short,
    /// 32-bit entries holding the byte offset.
    Long,
}

impl LocFormat {
    /// Interpret a raw `indexToLocFormat` value.
    ///
    /// `0` is short and `1` is long. Anything else is treated as long, the
    /// wider of the two.
    pub fn from_index_to_loc_format(raw: i16) -> Self {
        match raw {
            0 => LocFormat::Short,
            1 => LocFormat::Long,
            other => {
                log::warn!("unknown indexToLocFormat {other}, reading loca as long");
                LocFormat::Long
            }
        }
    }

    /// Size of one entry, in bytes.
    pub fn entry_len(self) -> u64 {
        match self {
            LocFormat::Short => 2,
            LocFormat::Long => 4,
        }
    }
}

/// Resolve a glyph to the byte offset of its data, relative to the start of
/// the `glyf` table.
///
/// The index is not checked against the number of glyphs in the font; an
/// index past the end of `loca` reads whatever follows it.
pub fn resolve<S: ByteSource + ?Sized>(
    source: &S,
    glyph: GlyphId,
    loca_offset: u32,
    format: LocFormat,
) -> Result<u32, ReadError> {
    let pos = u64::from(loca_offset) + format.entry_len() * u64::from(glyph.to_u16());
    let mut cursor = Cursor::at(source, pos)?;
    let offset = match format {
        LocFormat::Short => u32::from(cursor.read_u16()?) * 2,
        LocFormat::Long => cursor.read_u32()?,
    };
    log::trace!("{glyph} -> glyf+0x{offset:X}");
    Ok(offset)
}

/// Resolve a glyph to the byte range of its data within `glyf`.
///
/// This reads the entries for `glyph` and `glyph + 1`. An empty range means
/// the glyph has no outline.
pub fn resolve_range<S: ByteSource + ?Sized>(
    source: &S,
    glyph: GlyphId,
    loca_offset: u32,
    format: LocFormat,
) -> Result<Range<u32>, ReadError> {
    let start = resolve(source, glyph, loca_offset, format)?;
    let next = glyph
        .to_u16()
        .checked_add(1)
        .ok_or(ReadError::OutOfBounds)?;
    let end = resolve(source, GlyphId::new(next), loca_offset, format)?;
    Ok(start..end)
}
