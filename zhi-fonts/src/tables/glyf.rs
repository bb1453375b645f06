//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table
//!
//! Only simple glyphs are decoded. The flag, x and y arrays are walked with
//! three independent cursors; nothing but the returned outline is buffered.

use std::ops::{BitAnd, BitOr};

use types::{BoundingBox, Scalar};

use crate::font_data::{ByteSource, Cursor};
use crate::read::ReadError;

/// Size of the header shared by simple and composite glyphs.
pub const GLYPH_HEADER_LEN: u64 = 10;

/// Flags used in [`SimpleGlyph`]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleGlyphFlags(u8);

impl SimpleGlyphFlags {
    /// Bit 0: If set, the point is on the curve; otherwise, it is off the
    /// curve.
    pub const ON_CURVE_POINT: Self = Self(0x01);
    /// Bit 1: If set, the corresponding x-coordinate is 1 byte long, and the
    /// sign is determined by the
    /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag. If not set, its
    /// interpretation depends on the
    /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag: If that other flag
    /// is set, the x-coordinate is the same as the previous
    /// x-coordinate, and no element is added to the xCoordinates
    /// array. If both flags are not set, the corresponding element in
    /// the xCoordinates array is two bytes and interpreted as a signed
    /// integer.
    pub const X_SHORT_VECTOR: Self = Self(0x02);
    /// Bit 2: If set, the corresponding y-coordinate is 1 byte long, and the
    /// sign is determined by the
    /// Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR flag. If not set, its
    /// interpretation depends on the
    /// Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR flag: If that other flag
    /// is set, the y-coordinate is the same as the previous
    /// y-coordinate, and no element is added to the yCoordinates
    /// array. If both flags are not set, the corresponding element in
    /// the yCoordinates array is two bytes and interpreted as a signed
    /// integer.
    pub const Y_SHORT_VECTOR: Self = Self(0x04);
    /// Bit 3: If set, the next byte (read as unsigned) specifies the number
    /// of additional times this flag byte is to be repeated in the
    /// logical flags array, that is, the number of additional logical
    /// flag entries inserted after this entry.
    pub const REPEAT_FLAG: Self = Self(0x08);
    /// Bit 4: This flag has two meanings, depending on how the
    /// X_SHORT_VECTOR flag is set. If X_SHORT_VECTOR is set, this bit
    /// describes the sign of the value, with 1 equalling positive and
    /// 0 negative. If X_SHORT_VECTOR is not set and this bit is set,
    /// then the current x-coordinate is the same as the previous
    /// x-coordinate. If X_SHORT_VECTOR is not set and this bit is also
    /// not set, the current x-coordinate is a signed 16-bit delta
    /// vector.
    pub const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR: Self = Self(0x10);
    /// Bit 5: This flag has two meanings, depending on how the
    /// Y_SHORT_VECTOR flag is set. If Y_SHORT_VECTOR is set, this bit
    /// describes the sign of the value, with 1 equalling positive and
    /// 0 negative. If Y_SHORT_VECTOR is not set and this bit is set,
    /// then the current y-coordinate is the same as the previous
    /// y-coordinate. If Y_SHORT_VECTOR is not set and this bit is also
    /// not set, the current y-coordinate is a signed 16-bit delta
    /// vector.
    pub const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR: Self = Self(0x20);
    /// Bit 6: If set, contours in the glyph description may overlap.
    pub const OVERLAP_SIMPLE: Self = Self(0x40);

    /// Returns an empty set of flags.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw value of the flags currently stored.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Convert from underlying bit representation, dropping any bits
    /// that do not correspond to flags.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0x7F)
    }

    /// Returns `true` if all of the flags in `other` are contained within `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// How this point's delta along `axis` is stored.
    pub fn coordinate(self, axis: Axis) -> CoordinateKind {
        let (short, same_or_positive) = match axis {
            Axis::X => (
                Self::X_SHORT_VECTOR,
                Self::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
            ),
            Axis::Y => (
                Self::Y_SHORT_VECTOR,
                Self::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
            ),
        };
        match (self.contains(short), self.contains(same_or_positive)) {
            (true, true) => CoordinateKind::ShortPositive,
            (true, false) => CoordinateKind::ShortNegative,
            (false, true) => CoordinateKind::Same,
            (false, false) => CoordinateKind::Long,
        }
    }
}

impl BitOr for SimpleGlyphFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for SimpleGlyphFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Debug for SimpleGlyphFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimpleGlyphFlags(0x{:02X})", self.0)
    }
}

impl Scalar for SimpleGlyphFlags {
    type Raw = [u8; 1];

    fn from_raw(raw: [u8; 1]) -> Self {
        Self::from_bits_truncate(raw[0])
    }

    fn to_raw(self) -> [u8; 1] {
        [self.0]
    }
}

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The storage of one coordinate delta, as selected by a flag byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinateKind {
    /// One unsigned byte, added.
    ShortPositive,
    /// One unsigned byte, subtracted.
    ShortNegative,
    /// Nothing stored; the coordinate repeats.
    Same,
    /// A signed 16-bit delta.
    Long,
}

impl CoordinateKind {
    /// The number of bytes the delta occupies in its coordinate array.
    pub fn byte_len(self) -> u64 {
        match self {
            CoordinateKind::ShortPositive | CoordinateKind::ShortNegative => 1,
            CoordinateKind::Same => 0,
            CoordinateKind::Long => 2,
        }
    }
}

/// A point in a glyph outline, in font units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurvePoint {
    /// X position.
    pub x: i16,
    /// Y position.
    pub y: i16,
    /// True if this is an on-curve point.
    pub on_curve: bool,
}

impl CurvePoint {
    /// Construct a new `CurvePoint`
    pub fn new(x: i16, y: i16, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }

    /// Convenience to construct an on-curve point
    pub fn on_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, true)
    }

    /// Convenience to construct an off-curve point
    pub fn off_curve(x: i16, y: i16) -> Self {
        Self::new(x, y, false)
    }
}

/// One closed loop of an outline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    pub points: Vec<CurvePoint>,
}

/// The decoded outline of a simple glyph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphOutline {
    /// The bounding box stored in the glyph header.
    pub bbox: BoundingBox<i16>,
    pub contours: Vec<Contour>,
}

impl GlyphOutline {
    /// The total number of points over all contours.
    pub fn num_points(&self) -> usize {
        self.contours.iter().map(|c| c.points.len()).sum()
    }

    /// Returns `true` if the outline has no points.
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }
}

/// The fields common to simple and composite glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphHeader {
    /// Negative for composite glyphs.
    pub number_of_contours: i16,
    pub bbox: BoundingBox<i16>,
}

impl GlyphHeader {
    /// Read the 10-byte header at `glyph_offset`.
    pub fn read<S: ByteSource + ?Sized>(source: &S, glyph_offset: u64) -> Result<Self, ReadError> {
        let mut cursor = Cursor::at(source, glyph_offset)?;
        let number_of_contours = cursor.read_i16()?;
        let x_min = cursor.read_i16()?;
        let y_min = cursor.read_i16()?;
        let x_max = cursor.read_i16()?;
        let y_max = cursor.read_i16()?;
        Ok(GlyphHeader {
            number_of_contours,
            bbox: BoundingBox::new(x_min, y_min, x_max, y_max),
        })
    }

    /// Returns `true` for a composite glyph.
    pub fn is_composite(&self) -> bool {
        self.number_of_contours < 0
    }
}

/// A simple glyph whose arrays have been located.
///
/// Locating the arrays reads the header, the last contour end point, the
/// instruction length and then every flag once (to size the x coordinate
/// array). Points are decoded on demand by [`SimpleGlyph::points`].
pub struct SimpleGlyph<'a, S: ?Sized> {
    source: &'a S,
    header: GlyphHeader,
    end_pts_offset: u64,
    instructions_len: u16,
    num_points: u32,
    flags_offset: u64,
    x_offset: u64,
    y_offset: u64,
}

impl<'a, S: ByteSource + ?Sized> SimpleGlyph<'a, S> {
    /// Locate the glyph whose data begins at the absolute `glyph_offset`.
    ///
    /// Fails with [`ReadError::UnsupportedGlyph`] for composite glyphs,
    /// after reading only the header.
    pub fn read(source: &'a S, glyph_offset: u64) -> Result<Self, ReadError> {
        let header = GlyphHeader::read(source, glyph_offset)?;
        if header.is_composite() {
            return Err(ReadError::UnsupportedGlyph(header.number_of_contours));
        }
        let end_pts_offset = glyph_offset + GLYPH_HEADER_LEN;
        let mut glyph = SimpleGlyph {
            source,
            header,
            end_pts_offset,
            instructions_len: 0,
            num_points: 0,
            flags_offset: end_pts_offset,
            x_offset: end_pts_offset,
            y_offset: end_pts_offset,
        };
        if header.number_of_contours == 0 {
            return Ok(glyph);
        }

        let num_contours = header.number_of_contours as u16;
        glyph.num_points = u32::from(glyph.end_point(num_contours - 1)?) + 1;
        let mut cursor = Cursor::at(source, end_pts_offset + 2 * u64::from(num_contours))?;
        glyph.instructions_len = cursor.read_u16()?;
        cursor.advance_by(glyph.instructions_len.into())?;
        glyph.flags_offset = cursor.position();

        let (flags_len, x_len) = coordinate_lengths(&mut cursor, glyph.num_points)?;
        glyph.x_offset = glyph.flags_offset + flags_len;
        glyph.y_offset = glyph.x_offset + x_len;
        log::trace!(
            "simple glyph: {} contours, {} points, {} instruction bytes",
            num_contours,
            glyph.num_points,
            glyph.instructions_len
        );
        Ok(glyph)
    }

    pub fn header(&self) -> GlyphHeader {
        self.header
    }

    pub fn number_of_contours(&self) -> u16 {
        self.header.number_of_contours as u16
    }

    /// The number of points, one more than the last contour end point.
    pub fn num_points(&self) -> u32 {
        self.num_points
    }

    /// The length of the hinting instructions, which are not decoded.
    pub fn instructions_len(&self) -> u16 {
        self.instructions_len
    }

    /// The index of the last point of `contour`.
    pub fn end_point(&self, contour: u16) -> Result<u16, ReadError> {
        Cursor::at(self.source, self.end_pts_offset + 2 * u64::from(contour))?.read_u16()
    }

    /// Returns an iterator over the points of the glyph, each paired with
    /// the index of its contour.
    ///
    /// Coordinates accumulate over the whole glyph. A run of repeated flags
    /// does not carry over into the next contour: the first point of each
    /// contour reads a fresh flag byte.
    ///
    /// The iterator ends after the first error.
    pub fn points(&self) -> OutlinePoints<'a, S> {
        OutlinePoints {
            source: self.source,
            end_pts_offset: self.end_pts_offset,
            num_contours: self.number_of_contours(),
            contour: None,
            contour_end: 0,
            point: 0,
            flags: FlagReader::new(Cursor::at_unchecked(self.source, self.flags_offset)),
            x: CoordReader::new(
                Cursor::at_unchecked(self.source, self.x_offset),
                Axis::X,
            ),
            y: CoordReader::new(
                Cursor::at_unchecked(self.source, self.y_offset),
                Axis::Y,
            ),
            failed: false,
        }
    }

    /// Decode every point, grouped by contour.
    pub fn outline(&self) -> Result<GlyphOutline, ReadError> {
        let mut contours = vec![Contour::default(); self.number_of_contours() as usize];
        for item in self.points() {
            let (contour, point) = item?;
            contours[contour as usize].points.push(point);
        }
        Ok(GlyphOutline {
            bbox: self.header.bbox,
            contours,
        })
    }
}

/// Decode the simple glyph whose data begins at the absolute `glyph_offset`.
///
/// A glyph with zero contours decodes to an empty outline. Any failed read
/// fails the whole decode.
pub fn decode<S: ByteSource + ?Sized>(
    source: &S,
    glyph_offset: u64,
) -> Result<GlyphOutline, ReadError> {
    SimpleGlyph::read(source, glyph_offset)?.outline()
}

/// Walk `num_points` flags from the cursor, returning the length of the
/// flag stream and of the x coordinate array.
fn coordinate_lengths<S: ByteSource + ?Sized>(
    flags: &mut Cursor<S>,
    num_points: u32,
) -> Result<(u64, u64), ReadError> {
    let start = flags.position();
    let mut points_left = num_points;
    let mut x_len = 0;
    while points_left > 0 {
        let flag: SimpleGlyphFlags = flags.read()?;
        // The number of times a glyph point repeats.
        let repeats = if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            u32::from(flags.read_u8()?) + 1
        } else {
            1
        };
        let repeats = repeats.min(points_left);
        x_len += flag.coordinate(Axis::X).byte_len() * u64::from(repeats);
        points_left -= repeats;
    }
    Ok((flags.position() - start, x_len))
}

/// Decodes the logical flag for each point from the run-length encoded
/// flag stream.
struct FlagReader<'a, S: ?Sized> {
    cursor: Cursor<'a, S>,
    current: SimpleGlyphFlags,
    repeats: u8,
}

impl<'a, S: ByteSource + ?Sized> FlagReader<'a, S> {
    fn new(cursor: Cursor<'a, S>) -> Self {
        FlagReader {
            cursor,
            current: SimpleGlyphFlags::empty(),
            repeats: 0,
        }
    }

    fn next_flag(&mut self) -> Result<SimpleGlyphFlags, ReadError> {
        if self.repeats == 0 {
            self.current = self.cursor.read()?;
            if self.current.contains(SimpleGlyphFlags::REPEAT_FLAG) {
                self.repeats = self.cursor.read_u8()?;
            }
        } else {
            self.repeats -= 1;
        }
        Ok(self.current)
    }

    fn restart_run(&mut self) {
        self.repeats = 0;
    }
}

/// Accumulates one coordinate from its delta array.
struct CoordReader<'a, S: ?Sized> {
    cursor: Cursor<'a, S>,
    axis: Axis,
    value: i16,
}

impl<'a, S: ByteSource + ?Sized> CoordReader<'a, S> {
    fn new(cursor: Cursor<'a, S>, axis: Axis) -> Self {
        CoordReader {
            cursor,
            axis,
            value: 0,
        }
    }

    fn next_coord(&mut self, flags: SimpleGlyphFlags) -> Result<i16, ReadError> {
        let delta = match flags.coordinate(self.axis) {
            CoordinateKind::ShortPositive => i16::from(self.cursor.read_u8()?),
            CoordinateKind::ShortNegative => -i16::from(self.cursor.read_u8()?),
            CoordinateKind::Same => 0,
            CoordinateKind::Long => self.cursor.read_i16()?,
        };
        self.value = self.value.wrapping_add(delta);
        Ok(self.value)
    }
}

/// Iterator over the points of a [`SimpleGlyph`].
///
/// Yields `(contour index, point)` in file order.
pub struct OutlinePoints<'a, S: ?Sized> {
    source: &'a S,
    end_pts_offset: u64,
    num_contours: u16,
    contour: Option<u16>,
    contour_end: u32,
    point: u32,
    flags: FlagReader<'a, S>,
    x: CoordReader<'a, S>,
    y: CoordReader<'a, S>,
    failed: bool,
}

impl<S: ByteSource + ?Sized> OutlinePoints<'_, S> {
    /// Move to the contour containing the next point, if there is one.
    fn enter_contour(&mut self) -> Result<Option<u16>, ReadError> {
        loop {
            match self.contour {
                Some(contour) if self.point <= self.contour_end => return Ok(Some(contour)),
                _ => (),
            }
            let next = self.contour.map_or(0, |c| c + 1);
            if next >= self.num_contours {
                return Ok(None);
            }
            let end = Cursor::at(self.source, self.end_pts_offset + 2 * u64::from(next))?
                .read_u16()?;
            self.contour = Some(next);
            self.contour_end = u32::from(end);
            self.flags.restart_run();
        }
    }

    fn next_point(&mut self) -> Result<Option<(u16, CurvePoint)>, ReadError> {
        let Some(contour) = self.enter_contour()? else {
            return Ok(None);
        };
        let flags = self.flags.next_flag()?;
        let x = self.x.next_coord(flags)?;
        let y = self.y.next_coord(flags)?;
        let on_curve = flags.contains(SimpleGlyphFlags::ON_CURVE_POINT);
        log::trace!("point {}: ({x}, {y}) {flags:?}", self.point);
        self.point += 1;
        Ok(Some((contour, CurvePoint::new(x, y, on_curve))))
    }
}

impl<S: ByteSource + ?Sized> Iterator for OutlinePoints<'_, S> {
    type Item = Result<(u16, CurvePoint), ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_point() {
            Ok(point) => point.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::CountingSource;
    use pretty_assertions::assert_eq;
    use zhi_test_data::glyf as fixtures;

    fn on(x: i16, y: i16) -> CurvePoint {
        CurvePoint::on_curve(x, y)
    }

    fn points(outline: &GlyphOutline) -> Vec<Vec<CurvePoint>> {
        outline
            .contours
            .iter()
            .map(|c| c.points.clone())
            .collect()
    }

    #[test]
    fn flag_coordinate_kinds() {
        let flags = SimpleGlyphFlags::X_SHORT_VECTOR
            | SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR;
        assert_eq!(flags.coordinate(Axis::X), CoordinateKind::ShortPositive);
        assert_eq!(flags.coordinate(Axis::Y), CoordinateKind::Long);
        let flags = SimpleGlyphFlags::from_bits_truncate(0x24);
        assert_eq!(flags.coordinate(Axis::X), CoordinateKind::Long);
        assert_eq!(flags.coordinate(Axis::Y), CoordinateKind::ShortPositive);
        let flags = SimpleGlyphFlags::from_bits_truncate(0x14);
        assert_eq!(flags.coordinate(Axis::X), CoordinateKind::Same);
        assert_eq!(flags.coordinate(Axis::Y), CoordinateKind::ShortNegative);
        assert_eq!(CoordinateKind::Same.byte_len(), 0);
        assert_eq!(CoordinateKind::ShortNegative.byte_len(), 1);
        assert_eq!(CoordinateKind::Long.byte_len(), 2);
        // bit 7 is reserved
        assert_eq!(SimpleGlyphFlags::from_bits_truncate(0xFF).bits(), 0x7F);
    }

    #[test]
    fn composite_reads_only_the_header() {
        let glyph = fixtures::composite();
        let source = CountingSource::new(&glyph);
        assert_eq!(decode(&source, 0), Err(ReadError::UnsupportedGlyph(-1)));
        assert_eq!(source.bytes_read(), GLYPH_HEADER_LEN);
    }

    #[test]
    fn triangle() {
        let glyph = fixtures::triangle();
        let outline = decode(glyph.as_slice(), 0).unwrap();
        assert_eq!(outline.bbox, BoundingBox::new(5, 5, 7, 8));
        assert_eq!(points(&outline), [vec![on(5, 5), on(5, 8), on(7, 8)]]);
    }

    #[test]
    fn repeat_count_covers_following_points() {
        // one flag byte with a count of 2 sizes three points; if it covered
        // only two the y array would start one byte early
        let glyph = fixtures::triangle();
        let simple = SimpleGlyph::read(glyph.as_slice(), 0).unwrap();
        assert_eq!(simple.num_points(), 3);
        assert_eq!(simple.flags_offset, 14);
        assert_eq!(simple.x_offset, 16);
        assert_eq!(simple.y_offset, 19);
        assert_eq!(simple.points().count(), 3);
    }

    #[test]
    fn coordinates_accumulate_across_contours() {
        let glyph = fixtures::two_contours();
        let simple = SimpleGlyph::read(glyph.as_slice(), 0).unwrap();
        assert_eq!(simple.instructions_len(), 2);
        assert_eq!(simple.end_point(0), Ok(2));
        let outline = simple.outline().unwrap();
        assert_eq!(
            points(&outline),
            [
                vec![on(10, 0), on(10, 300), CurvePoint::off_curve(6, 50)],
                vec![on(100, 50), on(100, 0)],
            ]
        );
        assert_eq!(outline.num_points(), 5);
    }

    #[test]
    fn long_coordinates() {
        let glyph = fixtures::rectangle();
        let outline = decode(glyph.as_slice(), 0).unwrap();
        assert_eq!(
            points(&outline),
            [vec![on(100, 0), on(100, 700), on(500, 700), on(500, 0)]]
        );
    }

    #[test]
    fn points_are_tagged_with_contour() {
        let glyph = fixtures::two_contours();
        let simple = SimpleGlyph::read(glyph.as_slice(), 0).unwrap();
        let contours = simple
            .points()
            .map(|item| item.map(|(contour, _)| contour))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(contours, [0, 0, 0, 1, 1]);
    }

    #[test]
    fn flag_runs() {
        let data = [0x39u8, 2, 0x02, 0x01];
        let mut flags = FlagReader::new(Cursor::new(&data[..]));
        let run = (0..3)
            .map(|_| flags.next_flag().map(SimpleGlyphFlags::bits))
            .collect::<Result<Vec<_>, _>>();
        assert_eq!(run, Ok(vec![0x39, 0x39, 0x39]));
        assert_eq!(flags.next_flag().map(SimpleGlyphFlags::bits), Ok(0x02));
    }

    #[test]
    fn flag_run_restarts() {
        let data = [0x39u8, 2, 0x02];
        let mut flags = FlagReader::new(Cursor::new(&data[..]));
        assert_eq!(flags.next_flag().map(SimpleGlyphFlags::bits), Ok(0x39));
        // a new contour begins mid-run
        flags.restart_run();
        assert_eq!(flags.next_flag().map(SimpleGlyphFlags::bits), Ok(0x02));
        assert_eq!(flags.next_flag(), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn empty_glyph() {
        let glyph = fixtures::empty();
        let source = CountingSource::new(&glyph);
        let outline = decode(&source, 0).unwrap();
        assert!(outline.is_empty());
        assert!(outline.contours.is_empty());
        assert_eq!(source.bytes_read(), GLYPH_HEADER_LEN);
    }

    #[test]
    fn glyph_offset_is_absolute() {
        let mut data = vec![0xEE; 7];
        data.extend_from_slice(&fixtures::triangle());
        let outline = decode(data.as_slice(), 7).unwrap();
        assert_eq!(outline.num_points(), 3);
    }

    #[test]
    fn truncated_glyph_fails() {
        let glyph = fixtures::two_contours();
        for len in [4, GLYPH_HEADER_LEN as usize + 3, glyph.len() - 1] {
            let data = &glyph[..len];
            assert_eq!(decode(data, 0), Err(ReadError::OutOfBounds), "len {len}");
        }
    }

    #[test]
    fn iteration_stops_after_error() {
        let glyph = fixtures::rectangle();
        let data = &glyph[..glyph.len() - 1];
        let simple = SimpleGlyph::read(data, 0).unwrap();
        let results = simple.points().collect::<Vec<_>>();
        assert_eq!(results.len(), 4);
        assert_eq!(results[3], Err(ReadError::OutOfBounds));
    }
}
