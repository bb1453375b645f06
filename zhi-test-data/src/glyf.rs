//! glyf and loca test data
//!
//! Each glyph is written out field by field; the expected points are noted
//! beside the coordinate bytes.

use crate::{be_buffer, bebuffer::BeBuffer};

/// A four point rectangle using only 16-bit coordinates.
pub const RECTANGLE: u16 = 0;
/// A glyph without data.
pub const EMPTY: u16 = 1;
pub const TRIANGLE: u16 = 2;
pub const TWO_CONTOURS: u16 = 3;
pub const COMPOSITE: u16 = 4;
/// The number of glyphs in [`glyf_and_loca`].
pub const NUM_GLYPHS: u16 = 5;

/// `(100, 0) (100, 700) (500, 700) (500, 0)`, all on-curve.
pub fn rectangle() -> BeBuffer {
    be_buffer! {
        1i16,                           // numberOfContours
        100i16, 0i16, 500i16, 700i16,   // bbox
        [3u16],                         // endPtsOfContours
        0u16,                           // instructionLength
        [0x09u8, 3],                    // on-curve, repeated for 3 more points
        [100i16, 0, 400, 0],
        [0i16, 700, 0, -700]
    }
}

/// A glyph header with zero contours and nothing after it.
pub fn empty() -> BeBuffer {
    be_buffer! { 0i16, 0i16, 0i16, 0i16, 0i16 }
}

/// `(5, 5) (5, 8) (7, 8)`, all on-curve, from one repeated flag byte.
pub fn triangle() -> BeBuffer {
    be_buffer! {
        1i16,                           // numberOfContours
        5i16, 5i16, 7i16, 8i16,         // bbox
        [2u16],                         // endPtsOfContours
        0u16,                           // instructionLength
        [0x3Fu8, 2],                    // on-curve, short positive x and y, repeat 2
        [5u8, 0, 2],                    // x deltas
        [5u8, 3, 0]                     // y deltas
    }
}

/// Two contours exercising every coordinate encoding:
///
/// - contour 0: `(10, 0) (10, 300)` on-curve, `(6, 50)` off-curve
/// - contour 1: `(100, 50) (100, 0)` on-curve
///
/// The first point of contour 1 is relative to the last point of contour 0.
pub fn two_contours() -> BeBuffer {
    be_buffer! {
        2i16,                           // numberOfContours
        6i16, 0i16, 100i16, 300i16,     // bbox
        [2u16, 4],                      // endPtsOfContours
        2u16,                           // instructionLength
        [0xB0u8, 0x01],                 // PUSHB[0] 1
        // on | x short+ | y same
        // on | x same | y long
        // x short- | y long
        // on | x short+ | y same
        // on | x same | y short-
        [0x33u8, 0x11, 0x02, 0x33, 0x15],
        [10u8, 4, 94],                  // x: +10, -4, +94
        (300i16),                       // y: +300
        (-250i16),                      //    -250
        50u8                            //    -50
    }
}

/// A composite glyph with one component.
pub fn composite() -> BeBuffer {
    be_buffer! {
        (-1i16),                        // numberOfContours
        0i16, 0i16, 100i16, 100i16,     // bbox
        0x0003u16,                      // ARG_1_AND_2_ARE_WORDS | ARGS_ARE_XY_VALUES
        2u16,                           // glyphIndex
        10i16, 20i16                    // dx, dy
    }
}

/// The glyphs above, in glyph id order, and a `loca` table for them.
///
/// Each glyph is padded to four bytes.
pub fn glyf_and_loca(short_loca: bool) -> (Vec<u8>, Vec<u8>) {
    let glyphs = [rectangle(), empty(), triangle(), two_contours(), composite()];
    let mut glyf = Vec::new();
    let mut offsets = vec![0u32];
    for (gid, glyph) in glyphs.iter().enumerate() {
        // glyph data is omitted for empty glyphs
        if gid != EMPTY as usize {
            glyf.extend_from_slice(glyph);
            glyf.resize((glyf.len() + 3) & !3, 0);
        }
        offsets.push(glyf.len() as u32);
    }
    let loca = if short_loca {
        BeBuffer::new().extend(offsets.iter().map(|off| (off / 2) as u16))
    } else {
        BeBuffer::new().extend(offsets)
    };
    (glyf, loca.into_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loca_entries() {
        let (glyf, short) = glyf_and_loca(true);
        let (_, long) = glyf_and_loca(false);
        assert_eq!(short.len(), 2 * (NUM_GLYPHS as usize + 1));
        assert_eq!(long.len(), 4 * (NUM_GLYPHS as usize + 1));
        assert_eq!(glyf.len() % 4, 0);
        // the empty glyph's range is empty
        assert_eq!(short[2..4], short[4..6]);
        assert_eq!(long[4..8], long[8..12]);
        assert_eq!(long[long.len() - 4..], (glyf.len() as u32).to_be_bytes());
    }
}
