//! test data shared between the zhitype crates.
//!
//! Everything here is built by hand, byte by byte, so each fixture documents
//! the layout it exercises.

pub mod bebuffer;
pub mod cmap;
mod font_builder;
pub mod glyf;
pub mod head;

pub use bebuffer::BeBuffer;
pub use font_builder::FontBuilder;

use zhi_types::Tag;

/// A complete font using every fixture in this crate.
///
/// The font has `cmap` (see [`cmap::format4_fixture`]), `glyf` and `loca`
/// holding the glyphs in [`glyf`], a `head` with the given
/// `indexToLocFormat`, and an unused `name` table. `loca` is written in the
/// short format when `index_to_loc_format` is `0` and in the long format
/// otherwise.
pub fn simple_font(index_to_loc_format: i16) -> Vec<u8> {
    let (glyf, loca) = glyf::glyf_and_loca(index_to_loc_format == 0);
    let mut builder = FontBuilder::new();
    builder
        .add_raw(Tag::new(b"cmap"), cmap::cmap_table(&[(3, 1, cmap::format4_fixture())]))
        .add_raw(Tag::new(b"glyf"), glyf)
        .add_raw(Tag::new(b"head"), head::head_table(index_to_loc_format))
        .add_raw(Tag::new(b"loca"), loca)
        .add_raw(Tag::new(b"name"), b"not parsed".to_vec());
    builder.build()
}
