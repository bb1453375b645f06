//! Streaming TrueType outline reading
//!
//! This crate reads just enough of a TrueType font to go from a character to
//! the outline of its glyph: the [table directory], `head.indexToLocFormat`,
//! a format 4 `cmap` subtable, `loca` and simple `glyf` outlines.
//!
//! Nothing is parsed ahead of time. Every field is read from its computed
//! position in a [`ByteSource`] when it is needed, so a font can be read
//! straight from disk with [`FileSource`] using a few bytes of memory beyond
//! the outline being decoded.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use zhi_fonts::{FileSource, FontInfo};
//! let source = FileSource::open(path_to_my_font_file).unwrap();
//! let info = FontInfo::read(&source).expect("not a TrueType font");
//! let glyph = info.map_codepoint(&source, 'A' as u32).unwrap();
//! let outline = info.outline(&source, glyph).unwrap();
//!
//! println!("{glyph} has {} contours", outline.contours.len());
//! ```
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
mod font_info;
mod read;
pub mod tables;

#[cfg(test)]
mod test_helpers;

/// Public re-export of the zhi-types crate.
pub extern crate zhi_types as types;

pub use font_data::{ByteSource, Cursor, FileSource};
pub use font_info::FontInfo;
pub use read::ReadError;
pub use tables::cmap::GlyphArrayDelta;
pub use tables::glyf::{Contour, CurvePoint, GlyphOutline};
pub use tables::loca::LocFormat;
