//! Scalar types shared by the zhitype crates
//!
//! These are the handful of [data types] the streaming reader needs: raw
//! big-endian scalars, table tags, glyph identifiers and bounding boxes.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bbox;
mod glyph_id;
mod raw;
mod tag;

pub use bbox::BoundingBox;
pub use glyph_id::GlyphId;
pub use raw::Scalar;
pub use tag::{InvalidTag, Tag};

/// The sfnt version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The legacy Apple sfnt version, also used for TrueType outlines.
pub const TRUE_SFNT_VERSION: u32 = 0x74727565;
