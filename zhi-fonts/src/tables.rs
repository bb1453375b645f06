//! The tables the reader understands, one module per table.

pub mod cmap;
pub mod directory;
pub mod glyf;
pub mod head;
pub mod loca;
