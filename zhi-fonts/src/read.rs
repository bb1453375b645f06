//! Errors produced while reading font data

use types::Tag;

/// An error that occurs when reading font data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read or seek went past the end of the byte source.
    OutOfBounds,
    /// The underlying byte source failed for a reason other than running
    /// out of data.
    Io(std::io::ErrorKind),
    /// A table required by the reader is absent from the table directory.
    TableIsMissing(Tag),
    /// The code point cannot be represented by a format 4 `cmap` subtable.
    UnicodeOutOfRange(u32),
    /// The glyph is a composite; the payload is its `numberOfContours`.
    UnsupportedGlyph(i16),
}

impl ReadError {
    /// `true` for errors raised by the byte source itself.
    pub fn is_io(&self) -> bool {
        matches!(self, ReadError::OutOfBounds | ReadError::Io(_))
    }
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "An offset was out of bounds"),
            ReadError::Io(kind) => write!(f, "Reading font data failed: {kind}"),
            ReadError::TableIsMissing(tag) => write!(f, "the {tag} table is missing"),
            ReadError::UnicodeOutOfRange(cp) => {
                write!(f, "U+{cp:04X} is outside the range of a format 4 cmap")
            }
            ReadError::UnsupportedGlyph(n) => {
                write!(f, "composite glyphs are not supported (numberOfContours {n})")
            }
        }
    }
}

impl std::error::Error for ReadError {}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ReadError::OutOfBounds,
            kind => ReadError::Io(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReadError;
    use types::Tag;

    #[test]
    fn io_errors_map_to_the_io_class() {
        let eof = std::io::Error::from(std::io::ErrorKind::UnexpectedEof);
        assert_eq!(ReadError::from(eof), ReadError::OutOfBounds);
        let denied = std::io::Error::from(std::io::ErrorKind::PermissionDenied);
        let err = ReadError::from(denied);
        assert_eq!(err, ReadError::Io(std::io::ErrorKind::PermissionDenied));
        assert!(err.is_io());
        assert!(!ReadError::TableIsMissing(Tag::new(b"glyf")).is_io());
    }

    #[test]
    fn display() {
        assert_eq!(
            ReadError::TableIsMissing(Tag::new(b"loca")).to_string(),
            "the loca table is missing"
        );
        assert_eq!(
            ReadError::UnicodeOutOfRange(0x1F600).to_string(),
            "U+1F600 is outside the range of a format 4 cmap"
        );
    }
}
