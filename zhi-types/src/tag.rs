use std::{
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// A four-byte table tag, such as `cmap` or `glyf`.
///
/// Tags are compared byte-for-byte, never as integers, so comparison does not
/// depend on how the bytes were stored. Bytes outside the printable ASCII
/// range are accepted, since they occur in real fonts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes, without validation.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Create a tag from the bytes as they appear in font data.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Interpret a big-endian `u32` (such as an sfnt version) as a tag.
    pub const fn from_u32(src: u32) -> Self {
        Self(src.to_be_bytes())
    }

    /// Return the bytes of this tag in font order.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The tag as a big-endian `u32`.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

/// An error returned when parsing a [`Tag`] from a string.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidTag {
    /// The input did not describe between 1 and 4 bytes.
    InvalidLength(usize),
    /// The input contained a byte outside the printable ASCII range.
    InvalidByte { pos: usize, byte: u8 },
}

impl FromStr for Tag {
    type Err = InvalidTag;

    /// Parse a tag, padding inputs shorter than four bytes with spaces.
    ///
    /// A byte outside the printable range may be written as `{0xNN}`, the
    /// form used by [`Display`], so any tag can be parsed back from its
    /// string form.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut raw = [b' '; 4];
        let mut len = 0;
        let mut rest = src.as_bytes();
        while let Some((&first, tail)) = rest.split_first() {
            let pos = src.len() - rest.len();
            let (byte, tail) = match parse_escape(rest) {
                Some(byte) => (byte, &rest[ESCAPE_LEN..]),
                None if (0x20..=0x7E).contains(&first) => (first, tail),
                None => return Err(InvalidTag::InvalidByte { pos, byte: first }),
            };
            if len == raw.len() {
                return Err(InvalidTag::InvalidLength(src.len()));
            }
            raw[len] = byte;
            len += 1;
            rest = tail;
        }
        if len == 0 {
            return Err(InvalidTag::InvalidLength(0));
        }
        Ok(Tag(raw))
    }
}

/// Length of an escaped byte, `{0xNN}`.
const ESCAPE_LEN: usize = 6;

fn parse_escape(bytes: &[u8]) -> Option<u8> {
    match bytes {
        [b'{', b'0', b'x', hi, lo, b'}', ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
            let digits = [*hi, *lo];
            let hex = std::str::from_utf8(&digits).ok()?;
            u8::from_str_radix(hex, 16).ok()
        }
        _ => None,
    }
}

impl crate::Scalar for Tag {
    type Raw = [u8; 4];

    fn from_raw(raw: [u8; 4]) -> Self {
        Tag(raw)
    }

    fn to_raw(self) -> [u8; 4] {
        self.0
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl Display for InvalidTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidTag::InvalidLength(len) => write!(f, "Invalid length ({len})"),
            InvalidTag::InvalidByte { pos, byte } => {
                write!(f, "Invalid byte 0x{byte:X} at index {pos}")
            }
        }
    }
}

impl std::error::Error for InvalidTag {}

// human-readable formats get a string, binary formats the raw bytes.
#[cfg(feature = "serde")]
impl serde::Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serde::Serialize::serialize(&self.0, serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let raw: std::borrow::Cow<'de, str> = serde::Deserialize::deserialize(deserializer)?;
            raw.parse().map_err(serde::de::Error::custom)
        } else {
            <[u8; 4] as serde::Deserialize>::deserialize(deserializer).map(Tag)
        }
    }
}
