//! A buffer of big-endian values, for writing fixtures by hand

use zhi_types::Scalar;

/// A convenience type for generating a buffer of big-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct BeBuffer {
    data: Vec<u8>,
}

impl BeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    /// Append raw bytes.
    pub fn extend_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }
}

impl std::ops::Deref for BeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl From<BeBuffer> for Vec<u8> {
    fn from(buf: BeBuffer) -> Self {
        buf.data
    }
}

/// Build a [`BeBuffer`] from a list of values.
///
/// Each item is one of:
/// - a suffixed literal or identifier, e.g. `1u16` or `TAG`
/// - a parenthesized expression, e.g. `(-63i16)` or `(len as u16)`
/// - a bracketed list of scalars of one type, e.g. `[1u8, 2, 3]`
#[macro_export]
macro_rules! be_buffer {
    ( $( $item:tt ),* $(,)? ) => {{
        let builder = $crate::bebuffer::BeBuffer::new();
        $(
            let builder = $crate::be_buffer_add!(builder, $item);
        )*
        builder
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! be_buffer_add {
    ($b:ident, $v:literal) => {
        $b.push($v)
    };
    ($b:ident, [$($v:expr),* $(,)?]) => {
        $b.extend([$($v),*])
    };
    ($b:ident, $v:tt) => {
        $b.push($v)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn macro_items() {
        const MAGIC: u32 = 0x5F0F3CF5;
        let len = 2usize;
        let buf = be_buffer! {
            1u8,
            (-2i16),
            [3u16, 4],
            MAGIC,
            0u16,
            (len as u16),
        };
        assert_eq!(
            buf.as_slice(),
            [1, 0xFF, 0xFE, 0, 3, 0, 4, 0x5F, 0x0F, 0x3C, 0xF5, 0, 0, 0, 2]
        );
        assert_eq!(buf.len(), 15);
    }
}
