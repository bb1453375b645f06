//! byte sources and the cursor used to read them

use std::fs::File;
use std::path::Path;

use types::Scalar;

use crate::read::ReadError;

/// Random-access, read-only font bytes.
///
/// Reads are positioned and go through `&self`, so any number of [`Cursor`]s
/// (on any number of threads, if the source is `Sync`) can share one source
/// without coordinating.
pub trait ByteSource {
    /// The total length of the source, in bytes.
    fn len(&self) -> u64;

    /// Fill `buf` with the bytes starting at `pos`.
    ///
    /// Fails with [`ReadError::OutOfBounds`] if fewer than `buf.len()` bytes
    /// are available.
    fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> Result<(), ReadError>;

    /// `true` if the source has a length of zero bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ByteSource for [u8] {
    fn len(&self) -> u64 {
        <[u8]>::len(self) as u64
    }

    fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        let start = usize::try_from(pos).map_err(|_| ReadError::OutOfBounds)?;
        let end = start
            .checked_add(buf.len())
            .ok_or(ReadError::OutOfBounds)?;
        let bytes = self.get(start..end).ok_or(ReadError::OutOfBounds)?;
        buf.copy_from_slice(bytes);
        Ok(())
    }
}

impl ByteSource for Vec<u8> {
    fn len(&self) -> u64 {
        self.as_slice().len() as u64
    }

    fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        self.as_slice().read_exact_at(pos, buf)
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &T {
    fn len(&self) -> u64 {
        (**self).len()
    }

    fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        (**self).read_exact_at(pos, buf)
    }
}

/// A font file that is read on demand rather than loaded into memory.
///
/// Every read is a positioned read against the open file, so this is the
/// source to use when memory is tight; it is also safe to share between
/// threads.
#[derive(Debug)]
pub struct FileSource {
    file: File,
    len: u64,
}

impl FileSource {
    /// Open the file at `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Self::new(File::open(path)?)
    }

    /// Wrap an already open file.
    ///
    /// The length is captured here; the file must not be truncated while
    /// the source is in use.
    pub fn new(file: File) -> std::io::Result<Self> {
        let len = file.metadata()?.len();
        Ok(FileSource { file, len })
    }
}

impl ByteSource for FileSource {
    fn len(&self) -> u64 {
        self.len
    }

    fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        let end = pos
            .checked_add(buf.len() as u64)
            .ok_or(ReadError::OutOfBounds)?;
        if end > self.len {
            return Err(ReadError::OutOfBounds);
        }
        read_file_at(&self.file, pos, buf)
    }
}

#[cfg(unix)]
fn read_file_at(file: &File, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
    use std::os::unix::fs::FileExt;
    file.read_exact_at(buf, pos).map_err(ReadError::from)
}

#[cfg(windows)]
fn read_file_at(file: &File, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
    use std::os::windows::fs::FileExt;
    let mut filled = 0;
    while filled < buf.len() {
        match file.seek_read(&mut buf[filled..], pos + filled as u64) {
            Ok(0) => return Err(ReadError::OutOfBounds),
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn read_file_at(_file: &File, _pos: u64, _buf: &mut [u8]) -> Result<(), ReadError> {
    Err(ReadError::Io(std::io::ErrorKind::Unsupported))
}

/// A position in a [`ByteSource`], advanced by reads.
///
/// All multi-byte values are big-endian. A read or seek that fails leaves
/// the position where it was.
pub struct Cursor<'a, S: ?Sized> {
    source: &'a S,
    pos: u64,
}

impl<S: ?Sized> Clone for Cursor<'_, S> {
    fn clone(&self) -> Self {
        Cursor {
            source: self.source,
            pos: self.pos,
        }
    }
}

impl<S: ?Sized> std::fmt::Debug for Cursor<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}

impl<'a, S: ByteSource + ?Sized> Cursor<'a, S> {
    /// A cursor at the start of `source`.
    pub fn new(source: &'a S) -> Self {
        Cursor { source, pos: 0 }
    }

    /// A cursor at `pos`, which must be within the source.
    pub fn at(source: &'a S, pos: u64) -> Result<Self, ReadError> {
        let mut cursor = Self::new(source);
        cursor.seek(pos)?;
        Ok(cursor)
    }

    /// A cursor at `pos` without checking it against the source length.
    ///
    /// Used where a position was derived from data already read; any read
    /// past the end still fails.
    pub(crate) fn at_unchecked(source: &'a S, pos: u64) -> Self {
        Cursor { source, pos }
    }

    /// The source this cursor reads from.
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// The current absolute position.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Move to an absolute position.
    ///
    /// Seeking to the very end of the source is allowed; seeking past it
    /// is an error.
    pub fn seek(&mut self, pos: u64) -> Result<(), ReadError> {
        if pos > self.source.len() {
            return Err(ReadError::OutOfBounds);
        }
        self.pos = pos;
        Ok(())
    }

    /// Move relative to the current position.
    pub fn seek_relative(&mut self, delta: i64) -> Result<(), ReadError> {
        let pos = self
            .pos
            .checked_add_signed(delta)
            .ok_or(ReadError::OutOfBounds)?;
        self.seek(pos)
    }

    /// Skip `n_bytes` forward.
    pub fn advance_by(&mut self, n_bytes: u64) -> Result<(), ReadError> {
        let pos = self
            .pos
            .checked_add(n_bytes)
            .ok_or(ReadError::OutOfBounds)?;
        self.seek(pos)
    }

    /// Skip over one value of type `T`.
    pub fn skip<T: Scalar>(&mut self) -> Result<(), ReadError> {
        self.advance_by(T::RAW_BYTE_LEN as u64)
    }

    /// Read a value and advance past it.
    pub fn read<T: Scalar>(&mut self) -> Result<T, ReadError> {
        let mut raw = T::Raw::default();
        self.source.read_exact_at(self.pos, raw.as_mut())?;
        self.pos += T::RAW_BYTE_LEN as u64;
        Ok(T::from_raw(raw))
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        self.read()
    }

    pub fn read_u16(&mut self) -> Result<u16, ReadError> {
        self.read()
    }

    pub fn read_i16(&mut self) -> Result<i16, ReadError> {
        self.read()
    }

    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        self.read()
    }
}
