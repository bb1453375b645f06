//! small utilities used in tests

use std::cell::Cell;

use crate::{ByteSource, ReadError};

/// Wraps a source and records how much of it was read.
pub struct CountingSource<'a> {
    inner: &'a [u8],
    reads: Cell<usize>,
    bytes_read: Cell<u64>,
}

impl<'a> CountingSource<'a> {
    pub fn new(inner: &'a [u8]) -> Self {
        CountingSource {
            inner,
            reads: Cell::new(0),
            bytes_read: Cell::new(0),
        }
    }

    /// The number of successful reads.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    /// The total number of bytes returned by successful reads.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.get()
    }
}

impl ByteSource for CountingSource<'_> {
    fn len(&self) -> u64 {
        self.inner.len() as u64
    }

    fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> Result<(), ReadError> {
        self.inner.read_exact_at(pos, buf)?;
        self.reads.set(self.reads.get() + 1);
        self.bytes_read.set(self.bytes_read.get() + buf.len() as u64);
        Ok(())
    }
}
