//! Forward-only cursor protocol for the raw save payload.
//!
//! All integers are little-endian. Strings are raw bytes with no length
//! prefix; the reader is told how many bytes to take.

use crate::error::DecodeError;
use crate::version::WRITER_CAPACITY_HINT;

/// Appends fixed-width fields to a growable buffer.
#[derive(Clone, Debug)]
pub struct SaveWriter {
    buf: Vec<u8>,
}

impl Default for SaveWriter {
    fn default() -> Self {
        Self::with_capacity(WRITER_CAPACITY_HINT)
    }
}

impl SaveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `capacity` is a reservation hint; the buffer grows past it as needed.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes the bytes of `value` verbatim.
    pub fn write_string(&mut self, value: &str) {
        self.buf.extend_from_slice(value.as_bytes());
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Finishes the writer and returns the payload.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Reads fields back in the order [`SaveWriter`] wrote them.
#[derive(Clone, Debug)]
pub struct SaveReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> SaveReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Reads exactly `len` bytes as text. Invalid UTF-8 is replaced, not rejected.
    pub fn read_string(&mut self, len: usize) -> Result<String, DecodeError> {
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, DecodeError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::BufferUnderrun {
                offset: self.offset,
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}

#[cfg(test)]
#[path = "tests/binary_tests.rs"]
mod tests;
