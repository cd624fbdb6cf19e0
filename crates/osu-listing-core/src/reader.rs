//! Forward-only little-endian byte cursor
//!
//! Every read takes the name of the field being decoded so that failures can
//! be reported as "what, where" instead of a bare I/O error. The cursor only
//! ever moves forward; there is no seek.

use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};

/// Longest ULEB128 encoding accepted (enough for a u64)
const MAX_ULEB128_BYTES: u32 = 10;

/// Sequential reader over any [`Read`] source that tracks its byte offset
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    /// Wrap a byte source, starting at offset 0
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Release the underlying source
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn fill(&mut self, buf: &mut [u8], field: &'static str) -> Result<()> {
        let offset = self.position;
        self.inner.read_exact(buf).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => Error::Truncated { field, offset },
            _ => Error::Read {
                field,
                offset,
                source: e,
            },
        })?;
        self.position += buf.len() as u64;
        Ok(())
    }

    fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.fill(&mut buf, field)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.read_array::<1>(field)?[0])
    }

    pub fn read_u16(&mut self, field: &'static str) -> Result<u16> {
        self.read_array(field).map(u16::from_le_bytes)
    }

    pub fn read_u32(&mut self, field: &'static str) -> Result<u32> {
        self.read_array(field).map(u32::from_le_bytes)
    }

    pub fn read_i32(&mut self, field: &'static str) -> Result<i32> {
        self.read_array(field).map(i32::from_le_bytes)
    }

    pub fn read_u64(&mut self, field: &'static str) -> Result<u64> {
        self.read_array(field).map(u64::from_le_bytes)
    }

    pub fn read_f32(&mut self, field: &'static str) -> Result<f32> {
        self.read_array(field).map(f32::from_le_bytes)
    }

    pub fn read_f64(&mut self, field: &'static str) -> Result<f64> {
        self.read_array(field).map(f64::from_le_bytes)
    }

    /// Read a one-byte boolean; any non-zero value is `true`
    pub fn read_bool(&mut self, field: &'static str) -> Result<bool> {
        Ok(self.read_u8(field)? != 0)
    }

    /// Read exactly `len` bytes
    ///
    /// The buffer grows as data arrives, so a bogus length on a short stream
    /// fails with [`Error::Truncated`] without reserving `len` bytes up front.
    pub fn read_bytes(&mut self, len: u64, field: &'static str) -> Result<Vec<u8>> {
        let offset = self.position;
        let mut buf = Vec::new();
        let read = (&mut self.inner)
            .take(len)
            .read_to_end(&mut buf)
            .map_err(|e| Error::Read {
                field,
                offset,
                source: e,
            })?;
        self.position += read as u64;

        if (read as u64) < len {
            return Err(Error::Truncated { field, offset });
        }
        Ok(buf)
    }

    /// Read a ULEB128 (unsigned LEB128) encoded integer
    ///
    /// 7 data bits per byte, least significant group first, high bit set on
    /// every byte except the last.
    pub fn read_uleb128(&mut self, field: &'static str) -> Result<u64> {
        let offset = self.position;
        let mut result: u64 = 0;
        let mut shift = 0u32;

        loop {
            let byte = self.read_u8(field)?;
            let bits = u64::from(byte & 0x7F);

            // The tenth byte may only contribute the single remaining bit.
            if shift >= 7 * MAX_ULEB128_BYTES || (shift == 63 && bits > 1) {
                return Err(Error::MalformedVarint { field, offset });
            }
            result |= bits << shift;

            if byte & 0x80 == 0 {
                break;
            }
            shift += 7;
        }

        Ok(result)
    }
}
