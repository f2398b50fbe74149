//! Binary reader over byte slices.
//!
//! This module provides [`BinaryReader`], a cursor that reads little-endian
//! values from a byte slice and fails with
//! [`Error::UnexpectedEndOfStream`] instead of reading past the end.

use byteorder::{ByteOrder, LittleEndian};
use zerocopy::FromBytes;

use crate::{text, Error, Result, Tag};

/// A bounds-checked cursor over a byte slice.
///
/// Every successful read advances the position by exactly the number of bytes
/// it consumed. A failed read leaves the position untouched.
///
/// # Example
///
/// ```
/// use mournhold_common::BinaryReader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u32().unwrap(), 0x08070605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> BinaryReader<'a> {
    /// Create a new reader from a byte slice.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    ///
    /// Seeking past the end is allowed; the next read will fail.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Skip `count` bytes, failing if fewer remain.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.position += count;
        Ok(())
    }

    #[inline]
    fn ensure(&self, count: usize) -> Result<()> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEndOfStream {
                needed: count,
                available: self.remaining(),
                position: self.position,
            });
        }
        Ok(())
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        self.ensure(count)?;
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Read all remaining bytes.
    #[inline]
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.position.min(self.data.len())..];
        self.position = self.data.len();
        bytes
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2).map(LittleEndian::read_u16)
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_bytes(2).map(LittleEndian::read_i16)
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4).map(LittleEndian::read_u32)
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_bytes(4).map(LittleEndian::read_i32)
    }

    /// Read a little-endian u64.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_bytes(8).map(LittleEndian::read_u64)
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_bytes(4).map(LittleEndian::read_f32)
    }

    /// Read a four-character code.
    #[inline]
    pub fn read_tag(&mut self) -> Result<Tag> {
        self.read_struct::<Tag>()
    }

    /// Read a NUL-terminated string of at most `max` bytes.
    ///
    /// Consumes through the terminator. When no NUL occurs within the window
    /// the whole window is consumed and returned as text.
    pub fn read_cstring_bounded(&mut self, max: usize) -> Result<String> {
        let window = self.peek_bytes(max.min(self.remaining()))?;
        match memchr::memchr(0, window) {
            Some(nul) => {
                self.position += nul + 1;
                Ok(text::decode(&window[..nul]))
            }
            None => {
                self.position += window.len();
                Ok(text::decode(window))
            }
        }
    }

    /// Read every remaining byte as a NUL-terminated string.
    ///
    /// This is the shape of string sub-records: the declared length covers the
    /// terminator and any padding after it.
    pub fn read_zstring(&mut self) -> String {
        text::decode_nul_terminated(self.read_remaining())
    }

    /// Read a string from a fixed-size buffer, stopping at the first NUL.
    pub fn read_fixed_string(&mut self, buffer_size: usize) -> Result<String> {
        self.read_bytes(buffer_size).map(text::decode_nul_terminated)
    }

    /// Read a struct using zerocopy.
    ///
    /// The struct must implement `FromBytes` from the zerocopy crate.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::InvalidLayout {
            type_name: std::any::type_name::<T>(),
            len: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, 0xFF, 0xFF, // i32: -1
            0x00, 0x00, 0x80, 0x3F, // f32: 1.0
        ];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_i32().unwrap(), -1);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_position_tracks_every_read() {
        let data = [0u8; 16];
        let mut reader = BinaryReader::new(&data);

        reader.read_u8().unwrap();
        assert_eq!(reader.position(), 1);
        reader.read_u16().unwrap();
        assert_eq!(reader.position(), 3);
        reader.read_bytes(5).unwrap();
        assert_eq!(reader.position(), 8);
        reader.read_tag().unwrap();
        assert_eq!(reader.position(), 12);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_eof_error_leaves_position() {
        let data = [0x01, 0x02];
        let mut reader = BinaryReader::new(&data);
        reader.read_u8().unwrap();

        match reader.read_u32() {
            Err(Error::UnexpectedEndOfStream {
                needed,
                available,
                position,
            }) => {
                assert_eq!(needed, 4);
                assert_eq!(available, 1);
                assert_eq!(position, 1);
            }
            other => panic!("expected end of stream, got {:?}", other),
        }
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_skip_is_checked() {
        let data = [0u8; 4];
        let mut reader = BinaryReader::new(&data);

        reader.skip(3).unwrap();
        assert!(reader.skip(2).is_err());
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_cstring_bounded() {
        let data = b"hello\0world";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_cstring_bounded(32).unwrap(), "hello");
        assert_eq!(reader.position(), 6);
        // no terminator within the window: the window is consumed
        assert_eq!(reader.read_cstring_bounded(3).unwrap(), "wor");
        assert_eq!(reader.read_cstring_bounded(32).unwrap(), "ld");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_zstring_consumes_padding() {
        let data = b"Vivec\0\0\0";
        let mut reader = BinaryReader::new(data);

        assert_eq!(reader.read_zstring(), "Vivec");
        assert!(reader.is_empty());
    }

    #[test]
    fn test_fixed_string() {
        let mut data = [0u8; 32];
        data[..7].copy_from_slice(b"Fargoth");
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_fixed_string(32).unwrap(), "Fargoth");
        assert_eq!(reader.position(), 32);
    }

    #[test]
    fn test_read_tag() {
        let mut reader = BinaryReader::new(b"TES3rest");
        assert_eq!(reader.read_tag().unwrap(), Tag::new(b"TES3"));
    }
}
