// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Little-endian writer producing the replay container encodings.
//!
//! [`ByteWriter`] is the inverse of [`ByteCursor`](super::ByteCursor): every
//! `write_*` method emits exactly what the matching `read_*` consumes. It is
//! used to build replay buffers for tooling and tests.

use chrono::{DateTime, Utc};

use super::cursor::{datetime_to_ticks, STRING_PRESENT};

/// Default initial capacity for the writer buffer.
const DEFAULT_CAPACITY: usize = 64;

/// Growable little-endian byte writer.
///
/// # Example
///
/// ```
/// use osucodec::io::{ByteCursor, ByteWriter};
///
/// let mut writer = ByteWriter::new();
/// writer.write_u8(3).write_string("peppy");
/// let data = writer.finish();
///
/// let mut cursor = ByteCursor::new(&data);
/// assert_eq!(cursor.read_u8().unwrap(), 3);
/// assert_eq!(cursor.read_string().unwrap(), "peppy");
/// ```
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buffer: Vec<u8>,
}

impl Default for ByteWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty writer with the specified initial capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the written data.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the writer and return the written data.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_u8(&mut self, value: u8) -> &mut Self {
        self.buffer.push(value);
        self
    }

    pub fn write_i8(&mut self, value: i8) -> &mut Self {
        self.write_u8(value as u8)
    }

    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i16(&mut self, value: i16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i32(&mut self, value: i32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    pub fn write_f64(&mut self, value: f64) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.buffer.extend_from_slice(data);
        self
    }

    /// Write a marker-prefixed ULEB128 integer.
    pub fn write_varint(&mut self, value: u64) -> &mut Self {
        let encoded = encode_varint(value);
        self.write_bytes(&encoded)
    }

    /// Write a length-prefixed string. The empty string is written as a
    /// single absent marker, as the client does.
    pub fn write_string(&mut self, value: &str) -> &mut Self {
        if value.is_empty() {
            return self.write_u8(0x00);
        }
        self.write_varint(value.len() as u64)
            .write_bytes(value.as_bytes())
    }

    /// Write a UTC instant as client ticks.
    pub fn write_timestamp(&mut self, instant: &DateTime<Utc>) -> &mut Self {
        self.write_i64(datetime_to_ticks(instant))
    }

    /// Write an i32 length prefix followed by the block itself.
    pub fn write_block(&mut self, block: &[u8]) -> &mut Self {
        self.write_i32(block.len() as i32).write_bytes(block)
    }
}

/// Encode `value` as a marker byte followed by ULEB128 groups.
pub fn encode_varint(value: u64) -> Vec<u8> {
    let mut out = vec![STRING_PRESENT];
    let mut rest = value;
    loop {
        let byte = (rest & 0x7F) as u8;
        rest >>= 7;
        if rest == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ByteCursor;

    #[test]
    fn test_writer_new() {
        let writer = ByteWriter::new();
        assert_eq!(writer.size(), 0);
        assert!(writer.data().is_empty());
    }

    #[test]
    fn test_encode_varint_single_byte() {
        assert_eq!(encode_varint(0), vec![STRING_PRESENT, 0x00]);
        assert_eq!(encode_varint(127), vec![STRING_PRESENT, 0x7F]);
    }

    #[test]
    fn test_encode_varint_multi_byte() {
        assert_eq!(encode_varint(128), vec![STRING_PRESENT, 0x80, 0x01]);
        assert_eq!(encode_varint(300), vec![STRING_PRESENT, 0xAC, 0x02]);
    }

    #[test]
    fn test_encode_varint_max() {
        let bytes = encode_varint(u64::MAX);
        assert_eq!(bytes.len(), 11);
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(cursor.read_varint().unwrap(), u64::MAX);
    }

    #[test]
    fn test_write_empty_string() {
        let mut writer = ByteWriter::new();
        writer.write_string("");
        assert_eq!(writer.data(), &[0x00]);
    }

    #[test]
    fn test_write_block() {
        let mut writer = ByteWriter::new();
        writer.write_block(&[1, 2, 3]);
        assert_eq!(writer.finish(), vec![3, 0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_write_then_read_header_fields() {
        let instant = crate::io::cursor::ticks_to_datetime(636_000_000_000_000_000);
        let mut writer = ByteWriter::new();
        writer
            .write_u8(2)
            .write_i32(20_240_101)
            .write_string("abc")
            .write_u16(512)
            .write_timestamp(&instant)
            .write_f64(-0.25);
        let data = writer.finish();

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_u8().unwrap(), 2);
        assert_eq!(cursor.read_i32().unwrap(), 20_240_101);
        assert_eq!(cursor.read_string().unwrap(), "abc");
        assert_eq!(cursor.read_u16().unwrap(), 512);
        assert_eq!(cursor.read_timestamp().unwrap(), instant);
        assert!((cursor.read_f64().unwrap() + 0.25).abs() < f64::EPSILON);
        assert!(cursor.is_at_end());
    }
}
