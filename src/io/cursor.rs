// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte cursor for reading the little-endian replay container.
//!
//! The container mixes fixed-width integers and IEEE754 floats with two
//! client-specific encodings:
//! - Strings: a marker byte (`0x0B` = present, anything else = empty), then
//!   a ULEB128 length and that many UTF-8 bytes.
//! - Timestamps: signed 64-bit ticks of 100ns since 0001-01-01 UTC.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use osucodec::io::ByteCursor;
//!
//! let data = [0x2A, 0x00, 0x0B, 0x02, b'h', b'i'];
//! let mut cursor = ByteCursor::new(&data);
//! assert_eq!(cursor.read_u16()?, 42);
//! assert_eq!(cursor.read_string()?, "hi");
//! assert!(cursor.is_at_end());
//! # Ok(())
//! # }
//! ```

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Utc};

use crate::core::{DecodeError, Result};

/// Marker byte announcing a present string / varint payload.
pub const STRING_PRESENT: u8 = 0x0B;

/// Largest tick count that still maps to a valid instant (9999-12-31T23:59:59.9999999).
pub const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

/// Ticks between 0001-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

const TICKS_PER_SECOND: i64 = 10_000_000;

/// Sequential reader over an immutable byte buffer.
///
/// The offset only moves forward; every read is bounds-checked and fails
/// with [`DecodeError::TruncatedBuffer`] instead of returning short data.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current position.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Read the next `count` bytes.
    pub fn read(&mut self, count: usize) -> Result<&'a [u8]> {
        if count > self.remaining() {
            return Err(DecodeError::truncated(count, self.remaining(), self.offset));
        }
        let start = self.offset;
        self.offset += count;
        Ok(&self.data[start..self.offset])
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.read(count).map(|_| ())
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read(1)?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(LittleEndian::read_i16(self.read(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read(4)?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(LittleEndian::read_u64(self.read(8)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(LittleEndian::read_f32(self.read(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read(8)?))
    }

    /// Read a marker-prefixed ULEB128 integer.
    ///
    /// A marker other than `0x0B` yields 0 and consumes only the marker.
    pub fn read_varint(&mut self) -> Result<u64> {
        if self.read_u8()? != STRING_PRESENT {
            return Ok(0);
        }
        self.read_uleb128()
    }

    /// Read a bare ULEB128 integer (7 bits per byte, high bit = continuation).
    pub fn read_uleb128(&mut self) -> Result<u64> {
        let start = self.offset;
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = self.read_u8()?;
            if shift >= 64 || (shift == 63 && (byte & 0x7F) > 1) {
                return Err(DecodeError::invalid_enum(
                    "varint",
                    format!("overlong encoding at position {start}"),
                ));
            }
            value |= u64::from(byte & 0x7F) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_varint()?;
        let len = usize::try_from(len)
            .map_err(|_| DecodeError::truncated(usize::MAX, self.remaining(), self.offset))?;
        let position = self.offset;
        let bytes = self.read(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidString { position })
    }

    /// Read a tick timestamp as an absolute UTC instant.
    ///
    /// Tick counts outside `[0, MAX_TICKS]` clamp to 0 (0001-01-01T00:00:00Z).
    pub fn read_timestamp(&mut self) -> Result<DateTime<Utc>> {
        Ok(ticks_to_datetime(self.read_i64()?))
    }
}

/// Decode a marker-prefixed varint from the start of `bytes`.
pub fn decode_varint(bytes: &[u8]) -> Result<u64> {
    ByteCursor::new(bytes).read_varint()
}

/// Convert client ticks to a UTC instant, clamping out-of-range values to 0.
pub fn ticks_to_datetime(ticks: i64) -> DateTime<Utc> {
    let ticks = if (0..=MAX_TICKS).contains(&ticks) {
        ticks
    } else {
        0
    };
    let since_epoch = ticks - UNIX_EPOCH_TICKS;
    let secs = since_epoch.div_euclid(TICKS_PER_SECOND);
    let nanos = (since_epoch.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Convert a UTC instant back to client ticks.
pub fn datetime_to_ticks(instant: &DateTime<Utc>) -> i64 {
    instant.timestamp() * TICKS_PER_SECOND
        + i64::from(instant.timestamp_subsec_nanos() / 100)
        + UNIX_EPOCH_TICKS
}
