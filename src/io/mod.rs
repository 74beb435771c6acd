// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte-level I/O: the binary cursor and writer, LZMA block handling and
//! format sniffing.

pub mod compression;
pub mod cursor;
pub mod detection;
pub mod writer;

// Re-exports
pub use compression::{compress_lzma, decompress_lzma};
pub use cursor::{decode_varint, ByteCursor};
pub use detection::{detect_format, detect_from_bytes, FileFormat};
pub use writer::{encode_varint, ByteWriter};
