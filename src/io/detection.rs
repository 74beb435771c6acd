// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Format detection using file signatures.
//!
//! Beatmaps are text and start with the `osu file format v` header line
//! (optionally after a UTF-8 BOM and whitespace). Replays have no magic
//! string; they are recognized by the header structure: a ruleset byte in
//! `0..=3`, a plausible client version and a string marker byte.
//!
//! # Example
//!
//! ```rust,no_run
//! use osucodec::io::detection::{detect_format, FileFormat};
//!
//! let format = detect_format("map.osu")?;
//! assert_eq!(format, FileFormat::Beatmap);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::core::Result;

/// Literal prefix of the first beatmap line.
pub const BEATMAP_HEADER: &str = "osu file format v";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Bytes inspected when sniffing a file.
const SNIFF_LEN: usize = 64;

/// Client versions are `yyyymmdd` dates (or lazer's `3xxxxxxx` scheme).
const MIN_CLIENT_VERSION: i32 = 2007_00_00;
const MAX_CLIENT_VERSION: i32 = 9999_99_99;

/// File kinds this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileFormat {
    /// `.osu` text beatmap
    Beatmap,
    /// `.osr` binary replay
    Replay,
    /// Neither signature matched
    Unknown,
}

/// Detect the format of a file from its content, falling back to the
/// extension when the content is inconclusive or unreadable.
pub fn detect_format<P: AsRef<Path>>(path: P) -> Result<FileFormat> {
    let path_ref = path.as_ref();

    match read_head(path_ref).map(|head| detect_from_bytes(&head)) {
        Ok(FileFormat::Unknown) | Err(_) => Ok(detect_from_extension(path_ref)),
        Ok(format) => Ok(format),
    }
}

/// Detect the format of an in-memory buffer.
pub fn detect_from_bytes(data: &[u8]) -> FileFormat {
    if is_beatmap_magic(data) {
        FileFormat::Beatmap
    } else if is_replay_magic(data) {
        FileFormat::Replay
    } else {
        FileFormat::Unknown
    }
}

fn read_head(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut head = vec![0u8; SNIFF_LEN];
    let n = file.read(&mut head)?;
    head.truncate(n);
    Ok(head)
}

fn is_beatmap_magic(data: &[u8]) -> bool {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let start = data
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(data.len());
    data[start..].starts_with(BEATMAP_HEADER.as_bytes())
}

fn is_replay_magic(data: &[u8]) -> bool {
    if data.len() < 6 || data[0] > 3 {
        return false;
    }
    let version = LittleEndian::read_i32(&data[1..5]);
    (MIN_CLIENT_VERSION..=MAX_CLIENT_VERSION).contains(&version) && matches!(data[5], 0x00 | 0x0B)
}

/// Detect format from file extension (fallback).
fn detect_from_extension(path: &Path) -> FileFormat {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| match ext.to_lowercase().as_str() {
            "osu" => FileFormat::Beatmap,
            "osr" => FileFormat::Replay,
            _ => FileFormat::Unknown,
        })
        .unwrap_or(FileFormat::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_temp_file(name: &str, ext: &str, data: &[u8]) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "osucodec_test_detect_{}_{}.{}",
            std::process::id(),
            name,
            ext
        ));
        let mut temp_file = File::create(&path).unwrap();
        temp_file.write_all(data).unwrap();
        temp_file.flush().unwrap();
        path
    }

    #[test]
    fn test_detect_beatmap_bytes() {
        assert_eq!(
            detect_from_bytes(b"osu file format v14\r\n\r\n[General]"),
            FileFormat::Beatmap
        );
        assert_eq!(
            detect_from_bytes(b"\xEF\xBB\xBF  osu file format v3\n"),
            FileFormat::Beatmap
        );
    }

    #[test]
    fn test_detect_replay_bytes() {
        let mut data = vec![0u8];
        data.extend_from_slice(&20_150_414i32.to_le_bytes());
        data.push(0x0B);
        assert_eq!(detect_from_bytes(&data), FileFormat::Replay);

        data[0] = 7;
        assert_eq!(detect_from_bytes(&data), FileFormat::Unknown);
    }

    #[test]
    fn test_detect_unknown_bytes() {
        assert_eq!(detect_from_bytes(b""), FileFormat::Unknown);
        assert_eq!(detect_from_bytes(b"[General]"), FileFormat::Unknown);
    }

    #[test]
    fn test_detect_content_beats_extension() {
        let path = create_temp_file("content", "txt", b"osu file format v9\n");
        assert_eq!(detect_format(&path).unwrap(), FileFormat::Beatmap);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_detect_from_extension_fallback() {
        let path = create_temp_file("ext_osr", "osr", b"dummy");
        assert_eq!(detect_format(&path).unwrap(), FileFormat::Replay);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_detect_missing_file_uses_extension() {
        assert_eq!(
            detect_format("/nonexistent/osucodec/map.osu").unwrap(),
            FileFormat::Beatmap
        );
    }
}
