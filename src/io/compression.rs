// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! LZMA block expansion for the embedded replay sub-streams.
//!
//! Both the frame stream and the score statistics document are stored as
//! legacy `.lzma` streams (5-byte properties, 8-byte unpacked size, data).
//! Expansion is eager: the whole block is materialized before parsing.

use tracing::debug;

use crate::core::{DecodeError, Result};

/// Expand a complete LZMA block.
pub fn decompress_lzma(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = data;
    let mut decompressed = Vec::with_capacity(data.len().saturating_mul(4));
    lzma_rs::lzma_decompress(&mut input, &mut decompressed)
        .map_err(|e| DecodeError::decompression(format!("LZMA decompression failed: {e}")))?;
    debug!(
        compressed = data.len(),
        decompressed = decompressed.len(),
        "expanded LZMA block"
    );
    Ok(decompressed)
}

/// Compress `data` into an LZMA block readable by [`decompress_lzma`].
pub fn compress_lzma(data: &[u8]) -> Result<Vec<u8>> {
    let mut input = data;
    let mut compressed = Vec::new();
    lzma_rs::lzma_compress(&mut input, &mut compressed)?;
    Ok(compressed)
}

/// Reject a declared block length above the caller's cap.
pub fn check_block_len(length: usize, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if length > limit => {
            Err(DecodeError::CompressedBlockTooLarge { length, limit })
        }
        _ => Ok(()),
    }
}
