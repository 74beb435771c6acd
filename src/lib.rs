// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # osucodec
//!
//! Decoders for osu! beatmaps (`.osu`) and replays (`.osr`).
//!
//! The library is organized by artifact:
//! - **Beatmaps** in the [`beatmap`] module: section decoders, timing
//!   points, hit objects with slider timing, and derived aggregates
//!   (max combo, play/drain/break time, bpm range)
//! - **Replays** in the [`replay`] module: binary header, embedded LZMA
//!   frame stream, modifiers and the open-scheme score document
//! - **Scoring** in the [`scoring`] module: accuracy and grade for both
//!   score schemes
//!
//! ## Architecture
//!
//! - `core/` - `DecodeError`, `GameMode`, `Vector2`
//! - `io/` - byte cursor and writer, LZMA blocks, format detection
//! - `beatmap/` - text pipeline from header to assembled `Beatmap`
//! - `replay/` - `ReplayDecoder` with its builder and config
//! - `scoring/` - legacy and open accuracy/grade engines
//!
//! Every decode call is a pure function of its input buffer. Nothing is
//! shared between calls, so independent buffers may be decoded in parallel.
//!
//! ## Example: Reading a beatmap
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let beatmap = osucodec::decode_beatmap(&std::fs::read("map.osu")?)?;
//! println!("{} max combo {}", beatmap.metadata.full_name(), beatmap.max_combo);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Reading a replay
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let replay = osucodec::decode_replay(&std::fs::read("play.osr")?)?;
//! println!(
//!     "{}: {:.2}% {} ({} frames)",
//!     replay.player_name,
//!     replay.accuracy * 100.0,
//!     replay.grade,
//!     replay.frames.len()
//! );
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{DecodeError, GameMode, Result, Vector2};

// Byte-level I/O
pub mod io;

pub use io::{detect_format, FileFormat};

// Beatmap decoding
pub mod beatmap;

pub use beatmap::{decode_beatmap, Beatmap, HitObject, TimingPoint};

// Replay decoding
pub mod replay;

pub use replay::{
    decode_frame_stream, decode_replay, DecoderConfig, FrameStream, FrameStreamContext, Mods,
    Replay, ReplayDecoder, ReplayDecoderBuilder, ReplayFrame, ScoreInfo, SkipOffsetRule,
};

// Accuracy and grades
pub mod scoring;

pub use scoring::{Grade, LegacyStatistics};
