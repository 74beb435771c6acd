// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Replay input frame stream.
//!
//! The frame block is LZMA-compressed ASCII text of comma-separated
//! `delta|x|y|keys` records. Besides ordinary input frames it carries two
//! kinds of metadata records:
//!
//! - a skip-boundary marker near the start, after which the next record's
//!   delta is the skip offset (see [`SkipOffsetRule`])
//! - an RNG seed record, whose delta is the sentinel `-12345` and whose
//!   keys field holds the seed (clients from 2013-03-19 onwards)
//!
//! The meaning of the keys field depends on the ruleset, see [`FrameKeys`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::mods::Mods;
use crate::core::{DecodeError, GameMode, Result, Vector2};
use crate::io::compression::decompress_lzma;

/// Delta value of the RNG seed record.
pub const SEED_SENTINEL: i64 = -12345;

/// First client version that writes a seed record.
pub const SEED_MIN_VERSION: i32 = 2013_03_19;

/// Added to the skip offset of autoplay replays by the client.
pub const AUTOPLAY_SKIP_CORRECTION: i64 = 100_000;

const SECTION: &str = "ReplayFrames";

bitflags! {
    /// osu!standard buttons. Keyboard keys also set the matching mouse bit.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StandardKeys: u32 {
        const M1 = 1 << 0;
        const M2 = 1 << 1;
        const K1 = 1 << 2;
        const K2 = 1 << 3;
        const SMOKE = 1 << 4;
    }
}

bitflags! {
    /// osu!taiko drum zones.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct TaikoKeys: u32 {
        const LEFT_RED = 1 << 0;
        const LEFT_BLUE = 1 << 1;
        const RIGHT_RED = 1 << 2;
        const RIGHT_BLUE = 1 << 3;
    }
}

bitflags! {
    /// osu!catch dash state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CatchKeys: u32 {
        const DASH = 1 << 0;
    }
}

bitflags! {
    /// osu!mania held columns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ManiaKeys: u32 {
        const K1 = 1 << 0;
        const K2 = 1 << 1;
        const K3 = 1 << 2;
        const K4 = 1 << 3;
        const K5 = 1 << 4;
        const K6 = 1 << 5;
        const K7 = 1 << 6;
        const K8 = 1 << 7;
        const K9 = 1 << 8;
        const K10 = 1 << 9;
        const K11 = 1 << 10;
        const K12 = 1 << 11;
        const K13 = 1 << 12;
        const K14 = 1 << 13;
        const K15 = 1 << 14;
        const K16 = 1 << 15;
        const K17 = 1 << 16;
        const K18 = 1 << 17;
    }
}

impl ManiaKeys {
    /// Whether the zero-based `column` is held.
    pub fn is_held(&self, column: u32) -> bool {
        column < 32 && self.bits() & (1 << column) != 0
    }
}

/// Per-ruleset interpretation of a frame's key state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "keys")]
pub enum FrameKeys {
    Standard(StandardKeys),
    Taiko(TaikoKeys),
    Catch(CatchKeys),
    /// Column mask, taken from the x field.
    Mania(ManiaKeys),
}

impl FrameKeys {
    fn new(mode: GameMode, keys: u32, x: f64) -> Self {
        match mode {
            GameMode::Standard => FrameKeys::Standard(StandardKeys::from_bits_retain(keys)),
            GameMode::Taiko => FrameKeys::Taiko(TaikoKeys::from_bits_retain(keys)),
            GameMode::Catch => FrameKeys::Catch(CatchKeys::from_bits_retain(keys)),
            GameMode::Mania => FrameKeys::Mania(ManiaKeys::from_bits_retain(x.max(0.0) as u32)),
        }
    }

    /// Raw mask for every mode.
    pub fn bits(&self) -> u32 {
        match self {
            FrameKeys::Standard(k) => k.bits(),
            FrameKeys::Taiko(k) => k.bits(),
            FrameKeys::Catch(k) => k.bits(),
            FrameKeys::Mania(k) => k.bits(),
        }
    }

    /// Catch dash state; false for other modes.
    pub fn is_dashing(&self) -> bool {
        matches!(self, FrameKeys::Catch(k) if k.contains(CatchKeys::DASH))
    }
}

/// One input sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Running sum of deltas, in ms. Decoding fails if the sum leaves the i64 range.
    pub absolute_time: i64,
    pub delta_time: i64,
    pub position: Vector2,
    pub keys: FrameKeys,
}

/// Which record carries the skip offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkipOffsetRule {
    /// The first of the first two records with delta `-1` is a marker; it
    /// produces no frame and the next record's delta is the skip offset.
    #[default]
    Marker,
    /// Every record is a frame and the record at stream position 2 holds
    /// the skip offset.
    ThirdRecord,
}

/// Header values that steer frame decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStreamContext {
    pub mode: GameMode,
    pub client_version: i32,
    pub mods: Mods,
    pub skip_offset_rule: SkipOffsetRule,
}

impl FrameStreamContext {
    pub fn new(mode: GameMode, client_version: i32, mods: Mods) -> Self {
        Self {
            mode,
            client_version,
            mods,
            skip_offset_rule: SkipOffsetRule::default(),
        }
    }

    pub fn with_skip_offset_rule(mut self, rule: SkipOffsetRule) -> Self {
        self.skip_offset_rule = rule;
        self
    }

    fn skip_offset(&self, delta: i64) -> i64 {
        if self.mods.contains(Mods::AUTOPLAY) {
            delta.saturating_sub(AUTOPLAY_SKIP_CORRECTION)
        } else {
            delta
        }
    }
}

/// Decoded frame block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameStream {
    pub frames: Vec<ReplayFrame>,
    pub skip_offset: i64,
    pub rng_seed: Option<i64>,
}

/// Decompress and decode a standalone frame block.
pub fn decode_frame_stream(compressed: &[u8], ctx: &FrameStreamContext) -> Result<FrameStream> {
    let decompressed = decompress_lzma(compressed)?;
    let text = std::str::from_utf8(&decompressed)
        .ok()
        .filter(|text| text.is_ascii())
        .ok_or_else(|| DecodeError::decompression("frame stream is not ASCII text"))?;
    decode_frame_text(text, ctx)
}

/// Decode already decompressed frame text.
pub fn decode_frame_text(text: &str, ctx: &FrameStreamContext) -> Result<FrameStream> {
    let seeds_enabled = ctx.client_version >= SEED_MIN_VERSION;
    let mut stream = FrameStream::default();
    let mut absolute_time: i64 = 0;
    let mut leading_records = 0usize;
    let mut marker_seen = false;
    let mut awaiting_skip = false;

    for (position, record) in text.split(',').enumerate() {
        if record.is_empty() {
            continue;
        }
        let fields: Vec<&str> = record.split('|').map(str::trim).collect();
        if fields.len() != 4 {
            warn!(record, position, "skipping frame record with wrong arity");
            continue;
        }

        let delta: i64 = parse(record, fields[0])?;
        if seeds_enabled && delta == SEED_SENTINEL {
            let seed = parse(record, fields[3])?;
            match stream.rng_seed {
                None => stream.rng_seed = Some(seed),
                Some(first) => warn!(first, seed, "ignoring repeated rng seed record"),
            }
            continue;
        }

        match ctx.skip_offset_rule {
            SkipOffsetRule::Marker => {
                let leading = leading_records < 2;
                leading_records += 1;
                if leading && !marker_seen && delta == -1 {
                    marker_seen = true;
                    awaiting_skip = true;
                    continue;
                }
                if awaiting_skip {
                    stream.skip_offset = ctx.skip_offset(delta);
                    awaiting_skip = false;
                }
            }
            SkipOffsetRule::ThirdRecord => {
                if position == 2 {
                    stream.skip_offset = ctx.skip_offset(delta);
                }
            }
        }

        let x: f64 = parse(record, fields[1])?;
        let y: f64 = parse(record, fields[2])?;
        let keys = parse_keys(record, fields[3])?;
        absolute_time = absolute_time.checked_add(delta).ok_or_else(|| {
            DecodeError::malformed_line(SECTION, record, "frame time overflows i64")
        })?;
        stream.frames.push(ReplayFrame {
            absolute_time,
            delta_time: delta,
            position: Vector2::new(x, y),
            keys: FrameKeys::new(ctx.mode, keys, x),
        });
    }

    debug!(
        frames = stream.frames.len(),
        skip_offset = stream.skip_offset,
        has_seed = stream.rng_seed.is_some(),
        "decoded frame stream"
    );
    Ok(stream)
}

fn parse<T: std::str::FromStr>(record: &str, field: &str) -> Result<T> {
    field.parse().map_err(|_| {
        DecodeError::malformed_line(SECTION, record, format!("invalid number '{field}'"))
    })
}

/// Key masks are integers, but some clients write them as floats.
fn parse_keys(record: &str, field: &str) -> Result<u32> {
    if let Ok(keys) = field.parse::<u32>() {
        return Ok(keys);
    }
    let keys: f64 = parse(record, field)?;
    Ok(keys.max(0.0) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(mode: GameMode) -> FrameStreamContext {
        FrameStreamContext::new(mode, 2020_01_01, Mods::empty())
    }

    #[test]
    fn test_marker_stream() {
        let stream =
            decode_frame_text("-1|0|0|0,0|100|100|5,50|110|105|5,", &ctx(GameMode::Standard))
                .unwrap();
        assert_eq!(stream.skip_offset, 0);
        let times: Vec<i64> = stream.frames.iter().map(|f| f.absolute_time).collect();
        assert_eq!(times, vec![0, 50]);
        assert_eq!(stream.frames[1].keys.bits(), 5);
        assert_eq!(
            stream.frames[1].keys,
            FrameKeys::Standard(StandardKeys::M1 | StandardKeys::K1)
        );
        assert_eq!(stream.rng_seed, None);
    }

    #[test]
    fn test_marker_in_second_record() {
        let text = "0|256|-500|0,-1|256|-500|0,4000|300|200|1,16|301|201|1,-12345|0|0|7777,";
        let stream = decode_frame_text(text, &ctx(GameMode::Standard)).unwrap();
        assert_eq!(stream.skip_offset, 4000);
        let times: Vec<i64> = stream.frames.iter().map(|f| f.absolute_time).collect();
        assert_eq!(times, vec![0, 4000, 4016]);
        assert_eq!(stream.rng_seed, Some(7777));
    }

    #[test]
    fn test_third_record_rule() {
        let text = "0|256|-500|0,-1|256|-500|0,4000|300|200|1,16|301|201|1,";
        let third = ctx(GameMode::Standard).with_skip_offset_rule(SkipOffsetRule::ThirdRecord);
        let stream = decode_frame_text(text, &third).unwrap();
        assert_eq!(stream.skip_offset, 4000);
        let times: Vec<i64> = stream.frames.iter().map(|f| f.absolute_time).collect();
        assert_eq!(times, vec![0, -1, 3999, 4015]);

        // the marker-first stream puts an ordinary frame at position 2
        let stream = decode_frame_text("-1|0|0|0,0|100|100|5,50|110|105|5,", &third).unwrap();
        assert_eq!(stream.skip_offset, 50);
        assert_eq!(stream.frames.len(), 3);
    }

    #[test]
    fn test_autoplay_correction() {
        let mut autoplay = ctx(GameMode::Standard);
        autoplay.mods = Mods::AUTOPLAY;
        let stream = decode_frame_text("0|0|0|0,-1|0|0|0,100500|0|0|0,", &autoplay).unwrap();
        assert_eq!(stream.skip_offset, 500);
    }

    #[test]
    fn test_seed_before_threshold_is_a_frame() {
        let old = FrameStreamContext::new(GameMode::Standard, 2012_01_01, Mods::empty());
        let stream = decode_frame_text("0|0|0|0,-12345|0|0|42,", &old).unwrap();
        assert_eq!(stream.rng_seed, None);
        assert_eq!(stream.frames.len(), 2);
        assert_eq!(stream.frames[1].absolute_time, -12345);
    }

    #[test]
    fn test_first_seed_wins() {
        let stream = decode_frame_text("-12345|0|0|1,-12345|0|0|2,", &ctx(GameMode::Standard))
            .unwrap();
        assert_eq!(stream.rng_seed, Some(1));
        assert!(stream.frames.is_empty());
    }

    #[test]
    fn test_wrong_arity_skipped() {
        let stream = decode_frame_text("0|0|0|0,1|2|3,10|0|0|0", &ctx(GameMode::Standard)).unwrap();
        assert_eq!(stream.frames.len(), 2);
        assert_eq!(stream.frames[1].absolute_time, 10);
    }

    #[test]
    fn test_bad_number_fails() {
        assert!(matches!(
            decode_frame_text("0|zero|0|0,", &ctx(GameMode::Standard)),
            Err(DecodeError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_mode_specific_keys() {
        let text = "0|0|0|0,0|0|0|0,10|3|0|9,";
        let taiko = decode_frame_text(text, &ctx(GameMode::Taiko)).unwrap();
        assert_eq!(
            taiko.frames[2].keys,
            FrameKeys::Taiko(TaikoKeys::LEFT_RED | TaikoKeys::RIGHT_BLUE)
        );

        let catch = decode_frame_text(text, &ctx(GameMode::Catch)).unwrap();
        assert!(catch.frames[2].keys.is_dashing());
        assert!(!catch.frames[1].keys.is_dashing());

        let mania = decode_frame_text(text, &ctx(GameMode::Mania)).unwrap();
        let FrameKeys::Mania(columns) = mania.frames[2].keys else {
            panic!("expected mania keys");
        };
        assert_eq!(columns, ManiaKeys::K1 | ManiaKeys::K2);
        assert!(columns.is_held(1));
        assert!(!columns.is_held(2));
        assert_eq!(mania.frames[2].keys.bits(), 3);
    }

    #[test]
    fn test_float_keys() {
        let stream = decode_frame_text("0|1.5|2.25|1.0,", &ctx(GameMode::Standard)).unwrap();
        assert_eq!(stream.frames[0].keys.bits(), 1);
        assert_eq!(stream.frames[0].position, Vector2::new(1.5, 2.25));
    }

    #[test]
    fn test_time_overflow_is_an_error() {
        let text = "9223372036854775807|0|0|0,1|0|0|0,";
        assert!(matches!(
            decode_frame_text(text, &ctx(GameMode::Standard)),
            Err(DecodeError::MalformedLine { .. })
        ));

        let stream =
            decode_frame_text("9223372036854775807|0|0|0,", &ctx(GameMode::Standard)).unwrap();
        assert_eq!(stream.frames[0].absolute_time, i64::MAX);
    }
}
