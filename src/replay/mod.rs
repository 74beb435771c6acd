// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Replay (`.osr`) decoding.
//!
//! Layout, little-endian throughout:
//!
//! ```text
//! u8      mode
//! i32     client version (yyyymmdd)
//! string  beatmap md5, player name, replay md5
//! u16 x6  300, 100, 50, geki, katu, miss
//! u32     score
//! u16     max combo
//! u8      perfect (1)
//! u32     mods
//! string  life bar, "time|percentage" records joined by ','
//! i64     timestamp ticks
//! i32 + n LZMA frame stream
//! i32/i64 online score id          (client >= 20121008 / 20140721)
//! f64     target practice hits     (Target Practice mod only)
//! i32 + n LZMA score document      (client >= 30000001)
//! ```
//!
//! [`ReplayDecoderBuilder`] configures optional limits and which embedded
//! blocks to expand; [`decode_replay`] uses the defaults.

pub mod frames;
pub mod mods;
pub mod score_info;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DecodeError, GameMode, Result};
use crate::io::compression::check_block_len;
use crate::io::cursor::ByteCursor;
use crate::scoring::{self, Grade, LegacyStatistics};

pub use frames::{
    decode_frame_stream, decode_frame_text, CatchKeys, FrameKeys, FrameStream,
    FrameStreamContext, ManiaKeys, ReplayFrame, SkipOffsetRule, StandardKeys, TaikoKeys,
};
pub use mods::Mods;
pub use score_info::{HitResult, ScoreInfo, ScoreMod, Statistics};

/// Client versions from here store the online score id as i32.
pub const SCORE_ID_I32_VERSION: i32 = 2012_10_08;
/// Client versions from here store the online score id as i64.
pub const SCORE_ID_I64_VERSION: i32 = 2014_07_21;
/// Client versions from here append the score document.
pub const SCORE_INFO_VERSION: i32 = 30_000_001;

const LIFE_BAR: &str = "LifeBar";

/// One life bar sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeBarSample {
    /// Milliseconds.
    pub time: i32,
    /// Health in `[0, 1]`.
    pub percentage: f64,
}

/// A fully decoded replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    pub mode: GameMode,
    pub client_version: i32,
    pub beatmap_md5: String,
    pub player_name: String,
    pub replay_md5: String,
    pub statistics: LegacyStatistics,
    pub score: u32,
    pub max_combo: u16,
    pub perfect: bool,
    pub mods: Mods,
    pub life_bar: Vec<LifeBarSample>,
    pub timestamp: DateTime<Utc>,

    pub frames: Vec<ReplayFrame>,
    pub skip_offset: i64,
    pub rng_seed: Option<i64>,

    pub online_score_id: Option<i64>,
    pub target_practice_hits: Option<f64>,
    pub score_info: Option<ScoreInfo>,

    /// Legacy-scheme accuracy, always present.
    pub accuracy: f64,
    pub grade: Grade,
    /// Open-scheme accuracy, present with a score document.
    pub open_accuracy: Option<f64>,
    pub open_grade: Option<Grade>,
}

impl Replay {
    /// Duration covered by the input frames, in ms.
    pub fn frames_duration(&self) -> i64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.absolute_time.saturating_sub(first.absolute_time),
            _ => 0,
        }
    }
}

/// Options for [`ReplayDecoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Cap on each embedded compressed block length (None = no cap)
    pub max_compressed_len: Option<usize>,
    /// Which frame record holds the skip offset
    pub skip_offset_rule: SkipOffsetRule,
    /// Expand the frame stream (otherwise it is skipped over)
    pub decode_frames: bool,
    /// Expand the trailing score document (otherwise it is skipped over)
    pub decode_score_info: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_compressed_len: None,
            skip_offset_rule: SkipOffsetRule::Marker,
            decode_frames: true,
            decode_score_info: true,
        }
    }
}

/// Builder for [`ReplayDecoder`].
///
/// # Example
///
/// ```rust,no_run
/// use osucodec::replay::{ReplayDecoderBuilder, SkipOffsetRule};
///
/// let decoder = ReplayDecoderBuilder::new()
///     .max_compressed_len(16 * 1024 * 1024)
///     .skip_offset_rule(SkipOffsetRule::ThirdRecord)
///     .build();
/// let replay = decoder.decode(&std::fs::read("play.osr")?)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReplayDecoderBuilder {
    config: DecoderConfig,
}

impl ReplayDecoderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject embedded blocks longer than `limit` bytes before expanding them.
    pub fn max_compressed_len(mut self, limit: usize) -> Self {
        self.config.max_compressed_len = Some(limit);
        self
    }

    pub fn skip_offset_rule(mut self, rule: SkipOffsetRule) -> Self {
        self.config.skip_offset_rule = rule;
        self
    }

    pub fn decode_frames(mut self, enabled: bool) -> Self {
        self.config.decode_frames = enabled;
        self
    }

    pub fn decode_score_info(mut self, enabled: bool) -> Self {
        self.config.decode_score_info = enabled;
        self
    }

    pub fn build(self) -> ReplayDecoder {
        ReplayDecoder {
            config: self.config,
        }
    }
}

/// Replay decoder. Stateless between calls; one value can decode any
/// number of buffers, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct ReplayDecoder {
    config: DecoderConfig,
}

impl ReplayDecoder {
    /// Decoder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete `.osr` buffer.
    pub fn decode(&self, bytes: &[u8]) -> Result<Replay> {
        let mut cursor = ByteCursor::new(bytes);

        let mode = GameMode::from_id(i64::from(cursor.read_u8()?))?;
        let client_version = cursor.read_i32()?;
        let beatmap_md5 = cursor.read_string()?;
        let player_name = cursor.read_string()?;
        let replay_md5 = cursor.read_string()?;

        let statistics = LegacyStatistics {
            count_300: cursor.read_u16()?,
            count_100: cursor.read_u16()?,
            count_50: cursor.read_u16()?,
            count_geki: cursor.read_u16()?,
            count_katu: cursor.read_u16()?,
            count_miss: cursor.read_u16()?,
        };
        let score = cursor.read_u32()?;
        let max_combo = cursor.read_u16()?;
        let perfect = cursor.read_u8()? == 1;
        let mods = Mods::from_bits_retain(cursor.read_u32()?);
        let life_bar = parse_life_bar(&cursor.read_string()?)?;
        let timestamp = cursor.read_timestamp()?;

        let ctx = FrameStreamContext::new(mode, client_version, mods)
            .with_skip_offset_rule(self.config.skip_offset_rule);
        let stream = match self.read_block(&mut cursor, self.config.decode_frames)? {
            Some(block) => decode_frame_stream(block, &ctx)?,
            None => FrameStream::default(),
        };

        let online_score_id = if client_version >= SCORE_ID_I64_VERSION {
            Some(cursor.read_i64()?)
        } else if client_version >= SCORE_ID_I32_VERSION {
            Some(i64::from(cursor.read_i32()?))
        } else {
            None
        };

        let target_practice_hits = if mods.contains(Mods::TARGET_PRACTICE) {
            Some(cursor.read_f64()?)
        } else {
            None
        };

        let score_info = if client_version >= SCORE_INFO_VERSION {
            self.read_block(&mut cursor, self.config.decode_score_info)?
                .map(ScoreInfo::decode)
                .transpose()?
        } else {
            None
        };

        if !cursor.is_at_end() {
            debug!(remaining = cursor.remaining(), "trailing bytes after replay");
        }

        let accuracy = scoring::legacy_accuracy(mode, &statistics);
        let grade = scoring::legacy_grade(mode, &statistics, mods);
        let (open_accuracy, open_grade) = match &score_info {
            Some(info) => {
                let accuracy =
                    scoring::open_accuracy(mode, &info.statistics, &info.maximum_statistics);
                (Some(accuracy), Some(scoring::open_grade(mode, accuracy, info)))
            }
            None => (None, None),
        };

        debug!(
            mode = mode.as_str(),
            client_version,
            frames = stream.frames.len(),
            has_score_info = score_info.is_some(),
            "decoded replay"
        );

        Ok(Replay {
            mode,
            client_version,
            beatmap_md5,
            player_name,
            replay_md5,
            statistics,
            score,
            max_combo,
            perfect,
            mods,
            life_bar,
            timestamp,
            frames: stream.frames,
            skip_offset: stream.skip_offset,
            rng_seed: stream.rng_seed,
            online_score_id,
            target_practice_hits,
            score_info,
            accuracy,
            grade,
            open_accuracy,
            open_grade,
        })
    }

    /// Read an i32-length-prefixed block. Empty blocks and skipped blocks
    /// yield `None`.
    fn read_block<'a>(
        &self,
        cursor: &mut ByteCursor<'a>,
        expand: bool,
    ) -> Result<Option<&'a [u8]>> {
        let length = cursor.read_i32()?;
        let Ok(length) = usize::try_from(length) else {
            warn!(length, "negative compressed block length");
            return Ok(None);
        };
        if length == 0 {
            return Ok(None);
        }
        check_block_len(length, self.config.max_compressed_len)?;
        if expand {
            cursor.read(length).map(Some)
        } else {
            cursor.skip(length)?;
            Ok(None)
        }
    }
}

/// Decode a replay with the default configuration.
pub fn decode_replay(bytes: &[u8]) -> Result<Replay> {
    ReplayDecoder::new().decode(bytes)
}

/// Parse `time|percentage` records; records of the wrong arity are skipped.
fn parse_life_bar(text: &str) -> Result<Vec<LifeBarSample>> {
    let mut samples = Vec::new();
    for record in text.split(',').map(str::trim).filter(|r| !r.is_empty()) {
        let Some((time, percentage)) = record.split_once('|') else {
            continue;
        };
        if percentage.contains('|') {
            continue;
        }
        let time = time
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| DecodeError::malformed_line(LIFE_BAR, record, "invalid time"))?;
        let percentage = percentage
            .trim()
            .parse::<f64>()
            .map_err(|_| DecodeError::malformed_line(LIFE_BAR, record, "invalid percentage"))?;
        samples.push(LifeBarSample {
            time: time as i32,
            percentage,
        });
    }
    Ok(samples)
}
