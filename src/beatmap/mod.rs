// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Beatmap (`.osu`) decoding.
//!
//! The pipeline runs in one pass over an in-memory buffer:
//!
//! 1. Header line `osu file format v<N>` (optional UTF-8 BOM)
//! 2. [`sections::split_sections`] partitions the rest by `[Name]` headers
//! 3. Key/value sections decode independently
//! 4. Timing points decode next; hit objects then consult them for slider
//!    end times
//! 5. [`aggregate`] derives combo, durations and bpm range
//!
//! Every absolute millisecond time in `[Events]`, `[TimingPoints]` and
//! `[HitObjects]` is shifted by +24 ms for format versions below 5.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("map.osu")?;
//! let beatmap = osucodec::decode_beatmap(&bytes)?;
//! println!("{} ({} objects)", beatmap.metadata.full_name(), beatmap.hit_objects.len());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod hit_object;
pub mod sections;
pub mod timing;

use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DecodeError, GameMode, Result};
use crate::io::detection::BEATMAP_HEADER;

pub use aggregate::ObjectCounts;
pub use hit_object::{
    mania_column, taiko_colour, taiko_is_big, Circle, CurveType, EdgeSet, HitObject,
    HitObjectHeader, HitObjectKind, HitSample, HitSound, Hold, Slider, Spinner, TaikoColour,
};
pub use sections::{
    Background, BreakPeriod, Colour, ColoursSection, Countdown, DifficultySection, EditorSection,
    EventsSection, GeneralSection, MetadataSection, OverlayPosition, SampleSet, SectionKind, Video,
};
pub use timing::{find_timing_point, TimingPoint};

use hit_object::{decode_hit_objects, HitObjectContext};
use sections::split_sections;
use timing::decode_timing_points;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Format versions below this store times 24 ms early.
const LEGACY_OFFSET_VERSION: i32 = 5;
const LEGACY_OFFSET_MS: i32 = 24;

/// A fully decoded beatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    pub format_version: i32,
    /// Lowercase hex MD5 of the input buffer.
    pub content_hash: String,

    pub general: GeneralSection,
    pub editor: EditorSection,
    pub metadata: MetadataSection,
    pub difficulty: DifficultySection,
    pub events: EventsSection,
    pub timing_points: Vec<TimingPoint>,
    pub colours: ColoursSection,
    pub hit_objects: Vec<HitObject>,

    pub min_bpm: f64,
    pub max_bpm: f64,
    pub object_counts: ObjectCounts,
    pub max_combo: u32,
    /// Seconds.
    pub play_time: i32,
    /// Seconds.
    pub break_time: i32,
    /// Seconds; negative when breaks outlast play time.
    pub drain_time: i32,
}

impl Beatmap {
    pub fn mode(&self) -> GameMode {
        self.general.mode
    }

    /// Number of mania columns (circle size, rounded, at least 1).
    pub fn mania_key_count(&self) -> u32 {
        self.difficulty.circle_size.round().max(1.0) as u32
    }

    /// Mania column of `object` for this map's key count.
    pub fn mania_column(&self, object: &HitObject) -> u32 {
        mania_column(object, self.mania_key_count())
    }

    /// Timing point in effect at `time`, if any.
    pub fn timing_point_at(&self, time: i32) -> Option<&TimingPoint> {
        find_timing_point(&self.timing_points, time)
    }
}

/// Decode a complete `.osu` buffer.
pub fn decode_beatmap(bytes: &[u8]) -> Result<Beatmap> {
    let content_hash = hex::encode(Md5::digest(bytes));
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let decoded = String::from_utf8_lossy(body);

    // blank lines may precede the header
    let text = decoded.trim_start();
    let (header, rest) = text.split_once('\n').unwrap_or((text, ""));
    let format_version = parse_header(header)?;
    let offset = if format_version < LEGACY_OFFSET_VERSION {
        LEGACY_OFFSET_MS
    } else {
        0
    };

    let sections = split_sections(rest)?;
    let general = GeneralSection::decode(sections.lines(SectionKind::General))?;
    let editor = EditorSection::decode(sections.lines(SectionKind::Editor))?;
    let metadata = MetadataSection::decode(sections.lines(SectionKind::Metadata))?;
    let difficulty = DifficultySection::decode(sections.lines(SectionKind::Difficulty))?;
    let events = EventsSection::decode(sections.lines(SectionKind::Events), offset)?;
    let colours = ColoursSection::decode(sections.lines(SectionKind::Colours))?;
    let timing_points = decode_timing_points(sections.lines(SectionKind::TimingPoints), offset)?;

    let ctx = HitObjectContext {
        offset,
        slider_multiplier: difficulty.slider_multiplier,
        timing_points: &timing_points,
    };
    let hit_objects = decode_hit_objects(sections.lines(SectionKind::HitObjects), &ctx)?;

    let (min_bpm, max_bpm) = aggregate::bpm_range(&timing_points);
    let max_combo = aggregate::max_combo(
        &hit_objects,
        &timing_points,
        difficulty.slider_multiplier,
        difficulty.slider_tick_rate,
        format_version,
    );
    let play_time = aggregate::play_time(&hit_objects);
    let break_time = aggregate::break_time(&events.break_periods);

    debug!(
        format_version,
        timing_points = timing_points.len(),
        hit_objects = hit_objects.len(),
        max_combo,
        "decoded beatmap"
    );

    Ok(Beatmap {
        format_version,
        content_hash,
        object_counts: ObjectCounts::of(&hit_objects),
        general,
        editor,
        metadata,
        difficulty,
        events,
        timing_points,
        colours,
        hit_objects,
        min_bpm,
        max_bpm,
        max_combo,
        play_time,
        break_time,
        drain_time: aggregate::drain_time(play_time, break_time),
    })
}

/// Parse `osu file format v<N>`.
fn parse_header(line: &str) -> Result<i32> {
    let line = line.trim();
    line.strip_prefix(BEATMAP_HEADER)
        .and_then(|version| version.trim().parse().ok())
        .ok_or_else(|| DecodeError::malformed_header(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(parse_header("osu file format v14").unwrap(), 14);
        assert_eq!(parse_header("  osu file format v3\r").unwrap(), 3);
        assert!(matches!(
            parse_header("osu file format v"),
            Err(DecodeError::MalformedHeader { .. })
        ));
        assert!(matches!(
            parse_header("osu file format vX"),
            Err(DecodeError::MalformedHeader { .. })
        ));
        assert!(matches!(
            parse_header("[General]"),
            Err(DecodeError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn test_empty_buffer_is_malformed() {
        assert!(matches!(
            decode_beatmap(b""),
            Err(DecodeError::MalformedHeader { .. })
        ));
    }
}
