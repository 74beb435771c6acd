// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Timing points and the timeline lookup.
//!
//! A line is `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`.
//! Only the first two fields are mandatory; old formats stop there.
//!
//! Uninherited points set the beat length (positive, ms per beat). Inherited
//! points carry a negative beat length encoding a slider velocity multiplier
//! relative to the governing uninherited point:
//!
//! ```text
//! slider_velocity = 1 / (clamp(-beat_length, 10, 1000) / 100)
//! ```
//!
//! Both the velocity and the governing beat length are resolved while
//! decoding, so later consumers never walk back through the list.

use serde::{Deserialize, Serialize};

use super::sections::{content_lines, field, parse_field, parse_offset_time, SampleSet};
use crate::core::Result;

const SECTION: &str = "TimingPoints";

/// Beat length assumed when no uninherited point governs a time.
pub const DEFAULT_BEAT_LENGTH: f64 = 1000.0;

const EFFECT_KIAI: u32 = 1;
const EFFECT_OMIT_FIRST_BAR_LINE: u32 = 1 << 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub start_time: i32,
    /// Raw beat length as written (negative for inherited points).
    pub beat_length: f64,
    /// Beat length of the uninherited point governing this one.
    pub base_beat_length: f64,
    pub slider_velocity: f64,
    /// Beats per measure.
    pub time_signature: i32,
    pub sample_set: SampleSet,
    pub custom_sample_bank: i32,
    pub sample_volume: i32,
    /// True for uninherited (red line) points.
    pub timing_change: bool,
    pub kiai_mode: bool,
    pub omit_first_bar_line: bool,
}

impl TimingPoint {
    /// True for points that define the beat length.
    pub fn is_uninherited(&self) -> bool {
        self.timing_change && self.beat_length > 0.0
    }

    /// Beats per minute, for uninherited points only.
    pub fn bpm(&self) -> Option<f64> {
        self.is_uninherited().then(|| 60_000.0 / self.beat_length)
    }

    fn parse(line: &str, offset: i32) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let start_time =
            parse_offset_time(SECTION, line, field(SECTION, line, &fields, 0)?, offset)?;
        let beat_length: f64 = parse_field(SECTION, line, field(SECTION, line, &fields, 1)?)?;

        let optional = |index: usize| fields.get(index).copied().filter(|v| !v.is_empty());

        let time_signature = match optional(2) {
            Some(v) => parse_field(SECTION, line, v)?,
            None => 4,
        };
        let sample_set = match optional(3) {
            Some(v) => SampleSet::from_id(parse_field(SECTION, line, v)?)?,
            None => SampleSet::None,
        };
        let custom_sample_bank = match optional(4) {
            Some(v) => parse_field(SECTION, line, v)?,
            None => 0,
        };
        let sample_volume = match optional(5) {
            Some(v) => parse_field(SECTION, line, v)?,
            None => 100,
        };
        let timing_change = optional(6).map_or(true, |v| v.starts_with('1'));
        let effects: u32 = match optional(7) {
            Some(v) => parse_field(SECTION, line, v)?,
            None => 0,
        };

        Ok(Self {
            start_time,
            beat_length,
            base_beat_length: DEFAULT_BEAT_LENGTH,
            slider_velocity: slider_velocity(beat_length),
            time_signature,
            sample_set,
            custom_sample_bank,
            sample_volume,
            timing_change,
            kiai_mode: effects & EFFECT_KIAI != 0,
            omit_first_bar_line: effects & EFFECT_OMIT_FIRST_BAR_LINE != 0,
        })
    }
}

/// Velocity multiplier encoded by a beat length.
pub fn slider_velocity(beat_length: f64) -> f64 {
    if beat_length < 0.0 {
        1.0 / ((-beat_length).clamp(10.0, 1000.0) / 100.0)
    } else {
        1.0
    }
}

/// Decode the section into a start_time-ordered list with resolved
/// `base_beat_length` values.
pub(crate) fn decode_timing_points(lines: &[&str], offset: i32) -> Result<Vec<TimingPoint>> {
    let mut points = content_lines(lines)
        .map(|line| TimingPoint::parse(line, offset))
        .collect::<Result<Vec<_>>>()?;
    points.sort_by_key(|p| p.start_time);

    let mut governing = DEFAULT_BEAT_LENGTH;
    for point in &mut points {
        if point.is_uninherited() {
            governing = point.beat_length;
        }
        point.base_beat_length = governing;
    }
    Ok(points)
}

/// Find the point in effect at `time`.
///
/// Returns the last point whose start_time is `<= time` (the later one on
/// ties), or `None` if `time` precedes every point or the list is empty.
/// `points` must be sorted by start_time.
pub fn find_timing_point(points: &[TimingPoint], time: i32) -> Option<&TimingPoint> {
    let idx = points.partition_point(|p| p.start_time <= time);
    idx.checked_sub(1).map(|i| &points[i])
}
