// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Hit objects: decoding, slider timing and per-mode derivations.
//!
//! Every `[HitObjects]` line starts with `x,y,time,type,hitSound`. The type
//! field is a bit mask:
//!
//! | bit | meaning |
//! |-----|---------|
//! | 0 | circle |
//! | 1 | slider |
//! | 2 | new combo |
//! | 3 | spinner |
//! | 4-6 | combo colour offset |
//! | 7 | hold note |
//!
//! The remaining fields depend on the variant:
//!
//! ```text
//! circle   ...,hitSample
//! slider   ...,curveType|x:y|...,slides,length,edgeSounds,edgeSets,hitSample
//! spinner  ...,endTime,hitSample
//! hold     ...,endTime:hitSample
//! ```

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::sections::{content_lines, field, parse_field, parse_offset_time, SampleSet};
use super::timing::{find_timing_point, TimingPoint, DEFAULT_BEAT_LENGTH};
use crate::core::{DecodeError, Result, Vector2};

const SECTION: &str = "HitObjects";

const TYPE_CIRCLE: i32 = 1;
const TYPE_SLIDER: i32 = 1 << 1;
const TYPE_NEW_COMBO: i32 = 1 << 2;
const TYPE_SPINNER: i32 = 1 << 3;
const TYPE_COMBO_OFFSET: i32 = 0b111 << 4;
const TYPE_HOLD: i32 = 1 << 7;

/// Playfield width used for mania column mapping.
const PLAYFIELD_WIDTH: f64 = 512.0;

bitflags! {
    /// Hit sounds played on a hit object or slider edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct HitSound: u8 {
        const NORMAL = 1;
        const WHISTLE = 1 << 1;
        const FINISH = 1 << 2;
        const CLAP = 1 << 3;
    }
}

impl HitSound {
    fn from_raw(raw: i32) -> Self {
        HitSound::from_bits_truncate((raw & 0xFF) as u8)
    }
}

/// Custom sample override (`normalSet:additionSet:index:volume:filename`).
///
/// Decoding is lenient: missing or unreadable fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HitSample {
    pub normal_set: SampleSet,
    pub addition_set: SampleSet,
    pub index: i32,
    pub volume: i32,
    pub filename: String,
}

impl HitSample {
    fn parse(raw: &str) -> Self {
        let mut parts = raw.split(':');
        let mut next = || parts.next().map(str::trim).filter(|p| !p.is_empty());
        let set = |part: Option<&str>| {
            part.and_then(|p| p.parse().ok())
                .and_then(|id| SampleSet::from_id(id).ok())
                .unwrap_or(SampleSet::None)
        };
        let normal_set = set(next());
        let addition_set = set(next());
        let index = next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let volume = next().and_then(|p| p.parse().ok()).unwrap_or(0);
        let filename = next().unwrap_or_default().to_string();
        Self {
            normal_set,
            addition_set,
            index,
            volume,
            filename,
        }
    }
}

/// Sample sets for one slider edge (`normal:addition`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeSet {
    pub normal_set: SampleSet,
    pub addition_set: SampleSet,
}

/// Fields shared by every hit object variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitObjectHeader {
    pub position: Vector2,
    pub start_time: i32,
    /// Raw type mask as written.
    pub raw_type: i32,
    pub hit_sound: HitSound,
    /// Combo colour skip, 0..=7.
    pub combo_offset: u8,
    pub is_new_combo: bool,
    pub hit_sample: HitSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveType {
    Bezier,
    Catmull,
    Linear,
    PerfectCircle,
}

impl CurveType {
    fn from_letter(letter: char) -> Result<Self> {
        match letter {
            'B' => Ok(CurveType::Bezier),
            'C' => Ok(CurveType::Catmull),
            'L' => Ok(CurveType::Linear),
            'P' => Ok(CurveType::PerfectCircle),
            other => Err(DecodeError::invalid_enum("curve type", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(flatten)]
    pub header: HitObjectHeader,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slider {
    #[serde(flatten)]
    pub header: HitObjectHeader,
    pub curve_type: CurveType,
    /// Explicit Bezier degree, when written.
    pub bezier_degree: Option<u32>,
    pub curve_points: Vec<Vector2>,
    /// Number of passes over the curve (>= 1).
    pub slides: u32,
    pub repeat_count: u32,
    pub pixel_length: f64,
    pub end_time: i32,
    pub edge_sounds: Vec<HitSound>,
    pub edge_sets: Vec<EdgeSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spinner {
    #[serde(flatten)]
    pub header: HitObjectHeader,
    pub end_time: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    #[serde(flatten)]
    pub header: HitObjectHeader,
    pub end_time: i32,
}

/// A decoded hit object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum HitObject {
    Circle(Circle),
    Slider(Slider),
    Spinner(Spinner),
    Hold(Hold),
}

/// Variant tag without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitObjectKind {
    Circle,
    Slider,
    Spinner,
    Hold,
}

impl HitObject {
    pub fn header(&self) -> &HitObjectHeader {
        match self {
            HitObject::Circle(c) => &c.header,
            HitObject::Slider(s) => &s.header,
            HitObject::Spinner(s) => &s.header,
            HitObject::Hold(h) => &h.header,
        }
    }

    pub fn kind(&self) -> HitObjectKind {
        match self {
            HitObject::Circle(_) => HitObjectKind::Circle,
            HitObject::Slider(_) => HitObjectKind::Slider,
            HitObject::Spinner(_) => HitObjectKind::Spinner,
            HitObject::Hold(_) => HitObjectKind::Hold,
        }
    }

    pub fn start_time(&self) -> i32 {
        self.header().start_time
    }

    /// End time; circles end where they start.
    pub fn end_time(&self) -> i32 {
        match self {
            HitObject::Circle(c) => c.header.start_time,
            HitObject::Slider(s) => s.end_time,
            HitObject::Spinner(s) => s.end_time,
            HitObject::Hold(h) => h.end_time,
        }
    }

    pub fn position(&self) -> Vector2 {
        self.header().position
    }

    pub fn is_slider(&self) -> bool {
        matches!(self, HitObject::Slider(_))
    }
}

/// Drum colour of a taiko hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaikoColour {
    /// Centre (don)
    Red,
    /// Rim (kat)
    Blue,
}

/// Taiko colour: blue when whistle or clap is set, red otherwise.
pub fn taiko_colour(object: &HitObject) -> TaikoColour {
    let sound = object.header().hit_sound;
    if sound.intersects(HitSound::WHISTLE | HitSound::CLAP) {
        TaikoColour::Blue
    } else {
        TaikoColour::Red
    }
}

/// Taiko big (finisher) note.
pub fn taiko_is_big(object: &HitObject) -> bool {
    object.header().hit_sound.contains(HitSound::FINISH)
}

/// Mania column from the x position, for a `keys`-column layout.
pub fn mania_column(object: &HitObject, keys: u32) -> u32 {
    if keys == 0 {
        return 0;
    }
    let width = PLAYFIELD_WIDTH / f64::from(keys);
    let column = (object.position().x / width).floor();
    if column <= 0.0 {
        0
    } else {
        (column as u32).min(keys - 1)
    }
}

/// Slider end time for the given start and timeline state.
///
/// `end = round(start + slides * length / (100 * multiplier * velocity / beat_length))`,
/// with half-way cases rounded to even. Degenerate inputs (zero multiplier,
/// non-finite durations) yield `start_time`.
pub fn slider_end_time(
    start_time: i32,
    slides: u32,
    pixel_length: f64,
    slider_multiplier: f64,
    slider_velocity: f64,
    beat_length: f64,
) -> i32 {
    let px_per_ms = 100.0 * slider_multiplier * slider_velocity / beat_length;
    let duration = f64::from(slides) * pixel_length / px_per_ms;
    if !duration.is_finite() || duration <= 0.0 {
        return start_time;
    }
    let end = (f64::from(start_time) + duration).round_ties_even();
    if end >= f64::from(i32::MAX) {
        i32::MAX
    } else {
        end as i32
    }
}

/// Inputs from the other sections needed to decode hit objects.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HitObjectContext<'a> {
    pub offset: i32,
    pub slider_multiplier: f64,
    pub timing_points: &'a [TimingPoint],
}

/// Decode the section into a start_time-ordered list.
pub(crate) fn decode_hit_objects(
    lines: &[&str],
    ctx: &HitObjectContext<'_>,
) -> Result<Vec<HitObject>> {
    let mut objects = content_lines(lines)
        .map(|line| decode_line(line, ctx))
        .collect::<Result<Vec<_>>>()?;
    objects.sort_by_key(HitObject::start_time);
    Ok(objects)
}

fn decode_line(line: &str, ctx: &HitObjectContext<'_>) -> Result<HitObject> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let x: f64 = parse_field(SECTION, line, field(SECTION, line, &fields, 0)?)?;
    let y: f64 = parse_field(SECTION, line, field(SECTION, line, &fields, 1)?)?;
    let start_time =
        parse_offset_time(SECTION, line, field(SECTION, line, &fields, 2)?, ctx.offset)?;
    let raw_type: i32 = parse_field(SECTION, line, field(SECTION, line, &fields, 3)?)?;
    let raw_sound: i32 = parse_field(SECTION, line, field(SECTION, line, &fields, 4)?)?;

    let mut header = HitObjectHeader {
        position: Vector2::new(x, y),
        start_time,
        raw_type,
        hit_sound: HitSound::from_raw(raw_sound),
        combo_offset: ((raw_type & TYPE_COMBO_OFFSET) >> 4) as u8,
        is_new_combo: raw_type & TYPE_NEW_COMBO != 0,
        hit_sample: HitSample::default(),
    };
    let sample_at = |index: usize| fields.get(index).map(|raw| HitSample::parse(raw));

    let kind = raw_type & !(TYPE_NEW_COMBO | TYPE_COMBO_OFFSET);
    if kind & TYPE_CIRCLE != 0 {
        header.hit_sample = sample_at(5).unwrap_or_default();
        Ok(HitObject::Circle(Circle { header }))
    } else if kind & TYPE_SLIDER != 0 {
        header.hit_sample = sample_at(10).unwrap_or_default();
        decode_slider(line, &fields, header, ctx).map(HitObject::Slider)
    } else if kind & TYPE_SPINNER != 0 {
        let end_time =
            parse_offset_time(SECTION, line, field(SECTION, line, &fields, 5)?, ctx.offset)?;
        header.hit_sample = sample_at(6).unwrap_or_default();
        Ok(HitObject::Spinner(Spinner { header, end_time }))
    } else if kind & TYPE_HOLD != 0 {
        let tail = field(SECTION, line, &fields, 5)?;
        let (end, sample) = tail.split_once(':').unwrap_or((tail, ""));
        let end_time = parse_offset_time(SECTION, line, end, ctx.offset)?;
        header.hit_sample = HitSample::parse(sample);
        Ok(HitObject::Hold(Hold { header, end_time }))
    } else {
        Err(DecodeError::invalid_enum("hit object type", raw_type))
    }
}

fn decode_slider(
    line: &str,
    fields: &[&str],
    header: HitObjectHeader,
    ctx: &HitObjectContext<'_>,
) -> Result<Slider> {
    let curve = field(SECTION, line, fields, 5)?;
    let mut tokens = curve.split('|');
    let type_token = tokens.next().unwrap_or_default();
    let mut letters = type_token.chars();
    let letter = letters
        .next()
        .ok_or_else(|| DecodeError::invalid_enum("curve type", type_token))?;
    let curve_type = CurveType::from_letter(letter)?;
    let bezier_degree = match curve_type {
        CurveType::Bezier => letters.as_str().parse::<u32>().ok().filter(|d| *d > 0),
        _ => None,
    };
    let curve_points = tokens
        .filter_map(|token| token.split_once(':'))
        .map(|(px, py)| {
            Ok(Vector2::new(
                parse_field(SECTION, line, px)?,
                parse_field(SECTION, line, py)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let slides_raw: i64 = parse_field(SECTION, line, field(SECTION, line, fields, 6)?)?;
    let slides = slides_raw.clamp(1, i64::from(u32::MAX)) as u32;
    let pixel_length = parse_field::<f64>(SECTION, line, field(SECTION, line, fields, 7)?)?.max(0.0);

    let edge_sounds = match fields.get(8).filter(|f| !f.is_empty()) {
        Some(raw) => raw
            .split('|')
            .map(|s| parse_field(SECTION, line, s).map(HitSound::from_raw))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    let edge_sets = match fields.get(9).filter(|f| !f.is_empty()) {
        Some(raw) => raw
            .split('|')
            .map(|pair| {
                let sample = HitSample::parse(pair);
                EdgeSet {
                    normal_set: sample.normal_set,
                    addition_set: sample.addition_set,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let (slider_velocity, beat_length) = match find_timing_point(ctx.timing_points, header.start_time)
    {
        Some(point) => (point.slider_velocity, point.base_beat_length),
        None => (1.0, DEFAULT_BEAT_LENGTH),
    };
    let end_time = slider_end_time(
        header.start_time,
        slides,
        pixel_length,
        ctx.slider_multiplier,
        slider_velocity,
        beat_length,
    );

    Ok(Slider {
        header,
        curve_type,
        bezier_degree,
        curve_points,
        slides,
        repeat_count: slides - 1,
        pixel_length,
        end_time,
        edge_sounds,
        edge_sets,
    })
}
