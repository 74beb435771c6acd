// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Derived beatmap quantities: max combo, durations, bpm range, counts.

use serde::{Deserialize, Serialize};

use super::hit_object::{HitObject, HitObjectKind};
use super::sections::BreakPeriod;
use super::timing::{find_timing_point, TimingPoint};

/// Format versions below this ignore slider velocity when counting ticks.
const VELOCITY_AWARE_TICKS_VERSION: i32 = 8;

/// Number of objects per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ObjectCounts {
    pub circles: u32,
    pub sliders: u32,
    pub spinners: u32,
    pub holds: u32,
}

impl ObjectCounts {
    pub fn of(objects: &[HitObject]) -> Self {
        let mut counts = Self::default();
        for object in objects {
            match object.kind() {
                HitObjectKind::Circle => counts.circles += 1,
                HitObjectKind::Slider => counts.sliders += 1,
                HitObjectKind::Spinner => counts.spinners += 1,
                HitObjectKind::Hold => counts.holds += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.circles + self.sliders + self.spinners + self.holds
    }
}

/// Maximum achievable combo.
///
/// Non-slider objects count one each. A slider contributes its head, tail,
/// repeats and ticks:
///
/// ```text
/// px_per_beat = slider_multiplier * 100 * velocity   (/ velocity again before v8)
/// num_beats   = pixel_length * slides / px_per_beat
/// ticks       = ceil((num_beats - 0.1) / slides * tick_rate)
/// combo      += max(0, (ticks - 1) * slides + slides + 1)
/// ```
pub fn max_combo(
    objects: &[HitObject],
    timing_points: &[TimingPoint],
    slider_multiplier: f64,
    slider_tick_rate: f64,
    format_version: i32,
) -> u32 {
    let mut combo: u64 = 0;
    for object in objects {
        let HitObject::Slider(slider) = object else {
            combo += 1;
            continue;
        };

        let velocity = find_timing_point(timing_points, slider.header.start_time)
            .map_or(1.0, |point| point.slider_velocity);
        let mut px_per_beat = slider_multiplier * 100.0 * velocity;
        if format_version < VELOCITY_AWARE_TICKS_VERSION {
            px_per_beat /= velocity;
        }

        let slides = f64::from(slider.slides);
        let num_beats = slider.pixel_length * slides / px_per_beat;
        let ticks = ((num_beats - 0.1) / slides * slider_tick_rate).ceil();
        if !ticks.is_finite() {
            continue;
        }
        let contribution = (ticks - 1.0) * slides + slides + 1.0;
        if contribution > 0.0 {
            combo += contribution as u64;
        }
    }
    combo.min(u64::from(u32::MAX)) as u32
}

/// Whole seconds from the first object's start to the last object's end.
pub fn play_time(objects: &[HitObject]) -> i32 {
    match (objects.first(), objects.last()) {
        (Some(first), Some(last)) => {
            let span = i64::from(last.end_time()) - i64::from(first.start_time());
            // any i32 span divided by 1000 fits back into i32
            span.div_euclid(1000) as i32
        }
        _ => 0,
    }
}

/// Sum of whole seconds over break periods.
pub fn break_time(breaks: &[BreakPeriod]) -> i32 {
    let total: i64 = breaks.iter().map(|b| b.duration().div_euclid(1000)).sum();
    total.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Play time minus break time; may be negative, saturating at the i32 range.
pub fn drain_time(play_time: i32, break_time: i32) -> i32 {
    play_time.saturating_sub(break_time)
}

/// `(min, max)` bpm over uninherited points; `(0, 0)` when there are none.
pub fn bpm_range(timing_points: &[TimingPoint]) -> (f64, f64) {
    timing_points
        .iter()
        .filter_map(TimingPoint::bpm)
        .fold(None, |range: Option<(f64, f64)>, bpm| match range {
            None => Some((bpm, bpm)),
            Some((lo, hi)) => Some((lo.min(bpm), hi.max(bpm))),
        })
        .unwrap_or((0.0, 0.0))
}
