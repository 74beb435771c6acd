// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Grade ladders.

use super::accuracy::legacy_accuracy;
use super::{Grade, LegacyStatistics};
use crate::core::GameMode;
use crate::replay::mods::Mods;
use crate::replay::score_info::{HitResult, ScoreInfo};

/// Legacy letter grade, silver when Hidden or Flashlight is active.
///
/// Standard and taiko grade on the share of 300s and 50s; catch and mania
/// grade on accuracy.
pub fn legacy_grade(mode: GameMode, stats: &LegacyStatistics, mods: Mods) -> Grade {
    let grade = match mode {
        GameMode::Standard | GameMode::Taiko => ratio_grade(stats),
        GameMode::Catch => ladder(legacy_accuracy(mode, stats), [0.98, 0.94, 0.9, 0.85]),
        GameMode::Mania => ladder(legacy_accuracy(mode, stats), [0.95, 0.9, 0.8, 0.7]),
    };
    if mods.has_silver_grade() {
        grade.silver()
    } else {
        grade
    }
}

fn ratio_grade(stats: &LegacyStatistics) -> Grade {
    let total = stats.total_hits();
    if total == 0 {
        return Grade::X;
    }
    let total = f64::from(total);
    let r300 = f64::from(stats.count_300) / total;
    let r50 = f64::from(stats.count_50) / total;
    let no_miss = stats.count_miss == 0;

    if r300 == 1.0 {
        Grade::X
    } else if r300 > 0.9 && r50 <= 0.01 && no_miss {
        Grade::S
    } else if (r300 > 0.8 && no_miss) || r300 > 0.9 {
        Grade::A
    } else if (r300 > 0.7 && no_miss) || r300 > 0.8 {
        Grade::B
    } else if r300 > 0.6 {
        Grade::C
    } else {
        Grade::D
    }
}

/// Strict thresholds for S, A, B and C; exactly 1 is X.
fn ladder(accuracy: f64, [s, a, b, c]: [f64; 4]) -> Grade {
    if accuracy == 1.0 {
        Grade::X
    } else if accuracy > s {
        Grade::S
    } else if accuracy > a {
        Grade::A
    } else if accuracy > b {
        Grade::B
    } else if accuracy > c {
        Grade::C
    } else {
        Grade::D
    }
}

/// Open-scheme grade from an accuracy computed by
/// [`open_accuracy`](super::open_accuracy).
///
/// Thresholds are inclusive. Any miss in standard or taiko caps the grade
/// at A; an `HD` or `FL` modifier gives the silver variants.
pub fn open_grade(mode: GameMode, accuracy: f64, info: &ScoreInfo) -> Grade {
    let mut grade = if accuracy >= 1.0 {
        Grade::X
    } else if accuracy >= 0.95 {
        Grade::S
    } else if accuracy >= 0.9 {
        Grade::A
    } else if accuracy >= 0.8 {
        Grade::B
    } else if accuracy >= 0.7 {
        Grade::C
    } else {
        Grade::D
    };

    let missed = info.count(&HitResult::Miss) > 0;
    if matches!(mode, GameMode::Standard | GameMode::Taiko)
        && missed
        && matches!(grade, Grade::X | Grade::S)
    {
        grade = Grade::A;
    }

    if info.has_silver_grade() {
        grade.silver()
    } else {
        grade
    }
}
