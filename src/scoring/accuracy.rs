// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Accuracy formulas.

use super::LegacyStatistics;
use crate::core::GameMode;
use crate::replay::score_info::Statistics;

/// Accuracy in `[0, 1]` from the six legacy counts.
///
/// | mode     | numerator                                 | denominator                        |
/// |----------|-------------------------------------------|------------------------------------|
/// | standard | 300·n300 + 100·n100 + 50·n50              | 300·(n300+n100+n50+miss)           |
/// | taiko    | 300·n300 + 150·n100                       | 300·(n300+n100+n50+miss)           |
/// | catch    | n300 + n100 + n50                         | n300+n100+n50+miss+katu            |
/// | mania    | 300·(n300+geki) + 200·katu + 100·n100 + 50·n50 | 300·(n300+n100+n50+miss+geki+katu) |
///
/// A play without judged hits has accuracy 1.
pub fn legacy_accuracy(mode: GameMode, stats: &LegacyStatistics) -> f64 {
    let n300 = f64::from(stats.count_300);
    let n100 = f64::from(stats.count_100);
    let n50 = f64::from(stats.count_50);
    let geki = f64::from(stats.count_geki);
    let katu = f64::from(stats.count_katu);
    let miss = f64::from(stats.count_miss);

    let (numerator, denominator) = match mode {
        GameMode::Standard => (
            n300 * 300.0 + n100 * 100.0 + n50 * 50.0,
            (n300 + n100 + n50 + miss) * 300.0,
        ),
        GameMode::Taiko => (
            n300 * 300.0 + n100 * 150.0,
            (n300 + n100 + n50 + miss) * 300.0,
        ),
        GameMode::Catch => (n300 + n100 + n50, n300 + n100 + n50 + miss + katu),
        GameMode::Mania => (
            (n300 + geki) * 300.0 + katu * 200.0 + n100 * 100.0 + n50 * 50.0,
            (n300 + n100 + n50 + miss + geki + katu) * 300.0,
        ),
    };
    ratio(numerator, denominator)
}

/// Accuracy from open-scheme statistics against their achievable maximum.
///
/// Only judgements that affect accuracy contribute; bonus, ignore and
/// compatibility judgements as well as unknown names are skipped.
pub fn open_accuracy(mode: GameMode, statistics: &Statistics, maximum: &Statistics) -> f64 {
    ratio(weighted_sum(mode, statistics), weighted_sum(mode, maximum))
}

fn weighted_sum(mode: GameMode, statistics: &Statistics) -> f64 {
    statistics
        .iter()
        .filter(|(result, _)| result.affects_accuracy())
        .map(|(result, count)| f64::from(result.base_score(mode)) * f64::from(*count))
        .sum()
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}
