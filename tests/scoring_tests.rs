// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Accuracy and grade tests across both score schemes.
//!
//! Run with: cargo test --test scoring_tests

use proptest::prelude::*;

use osucodec::replay::{HitResult, ScoreInfo, Statistics};
use osucodec::scoring::{legacy_accuracy, legacy_grade, open_accuracy, open_grade};
use osucodec::{GameMode, Grade, LegacyStatistics, Mods};

const MODES: [GameMode; 4] = [
    GameMode::Standard,
    GameMode::Taiko,
    GameMode::Catch,
    GameMode::Mania,
];

fn counts(n300: u16, n100: u16, n50: u16, geki: u16, katu: u16, miss: u16) -> LegacyStatistics {
    LegacyStatistics {
        count_300: n300,
        count_100: n100,
        count_50: n50,
        count_geki: geki,
        count_katu: katu,
        count_miss: miss,
    }
}

#[test]
fn test_perfect_standard_play() {
    let stats = counts(500, 0, 0, 0, 0, 0);
    assert_eq!(legacy_accuracy(GameMode::Standard, &stats), 1.0);
    assert_eq!(legacy_grade(GameMode::Standard, &stats, Mods::empty()), Grade::X);
    assert_eq!(legacy_grade(GameMode::Standard, &stats, Mods::HIDDEN), Grade::XH);
    assert_eq!(
        legacy_grade(GameMode::Standard, &stats, Mods::DOUBLE_TIME | Mods::NIGHTCORE),
        Grade::X
    );
}

#[test]
fn test_all_zero_counts() {
    for mode in MODES {
        assert_eq!(legacy_accuracy(mode, &LegacyStatistics::default()), 1.0);
    }
}

#[test]
fn test_all_misses() {
    let stats = counts(0, 0, 0, 0, 0, 40);
    for mode in MODES {
        assert_eq!(legacy_accuracy(mode, &stats), 0.0, "{mode:?}");
        assert_eq!(legacy_grade(mode, &stats, Mods::FLASHLIGHT), Grade::D, "{mode:?}");
    }
}

#[test]
fn test_mania_accuracy_ladder() {
    // 96% accuracy: S
    let stats = counts(0, 0, 0, 88, 12, 0);
    let accuracy = legacy_accuracy(GameMode::Mania, &stats);
    assert!((accuracy - (88.0 * 300.0 + 12.0 * 200.0) / 30_000.0).abs() < 1e-12);
    assert_eq!(legacy_grade(GameMode::Mania, &stats, Mods::empty()), Grade::S);
    assert_eq!(legacy_grade(GameMode::Mania, &stats, Mods::HIDDEN), Grade::SH);
}

fn document(mods: &str, statistics: &str, maximum: &str) -> ScoreInfo {
    let json = format!(
        r#"{{"mods": {mods}, "statistics": {statistics}, "maximum_statistics": {maximum}, "client_version": "test"}}"#
    );
    ScoreInfo::from_json(json.as_bytes()).unwrap()
}

#[test]
fn test_open_scheme_perfect() {
    let info = document(
        r#"[{"acronym": "FL"}]"#,
        r#"{"perfect": 120, "great": 30, "legacy_combo_increase": 99}"#,
        r#"{"perfect": 150}"#,
    );
    let accuracy = open_accuracy(GameMode::Mania, &info.statistics, &info.maximum_statistics);
    // perfect is 305 in mania, great 300
    let expected = (120.0 * 305.0 + 30.0 * 300.0) / (150.0 * 305.0);
    assert!((accuracy - expected).abs() < 1e-12);
    assert_eq!(open_grade(GameMode::Mania, accuracy, &info), Grade::SH);
}

#[test]
fn test_open_scheme_unknown_judgements_ignored() {
    let info = document(
        "[]",
        r#"{"great": 10, "brand_new_judgement": 1000}"#,
        r#"{"great": 10, "brand_new_judgement": 5}"#,
    );
    assert!(info
        .statistics
        .contains_key(&HitResult::Unknown("brand_new_judgement".to_string())));
    let accuracy = open_accuracy(GameMode::Standard, &info.statistics, &info.maximum_statistics);
    assert_eq!(accuracy, 1.0);
    assert_eq!(open_grade(GameMode::Standard, accuracy, &info), Grade::X);
}

#[test]
fn test_open_scheme_empty_statistics() {
    let info = document("[]", "{}", "{}");
    let accuracy = open_accuracy(GameMode::Taiko, &info.statistics, &info.maximum_statistics);
    assert_eq!(accuracy, 1.0);
}

#[test]
fn test_open_scheme_catch_weights() {
    let statistics: Statistics = [
        (HitResult::Great, 50),
        (HitResult::LargeTickHit, 20),
        (HitResult::SmallTickHit, 28),
        (HitResult::SmallTickMiss, 2),
        (HitResult::LargeBonus, 3),
    ]
    .into_iter()
    .collect();
    let maximum: Statistics = [
        (HitResult::Great, 50),
        (HitResult::LargeTickHit, 20),
        (HitResult::SmallTickHit, 30),
        (HitResult::LargeBonus, 3),
    ]
    .into_iter()
    .collect();
    let accuracy = open_accuracy(GameMode::Catch, &statistics, &maximum);
    assert!((accuracy - 98.0 / 100.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn prop_legacy_accuracy_in_unit_range(
        n300 in any::<u16>(),
        n100 in any::<u16>(),
        n50 in any::<u16>(),
        geki in any::<u16>(),
        katu in any::<u16>(),
        miss in any::<u16>(),
    ) {
        let stats = counts(n300, n100, n50, geki, katu, miss);
        for mode in MODES {
            let accuracy = legacy_accuracy(mode, &stats);
            prop_assert!((0.0..=1.0).contains(&accuracy), "{:?}: {}", mode, accuracy);
        }
    }

    #[test]
    fn prop_silver_only_changes_top_grades(
        n300 in 0u16..200,
        n100 in 0u16..50,
        n50 in 0u16..50,
        miss in 0u16..20,
    ) {
        let stats = counts(n300, n100, n50, 0, 0, miss);
        let plain = legacy_grade(GameMode::Standard, &stats, Mods::empty());
        let silver = legacy_grade(GameMode::Standard, &stats, Mods::HIDDEN);
        prop_assert_eq!(plain.silver(), silver);
    }
}
