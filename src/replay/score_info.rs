// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Open-scheme score document.
//!
//! Replays written by client versions from 30000001 onwards append an
//! LZMA-compressed JSON object with per-judgement statistics and the
//! modifier list as acronyms with settings.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::core::{GameMode, Result};
use crate::io::compression::decompress_lzma;
use crate::scoring::Grade;

/// A judgement kind of the open scheme.
///
/// Names that this crate does not know are kept as [`HitResult::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HitResult {
    None,
    Miss,
    Meh,
    Ok,
    Good,
    Great,
    Perfect,
    SmallTickMiss,
    SmallTickHit,
    LargeTickMiss,
    LargeTickHit,
    SmallBonus,
    LargeBonus,
    IgnoreMiss,
    IgnoreHit,
    ComboBreak,
    SliderTailHit,
    LegacyComboIncrease,
    Unknown(String),
}

static KNOWN: [(HitResult, &str, u8); 18] = [
    (HitResult::None, "none", 0),
    (HitResult::Miss, "miss", 1),
    (HitResult::Meh, "meh", 2),
    (HitResult::Ok, "ok", 3),
    (HitResult::Good, "good", 4),
    (HitResult::Great, "great", 5),
    (HitResult::Perfect, "perfect", 6),
    (HitResult::SmallTickMiss, "small_tick_miss", 7),
    (HitResult::SmallTickHit, "small_tick_hit", 8),
    (HitResult::LargeTickMiss, "large_tick_miss", 9),
    (HitResult::LargeTickHit, "large_tick_hit", 10),
    (HitResult::SmallBonus, "small_bonus", 11),
    (HitResult::LargeBonus, "large_bonus", 12),
    (HitResult::IgnoreMiss, "ignore_miss", 13),
    (HitResult::IgnoreHit, "ignore_hit", 14),
    (HitResult::ComboBreak, "combo_break", 15),
    (HitResult::SliderTailHit, "slider_tail_hit", 16),
    (HitResult::LegacyComboIncrease, "legacy_combo_increase", 99),
];

impl HitResult {
    fn known(&self) -> Option<&'static (HitResult, &'static str, u8)> {
        KNOWN.iter().find(|(result, _, _)| result == self)
    }

    pub fn name(&self) -> &str {
        match self {
            HitResult::Unknown(name) => name,
            known => known.known().map_or("", |entry| entry.1),
        }
    }

    /// Ordering value used by the client; `None` for unknown names.
    pub fn int_value(&self) -> Option<u8> {
        self.known().map(|entry| entry.2)
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self, HitResult::SmallBonus | HitResult::LargeBonus)
    }

    /// Whether the judgement takes part in scoring at all.
    pub fn is_scorable(&self) -> bool {
        match self {
            HitResult::LegacyComboIncrease | HitResult::ComboBreak | HitResult::SliderTailHit => {
                true
            }
            other => other
                .int_value()
                .is_some_and(|value| (1..13).contains(&value)),
        }
    }

    pub fn affects_accuracy(&self) -> bool {
        match self {
            HitResult::LegacyComboIncrease | HitResult::ComboBreak => false,
            other => other.is_scorable() && !other.is_bonus(),
        }
    }

    /// Score value of one judgement in `mode`.
    pub fn base_score(&self, mode: GameMode) -> u32 {
        match (mode, self) {
            (GameMode::Taiko, HitResult::Ok) => 150,
            (GameMode::Catch, HitResult::Great)
            | (GameMode::Catch, HitResult::LargeTickHit)
            | (GameMode::Catch, HitResult::SmallTickHit) => 300,
            (GameMode::Catch, HitResult::LargeBonus) => 200,
            (GameMode::Mania, HitResult::Perfect) => 305,
            (_, HitResult::SmallTickHit) => 10,
            (_, HitResult::LargeTickHit) => 30,
            (_, HitResult::SliderTailHit) => 150,
            (_, HitResult::Meh) => 50,
            (_, HitResult::Ok) => 100,
            (_, HitResult::Good) => 200,
            (_, HitResult::Great) | (_, HitResult::Perfect) => 300,
            (_, HitResult::SmallBonus) => 10,
            (_, HitResult::LargeBonus) => 50,
            _ => 0,
        }
    }
}

impl From<String> for HitResult {
    fn from(name: String) -> Self {
        KNOWN
            .iter()
            .find(|(_, known, _)| *known == name)
            .map_or(HitResult::Unknown(name), |(result, _, _)| result.clone())
    }
}

impl From<HitResult> for String {
    fn from(result: HitResult) -> Self {
        match result {
            HitResult::Unknown(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for HitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Judgement counts keyed by kind.
pub type Statistics = BTreeMap<HitResult, u32>;

/// A modifier of the open scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMod {
    pub acronym: String,
    #[serde(default)]
    pub settings: serde_json::Map<String, serde_json::Value>,
}

/// The trailing score document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInfo {
    #[serde(default = "unset_id")]
    pub online_id: i64,
    pub mods: Vec<ScoreMod>,
    #[serde(deserialize_with = "statistics")]
    pub statistics: Statistics,
    #[serde(deserialize_with = "statistics")]
    pub maximum_statistics: Statistics,
    pub client_version: String,
    #[serde(default = "unset_id")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "lenient_grade")]
    pub rank: Option<Grade>,
    #[serde(default)]
    pub total_score_without_mods: Option<i64>,
}

fn unset_id() -> i64 {
    -1
}

/// Null counts are dropped.
fn statistics<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Statistics, D::Error> {
    let raw = BTreeMap::<HitResult, Option<u32>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(result, count)| count.map(|count| (result, count)))
        .collect())
}

/// Ranks outside the letter ladder (such as a failed play) read as absent.
fn lenient_grade<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Grade>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|rank| rank.parse().ok()))
}

impl ScoreInfo {
    /// Parse the JSON text of the document.
    pub fn from_json(json: &[u8]) -> Result<Self> {
        let info: ScoreInfo = serde_json::from_slice(json)?;
        for result in info.statistics.keys().chain(info.maximum_statistics.keys()) {
            if let HitResult::Unknown(name) = result {
                warn!(judgement = %name, "unknown judgement in score document");
            }
        }
        Ok(info)
    }

    /// Decompress and parse an embedded document block.
    pub fn decode(compressed: &[u8]) -> Result<Self> {
        let json = decompress_lzma(compressed)?;
        let info = Self::from_json(&json)?;
        debug!(
            mods = info.mods.len(),
            judgements = info.statistics.len(),
            "decoded score document"
        );
        Ok(info)
    }

    pub fn has_mod(&self, acronym: &str) -> bool {
        self.mods.iter().any(|m| m.acronym.eq_ignore_ascii_case(acronym))
    }

    /// Hidden or Flashlight present.
    pub fn has_silver_grade(&self) -> bool {
        self.has_mod("HD") || self.has_mod("FL")
    }

    /// Count of `result`, zero when absent.
    pub fn count(&self, result: &HitResult) -> u32 {
        self.statistics.get(result).copied().unwrap_or(0)
    }
}
