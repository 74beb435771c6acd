// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `[Difficulty]` section.

use serde::{Deserialize, Serialize};

use super::entries;
use crate::core::Result;

const SECTION: &str = "Difficulty";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultySection {
    pub hp_drain_rate: f64,
    pub circle_size: f64,
    pub overall_difficulty: f64,
    /// Old maps omit this key; it then equals `overall_difficulty`.
    pub approach_rate: f64,
    pub slider_multiplier: f64,
    pub slider_tick_rate: f64,
}

impl Default for DifficultySection {
    fn default() -> Self {
        Self {
            hp_drain_rate: 5.0,
            circle_size: 5.0,
            overall_difficulty: 5.0,
            approach_rate: 5.0,
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
        }
    }
}

impl DifficultySection {
    pub(crate) fn decode(lines: &[&str]) -> Result<Self> {
        let mut difficulty = DifficultySection::default();
        let mut approach_rate = None;
        for entry in entries(lines) {
            match entry.key {
                "HPDrainRate" => difficulty.hp_drain_rate = entry.number(SECTION)?,
                "CircleSize" => difficulty.circle_size = entry.number(SECTION)?,
                "OverallDifficulty" => difficulty.overall_difficulty = entry.number(SECTION)?,
                "ApproachRate" => approach_rate = Some(entry.number(SECTION)?),
                "SliderMultiplier" => difficulty.slider_multiplier = entry.number(SECTION)?,
                "SliderTickRate" => difficulty.slider_tick_rate = entry.number(SECTION)?,
                _ => {}
            }
        }
        difficulty.approach_rate = approach_rate.unwrap_or(difficulty.overall_difficulty);
        Ok(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_difficulty() {
        let lines = [
            "HPDrainRate:6",
            "CircleSize:4",
            "OverallDifficulty:8.5",
            "ApproachRate:9.2",
            "SliderMultiplier:1.8",
            "SliderTickRate:2",
        ];
        let difficulty = DifficultySection::decode(&lines).unwrap();
        assert!((difficulty.overall_difficulty - 8.5).abs() < f64::EPSILON);
        assert!((difficulty.approach_rate - 9.2).abs() < f64::EPSILON);
        assert!((difficulty.slider_tick_rate - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_approach_rate_falls_back_to_od() {
        let difficulty = DifficultySection::decode(&["OverallDifficulty:7"]).unwrap();
        assert!((difficulty.approach_rate - 7.0).abs() < f64::EPSILON);
        assert!((difficulty.slider_multiplier - 1.4).abs() < f64::EPSILON);
    }
}
