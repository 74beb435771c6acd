// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout osucodec.
//!
//! This module provides the foundational types for the library:
//! - [`DecodeError`] - Error handling shared by every decoder
//! - [`GameMode`] - The four rulesets a beatmap or replay targets
//! - [`Vector2`] - Playfield coordinates

pub mod error;

pub use error::{DecodeError, Result};

use serde::{Deserialize, Serialize};

/// Ruleset identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// osu!standard
    #[default]
    Standard,
    /// osu!taiko
    Taiko,
    /// osu!catch
    Catch,
    /// osu!mania
    Mania,
}

/// Error returned when parsing a `GameMode` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseGameModeError {
    _private: (),
}

impl std::fmt::Display for ParseGameModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid game mode name, expected 'standard', 'taiko', 'catch', or 'mania'"
        )
    }
}

impl std::error::Error for ParseGameModeError {}

impl std::str::FromStr for GameMode {
    type Err = ParseGameModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "osu" => Ok(GameMode::Standard),
            "taiko" => Ok(GameMode::Taiko),
            "catch" | "fruits" => Ok(GameMode::Catch),
            "mania" => Ok(GameMode::Mania),
            _ => Err(ParseGameModeError { _private: () }),
        }
    }
}

impl GameMode {
    /// Resolve a raw ruleset id as stored in replays and `[General]`.
    pub fn from_id(id: i64) -> Result<Self> {
        match id {
            0 => Ok(GameMode::Standard),
            1 => Ok(GameMode::Taiko),
            2 => Ok(GameMode::Catch),
            3 => Ok(GameMode::Mania),
            _ => Err(DecodeError::UnreachableMode { mode: id }),
        }
    }

    /// Raw ruleset id.
    pub fn id(&self) -> u8 {
        match self {
            GameMode::Standard => 0,
            GameMode::Taiko => 1,
            GameMode::Catch => 2,
            GameMode::Mania => 3,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Standard => "standard",
            GameMode::Taiko => "taiko",
            GameMode::Catch => "catch",
            GameMode::Mania => "mania",
        }
    }
}

/// A point on the 512x384 playfield.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Vector2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_mode_from_id() {
        assert_eq!(GameMode::from_id(0).unwrap(), GameMode::Standard);
        assert_eq!(GameMode::from_id(3).unwrap(), GameMode::Mania);
        assert_eq!(
            GameMode::from_id(4),
            Err(DecodeError::UnreachableMode { mode: 4 })
        );
        assert!(GameMode::from_id(-1).is_err());
    }

    #[test]
    fn test_game_mode_round_trip_id() {
        for id in 0..4 {
            assert_eq!(GameMode::from_id(id).unwrap().id() as i64, id);
        }
    }

    #[test]
    fn test_game_mode_from_str() {
        assert_eq!("Taiko".parse::<GameMode>().unwrap(), GameMode::Taiko);
        assert_eq!("fruits".parse::<GameMode>().unwrap(), GameMode::Catch);
        assert!("drums".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_vector_distance() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f64::EPSILON);
    }
}
