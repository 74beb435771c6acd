// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `[General]` section.

use serde::{Deserialize, Serialize};

use super::entries;
use crate::core::{DecodeError, GameMode, Result};

const SECTION: &str = "General";

/// Pre-map countdown speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Countdown {
    None,
    #[default]
    Normal,
    Half,
    Double,
}

impl Countdown {
    /// Accepts the numeric form used in files as well as the variant name.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "0" | "None" => Ok(Countdown::None),
            "1" | "Normal" => Ok(Countdown::Normal),
            "2" | "Half" => Ok(Countdown::Half),
            "3" | "Double" => Ok(Countdown::Double),
            _ => Err(DecodeError::invalid_enum("countdown", value)),
        }
    }
}

/// Hit sound sample bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleSet {
    None,
    #[default]
    Normal,
    Soft,
    Drum,
}

impl SampleSet {
    /// Resolve the name form (`SampleSet: Soft`).
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "None" => Ok(SampleSet::None),
            "Normal" => Ok(SampleSet::Normal),
            "Soft" => Ok(SampleSet::Soft),
            "Drum" => Ok(SampleSet::Drum),
            _ => Err(DecodeError::invalid_enum("sample set", name)),
        }
    }

    /// Resolve the numeric form used by timing points and hit samples.
    pub fn from_id(id: i64) -> Result<Self> {
        match id {
            0 => Ok(SampleSet::None),
            1 => Ok(SampleSet::Normal),
            2 => Ok(SampleSet::Soft),
            3 => Ok(SampleSet::Drum),
            _ => Err(DecodeError::invalid_enum("sample set", id)),
        }
    }
}

/// Where hit circle overlays are drawn relative to numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayPosition {
    #[default]
    NoChange,
    Below,
    Above,
}

impl OverlayPosition {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "NoChange" => Ok(OverlayPosition::NoChange),
            "Below" => Ok(OverlayPosition::Below),
            "Above" => Ok(OverlayPosition::Above),
            _ => Err(DecodeError::invalid_enum("overlay position", name)),
        }
    }
}

/// General beatmap information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSection {
    pub audio_filename: String,
    pub audio_lead_in: i32,
    /// Deprecated.
    pub audio_hash: String,
    /// -1 when unset.
    pub preview_time: i32,
    pub countdown: Countdown,
    pub sample_set: SampleSet,
    pub sample_volume: i32,
    pub stack_leniency: f64,
    pub mode: GameMode,
    pub letterbox_in_breaks: bool,
    /// Deprecated.
    pub story_fire_in_front: bool,
    pub use_skin_sprites: bool,
    /// Deprecated.
    pub always_show_playfield: bool,
    pub overlay_position: OverlayPosition,
    pub skin_preference: String,
    pub epilepsy_warning: bool,
    pub countdown_offset: i32,
    pub special_style: bool,
    pub widescreen_storyboard: bool,
    pub samples_match_playback_rate: bool,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            audio_filename: String::new(),
            audio_lead_in: 0,
            audio_hash: String::new(),
            preview_time: -1,
            countdown: Countdown::Normal,
            sample_set: SampleSet::Normal,
            sample_volume: 100,
            stack_leniency: 0.7,
            mode: GameMode::Standard,
            letterbox_in_breaks: false,
            story_fire_in_front: true,
            use_skin_sprites: false,
            always_show_playfield: false,
            overlay_position: OverlayPosition::NoChange,
            skin_preference: String::new(),
            epilepsy_warning: false,
            countdown_offset: 0,
            special_style: false,
            widescreen_storyboard: false,
            samples_match_playback_rate: false,
        }
    }
}

impl GeneralSection {
    pub(crate) fn decode(lines: &[&str]) -> Result<Self> {
        let mut general = GeneralSection::default();
        for entry in entries(lines) {
            match entry.key {
                "AudioFilename" => general.audio_filename = entry.text(),
                "AudioLeadIn" => general.audio_lead_in = entry.number(SECTION)?,
                "AudioHash" => general.audio_hash = entry.text(),
                "PreviewTime" => general.preview_time = entry.number(SECTION)?,
                "Countdown" => general.countdown = Countdown::parse(entry.value)?,
                "SampleSet" => general.sample_set = SampleSet::from_name(entry.value)?,
                "SampleVolume" => general.sample_volume = entry.number(SECTION)?,
                "StackLeniency" => general.stack_leniency = entry.number(SECTION)?,
                "Mode" => general.mode = GameMode::from_id(entry.number(SECTION)?)?,
                "LetterboxInBreaks" => general.letterbox_in_breaks = entry.flag(),
                "StoryFireInFront" => general.story_fire_in_front = entry.flag(),
                "UseSkinSprites" => general.use_skin_sprites = entry.flag(),
                "AlwaysShowPlayfield" => general.always_show_playfield = entry.flag(),
                "OverlayPosition" => {
                    general.overlay_position = OverlayPosition::from_name(entry.value)?
                }
                "SkinPreference" => general.skin_preference = entry.text(),
                "EpilepsyWarning" => general.epilepsy_warning = entry.flag(),
                "CountdownOffset" => general.countdown_offset = entry.number(SECTION)?,
                "SpecialStyle" => general.special_style = entry.flag(),
                "WidescreenStoryboard" => general.widescreen_storyboard = entry.flag(),
                "SamplesMatchPlaybackRate" => general.samples_match_playback_rate = entry.flag(),
                _ => {}
            }
        }
        Ok(general)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let general = GeneralSection::decode(&[]).unwrap();
        assert_eq!(general, GeneralSection::default());
        assert_eq!(general.preview_time, -1);
        assert!(general.story_fire_in_front);
    }

    #[test]
    fn test_decode_fields() {
        let lines = [
            "AudioFilename: audio.mp3",
            "AudioLeadIn: 1500",
            "Countdown: 0",
            "SampleSet: Soft",
            "StackLeniency: 0.5",
            "Mode: 3",
            "LetterboxInBreaks: 1",
            "OverlayPosition: Above",
            "SomeFutureKey: whatever",
        ];
        let general = GeneralSection::decode(&lines).unwrap();
        assert_eq!(general.audio_filename, "audio.mp3");
        assert_eq!(general.audio_lead_in, 1500);
        assert_eq!(general.countdown, Countdown::None);
        assert_eq!(general.sample_set, SampleSet::Soft);
        assert!((general.stack_leniency - 0.5).abs() < f64::EPSILON);
        assert_eq!(general.mode, GameMode::Mania);
        assert!(general.letterbox_in_breaks);
        assert_eq!(general.overlay_position, OverlayPosition::Above);
    }

    #[test]
    fn test_bad_mode() {
        assert_eq!(
            GeneralSection::decode(&["Mode: 9"]).unwrap_err(),
            DecodeError::UnreachableMode { mode: 9 }
        );
    }

    #[test]
    fn test_bad_sample_set_name() {
        assert!(matches!(
            GeneralSection::decode(&["SampleSet: Loud"]),
            Err(DecodeError::InvalidEnumValue {
                kind: "sample set",
                ..
            })
        ));
    }

    #[test]
    fn test_bad_number() {
        assert!(matches!(
            GeneralSection::decode(&["AudioLeadIn: soon"]),
            Err(DecodeError::MalformedLine {
                section: "General",
                ..
            })
        ));
    }
}
