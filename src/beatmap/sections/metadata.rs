// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `[Metadata]` section.

use serde::{Deserialize, Serialize};

use super::entries;
use crate::core::Result;

const SECTION: &str = "Metadata";

/// Song and difficulty identification.
///
/// Old maps predate online ids, so `beatmap_id` and `beatmap_set_id` are
/// -1 when not written. Unicode titles are likewise optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSection {
    pub title: String,
    pub title_unicode: Option<String>,
    pub artist: String,
    pub artist_unicode: Option<String>,
    pub creator: String,
    /// Difficulty name.
    pub version: String,
    pub source: String,
    pub tags: Vec<String>,
    pub beatmap_id: i64,
    pub beatmap_set_id: i64,
}

impl Default for MetadataSection {
    fn default() -> Self {
        Self {
            title: String::new(),
            title_unicode: None,
            artist: String::new(),
            artist_unicode: None,
            creator: String::new(),
            version: String::new(),
            source: String::new(),
            tags: Vec::new(),
            beatmap_id: -1,
            beatmap_set_id: -1,
        }
    }
}

impl MetadataSection {
    pub(crate) fn decode(lines: &[&str]) -> Result<Self> {
        let mut metadata = MetadataSection::default();
        for entry in entries(lines) {
            match entry.key {
                "Title" => metadata.title = entry.text(),
                "TitleUnicode" => metadata.title_unicode = Some(entry.text()),
                "Artist" => metadata.artist = entry.text(),
                "ArtistUnicode" => metadata.artist_unicode = Some(entry.text()),
                "Creator" => metadata.creator = entry.text(),
                "Version" => metadata.version = entry.text(),
                "Source" => metadata.source = entry.text(),
                "Tags" => {
                    metadata.tags = entry.value.split_whitespace().map(str::to_string).collect()
                }
                "BeatmapID" => metadata.beatmap_id = entry.number(SECTION)?,
                "BeatmapSetID" => metadata.beatmap_set_id = entry.number(SECTION)?,
                _ => {}
            }
        }
        Ok(metadata)
    }

    /// `Artist - Title [Version]`.
    pub fn full_name(&self) -> String {
        format!("{} - {} [{}]", self.artist, self.title, self.version)
    }
}
