// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `[Editor]` section. Optional; absent sections yield the defaults.

use serde::{Deserialize, Serialize};

use super::{entries, parse_field};
use crate::core::Result;

const SECTION: &str = "Editor";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EditorSection {
    /// Bookmark times in milliseconds.
    pub bookmarks: Vec<i32>,
    pub distance_spacing: f64,
    pub beat_divisor: i32,
    pub grid_size: i32,
    pub timeline_zoom: f64,
}

impl EditorSection {
    pub(crate) fn decode(lines: &[&str]) -> Result<Self> {
        let mut editor = EditorSection::default();
        for entry in entries(lines) {
            match entry.key {
                "Bookmarks" => {
                    editor.bookmarks = entry
                        .value
                        .split(',')
                        .filter(|v| !v.trim().is_empty())
                        .map(|v| parse_field(SECTION, entry.line, v))
                        .collect::<Result<_>>()?;
                }
                "DistanceSpacing" => editor.distance_spacing = entry.number(SECTION)?,
                "BeatDivisor" => editor.beat_divisor = entry.number(SECTION)?,
                "GridSize" => editor.grid_size = entry.number(SECTION)?,
                "TimelineZoom" => editor.timeline_zoom = entry.number(SECTION)?,
                _ => {}
            }
        }
        Ok(editor)
    }
}
