// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Section splitting and the key/value section decoders.
//!
//! A beatmap body is a sequence of `[Name]` headers, each followed by the
//! lines belonging to it. [`split_sections`] partitions the text; the
//! per-section modules turn the lines into typed records.

pub mod colours;
pub mod difficulty;
pub mod editor;
pub mod events;
pub mod general;
pub mod metadata;

use std::collections::HashMap;
use std::str::FromStr;

use tracing::warn;

use crate::core::{DecodeError, Result};

pub use colours::{Colour, ColoursSection};
pub use difficulty::DifficultySection;
pub use editor::EditorSection;
pub use events::{Background, BreakPeriod, EventsSection, Video};
pub use general::{Countdown, GeneralSection, OverlayPosition, SampleSet};
pub use metadata::MetadataSection;

/// Sections understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    General,
    Editor,
    Metadata,
    Difficulty,
    Events,
    TimingPoints,
    Colours,
    HitObjects,
}

impl SectionKind {
    /// Sections whose absence fails the decode.
    pub const REQUIRED: [SectionKind; 6] = [
        SectionKind::General,
        SectionKind::Metadata,
        SectionKind::Difficulty,
        SectionKind::Events,
        SectionKind::TimingPoints,
        SectionKind::HitObjects,
    ];

    /// Resolve a bracket header (case-insensitive).
    pub fn from_header(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "general" => Some(SectionKind::General),
            "editor" => Some(SectionKind::Editor),
            "metadata" => Some(SectionKind::Metadata),
            "difficulty" => Some(SectionKind::Difficulty),
            "events" => Some(SectionKind::Events),
            "timingpoints" => Some(SectionKind::TimingPoints),
            "colours" => Some(SectionKind::Colours),
            "hitobjects" => Some(SectionKind::HitObjects),
            _ => None,
        }
    }

    /// Name as written in the file.
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::General => "General",
            SectionKind::Editor => "Editor",
            SectionKind::Metadata => "Metadata",
            SectionKind::Difficulty => "Difficulty",
            SectionKind::Events => "Events",
            SectionKind::TimingPoints => "TimingPoints",
            SectionKind::Colours => "Colours",
            SectionKind::HitObjects => "HitObjects",
        }
    }
}

/// Section bodies of one beatmap, borrowed from the input text.
#[derive(Debug, Default)]
pub struct SectionMap<'a> {
    sections: HashMap<SectionKind, Vec<&'a str>>,
}

impl<'a> SectionMap<'a> {
    /// Lines of a section; empty for an absent optional section.
    pub fn lines(&self, kind: SectionKind) -> &[&'a str] {
        self.sections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }
}

/// Partition post-header text into sections.
///
/// Lines are trimmed. Lines before the first header and bodies of unknown
/// sections are dropped. A repeated header appends to the earlier body.
pub fn split_sections(text: &str) -> Result<SectionMap<'_>> {
    let mut map = SectionMap::default();
    let mut current: Option<SectionKind> = None;

    for line in text.lines().map(str::trim) {
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            current = SectionKind::from_header(name);
            match current {
                Some(kind) => {
                    map.sections.entry(kind).or_default();
                }
                None => warn!(section = name, "ignoring unknown beatmap section"),
            }
            continue;
        }
        if let Some(kind) = current {
            map.sections.entry(kind).or_default().push(line);
        }
    }

    for kind in SectionKind::REQUIRED {
        if !map.contains(kind) {
            return Err(DecodeError::missing_section(kind.name()));
        }
    }
    Ok(map)
}

/// Non-blank, non-comment lines of a section body.
pub(crate) fn content_lines<'a, 'b>(lines: &'b [&'a str]) -> impl Iterator<Item = &'a str> + 'b {
    lines
        .iter()
        .copied()
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
}

/// One `Key: value` line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub line: &'a str,
}

/// Key/value pairs of a section body; lines without a colon are skipped.
pub(crate) fn entries<'a, 'b>(lines: &'b [&'a str]) -> impl Iterator<Item = Entry<'a>> + 'b {
    content_lines(lines).filter_map(|line| {
        line.split_once(':').map(|(key, value)| Entry {
            key: key.trim(),
            value: value.trim(),
            line,
        })
    })
}

impl Entry<'_> {
    /// Parse the value as a number.
    pub fn number<T: FromStr>(&self, section: &'static str) -> Result<T> {
        parse_field(section, self.line, self.value)
    }

    /// `"1"` is true, anything else false.
    pub fn flag(&self) -> bool {
        self.value == "1"
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }
}

/// Parse one field of a line, failing `MalformedLine` with the offending text.
pub(crate) fn parse_field<T: FromStr>(section: &'static str, line: &str, field: &str) -> Result<T> {
    field
        .trim()
        .parse()
        .map_err(|_| DecodeError::malformed_line(section, line, format!("invalid number '{field}'")))
}

/// Parse a possibly fractional millisecond time, truncating toward zero.
pub(crate) fn parse_time(section: &'static str, line: &str, field: &str) -> Result<i32> {
    let value: f64 = parse_field(section, line, field)?;
    if !value.is_finite() {
        return Err(DecodeError::malformed_line(
            section,
            line,
            format!("invalid time '{field}'"),
        ));
    }
    Ok(value as i32)
}

/// Parse a time and shift it by `offset`, failing when the result leaves the i32 range.
pub(crate) fn parse_offset_time(
    section: &'static str,
    line: &str,
    field: &str,
    offset: i32,
) -> Result<i32> {
    parse_time(section, line, field)?
        .checked_add(offset)
        .ok_or_else(|| {
            DecodeError::malformed_line(section, line, format!("time '{field}' out of range"))
        })
}

/// Fetch the `index`th CSV field or fail with an arity error.
pub(crate) fn field<'a>(
    section: &'static str,
    line: &str,
    fields: &[&'a str],
    index: usize,
) -> Result<&'a str> {
    fields.get(index).copied().ok_or_else(|| {
        DecodeError::malformed_line(
            section,
            line,
            format!("expected at least {} fields, found {}", index + 1, fields.len()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SECTIONS: &str = "\
[General]
AudioFilename: audio.mp3

[Metadata]
Title:Song
[Difficulty]
[Events]
[TimingPoints]
0,500,4,1,0,100,1,0
[HitObjects]
";

    #[test]
    fn test_split_all_sections() {
        let map = split_sections(ALL_SECTIONS).unwrap();
        assert_eq!(map.lines(SectionKind::General), &["AudioFilename: audio.mp3", ""]);
        assert_eq!(map.lines(SectionKind::TimingPoints).len(), 1);
        assert!(map.lines(SectionKind::HitObjects).is_empty());
        assert!(!map.contains(SectionKind::Colours));
        assert!(map.lines(SectionKind::Colours).is_empty());
    }

    #[test]
    fn test_split_missing_section() {
        let text = ALL_SECTIONS.replace("[Events]", "");
        assert_eq!(
            split_sections(&text).unwrap_err(),
            DecodeError::missing_section("Events")
        );
    }

    #[test]
    fn test_split_case_insensitive_and_unknown() {
        let text = ALL_SECTIONS.replace("[General]", "[Fonts]\nx\n[GENERAL]");
        let map = split_sections(&text).unwrap();
        assert_eq!(map.lines(SectionKind::General)[0], "AudioFilename: audio.mp3");
    }

    #[test]
    fn test_entries_split_on_first_colon() {
        let lines = ["Title: a:b", "", "// Title: comment", "garbage"];
        let got: Vec<_> = entries(&lines).map(|e| (e.key, e.value)).collect();
        assert_eq!(got, vec![("Title", "a:b")]);
    }

    #[test]
    fn test_parse_time_truncates() {
        assert_eq!(parse_time("HitObjects", "", "1234.9").unwrap(), 1234);
        assert_eq!(parse_time("HitObjects", "", "-5.5").unwrap(), -5);
        assert!(matches!(
            parse_time("HitObjects", "x", "abc"),
            Err(DecodeError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_offset_time_range() {
        assert_eq!(parse_offset_time("Events", "", "100", 24).unwrap(), 124);
        assert_eq!(
            parse_offset_time("Events", "", "-2147483648", 24).unwrap(),
            i32::MIN + 24
        );
        assert!(matches!(
            parse_offset_time("HitObjects", "0,0,2147483647,1,0", "2147483647", 24),
            Err(DecodeError::MalformedLine {
                section: "HitObjects",
                ..
            })
        ));
    }
}
