// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `[Events]` section: background, videos and break periods.
//!
//! Storyboard declarations and commands share the section but are not
//! decoded; any line whose event type is not one of the three handled
//! here is ignored.

use serde::{Deserialize, Serialize};

use super::{content_lines, field, parse_field, parse_offset_time};
use crate::core::Result;

const SECTION: &str = "Events";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub filename: String,
    pub x_offset: i32,
    pub y_offset: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub filename: String,
    pub start_time: i32,
    pub x_offset: i32,
    pub y_offset: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakPeriod {
    pub start_time: i32,
    pub end_time: i32,
}

impl BreakPeriod {
    /// Length in milliseconds; negative for inverted periods.
    pub fn duration(&self) -> i64 {
        i64::from(self.end_time) - i64::from(self.start_time)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventsSection {
    pub background: Option<Background>,
    pub videos: Vec<Video>,
    pub break_periods: Vec<BreakPeriod>,
}

impl EventsSection {
    /// Decode the section, shifting every absolute time by `offset` ms.
    pub(crate) fn decode(lines: &[&str], offset: i32) -> Result<Self> {
        let mut events = EventsSection::default();
        for line in content_lines(lines) {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            match fields[0] {
                "0" => {
                    events.background = Some(Background {
                        filename: unquote(field(SECTION, line, &fields, 2)?),
                        x_offset: optional_int(line, &fields, 3)?,
                        y_offset: optional_int(line, &fields, 4)?,
                    });
                }
                "1" | "Video" => events.videos.push(Video {
                    filename: unquote(field(SECTION, line, &fields, 2)?),
                    start_time: time_at(line, &fields, 1, offset)?,
                    x_offset: optional_int(line, &fields, 3)?,
                    y_offset: optional_int(line, &fields, 4)?,
                }),
                "2" | "Break" => events.break_periods.push(BreakPeriod {
                    start_time: time_at(line, &fields, 1, offset)?,
                    end_time: time_at(line, &fields, 2, offset)?,
                }),
                _ => {}
            }
        }
        Ok(events)
    }
}

fn unquote(value: &str) -> String {
    value.trim_matches('"').to_string()
}

fn time_at(line: &str, fields: &[&str], index: usize, offset: i32) -> Result<i32> {
    parse_offset_time(SECTION, line, field(SECTION, line, fields, index)?, offset)
}

fn optional_int(line: &str, fields: &[&str], index: usize) -> Result<i32> {
    match fields.get(index) {
        Some(value) if !value.is_empty() => parse_field(SECTION, line, value),
        _ => Ok(0),
    }
}
