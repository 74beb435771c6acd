// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! `[Colours]` section. Optional.

use serde::{Deserialize, Serialize};

use super::{entries, parse_field, Entry};
use crate::core::{DecodeError, Result};

const SECTION: &str = "Colours";

/// An RGBA colour; alpha is 255 unless written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    fn parse(entry: &Entry<'_>) -> Result<Self> {
        let parts: Vec<&str> = entry.value.split(',').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(DecodeError::malformed_line(
                SECTION,
                entry.line,
                format!("expected 3 or 4 colour components, found {}", parts.len()),
            ));
        }
        let component = |index: usize| parse_field::<u8>(SECTION, entry.line, parts[index]);
        Ok(Self {
            r: component(0)?,
            g: component(1)?,
            b: component(2)?,
            a: if parts.len() == 4 { component(3)? } else { 255 },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColoursSection {
    /// Combo colours ordered by their `ComboN` index.
    pub combo_colours: Vec<Colour>,
    pub slider_track_override: Option<Colour>,
    pub slider_border: Option<Colour>,
}

impl ColoursSection {
    pub(crate) fn decode(lines: &[&str]) -> Result<Self> {
        let mut colours = ColoursSection::default();
        let mut combos: Vec<(u32, Colour)> = Vec::new();
        for entry in entries(lines) {
            if let Some(index) = entry.key.strip_prefix("Combo") {
                let index = parse_field(SECTION, entry.line, index)?;
                combos.push((index, Colour::parse(&entry)?));
                continue;
            }
            match entry.key {
                "SliderTrackOverride" => colours.slider_track_override = Some(Colour::parse(&entry)?),
                "SliderBorder" => colours.slider_border = Some(Colour::parse(&entry)?),
                _ => {}
            }
        }
        combos.sort_by_key(|(index, _)| *index);
        colours.combo_colours = combos.into_iter().map(|(_, colour)| colour).collect();
        Ok(colours)
    }
}
