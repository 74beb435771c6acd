// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Legacy modifier bit mask.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Gameplay modifiers as stored in the replay header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Mods: u32 {
        const NO_FAIL = 1 << 0;
        const EASY = 1 << 1;
        const TOUCH_DEVICE = 1 << 2;
        const HIDDEN = 1 << 3;
        const HARD_ROCK = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        const DOUBLE_TIME = 1 << 6;
        const RELAX = 1 << 7;
        const HALF_TIME = 1 << 8;
        const NIGHTCORE = 1 << 9;
        const FLASHLIGHT = 1 << 10;
        const AUTOPLAY = 1 << 11;
        const SPUN_OUT = 1 << 12;
        const AUTOPILOT = 1 << 13;
        const PERFECT = 1 << 14;
        const KEY4 = 1 << 15;
        const KEY5 = 1 << 16;
        const KEY6 = 1 << 17;
        const KEY7 = 1 << 18;
        const KEY8 = 1 << 19;
        const FADE_IN = 1 << 20;
        const RANDOM = 1 << 21;
        const CINEMA = 1 << 22;
        const TARGET_PRACTICE = 1 << 23;
        const KEY9 = 1 << 24;
        const KEY_COOP = 1 << 25;
        const KEY1 = 1 << 26;
        const KEY3 = 1 << 27;
        const KEY2 = 1 << 28;
        const SCORE_V2 = 1 << 29;
        const MIRROR = 1 << 30;

        const SPEED_CHANGING = Self::DOUBLE_TIME.bits() | Self::NIGHTCORE.bits() | Self::HALF_TIME.bits();
    }
}

impl Mods {
    /// Hidden or Flashlight: grades X and S become their silver variants.
    pub fn has_silver_grade(&self) -> bool {
        self.intersects(Mods::HIDDEN | Mods::FLASHLIGHT)
    }

    /// Short acronyms (`HD`, `DT`, ...) of the set bits, in bit order.
    pub fn acronyms(&self) -> Vec<&'static str> {
        const ACRONYMS: [(Mods, &str); 31] = [
            (Mods::NO_FAIL, "NF"),
            (Mods::EASY, "EZ"),
            (Mods::TOUCH_DEVICE, "TD"),
            (Mods::HIDDEN, "HD"),
            (Mods::HARD_ROCK, "HR"),
            (Mods::SUDDEN_DEATH, "SD"),
            (Mods::DOUBLE_TIME, "DT"),
            (Mods::RELAX, "RX"),
            (Mods::HALF_TIME, "HT"),
            (Mods::NIGHTCORE, "NC"),
            (Mods::FLASHLIGHT, "FL"),
            (Mods::AUTOPLAY, "AT"),
            (Mods::SPUN_OUT, "SO"),
            (Mods::AUTOPILOT, "AP"),
            (Mods::PERFECT, "PF"),
            (Mods::KEY4, "4K"),
            (Mods::KEY5, "5K"),
            (Mods::KEY6, "6K"),
            (Mods::KEY7, "7K"),
            (Mods::KEY8, "8K"),
            (Mods::FADE_IN, "FI"),
            (Mods::RANDOM, "RD"),
            (Mods::CINEMA, "CN"),
            (Mods::TARGET_PRACTICE, "TP"),
            (Mods::KEY9, "9K"),
            (Mods::KEY_COOP, "CO"),
            (Mods::KEY1, "1K"),
            (Mods::KEY3, "3K"),
            (Mods::KEY2, "2K"),
            (Mods::SCORE_V2, "V2"),
            (Mods::MIRROR, "MR"),
        ];
        ACRONYMS
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, acronym)| *acronym)
            .collect()
    }
}
