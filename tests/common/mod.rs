// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use osucodec::io::{compress_lzma, ByteWriter};

// ============================================================================
// Beatmap fixtures
// ============================================================================

/// A small but complete v14 osu!standard map.
///
/// Derived values: 7 objects (4 circles, 2 sliders, 1 spinner), max combo
/// 11, play time 44 s, one 12 s break, bpm 120-150.
pub const STANDARD_BEATMAP: &str = "\u{feff}osu file format v14

[General]
AudioFilename: audio.mp3
AudioLeadIn: 0
PreviewTime: 5000
Countdown: 0
SampleSet: Soft
StackLeniency: 0.7
Mode: 0
LetterboxInBreaks: 0
WidescreenStoryboard: 1

[Editor]
Bookmarks: 1000,2000
DistanceSpacing: 1.2
BeatDivisor: 4
GridSize: 32
TimelineZoom: 1.5

[Metadata]
Title:Test Song
TitleUnicode:Test Song (Unicode)
Artist:Test Artist
ArtistUnicode:Test Artist
Creator:mapper
Version:Insane
Source:
Tags:test fixture sample
BeatmapID:123
BeatmapSetID:45

[Difficulty]
HPDrainRate:5
CircleSize:4
OverallDifficulty:8
ApproachRate:9
SliderMultiplier:1.4
SliderTickRate:1

[Events]
//Background and Video events
0,0,\"bg.jpg\",0,0
Video,500,\"video.mp4\"
//Break Periods
2,20000,32000
//Storyboard Layer 0 (Background)
Sprite,Background,Centre,\"sb.png\",320,240

[TimingPoints]
1000,500,4,2,0,60,1,0
9000,-50,4,2,0,60,0,1
40000,400,4,2,0,60,1,0

[Colours]
Combo2 : 0,255,0
Combo1 : 255,0,0
SliderBorder : 255,255,255

[HitObjects]
256,192,1000,5,0,0:0:0:0:
300,200,1500,1,2,0:0:0:0:
100,100,2000,2,0,L|380:100,1,280
100,100,10000,6,0,B|200:200|300:100,2,140
256,192,12000,12,0,15000,0:0:0:0:
64,64,40000,1,4,0:0:0:0:
448,64,45000,1,8,0:0:0:0:
";

/// Build a minimal map with uninherited timing points at `times`.
pub fn beatmap_with_timing(times: &[i32]) -> String {
    let mut text = String::from(
        "osu file format v14\n\n[General]\nMode: 0\n\n[Metadata]\nTitle:t\n\n\
         [Difficulty]\nSliderMultiplier:1.4\n\n[Events]\n\n[TimingPoints]\n",
    );
    for time in times {
        text.push_str(&format!("{time},500,4,1,0,100,1,0\n"));
    }
    text.push_str("\n[HitObjects]\n");
    text
}

/// Build a minimal mania map with `keys` columns and the given object lines.
pub fn mania_beatmap(keys: u32, objects: &[&str]) -> String {
    let mut text = format!(
        "osu file format v14\n\n[General]\nMode: 3\n\n[Metadata]\nTitle:m\n\n\
         [Difficulty]\nCircleSize:{keys}\nSliderMultiplier:1.4\n\n[Events]\n\n\
         [TimingPoints]\n0,500,4,1,0,100,1,0\n\n[HitObjects]\n"
    );
    for line in objects {
        text.push_str(line);
        text.push('\n');
    }
    text
}

// ============================================================================
// Replay fixtures
// ============================================================================

/// The .NET tick count of 2000-01-01T00:00:00Z.
pub const Y2K_TICKS: i64 = 630_822_816_000_000_000;

/// Writes replay buffers field by field.
#[derive(Debug, Clone)]
pub struct ReplayBuilder {
    pub mode: u8,
    pub version: i32,
    pub beatmap_md5: String,
    pub player_name: String,
    pub replay_md5: String,
    /// 300, 100, 50, geki, katu, miss
    pub counts: [u16; 6],
    pub score: u32,
    pub max_combo: u16,
    pub perfect: bool,
    pub mods: u32,
    pub life_bar: String,
    pub ticks: i64,
    /// Frame text; `None` writes an empty block.
    pub frames: Option<String>,
    /// Written verbatim instead of the compressed frame text.
    pub raw_frame_block: Option<Vec<u8>>,
    pub online_score_id: i64,
    pub target_practice_hits: Option<f64>,
    /// JSON score document; written only for versions >= 30000001.
    pub score_info: Option<String>,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self {
            mode: 0,
            version: 2021_06_01,
            beatmap_md5: "0123456789abcdef0123456789abcdef".to_string(),
            player_name: "tester".to_string(),
            replay_md5: "fedcba9876543210fedcba9876543210".to_string(),
            counts: [0; 6],
            score: 0,
            max_combo: 0,
            perfect: false,
            mods: 0,
            life_bar: String::new(),
            ticks: Y2K_TICKS,
            frames: None,
            raw_frame_block: None,
            online_score_id: 0,
            target_practice_hits: None,
            score_info: None,
        }
    }
}

impl ReplayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: u8) -> Self {
        self.mode = mode;
        self
    }

    pub fn version(mut self, version: i32) -> Self {
        self.version = version;
        self
    }

    pub fn counts(mut self, counts: [u16; 6]) -> Self {
        self.counts = counts;
        self
    }

    pub fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;
        self
    }

    pub fn frames(mut self, text: &str) -> Self {
        self.frames = Some(text.to_string());
        self
    }

    pub fn score_info(mut self, json: &str) -> Self {
        self.score_info = Some(json.to_string());
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.write_u8(self.mode)
            .write_i32(self.version)
            .write_string(&self.beatmap_md5)
            .write_string(&self.player_name)
            .write_string(&self.replay_md5);
        for count in self.counts {
            w.write_u16(count);
        }
        w.write_u32(self.score)
            .write_u16(self.max_combo)
            .write_u8(u8::from(self.perfect))
            .write_u32(self.mods)
            .write_string(&self.life_bar)
            .write_i64(self.ticks);

        match (&self.raw_frame_block, &self.frames) {
            (Some(block), _) => w.write_block(block),
            (None, Some(text)) => w.write_block(&compress(text)),
            (None, None) => w.write_i32(0),
        };

        if self.version >= 2014_07_21 {
            w.write_i64(self.online_score_id);
        } else if self.version >= 2012_10_08 {
            w.write_i32(self.online_score_id as i32);
        }
        if let Some(hits) = self.target_practice_hits {
            w.write_f64(hits);
        }
        if self.version >= 30_000_001 {
            match &self.score_info {
                Some(json) => w.write_block(&compress(json)),
                None => w.write_i32(0),
            };
        }
        w.finish()
    }
}

pub fn compress(text: &str) -> Vec<u8> {
    compress_lzma(text.as_bytes()).expect("lzma compression")
}

/// Write `data` to a unique temp file and return its path.
pub fn temp_file(name: &str, data: &[u8]) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("osucodec_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write temp file");
    path
}
