// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show beatmap or replay contents.

use std::path::PathBuf;

use clap::Subcommand;

use crate::common::{format_millis, format_seconds, format_timestamp, read_input, Result};
use osucodec::{decode_beatmap, decode_replay, Beatmap, Replay};

/// Inspect a single file.
#[derive(Subcommand, Clone, Debug)]
pub enum InspectCmd {
    /// Show beatmap metadata, difficulty and derived figures
    Beatmap {
        /// Input file (.osu)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the decoded beatmap as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show replay header, score and frame summary
    Replay {
        /// Input file (.osr)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the decoded replay as JSON
        #[arg(long)]
        json: bool,

        /// Number of input frames to list (all frames are kept with --json)
        #[arg(long, value_name = "N", default_value_t = 0)]
        frames: usize,
    },
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        match self {
            InspectCmd::Beatmap { input, json } => cmd_beatmap(input, json),
            InspectCmd::Replay {
                input,
                json,
                frames,
            } => cmd_replay(input, json, frames),
        }
    }
}

/// Cmd: Show beatmap
fn cmd_beatmap(input: PathBuf, json: bool) -> Result<()> {
    let beatmap = decode_beatmap(&read_input(&input)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&beatmap)?);
        return Ok(());
    }

    println!("=== {} ===", input.display());
    print_beatmap(&beatmap);
    Ok(())
}

fn print_beatmap(beatmap: &Beatmap) {
    let meta = &beatmap.metadata;
    let diff = &beatmap.difficulty;

    println!("Title: {}", meta.full_name());
    println!("Creator: {}", meta.creator);
    println!("Format: v{}", beatmap.format_version);
    println!("Mode: {}", beatmap.mode().as_str());
    println!("MD5: {}", beatmap.content_hash);
    if meta.beatmap_id >= 0 {
        println!("Beatmap ID: {} (set {})", meta.beatmap_id, meta.beatmap_set_id);
    }
    println!();
    println!(
        "HP {} | CS {} | OD {} | AR {} | SV {} | tick rate {}",
        diff.hp_drain_rate,
        diff.circle_size,
        diff.overall_difficulty,
        diff.approach_rate,
        diff.slider_multiplier,
        diff.slider_tick_rate
    );
    if beatmap.min_bpm == beatmap.max_bpm {
        println!("BPM: {:.2}", beatmap.max_bpm);
    } else {
        println!("BPM: {:.2}-{:.2}", beatmap.min_bpm, beatmap.max_bpm);
    }
    println!();

    let counts = &beatmap.object_counts;
    println!(
        "Objects: {} (circles {}, sliders {}, spinners {}, holds {})",
        counts.total(),
        counts.circles,
        counts.sliders,
        counts.spinners,
        counts.holds
    );
    println!("Timing points: {}", beatmap.timing_points.len());
    println!("Breaks: {}", beatmap.events.break_periods.len());
    println!("Max combo: {}", beatmap.max_combo);
    println!("Play time: {}", format_seconds(beatmap.play_time));
    println!("Drain time: {}", format_seconds(beatmap.drain_time));
}

/// Cmd: Show replay
fn cmd_replay(input: PathBuf, json: bool, frames: usize) -> Result<()> {
    let replay = decode_replay(&read_input(&input)?)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&replay)?);
        return Ok(());
    }

    println!("=== {} ===", input.display());
    print_replay(&replay);

    if frames > 0 {
        println!();
        println!("First {} frames:", frames.min(replay.frames.len()));
        for frame in replay.frames.iter().take(frames) {
            println!(
                "  {:>8} ms  (+{:>4})  ({:>7.2}, {:>7.2})  keys {:#06x}",
                frame.absolute_time,
                frame.delta_time,
                frame.position.x,
                frame.position.y,
                frame.keys.bits()
            );
        }
    }

    Ok(())
}

fn print_replay(replay: &Replay) {
    let stats = &replay.statistics;

    println!("Player: {}", replay.player_name);
    println!("Mode: {}", replay.mode.as_str());
    println!("Client: {}", replay.client_version);
    println!("Played: {}", format_timestamp(&replay.timestamp));
    println!("Beatmap MD5: {}", replay.beatmap_md5);
    if let Some(id) = replay.online_score_id {
        println!("Score ID: {id}");
    }
    println!();

    let mods = replay.mods.acronyms();
    println!(
        "Mods: {}",
        if mods.is_empty() {
            "none".to_string()
        } else {
            mods.join("")
        }
    );
    println!("Score: {}", replay.score);
    println!(
        "Combo: {}x{}",
        replay.max_combo,
        if replay.perfect { " (perfect)" } else { "" }
    );
    println!(
        "300: {} | 100: {} | 50: {} | geki: {} | katu: {} | miss: {}",
        stats.count_300,
        stats.count_100,
        stats.count_50,
        stats.count_geki,
        stats.count_katu,
        stats.count_miss
    );
    println!("Accuracy: {:.2}% ({})", replay.accuracy * 100.0, replay.grade);
    if let (Some(accuracy), Some(grade)) = (replay.open_accuracy, replay.open_grade) {
        println!("Open accuracy: {:.2}% ({})", accuracy * 100.0, grade);
    }
    println!();

    println!(
        "Frames: {} over {}",
        replay.frames.len(),
        format_millis(replay.frames_duration())
    );
    println!("Skip offset: {} ms", replay.skip_offset);
    if let Some(seed) = replay.rng_seed {
        println!("RNG seed: {seed}");
    }
    if let Some(hits) = replay.target_practice_hits {
        println!("Target practice hits: {hits}");
    }
}
