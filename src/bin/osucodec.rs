// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # osucodec CLI
//!
//! Command-line front end for the beatmap and replay decoders.
//!
//! ## Usage
//!
//! ```sh
//! # Summarize a beatmap
//! osucodec inspect beatmap map.osu
//!
//! # Dump a replay as JSON, including its first 20 frames
//! osucodec inspect replay play.osr --json --frames 20
//!
//! # Decode many files in parallel
//! osucodec batch songs/*.osu replays/*.osr
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{BatchCmd, InspectCmd};
use common::Result;

/// osucodec - osu! beatmap and replay decoder
///
/// Reads `.osu` and `.osr` files and reports decoded structure, derived
/// combo and timing figures, and replay accuracy and grade.
#[derive(Parser, Clone)]
#[command(name = "osucodec")]
#[command(about = "Decode osu! beatmaps and replays", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Inspect a single beatmap or replay
    #[command(subcommand)]
    Inspect(InspectCmd),

    /// Decode many files in parallel, one summary line each
    Batch(BatchCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    common::init_tracing(cli.verbose);

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Batch(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
