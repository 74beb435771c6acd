// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Batch command - decode many files in parallel.

use std::path::{Path, PathBuf};

use clap::Args;
use rayon::prelude::*;
use tracing::warn;

use crate::common::{read_input, ProgressBar, Result};
use osucodec::{decode_beatmap, decode_replay, detect_format, DecodeError, FileFormat};

/// Decode every input, auto-detecting its format.
#[derive(Args, Clone, Debug)]
pub struct BatchCmd {
    /// Input files (.osu or .osr)
    #[arg(value_name = "FILES", required = true)]
    inputs: Vec<PathBuf>,

    /// Worker threads (default: one per core)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,
}

impl BatchCmd {
    pub fn run(self) -> Result<()> {
        let pool = {
            let mut builder = rayon::ThreadPoolBuilder::new();
            if let Some(jobs) = self.jobs {
                builder = builder.num_threads(jobs);
            }
            builder.build()?
        };

        let progress = ProgressBar::new(self.inputs.len() as u64, "decoding");
        let results: Vec<(String, Result<String>)> = pool.install(|| {
            self.inputs
                .par_iter()
                .map(|path| {
                    let summary = summarize(path);
                    progress.inc(1);
                    (path.display().to_string(), summary)
                })
                .collect()
        });

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        progress.finish_with_message(format!("{} ok, {failed} failed", results.len() - failed));

        for (path, result) in &results {
            match result {
                Ok(line) => println!("{path}: {line}"),
                Err(e) => {
                    let fields = e
                        .downcast_ref::<DecodeError>()
                        .map(DecodeError::log_fields)
                        .unwrap_or_default();
                    warn!(path = %path, error = %e, ?fields, "decode failed");
                    println!("{path}: error: {e:#}");
                }
            }
        }

        if failed > 0 {
            anyhow::bail!("{failed} of {} files failed to decode", results.len());
        }
        Ok(())
    }
}

/// One-line summary of a decoded file.
fn summarize(path: &Path) -> Result<String> {
    match detect_format(path)? {
        FileFormat::Beatmap => {
            let beatmap = decode_beatmap(&read_input(path)?)?;
            Ok(format!(
                "beatmap v{} {} \"{}\" objects={} combo={} drain={}s",
                beatmap.format_version,
                beatmap.mode().as_str(),
                beatmap.metadata.full_name(),
                beatmap.object_counts.total(),
                beatmap.max_combo,
                beatmap.drain_time
            ))
        }
        FileFormat::Replay => {
            let replay = decode_replay(&read_input(path)?)?;
            Ok(format!(
                "replay {} \"{}\" {:.2}% {} combo={} frames={}",
                replay.mode.as_str(),
                replay.player_name,
                replay.accuracy * 100.0,
                replay.grade,
                replay.max_combo,
                replay.frames.len()
            ))
        }
        FileFormat::Unknown => anyhow::bail!("not a beatmap or replay"),
    }
}
