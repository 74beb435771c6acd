// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::io::IsTerminal as _;
use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use tracing_subscriber::EnvFilter;

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read a whole input file.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Format a duration in seconds as `h:mm:ss` or `m:ss`.
pub fn format_seconds(seconds: i32) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let secs = seconds.unsigned_abs();
    if secs >= 3600 {
        format!("{sign}{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{sign}{}:{:02}", secs / 60, secs % 60)
    }
}

/// Format a duration in milliseconds to human-readable string.
pub fn format_millis(millis: i64) -> String {
    let secs = millis / 1000;
    let rest = (millis % 1000).abs();

    if secs.abs() >= 60 {
        format!("{}m {}s", secs / 60, (secs % 60).abs())
    } else if secs != 0 {
        format!("{}.{:03}s", secs, rest)
    } else {
        format!("{}ms", millis)
    }
}

/// Format a UTC instant.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Progress bar wrapper, hidden when stderr is not a terminal.
pub struct ProgressBar {
    inner: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a new progress bar.
    pub fn new(total: u64, prefix: impl Into<String>) -> Self {
        let inner = if std::io::stderr().is_terminal() {
            let pb = indicatif::ProgressBar::new(total);
            let style = indicatif::ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
                .progress_chars("=>-");
            pb.set_style(style);
            pb.set_prefix(prefix.into());
            Some(pb)
        } else {
            None
        };

        Self { inner }
    }

    pub fn inc(&self, delta: u64) {
        if let Some(pb) = &self.inner {
            pb.inc(delta);
        }
    }

    /// Finish the progress bar with a message.
    pub fn finish_with_message(&self, msg: String) {
        if let Some(pb) = &self.inner {
            pb.finish_with_message(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0:00");
        assert_eq!(format_seconds(95), "1:35");
        assert_eq!(format_seconds(3725), "1:02:05");
        assert_eq!(format_seconds(-4), "-0:04");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(500), "500ms");
        assert_eq!(format_millis(1500), "1.500s");
        assert_eq!(format_millis(90_000), "1m 30s");
    }

    #[test]
    fn test_format_timestamp() {
        let instant = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(format_timestamp(&instant), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_input(Path::new("/nonexistent/map.osu")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/map.osu"));
    }
}
