// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for osucodec.
//!
//! Every decode entry point returns [`DecodeError`]. Failures are never
//! retried internally: decoding works on complete in-memory buffers, so a
//! failure is a property of the input, not of a transient resource.

/// Errors that can occur while decoding beatmaps and replays.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The first line of a beatmap is not `osu file format v<N>`.
    #[error("Malformed header: expected 'osu file format v<N>', found '{found}'")]
    MalformedHeader {
        /// The offending first line (truncated)
        found: String,
    },

    /// A mandatory beatmap section is absent.
    #[error("Missing section: [{section}]")]
    MissingSection {
        /// Section name as written in the file
        section: &'static str,
    },

    /// A read ran past the end of the buffer.
    #[error(
        "Truncated buffer: requested {requested} bytes at position {position}, but only {available} bytes available"
    )]
    TruncatedBuffer {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when the read was attempted
        position: usize,
    },

    /// A textual or numeric tag does not name a known variant.
    #[error("Invalid {kind} value: '{value}'")]
    InvalidEnumValue {
        /// Which enumeration was being decoded
        kind: &'static str,
        /// The rejected raw value
        value: String,
    },

    /// An embedded compressed block could not be expanded.
    #[error("Decompression failure: {message}")]
    DecompressionFailure {
        /// Underlying decoder message
        message: String,
    },

    /// A raw ruleset id outside the four known game modes.
    #[error("Unreachable game mode: {mode}")]
    UnreachableMode {
        /// The raw mode id
        mode: i64,
    },

    /// A line inside a known section could not be decoded.
    #[error("Malformed line in [{section}]: '{line}' ({reason})")]
    MalformedLine {
        /// Section the line belongs to
        section: &'static str,
        /// The offending line (truncated)
        line: String,
        /// What went wrong
        reason: String,
    },

    /// A length-prefixed string is not valid UTF-8.
    #[error("Invalid string at position {position}: not valid UTF-8")]
    InvalidString {
        /// Offset of the string payload
        position: usize,
    },

    /// The score statistics document could not be deserialized.
    #[error("Invalid score document: {message}")]
    InvalidDocument {
        /// Deserializer message
        message: String,
    },

    /// A compressed block length exceeded the configured cap.
    #[error("Compressed block of {length} bytes exceeds configured limit of {limit} bytes")]
    CompressedBlockTooLarge {
        /// Declared block length
        length: usize,
        /// Configured cap
        limit: usize,
    },

    /// I/O error while loading input (file-level collaborators only).
    #[error("I/O error: {0}")]
    Io(String),
}

/// Lines quoted inside errors are cut to this many characters.
const MAX_QUOTED_LEN: usize = 80;

fn quote(text: &str) -> String {
    if text.chars().count() <= MAX_QUOTED_LEN {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(MAX_QUOTED_LEN).collect();
        cut.push_str("...");
        cut
    }
}

impl DecodeError {
    /// Create a malformed header error.
    pub fn malformed_header(found: &str) -> Self {
        DecodeError::MalformedHeader { found: quote(found) }
    }

    /// Create a missing section error.
    pub fn missing_section(section: &'static str) -> Self {
        DecodeError::MissingSection { section }
    }

    /// Create a truncated buffer error.
    pub fn truncated(requested: usize, available: usize, position: usize) -> Self {
        DecodeError::TruncatedBuffer {
            requested,
            available,
            position,
        }
    }

    /// Create an invalid enum value error.
    pub fn invalid_enum(kind: &'static str, value: impl ToString) -> Self {
        DecodeError::InvalidEnumValue {
            kind,
            value: value.to_string(),
        }
    }

    /// Create a decompression failure.
    pub fn decompression(message: impl Into<String>) -> Self {
        DecodeError::DecompressionFailure {
            message: message.into(),
        }
    }

    /// Create a malformed line error.
    pub fn malformed_line(section: &'static str, line: &str, reason: impl Into<String>) -> Self {
        DecodeError::MalformedLine {
            section,
            line: quote(line),
            reason: reason.into(),
        }
    }

    /// Create an invalid score document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        DecodeError::InvalidDocument {
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            DecodeError::MalformedHeader { found } => vec![("found", found.clone())],
            DecodeError::MissingSection { section } => vec![("section", section.to_string())],
            DecodeError::TruncatedBuffer {
                requested,
                available,
                position,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("position", position.to_string()),
            ],
            DecodeError::InvalidEnumValue { kind, value } => {
                vec![("kind", kind.to_string()), ("value", value.clone())]
            }
            DecodeError::DecompressionFailure { message } => vec![("message", message.clone())],
            DecodeError::UnreachableMode { mode } => vec![("mode", mode.to_string())],
            DecodeError::MalformedLine {
                section,
                line,
                reason,
            } => vec![
                ("section", section.to_string()),
                ("line", line.clone()),
                ("reason", reason.clone()),
            ],
            DecodeError::InvalidString { position } => vec![("position", position.to_string())],
            DecodeError::InvalidDocument { message } => vec![("message", message.clone())],
            DecodeError::CompressedBlockTooLarge { length, limit } => vec![
                ("length", length.to_string()),
                ("limit", limit.to_string()),
            ],
            DecodeError::Io(msg) => vec![("message", msg.clone())],
        }
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::invalid_document(err.to_string())
    }
}

/// Result type for osucodec operations.
pub type Result<T> = std::result::Result<T, DecodeError>;
