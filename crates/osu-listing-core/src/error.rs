//! Error types for osu-listing-core

use thiserror::Error;

/// Main error type for decoding an osu!.db listing
///
/// Every variant that comes out of the decoder carries the name of the field
/// being read and the byte offset where that field started.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of data while reading {field} at offset {offset}")]
    Truncated { field: &'static str, offset: u64 },

    #[error("Failed to read {field} at offset {offset}: {source}")]
    Read {
        field: &'static str,
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad marker for {field} at offset {offset}: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedMarker {
        field: &'static str,
        offset: u64,
        expected: u8,
        actual: u8,
    },

    #[error("Legacy field at offset {offset} must be zero, got {actual} (wrong format version?)")]
    LegacyFieldNotZero { offset: u64, actual: u16 },

    #[error("Malformed ULEB128 integer for {field} at offset {offset}")]
    MalformedVarint { field: &'static str, offset: u64 },

    #[error("Invalid UTF-8 in {field} at offset {offset}")]
    InvalidUtf8 { field: &'static str, offset: u64 },

    #[error("Implausible {field} at offset {offset}: {count} exceeds limit of {limit}")]
    ImplausibleCount {
        field: &'static str,
        offset: u64,
        count: u64,
        limit: u64,
    },

    #[error("Unknown string marker {marker:#04x} for {field} at offset {offset}")]
    UnknownStringMarker {
        field: &'static str,
        offset: u64,
        marker: u8,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Byte offset the failing field started at, if the error came from decoding
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::Truncated { offset, .. }
            | Error::Read { offset, .. }
            | Error::UnexpectedMarker { offset, .. }
            | Error::LegacyFieldNotZero { offset, .. }
            | Error::MalformedVarint { offset, .. }
            | Error::InvalidUtf8 { offset, .. }
            | Error::ImplausibleCount { offset, .. }
            | Error::UnknownStringMarker { offset, .. } => Some(*offset),
            Error::Io(_) | Error::Config(_) => None,
        }
    }
}

/// Result type alias for osu-listing operations
pub type Result<T> = std::result::Result<T, Error>;
