//! # osu-listing-core
//!
//! Reader for osu!stable's `osu!.db`, the local cache of every installed
//! beatmap difficulty plus a little player metadata.
//!
//! The format changed layout twice, so every record decoder takes the
//! [`FormatVersion`] read from the header as an explicit argument.
//!
//! ## Modules
//!
//! - [`catalogue`] - Data model and the field, record and listing decoders
//! - [`config`] - Decode limits and leniency options
//! - [`error`] - Error types and Result alias
//! - [`index`] - Lookups by checksum / id and grouping into sets
//! - [`reader`] - Forward-only little-endian byte cursor
//! - [`stats`] - Summary counts for reporting
//!
//! ## Example
//!
//! ```no_run
//! use osu_listing_core::Catalogue;
//!
//! let catalogue = Catalogue::from_file("C:/osu!/osu!.db")?;
//! println!("{} beatmaps, version {}", catalogue.len(), catalogue.version);
//! # Ok::<(), osu_listing_core::Error>(())
//! ```

pub mod catalogue;
pub mod config;
pub mod error;
pub mod index;
pub mod reader;
pub mod stats;

#[cfg(test)]
mod test_support;

// Error types
pub use error::{Error, Result};

// Decoding
pub use catalogue::{
    BeatmapRecord, Catalogue, CatalogueDecoder, Difficulty, FormatVersion, GameMode, ModeGrades,
    OsuString, Permissions, RankedStatus, RatingEntry, StarRatings, Timestamp, TimingPoint,
};
pub use config::DecodeOptions;
pub use reader::ByteCursor;

// Views
pub use index::{BeatmapSetView, CatalogueIndex};
pub use stats::{CatalogueStats, ModeCount};
