//! Decoder for osu!stable's osu!.db listing
//!
//! The listing uses the following binary format (little-endian):
//! - u32: Version number (e.g., 20191106)
//! - u32: Folder count
//! - bool: Account unlocked
//! - u64: Unlock date (ticks)
//! - String: Player name (0x0b marker, ULEB128 length, UTF-8 bytes)
//! - u32: Number of beatmaps
//! - For each beatmap: a record, see [`read_beatmap`]
//! - u32: Permissions
//!
//! Decoding is a single forward pass. The first error aborts the whole
//! decode; there is no partial result.

mod beatmap;
mod fields;
mod model;
mod ratings;
mod timing;

pub use beatmap::read_beatmap;
pub use fields::{
    read_account_unlocked, read_count, read_folder_count, read_permissions, read_string,
    read_timestamp, read_version,
};
pub use model::*;
pub use ratings::{read_rating_list, MODS_MARKER, RATING_MARKER};
pub use timing::read_timing_points;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::config::DecodeOptions;
use crate::error::Result;
use crate::reader::ByteCursor;

/// One decode session over a byte source
///
/// The format version is read once from the header and passed explicitly
/// to every record decoder.
pub struct CatalogueDecoder<R> {
    cursor: ByteCursor<R>,
    options: DecodeOptions,
}

impl<R: Read> CatalogueDecoder<R> {
    pub fn new(source: R) -> Self {
        Self::with_options(source, DecodeOptions::default())
    }

    pub fn with_options(source: R, options: DecodeOptions) -> Self {
        Self {
            cursor: ByteCursor::new(source),
            options,
        }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Decode the whole listing
    pub fn decode(&mut self) -> Result<Catalogue> {
        let cursor = &mut self.cursor;
        let options = &self.options;

        let version = read_version(cursor)?;
        let folder_count = read_folder_count(cursor)?;
        let account_unlocked = read_account_unlocked(cursor)?;
        let unlock_date = read_timestamp(cursor, "unlock_date")?;
        let player_name = read_string(cursor, "player_name", options)?;
        tracing::debug!(
            "osu!.db version {}, {} folders, player {:?}",
            version,
            folder_count,
            player_name.as_str()
        );

        let beatmap_count = read_count(cursor, "beatmap_count", options.max_beatmaps)?;
        let mut beatmaps = fields::list_with_capacity(beatmap_count);
        for index in 0..beatmap_count {
            let start = cursor.position();
            let beatmap = read_beatmap(cursor, version, options)?;
            tracing::trace!(
                "Beatmap {} at offset {}: {:?}",
                index,
                start,
                beatmap.file_name.as_str()
            );
            beatmaps.push(beatmap);
        }

        let permissions = read_permissions(cursor)?;
        tracing::debug!(
            "Decoded {} beatmaps ({} bytes)",
            beatmaps.len(),
            cursor.position()
        );

        Ok(Catalogue {
            version,
            folder_count,
            account_unlocked,
            unlock_date,
            player_name,
            beatmaps,
            permissions,
        })
    }
}

impl Catalogue {
    /// Decode a listing from any byte source with default options
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        CatalogueDecoder::new(source).decode()
    }

    pub fn from_reader_with<R: Read>(source: R, options: &DecodeOptions) -> Result<Self> {
        CatalogueDecoder::with_options(source, options.clone()).decode()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(bytes)
    }

    /// Read and decode an osu!.db file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path, &DecodeOptions::default())
    }

    pub fn from_file_with<P: AsRef<Path>>(path: P, options: &DecodeOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader_with(BufReader::new(file), options)
    }
}
