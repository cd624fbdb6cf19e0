//! Star rating lists (Int-Double pairs)
//!
//! Each entry is framed as `0x08 u32 0x0d f64`. The marker bytes never vary;
//! a different value means the stream is no longer aligned with the layout.

use std::io::Read;

use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::reader::ByteCursor;

use super::fields::{list_with_capacity, read_count};
use super::model::RatingEntry;

/// Marker preceding the mod combination
pub const MODS_MARKER: u8 = 0x08;
/// Marker preceding the star rating
pub const RATING_MARKER: u8 = 0x0d;

/// Read a count-prefixed list of rating entries
pub fn read_rating_list<R: Read>(
    cursor: &mut ByteCursor<R>,
    field: &'static str,
    options: &DecodeOptions,
) -> Result<Vec<RatingEntry>> {
    let count = read_count(cursor, field, options.max_list_len)?;
    let mut entries = list_with_capacity(count);

    for _ in 0..count {
        expect_marker(cursor, field, MODS_MARKER)?;
        let mods = cursor.read_u32(field)?;
        expect_marker(cursor, field, RATING_MARKER)?;
        let star_rating = cursor.read_f64(field)?;
        entries.push(RatingEntry { mods, star_rating });
    }

    Ok(entries)
}

fn expect_marker<R: Read>(
    cursor: &mut ByteCursor<R>,
    field: &'static str,
    expected: u8,
) -> Result<()> {
    let offset = cursor.position();
    let actual = cursor.read_u8(field)?;
    if actual != expected {
        return Err(Error::UnexpectedMarker {
            field,
            offset,
            expected,
            actual,
        });
    }
    Ok(())
}
