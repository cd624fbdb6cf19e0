//! Single-field decoders for the listing header and beatmap records

use std::io::Read;

use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::reader::ByteCursor;

use super::model::{FormatVersion, OsuString, Permissions, Timestamp};

/// Cap on up-front allocation for count-prefixed lists
const PREALLOC_LIMIT: u32 = 1024;

pub fn read_version<R: Read>(cursor: &mut ByteCursor<R>) -> Result<FormatVersion> {
    cursor.read_u32("version").map(FormatVersion)
}

pub fn read_folder_count<R: Read>(cursor: &mut ByteCursor<R>) -> Result<u32> {
    cursor.read_u32("folder_count")
}

pub fn read_account_unlocked<R: Read>(cursor: &mut ByteCursor<R>) -> Result<bool> {
    cursor.read_bool("account_unlocked")
}

pub fn read_timestamp<R: Read>(
    cursor: &mut ByteCursor<R>,
    field: &'static str,
) -> Result<Timestamp> {
    cursor.read_u64(field).map(Timestamp)
}

pub fn read_permissions<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Permissions> {
    cursor.read_u32("permissions").map(Permissions)
}

/// Read an osu! format string
///
/// Format:
/// - 0x00: absent
/// - 0x0b: ULEB128 byte length, then that many UTF-8 bytes
///
/// Any other marker has never been seen in the wild. It is treated as absent
/// (keeping the marker) unless `strict_string_markers` is set.
pub fn read_string<R: Read>(
    cursor: &mut ByteCursor<R>,
    field: &'static str,
    options: &DecodeOptions,
) -> Result<OsuString> {
    let offset = cursor.position();
    let marker = cursor.read_u8(field)?;

    match marker {
        OsuString::PRESENT_MARKER => {
            let length_offset = cursor.position();
            let length = cursor.read_uleb128(field)?;
            if length > options.max_string_len {
                return Err(Error::ImplausibleCount {
                    field,
                    offset: length_offset,
                    count: length,
                    limit: options.max_string_len,
                });
            }

            let text_offset = cursor.position();
            let bytes = cursor.read_bytes(length, field)?;
            String::from_utf8(bytes)
                .map(OsuString::Present)
                .map_err(|_| Error::InvalidUtf8 {
                    field,
                    offset: text_offset,
                })
        }
        OsuString::ABSENT_MARKER => Ok(OsuString::absent()),
        other if options.strict_string_markers => Err(Error::UnknownStringMarker {
            field,
            offset,
            marker: other,
        }),
        other => {
            tracing::warn!(
                "Unknown string marker 0x{:02x} for {} at offset {}, treating as absent",
                other,
                field,
                offset
            );
            Ok(OsuString::Absent { marker: other })
        }
    }
}

/// Read a u32 element count and check it against `limit`
pub fn read_count<R: Read>(
    cursor: &mut ByteCursor<R>,
    field: &'static str,
    limit: u32,
) -> Result<u32> {
    let offset = cursor.position();
    let count = cursor.read_u32(field)?;
    if count > limit {
        return Err(Error::ImplausibleCount {
            field,
            offset,
            count: u64::from(count),
            limit: u64::from(limit),
        });
    }
    Ok(count)
}

/// Vec sized for `count` elements, but never reserving more than a small cap
pub fn list_with_capacity<T>(count: u32) -> Vec<T> {
    Vec::with_capacity(count.min(PREALLOC_LIMIT) as usize)
}
