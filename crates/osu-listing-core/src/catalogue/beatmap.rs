//! Beatmap record decoder
//!
//! The record is one fixed sequence of fields. Its shape depends on the
//! format version in three places:
//! - `< 20191106`: a leading u32 entry size
//! - `< 20140609`: AR/CS/HP/OD as u8 instead of f32
//! - `< 20140609`: a trailing u16 that must be zero

use std::io::Read;

use crate::config::DecodeOptions;
use crate::error::{Error, Result};
use crate::reader::ByteCursor;

use super::fields::{read_string, read_timestamp};
use super::model::{BeatmapRecord, Difficulty, FormatVersion, ModeGrades, StarRatings};
use super::ratings::read_rating_list;
use super::timing::read_timing_points;

/// Decode one beatmap record laid out for `version`
pub fn read_beatmap<R: Read>(
    cursor: &mut ByteCursor<R>,
    version: FormatVersion,
    options: &DecodeOptions,
) -> Result<BeatmapRecord> {
    let entry_size = if version.has_entry_size() {
        Some(cursor.read_u32("beatmap.entry_size")?)
    } else {
        None
    };

    let artist = read_string(cursor, "beatmap.artist", options)?;
    let artist_unicode = read_string(cursor, "beatmap.artist_unicode", options)?;
    let title = read_string(cursor, "beatmap.title", options)?;
    let title_unicode = read_string(cursor, "beatmap.title_unicode", options)?;
    let creator = read_string(cursor, "beatmap.creator", options)?;
    let difficulty_name = read_string(cursor, "beatmap.difficulty_name", options)?;
    let audio_file = read_string(cursor, "beatmap.audio_file", options)?;
    let checksum = read_string(cursor, "beatmap.checksum", options)?;
    let file_name = read_string(cursor, "beatmap.file_name", options)?;

    let status = cursor.read_u8("beatmap.status")?;
    let hit_circles = cursor.read_u16("beatmap.hit_circles")?;
    let sliders = cursor.read_u16("beatmap.sliders")?;
    let spinners = cursor.read_u16("beatmap.spinners")?;
    let last_modified = read_timestamp(cursor, "beatmap.last_modified")?;

    let difficulty = read_difficulty(cursor, version)?;
    let slider_velocity = cursor.read_f64("beatmap.slider_velocity")?;

    let star_ratings = StarRatings {
        osu: read_rating_list(cursor, "beatmap.osu_ratings", options)?,
        taiko: read_rating_list(cursor, "beatmap.taiko_ratings", options)?,
        catch: read_rating_list(cursor, "beatmap.catch_ratings", options)?,
        mania: read_rating_list(cursor, "beatmap.mania_ratings", options)?,
    };

    let drain_time = cursor.read_u32("beatmap.drain_time")?;
    let total_time = cursor.read_u32("beatmap.total_time")?;
    let preview_time = cursor.read_u32("beatmap.preview_time")?;
    let timing_points = read_timing_points(cursor, options)?;

    let difficulty_id = cursor.read_u32("beatmap.difficulty_id")?;
    let beatmap_id = cursor.read_u32("beatmap.beatmap_id")?;
    let thread_id = cursor.read_u32("beatmap.thread_id")?;
    let grades = ModeGrades {
        osu: cursor.read_u8("beatmap.grade_osu")?,
        taiko: cursor.read_u8("beatmap.grade_taiko")?,
        catch: cursor.read_u8("beatmap.grade_catch")?,
        mania: cursor.read_u8("beatmap.grade_mania")?,
    };
    let local_offset = cursor.read_u16("beatmap.local_offset")?;
    let stack_leniency = cursor.read_f32("beatmap.stack_leniency")?;
    let mode = cursor.read_u8("beatmap.mode")?;

    let source = read_string(cursor, "beatmap.source", options)?;
    let tags = read_string(cursor, "beatmap.tags", options)?;
    let online_offset = cursor.read_u16("beatmap.online_offset")?;
    let title_font = read_string(cursor, "beatmap.title_font", options)?;
    let unplayed = cursor.read_bool("beatmap.unplayed")?;
    let last_played = read_timestamp(cursor, "beatmap.last_played")?;
    let is_osz2 = cursor.read_bool("beatmap.is_osz2")?;
    let folder_name = read_string(cursor, "beatmap.folder_name", options)?;
    let last_online_check = read_timestamp(cursor, "beatmap.last_online_check")?;

    let ignore_sound = cursor.read_bool("beatmap.ignore_sound")?;
    let ignore_skin = cursor.read_bool("beatmap.ignore_skin")?;
    let disable_storyboard = cursor.read_bool("beatmap.disable_storyboard")?;
    let disable_video = cursor.read_bool("beatmap.disable_video")?;
    let visual_override = cursor.read_bool("beatmap.visual_override")?;

    let legacy_field = if version.has_legacy_field() {
        Some(read_legacy_field(cursor)?)
    } else {
        None
    };

    let last_modification = cursor.read_u32("beatmap.last_modification")?;
    let mania_scroll_speed = cursor.read_u8("beatmap.mania_scroll_speed")?;

    Ok(BeatmapRecord {
        entry_size,
        artist,
        artist_unicode,
        title,
        title_unicode,
        creator,
        difficulty_name,
        audio_file,
        checksum,
        file_name,
        status,
        hit_circles,
        sliders,
        spinners,
        last_modified,
        difficulty,
        slider_velocity,
        star_ratings,
        drain_time,
        total_time,
        preview_time,
        timing_points,
        difficulty_id,
        beatmap_id,
        thread_id,
        grades,
        local_offset,
        stack_leniency,
        mode,
        source,
        tags,
        online_offset,
        title_font,
        unplayed,
        last_played,
        is_osz2,
        folder_name,
        last_online_check,
        ignore_sound,
        ignore_skin,
        disable_storyboard,
        disable_video,
        visual_override,
        legacy_field,
        last_modification,
        mania_scroll_speed,
    })
}

/// AR, CS, HP, OD in that order; bytes are widened to f32
fn read_difficulty<R: Read>(
    cursor: &mut ByteCursor<R>,
    version: FormatVersion,
) -> Result<Difficulty> {
    if version.has_byte_difficulty() {
        let ar = cursor.read_u8("beatmap.approach_rate")?;
        let cs = cursor.read_u8("beatmap.circle_size")?;
        let hp = cursor.read_u8("beatmap.hp_drain")?;
        let od = cursor.read_u8("beatmap.overall_difficulty")?;
        Ok(Difficulty::from_bytes(ar, cs, hp, od))
    } else {
        Ok(Difficulty {
            approach_rate: cursor.read_f32("beatmap.approach_rate")?,
            circle_size: cursor.read_f32("beatmap.circle_size")?,
            hp_drain: cursor.read_f32("beatmap.hp_drain")?,
            overall_difficulty: cursor.read_f32("beatmap.overall_difficulty")?,
        })
    }
}

/// The pre-20140609 u16 is always zero; anything else means misalignment
fn read_legacy_field<R: Read>(cursor: &mut ByteCursor<R>) -> Result<u16> {
    let offset = cursor.position();
    let value = cursor.read_u16("beatmap.legacy_field")?;
    if value != 0 {
        return Err(Error::LegacyFieldNotZero {
            offset,
            actual: value,
        });
    }
    Ok(value)
}
