//! Data model for a decoded osu!.db listing

use std::fmt;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// osu!.db format version, e.g. `20191106`
///
/// Any value is accepted; layout decisions compare it against the
/// thresholds below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FormatVersion(pub u32);

impl FormatVersion {
    /// First version storing AR/CS/HP/OD as f32 and dropping the legacy u16 field
    pub const FLOAT_DIFFICULTY: u32 = 20140609;
    /// First version without the per-beatmap entry size
    pub const NO_ENTRY_SIZE: u32 = 20191106;

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether each beatmap record starts with its byte size
    pub fn has_entry_size(self) -> bool {
        self.0 < Self::NO_ENTRY_SIZE
    }

    /// Whether AR/CS/HP/OD are stored as single bytes
    pub fn has_byte_difficulty(self) -> bool {
        self.0 < Self::FLOAT_DIFFICULTY
    }

    /// Whether each beatmap record carries the legacy u16 field
    pub fn has_legacy_field(self) -> bool {
        self.0 < Self::FLOAT_DIFFICULTY
    }
}

impl From<u32> for FormatVersion {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An osu! format string: a presence marker optionally followed by UTF-8 text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsuString {
    /// No text followed the marker; the raw marker byte is kept
    Absent { marker: u8 },
    /// Marker 0x0b followed by a ULEB128 length and the text
    Present(String),
}

impl OsuString {
    pub const ABSENT_MARKER: u8 = 0x00;
    pub const PRESENT_MARKER: u8 = 0x0b;

    /// The regular absent value (marker 0x00)
    pub fn absent() -> Self {
        Self::Absent {
            marker: Self::ABSENT_MARKER,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Present(s) => Some(s),
            Self::Absent { .. } => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Absent, but with a marker that is neither 0x00 nor 0x0b
    pub fn is_unrecognised(&self) -> bool {
        matches!(self, Self::Absent { marker } if *marker != Self::ABSENT_MARKER)
    }

    /// The text, or an empty string when absent
    pub fn to_string_lossy(&self) -> String {
        self.as_str().unwrap_or_default().to_string()
    }
}

impl Default for OsuString {
    fn default() -> Self {
        Self::absent()
    }
}

impl From<&str> for OsuString {
    fn from(value: &str) -> Self {
        Self::Present(value.to_string())
    }
}

impl Serialize for OsuString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(s) => serializer.serialize_some(s),
            Self::Absent { .. } => serializer.serialize_none(),
        }
    }
}

/// .NET `DateTime` ticks: 100ns intervals since 0001-01-01T00:00:00Z
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    const TICKS_PER_SECOND: i128 = 10_000_000;
    /// Ticks between 0001-01-01 and 1970-01-01
    const UNIX_EPOCH_TICKS: i128 = 621_355_968_000_000_000;

    pub fn ticks(self) -> u64 {
        self.0
    }

    /// Convert to a UTC date; zero (never set) gives `None`
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if self.0 == 0 {
            return None;
        }
        let since_unix = i128::from(self.0) - Self::UNIX_EPOCH_TICKS;
        let secs = i64::try_from(since_unix.div_euclid(Self::TICKS_PER_SECOND)).ok()?;
        let nanos = (since_unix.rem_euclid(Self::TICKS_PER_SECOND) * 100) as u32;
        DateTime::from_timestamp(secs, nanos)
    }
}

/// One precomputed star rating: a mod combination and its rating
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingEntry {
    pub mods: u32,
    pub star_rating: f64,
}

/// A timing point as cached in osu!.db
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimingPoint {
    pub bpm: f64,
    /// Offset into the song in milliseconds
    pub offset: f64,
    /// `false` when this point defines its own tempo
    pub inherited: bool,
}

/// Represents a game mode in osu!
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameMode {
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [Self::Osu, Self::Taiko, Self::Catch, Self::Mania];

    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Osu),
            1 => Some(Self::Taiko),
            2 => Some(Self::Catch),
            3 => Some(Self::Mania),
            _ => None,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Osu => write!(f, "osu!"),
            GameMode::Taiko => write!(f, "osu!taiko"),
            GameMode::Catch => write!(f, "osu!catch"),
            GameMode::Mania => write!(f, "osu!mania"),
        }
    }
}

/// Ranked status byte as stored in osu!.db
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RankedStatus {
    Unknown = 0,
    Unsubmitted = 1,
    /// Pending, WIP and graveyard share one value
    PendingWipGraveyard = 2,
    Ranked = 4,
    Approved = 5,
    Qualified = 6,
    Loved = 7,
}

impl RankedStatus {
    /// `None` for byte values osu! never writes (3 and above 7)
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::Unknown,
            1 => Self::Unsubmitted,
            2 => Self::PendingWipGraveyard,
            4 => Self::Ranked,
            5 => Self::Approved,
            6 => Self::Qualified,
            7 => Self::Loved,
            _ => return None,
        })
    }
}

impl fmt::Display for RankedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankedStatus::Unknown => write!(f, "Unknown"),
            RankedStatus::Unsubmitted => write!(f, "Unsubmitted"),
            RankedStatus::PendingWipGraveyard => write!(f, "Pending/WIP/Graveyard"),
            RankedStatus::Ranked => write!(f, "Ranked"),
            RankedStatus::Approved => write!(f, "Approved"),
            RankedStatus::Qualified => write!(f, "Qualified"),
            RankedStatus::Loved => write!(f, "Loved"),
        }
    }
}

/// Difficulty settings, always as f32 regardless of how they were stored
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Difficulty {
    pub approach_rate: f32,
    pub circle_size: f32,
    pub hp_drain: f32,
    pub overall_difficulty: f32,
}

impl Difficulty {
    /// Widen the single-byte values used before 20140609
    pub fn from_bytes(ar: u8, cs: u8, hp: u8, od: u8) -> Self {
        Self {
            approach_rate: f32::from(ar),
            circle_size: f32::from(cs),
            hp_drain: f32::from(hp),
            overall_difficulty: f32::from(od),
        }
    }
}

/// Star rating lists for each mode
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StarRatings {
    pub osu: Vec<RatingEntry>,
    pub taiko: Vec<RatingEntry>,
    pub catch: Vec<RatingEntry>,
    pub mania: Vec<RatingEntry>,
}

impl StarRatings {
    pub fn get(&self, mode: GameMode) -> &[RatingEntry] {
        match mode {
            GameMode::Osu => &self.osu,
            GameMode::Taiko => &self.taiko,
            GameMode::Catch => &self.catch,
            GameMode::Mania => &self.mania,
        }
    }

    pub fn is_empty(&self) -> bool {
        GameMode::ALL.iter().all(|&mode| self.get(mode).is_empty())
    }
}

/// Grade achieved per mode (raw grade bytes, 9 = not played)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModeGrades {
    pub osu: u8,
    pub taiko: u8,
    pub catch: u8,
    pub mania: u8,
}

/// One difficulty entry of the listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BeatmapRecord {
    /// Byte size of the record; only stored before 20191106
    pub entry_size: Option<u32>,
    pub artist: OsuString,
    pub artist_unicode: OsuString,
    pub title: OsuString,
    pub title_unicode: OsuString,
    pub creator: OsuString,
    pub difficulty_name: OsuString,
    pub audio_file: OsuString,
    /// MD5 hash of the .osu file
    pub checksum: OsuString,
    pub file_name: OsuString,
    pub status: u8,
    pub hit_circles: u16,
    pub sliders: u16,
    pub spinners: u16,
    pub last_modified: Timestamp,
    pub difficulty: Difficulty,
    pub slider_velocity: f64,
    pub star_ratings: StarRatings,
    /// Drain time in seconds
    pub drain_time: u32,
    /// Total time in milliseconds
    pub total_time: u32,
    /// Audio preview start in milliseconds
    pub preview_time: u32,
    pub timing_points: Vec<TimingPoint>,
    pub difficulty_id: u32,
    /// Beatmap set id
    pub beatmap_id: u32,
    pub thread_id: u32,
    pub grades: ModeGrades,
    pub local_offset: u16,
    pub stack_leniency: f32,
    pub mode: u8,
    pub source: OsuString,
    pub tags: OsuString,
    pub online_offset: u16,
    pub title_font: OsuString,
    pub unplayed: bool,
    pub last_played: Timestamp,
    pub is_osz2: bool,
    pub folder_name: OsuString,
    pub last_online_check: Timestamp,
    pub ignore_sound: bool,
    pub ignore_skin: bool,
    pub disable_storyboard: bool,
    pub disable_video: bool,
    pub visual_override: bool,
    /// Undocumented u16; only stored before 20140609 and always zero
    pub legacy_field: Option<u16>,
    pub last_modification: u32,
    pub mania_scroll_speed: u8,
}

impl BeatmapRecord {
    pub fn game_mode(&self) -> Option<GameMode> {
        GameMode::from_raw(self.mode)
    }

    pub fn ranked_status(&self) -> Option<RankedStatus> {
        RankedStatus::from_raw(self.status)
    }

    pub fn ratings(&self, mode: GameMode) -> &[RatingEntry] {
        self.star_ratings.get(mode)
    }

    /// No-mod star rating for the given mode
    pub fn star_rating(&self, mode: GameMode) -> Option<f64> {
        self.ratings(mode)
            .iter()
            .find(|entry| entry.mods == 0)
            .map(|entry| entry.star_rating)
    }

    /// Tempo of the first uninherited timing point
    pub fn main_bpm(&self) -> Option<f64> {
        self.timing_points
            .iter()
            .find(|tp| !tp.inherited && tp.bpm > 0.0)
            .map(|tp| tp.bpm)
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .as_str()
            .map(|t| t.split_whitespace().collect())
            .unwrap_or_default()
    }
}

/// Account permission bits stored at the end of the listing
///
/// Only the raw value is stored; the flags are derived on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Permissions(pub u32);

impl Permissions {
    pub const NORMAL: u32 = 1 << 0;
    pub const MODERATOR: u32 = 1 << 1;
    pub const SUPPORTER: u32 = 1 << 2;
    pub const FRIEND: u32 = 1 << 3;
    pub const ELEVATED_STAFF: u32 = 1 << 4;
    pub const EVENT_STAFF: u32 = 1 << 5;

    pub fn raw(self) -> u32 {
        self.0
    }

    fn has(self, bit: u32) -> bool {
        self.0 & bit != 0
    }

    pub fn is_normal(self) -> bool {
        self.has(Self::NORMAL)
    }

    pub fn is_moderator(self) -> bool {
        self.has(Self::MODERATOR)
    }

    pub fn is_supporter(self) -> bool {
        self.has(Self::SUPPORTER)
    }

    pub fn is_friend(self) -> bool {
        self.has(Self::FRIEND)
    }

    pub fn is_elevated_staff(self) -> bool {
        self.has(Self::ELEVATED_STAFF)
    }

    pub fn is_event_staff(self) -> bool {
        self.has(Self::EVENT_STAFF)
    }
}

impl Serialize for Permissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Permissions", 7)?;
        s.serialize_field("raw", &self.0)?;
        s.serialize_field("normal", &self.is_normal())?;
        s.serialize_field("moderator", &self.is_moderator())?;
        s.serialize_field("supporter", &self.is_supporter())?;
        s.serialize_field("friend", &self.is_friend())?;
        s.serialize_field("elevated_staff", &self.is_elevated_staff())?;
        s.serialize_field("event_staff", &self.is_event_staff())?;
        s.end()
    }
}

/// A fully decoded osu!.db listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalogue {
    pub version: FormatVersion,
    pub folder_count: u32,
    pub account_unlocked: bool,
    pub unlock_date: Timestamp,
    pub player_name: OsuString,
    /// Records in file order
    pub beatmaps: Vec<BeatmapRecord>,
    pub permissions: Permissions,
}

impl Catalogue {
    pub fn len(&self) -> usize {
        self.beatmaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beatmaps.is_empty()
    }

    pub fn player_name(&self) -> Option<&str> {
        self.player_name.as_str()
    }

    /// Find a beatmap by the MD5 hash of its .osu file
    pub fn find_by_checksum(&self, md5: &str) -> Option<&BeatmapRecord> {
        self.beatmaps
            .iter()
            .find(|b| b.checksum.as_str() == Some(md5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_version_thresholds() {
        let old = FormatVersion(20100101);
        assert!(old.has_entry_size());
        assert!(old.has_byte_difficulty());
        assert!(old.has_legacy_field());

        let mid = FormatVersion(20180101);
        assert!(mid.has_entry_size());
        assert!(!mid.has_byte_difficulty());
        assert!(!mid.has_legacy_field());

        let new = FormatVersion(20200101);
        assert!(!new.has_entry_size());
        assert!(!new.has_byte_difficulty());

        // Thresholds are exclusive upper bounds
        assert!(!FormatVersion(20140609).has_byte_difficulty());
        assert!(FormatVersion(20140608).has_byte_difficulty());
        assert!(!FormatVersion(20191106).has_entry_size());
        assert!(FormatVersion(20191105).has_entry_size());
    }

    #[test]
    fn test_osu_string_states() {
        let present = OsuString::from("Tester");
        assert_eq!(present.as_str(), Some("Tester"));
        assert!(present.is_present());
        assert!(!present.is_unrecognised());

        let absent = OsuString::absent();
        assert_eq!(absent.as_str(), None);
        assert!(!absent.is_unrecognised());
        assert_eq!(absent.to_string_lossy(), "");

        let odd = OsuString::Absent { marker: 0x42 };
        assert!(!odd.is_present());
        assert!(odd.is_unrecognised());
    }

    #[test]
    fn test_timestamp_conversion() {
        assert_eq!(Timestamp(0).to_datetime(), None);

        let epoch = Timestamp(621_355_968_000_000_000).to_datetime().unwrap();
        assert_eq!(epoch.timestamp(), 0);

        // 2020-01-01T00:00:00.5Z
        let ticks = 621_355_968_000_000_000 + 1_577_836_800 * 10_000_000 + 5_000_000;
        let dt = Timestamp(ticks).to_datetime().unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2020, 1, 1));
        assert_eq!(dt.hour(), 0);
        assert_eq!(dt.timestamp_subsec_millis(), 500);

        // Before the unix epoch
        let early = Timestamp(1).to_datetime().unwrap();
        assert_eq!(early.year(), 1);
    }

    #[test]
    fn test_permission_flags() {
        let perms = Permissions(0b000011);
        assert!(perms.is_normal());
        assert!(perms.is_moderator());
        assert!(!perms.is_supporter());
        assert!(!perms.is_friend());
        assert!(!perms.is_elevated_staff());
        assert!(!perms.is_event_staff());

        let staff = Permissions(Permissions::ELEVATED_STAFF | Permissions::EVENT_STAFF);
        assert!(staff.is_elevated_staff());
        assert!(staff.is_event_staff());
        assert!(!staff.is_normal());
    }

    #[test]
    fn test_permissions_serialize_flags() {
        let json = serde_json::to_value(Permissions(0b000100)).unwrap();
        assert_eq!(json["raw"], 4);
        assert_eq!(json["supporter"], true);
        assert_eq!(json["normal"], false);
    }

    #[test]
    fn test_beatmap_helpers() {
        let beatmap = BeatmapRecord {
            mode: 3,
            status: 4,
            tags: OsuString::from("  jump  stream "),
            star_ratings: StarRatings {
                mania: vec![
                    RatingEntry {
                        mods: 64,
                        star_rating: 5.1,
                    },
                    RatingEntry {
                        mods: 0,
                        star_rating: 4.2,
                    },
                ],
                ..StarRatings::default()
            },
            timing_points: vec![
                TimingPoint {
                    bpm: 200.0,
                    offset: 0.0,
                    inherited: true,
                },
                TimingPoint {
                    bpm: 174.0,
                    offset: 100.0,
                    inherited: false,
                },
            ],
            ..BeatmapRecord::default()
        };

        assert_eq!(beatmap.game_mode(), Some(GameMode::Mania));
        assert_eq!(beatmap.ranked_status(), Some(RankedStatus::Ranked));
        assert_eq!(beatmap.star_rating(GameMode::Mania), Some(4.2));
        assert_eq!(beatmap.star_rating(GameMode::Osu), None);
        assert_eq!(beatmap.main_bpm(), Some(174.0));
        assert_eq!(beatmap.tags(), vec!["jump", "stream"]);
    }

    #[test]
    fn test_raw_enum_conversions() {
        assert_eq!(GameMode::from_raw(2), Some(GameMode::Catch));
        assert_eq!(GameMode::from_raw(4), None);
        assert_eq!(RankedStatus::from_raw(3), None);
        assert_eq!(RankedStatus::from_raw(7), Some(RankedStatus::Loved));
        assert_eq!(
            Difficulty::from_bytes(9, 4, 6, 8),
            Difficulty {
                approach_rate: 9.0,
                circle_size: 4.0,
                hp_drain: 6.0,
                overall_difficulty: 8.0,
            }
        );
    }
}
