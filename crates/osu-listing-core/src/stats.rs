//! Summary statistics for a decoded listing

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalogue::{Catalogue, GameMode, RankedStatus};

/// Beatmap counts by game mode
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModeCount {
    pub osu: usize,
    pub taiko: usize,
    pub catch: usize,
    pub mania: usize,
    /// Mode byte outside 0..=3
    pub unknown: usize,
}

impl ModeCount {
    /// Get total count across all modes
    pub fn total(&self) -> usize {
        self.osu + self.taiko + self.catch + self.mania + self.unknown
    }
}

/// Overview of a listing, suitable for reporting
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogueStats {
    pub version: u32,
    pub player_name: Option<String>,
    pub total_beatmaps: usize,
    pub total_sets: usize,
    pub by_mode: ModeCount,
    /// Keyed by status name; unrecognised bytes are counted as "Other"
    pub by_ranked_status: BTreeMap<String, usize>,
    pub total_timing_points: usize,
    pub with_star_ratings: usize,
    /// Strings whose presence marker was neither 0x00 nor 0x0b
    pub unrecognised_strings: usize,
}

impl CatalogueStats {
    pub fn analyze(catalogue: &Catalogue) -> Self {
        let mut stats = Self {
            version: catalogue.version.get(),
            player_name: catalogue.player_name().map(String::from),
            total_beatmaps: catalogue.len(),
            total_sets: crate::index::CatalogueIndex::build(catalogue).sets().len(),
            ..Self::default()
        };

        for beatmap in &catalogue.beatmaps {
            match beatmap.game_mode() {
                Some(GameMode::Osu) => stats.by_mode.osu += 1,
                Some(GameMode::Taiko) => stats.by_mode.taiko += 1,
                Some(GameMode::Catch) => stats.by_mode.catch += 1,
                Some(GameMode::Mania) => stats.by_mode.mania += 1,
                None => stats.by_mode.unknown += 1,
            }

            let status = beatmap
                .ranked_status()
                .map(|s: RankedStatus| s.to_string())
                .unwrap_or_else(|| "Other".to_string());
            *stats.by_ranked_status.entry(status).or_insert(0) += 1;

            stats.total_timing_points += beatmap.timing_points.len();
            if !beatmap.star_ratings.is_empty() {
                stats.with_star_ratings += 1;
            }

            stats.unrecognised_strings += [
                &beatmap.artist,
                &beatmap.artist_unicode,
                &beatmap.title,
                &beatmap.title_unicode,
                &beatmap.creator,
                &beatmap.difficulty_name,
                &beatmap.audio_file,
                &beatmap.checksum,
                &beatmap.file_name,
                &beatmap.source,
                &beatmap.tags,
                &beatmap.title_font,
                &beatmap.folder_name,
            ]
            .iter()
            .filter(|s| s.is_unrecognised())
            .count();
        }

        if catalogue.player_name.is_unrecognised() {
            stats.unrecognised_strings += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::{
        BeatmapRecord, FormatVersion, OsuString, Permissions, RatingEntry, StarRatings, Timestamp,
    };

    #[test]
    fn test_analyze() {
        let beatmaps = vec![
            BeatmapRecord {
                mode: 0,
                status: 4,
                beatmap_id: 1,
                star_ratings: StarRatings {
                    osu: vec![RatingEntry {
                        mods: 0,
                        star_rating: 4.0,
                    }],
                    ..StarRatings::default()
                },
                ..BeatmapRecord::default()
            },
            BeatmapRecord {
                mode: 3,
                status: 7,
                beatmap_id: 1,
                ..BeatmapRecord::default()
            },
            BeatmapRecord {
                mode: 9,
                status: 3,
                beatmap_id: 2,
                tags: OsuString::Absent { marker: 0x0c },
                ..BeatmapRecord::default()
            },
        ];
        let catalogue = Catalogue {
            version: FormatVersion(20220101),
            folder_count: 2,
            account_unlocked: true,
            unlock_date: Timestamp(0),
            player_name: OsuString::from("Tester"),
            beatmaps,
            permissions: Permissions(0),
        };

        let stats = CatalogueStats::analyze(&catalogue);
        assert_eq!(stats.version, 20220101);
        assert_eq!(stats.player_name.as_deref(), Some("Tester"));
        assert_eq!(stats.total_beatmaps, 3);
        assert_eq!(stats.total_sets, 2);
        assert_eq!(stats.by_mode.osu, 1);
        assert_eq!(stats.by_mode.mania, 1);
        assert_eq!(stats.by_mode.unknown, 1);
        assert_eq!(stats.by_mode.total(), 3);
        assert_eq!(stats.by_ranked_status.get("Ranked"), Some(&1));
        assert_eq!(stats.by_ranked_status.get("Loved"), Some(&1));
        assert_eq!(stats.by_ranked_status.get("Other"), Some(&1));
        assert_eq!(stats.with_star_ratings, 1);
        assert_eq!(stats.unrecognised_strings, 1);
    }
}
