//! Lookup index over a decoded listing

use std::collections::HashMap;

use crate::catalogue::{BeatmapRecord, Catalogue};

/// Difficulties sharing one beatmap set id
#[derive(Debug, Clone)]
pub struct BeatmapSetView<'a> {
    /// `None` for records with set id 0 (unsubmitted maps)
    pub beatmap_id: Option<u32>,
    pub beatmaps: Vec<&'a BeatmapRecord>,
}

impl<'a> BeatmapSetView<'a> {
    pub fn folder_name(&self) -> Option<&'a str> {
        self.beatmaps.iter().find_map(|b| b.folder_name.as_str())
    }
}

/// Build an index of listing records for fast lookup
pub struct CatalogueIndex<'a> {
    catalogue: &'a Catalogue,
    by_checksum: HashMap<&'a str, usize>,
    by_difficulty_id: HashMap<u32, usize>,
}

impl<'a> CatalogueIndex<'a> {
    /// Build an index from a decoded listing
    ///
    /// When two records share a checksum or id, the first one wins.
    pub fn build(catalogue: &'a Catalogue) -> Self {
        let mut by_checksum = HashMap::new();
        let mut by_difficulty_id = HashMap::new();

        for (idx, beatmap) in catalogue.beatmaps.iter().enumerate() {
            if let Some(md5) = beatmap.checksum.as_str().filter(|s| !s.is_empty()) {
                by_checksum.entry(md5).or_insert(idx);
            }
            if beatmap.difficulty_id > 0 {
                by_difficulty_id.entry(beatmap.difficulty_id).or_insert(idx);
            }
        }

        Self {
            catalogue,
            by_checksum,
            by_difficulty_id,
        }
    }

    /// Get a beatmap by MD5 hash
    pub fn get_by_checksum(&self, md5: &str) -> Option<&'a BeatmapRecord> {
        self.by_checksum
            .get(md5)
            .map(|&idx| &self.catalogue.beatmaps[idx])
    }

    /// Get a beatmap by its online difficulty id
    pub fn get_by_difficulty_id(&self, id: u32) -> Option<&'a BeatmapRecord> {
        self.by_difficulty_id
            .get(&id)
            .map(|&idx| &self.catalogue.beatmaps[idx])
    }

    /// Check if a beatmap exists by MD5 hash
    pub fn contains_checksum(&self, md5: &str) -> bool {
        self.by_checksum.contains_key(md5)
    }

    /// Group records into beatmap sets, in order of first appearance
    ///
    /// Records without a set id each get their own group.
    pub fn sets(&self) -> Vec<BeatmapSetView<'a>> {
        let mut sets: Vec<BeatmapSetView<'a>> = Vec::new();
        let mut by_set_id: HashMap<u32, usize> = HashMap::new();

        for beatmap in &self.catalogue.beatmaps {
            if beatmap.beatmap_id == 0 {
                sets.push(BeatmapSetView {
                    beatmap_id: None,
                    beatmaps: vec![beatmap],
                });
                continue;
            }

            match by_set_id.get(&beatmap.beatmap_id) {
                Some(&idx) => sets[idx].beatmaps.push(beatmap),
                None => {
                    by_set_id.insert(beatmap.beatmap_id, sets.len());
                    sets.push(BeatmapSetView {
                        beatmap_id: Some(beatmap.beatmap_id),
                        beatmaps: vec![beatmap],
                    });
                }
            }
        }

        sets
    }

    /// Get number of indexed checksums
    pub fn len(&self) -> usize {
        self.by_checksum.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.by_checksum.is_empty()
    }
}
