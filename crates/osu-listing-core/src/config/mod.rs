//! Decoder configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Limits and leniency switches applied while decoding a listing
///
/// Counts and lengths in osu!.db are read straight from the file, so a
/// corrupt header can claim billions of entries. Anything above these limits
/// is reported as [`Error::ImplausibleCount`] instead of being allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Maximum number of beatmap records the listing may declare
    pub max_beatmaps: u32,
    /// Maximum length of a star rating or timing point list
    pub max_list_len: u32,
    /// Maximum byte length of a single string
    pub max_string_len: u64,
    /// Fail on string markers other than 0x00 / 0x0b instead of treating them as absent
    pub strict_string_markers: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_beatmaps: 1_000_000,
            max_list_len: 100_000,
            max_string_len: 1 << 20,
            strict_string_markers: false,
        }
    }
}

impl DecodeOptions {
    /// Options that reject every unrecognised string marker
    pub fn strict() -> Self {
        Self {
            strict_string_markers: true,
            ..Self::default()
        }
    }

    /// Get the options file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("osu-listing").join("options.json"))
    }

    /// Load options from disk, falling back to defaults if not found or invalid
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring options file {}: {}", path.display(), e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Load options from a specific JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save options to the default location
    pub fn save(&self) -> Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Err(Error::Config("No config directory available".to_string())),
        }
    }

    /// Save options as pretty-printed JSON
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
