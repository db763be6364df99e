//! Track model

use serde::{Deserialize, Serialize};

use crate::utils::dates::format_duration;

/// A song in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog-unique id, larger ids were added later
    pub id: u64,
    /// Track title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Album name
    pub album: String,
    /// Duration in seconds
    pub duration_secs: u32,
}

impl Track {
    /// Create a track
    pub fn new(
        id: u64,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration_secs: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration_secs,
        }
    }

    /// Duration as "M:SS"
    pub fn duration(&self) -> String {
        format_duration(self.duration_secs)
    }

    /// Case-insensitive substring match on title, artist or album
    pub fn matches(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(needle_lower)
            || self.artist.to_lowercase().contains(needle_lower)
            || self.album.to_lowercase().contains(needle_lower)
    }
}
