//! Free-text search over the catalog

use crate::models::Track;

/// Search library
pub struct SearchLib;

impl SearchLib {
    /// Tracks whose title, artist or album contains `query`, ignoring case
    ///
    /// An empty query keeps every track. Catalog order is preserved.
    pub fn search_tracks<'a>(tracks: &'a [Track], query: &str) -> Vec<&'a Track> {
        let needle = query.to_lowercase();
        tracks.iter().filter(|t| t.matches(&needle)).collect()
    }
}
