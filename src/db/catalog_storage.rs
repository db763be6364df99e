//! Catalog persistence on top of a key-value store

use thiserror::Error;
use tracing::{info, warn};

use super::codec::{self, CodecError};
use super::storage::{KeyValueStore, StorageError};
use crate::core::seed::seed_tracks;
use crate::models::Track;

/// Default storage key for the catalog
pub const CATALOG_KEY: &str = "yapple_songs";

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Where a loaded catalog came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    Seed,
}

/// Outcome of loading the catalog, never a failure
#[derive(Debug)]
pub struct Loaded {
    pub tracks: Vec<Track>,
    pub source: LoadSource,
    /// Set when something was read but had to be discarded in part or whole
    pub warning: Option<String>,
}

/// Reads and writes the serialized catalog under a single key
pub struct CatalogStorage {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl CatalogStorage {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Raw stored bytes, `None` when nothing was saved yet
    pub fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        self.store.get(&self.key)
    }

    /// Replace the raw stored bytes
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), StorageError> {
        self.store.set(&self.key, bytes)
    }

    /// Load the catalog, falling back to the seed list
    pub fn load(&self) -> Loaded {
        let bytes = match self.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!("No stored catalog under '{}', using seed list", self.key);
                return Self::seeded(None);
            }
            Err(e) => {
                warn!("Failed to read stored catalog: {}", e);
                return Self::seeded(Some(format!("Could not read saved library: {}", e)));
            }
        };

        match codec::decode(&bytes) {
            Ok(decoded) => {
                let warning = (decoded.dropped > 0).then(|| {
                    format!(
                        "Skipped {} unreadable track(s) in saved library",
                        decoded.dropped
                    )
                });
                info!("Loaded {} tracks from storage", decoded.tracks.len());
                Loaded {
                    tracks: decoded.tracks,
                    source: LoadSource::Stored,
                    warning,
                }
            }
            Err(e) => {
                warn!("Stored catalog is corrupt: {}", e);
                Self::seeded(Some(format!("Saved library was corrupt: {}", e)))
            }
        }
    }

    /// Serialize and write the catalog
    pub fn save(&mut self, tracks: &[Track]) -> Result<(), PersistenceError> {
        let bytes = codec::encode(tracks)?;
        self.write(&bytes)?;
        Ok(())
    }

    fn seeded(warning: Option<String>) -> Loaded {
        Loaded {
            tracks: seed_tracks(),
            source: LoadSource::Seed,
            warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[test]
    fn test_absent_catalog_uses_seed() {
        let storage = CatalogStorage::new(Box::new(MemoryStore::new()), CATALOG_KEY);
        let loaded = storage.load();

        assert_eq!(loaded.source, LoadSource::Seed);
        assert_eq!(loaded.tracks, seed_tracks());
        assert!(loaded.warning.is_none());
    }

    #[test]
    fn test_corrupt_catalog_uses_seed() {
        let store = MemoryStore::new().with_entry(CATALOG_KEY, "{{{");
        let loaded = CatalogStorage::new(Box::new(store), CATALOG_KEY).load();

        assert_eq!(loaded.source, LoadSource::Seed);
        assert!(loaded.warning.is_some());
    }

    #[test]
    fn test_unreadable_store_uses_seed() {
        let store = MemoryStore::new().fail_reads(true);
        let loaded = CatalogStorage::new(Box::new(store), CATALOG_KEY).load();

        assert_eq!(loaded.source, LoadSource::Seed);
        assert!(loaded.warning.is_some());
    }

    #[test]
    fn test_save_then_load() {
        let tracks = vec![
            Track::new(10, "One", "A", "X", 61),
            Track::new(4, "Two", "B", "Y", 122),
        ];

        let mut storage = CatalogStorage::new(Box::new(MemoryStore::new()), CATALOG_KEY);
        storage.save(&tracks).unwrap();

        let loaded = storage.load();
        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.tracks, tracks);
    }

    #[test]
    fn test_stored_empty_list_is_kept() {
        let store = MemoryStore::new().with_entry(CATALOG_KEY, "[]");
        let loaded = CatalogStorage::new(Box::new(store), CATALOG_KEY).load();

        assert_eq!(loaded.source, LoadSource::Stored);
        assert!(loaded.tracks.is_empty());
    }

    #[test]
    fn test_partially_malformed_catalog_warns() {
        let store = MemoryStore::new().with_entry(
            CATALOG_KEY,
            r#"[{"id":1,"title":"A","artist":"B","album":"C","duration":"x"},
                {"id":2,"title":"D","artist":"E","album":"F","duration":"1:00"}]"#,
        );
        let loaded = CatalogStorage::new(Box::new(store), CATALOG_KEY).load();

        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.tracks.len(), 1);
        assert!(loaded.warning.unwrap().contains("Skipped 1"));
    }
}
