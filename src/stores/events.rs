//! Notifications emitted by the catalog store

use crate::models::{SortBy, SortOrder, Track};

/// Something changed in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEvent {
    TrackAdded(Track),
    TrackDeleted(Track),
    /// Liked titles in catalog order, sent after every like-set change
    LikedChanged(Vec<String>),
    Sorted { sort_by: SortBy, order: SortOrder },
    /// A non-fatal persistence problem; the in-memory change still stands
    PersistenceWarning(String),
}

/// Handle returned by `subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Observer callback
pub type Observer = Box<dyn FnMut(&CatalogEvent)>;
