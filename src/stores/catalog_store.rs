//! Catalog store - the authoritative track list and like-set
//!
//! Every change to the track list is written through to storage before the
//! call returns. Storage failures never undo the in-memory change; they are
//! logged and pushed to the warning channel instead.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::error::{CatalogError, Result};
use super::events::{CatalogEvent, Observer, SubscriptionId};
use crate::core::query::{QueryEngine, RenderedView};
use crate::core::sorting::SortLib;
use crate::db::CatalogStorage;
use crate::models::{Role, SortBy, SortOrder, Track, ViewOptions};

/// In-memory catalog backed by injected storage
pub struct CatalogStore {
    /// Tracks in catalog order
    tracks: Vec<Track>,
    /// Liked track ids, kept for the session only
    likes: BTreeSet<u64>,
    storage: CatalogStorage,
    role: Role,
    /// Order used by the last in-place sort
    sort_order: SortOrder,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    warnings: Vec<String>,
}

impl CatalogStore {
    /// Load the catalog from storage for a session with `role`
    pub fn open(storage: CatalogStorage, role: Role) -> Self {
        let loaded = storage.load();
        info!(
            "Catalog opened with {} tracks ({:?}) for role {}",
            loaded.tracks.len(),
            loaded.source,
            role
        );

        Self {
            tracks: loaded.tracks,
            likes: BTreeSet::new(),
            storage,
            role,
            sort_order: SortOrder::Asc,
            observers: Vec::new(),
            next_subscription: 0,
            warnings: loaded.warning.into_iter().collect(),
        }
    }

    // ========== Reads ==========

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn likes(&self) -> &BTreeSet<u64> {
        &self.likes
    }

    pub fn get(&self, id: u64) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Distinct album names in first-seen catalog order
    pub fn albums(&self) -> Vec<String> {
        let mut albums: Vec<String> = Vec::new();
        for track in &self.tracks {
            if !albums.contains(&track.album) {
                albums.push(track.album.clone());
            }
        }
        albums
    }

    /// Titles of liked tracks in catalog order
    pub fn liked_titles(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter(|t| self.likes.contains(&t.id))
            .map(|t| t.title.clone())
            .collect()
    }

    /// Compute a view of the current state
    pub fn render(&self, options: &ViewOptions) -> RenderedView<'_> {
        QueryEngine::render(&self.tracks, &self.likes, options)
    }

    // ========== Observers ==========

    pub fn subscribe(&mut self, observer: impl FnMut(&CatalogEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false when `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    /// Drain pending persistence warnings
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    // ========== Mutations ==========

    /// Append a new track
    ///
    /// Text fields are trimmed and must not be blank. The id is one above the
    /// largest id in the catalog.
    pub fn add(
        &mut self,
        title: &str,
        artist: &str,
        album: &str,
        duration_secs: u32,
    ) -> Result<Track> {
        self.require_admin("add tracks")?;

        let title = required("title", title)?;
        let artist = required("artist", artist)?;
        let album = required("album", album)?;

        let id = self.next_id().ok_or(CatalogError::IdsExhausted)?;
        let track = Track::new(id, title, artist, album, duration_secs);
        self.tracks.push(track.clone());
        info!("Added track {} '{}'", track.id, track.title);

        self.persist();
        self.notify(CatalogEvent::TrackAdded(track.clone()));
        Ok(track)
    }

    /// Remove a track and forget its like
    ///
    /// Removing an id that is not in the catalog does nothing.
    pub fn delete(&mut self, id: u64) -> Result<Option<Track>> {
        self.require_admin("delete tracks")?;

        let Some(pos) = self.tracks.iter().position(|t| t.id == id) else {
            debug!("Delete of unknown track {} ignored", id);
            return Ok(None);
        };

        let track = self.tracks.remove(pos);
        let was_liked = self.likes.remove(&id);
        info!("Deleted track {} '{}'", track.id, track.title);

        self.persist();
        self.notify(CatalogEvent::TrackDeleted(track.clone()));
        if was_liked {
            self.notify(CatalogEvent::LikedChanged(self.liked_titles()));
        }
        Ok(Some(track))
    }

    /// Like or unlike a track
    pub fn toggle_like(&mut self, id: u64) -> Result<&BTreeSet<u64>> {
        if !self.contains(id) {
            return Err(CatalogError::NotFound { id });
        }

        if !self.likes.remove(&id) {
            self.likes.insert(id);
        }
        debug!("Like toggled for track {}, {} liked", id, self.likes.len());

        self.notify(CatalogEvent::LikedChanged(self.liked_titles()));
        Ok(&self.likes)
    }

    /// Reorder the catalog itself, not just a view
    pub fn sort_in_place(&mut self, sort_by: SortBy, order: SortOrder) -> &[Track] {
        SortLib::sort_tracks(&mut self.tracks, sort_by, order);
        self.sort_order = order;
        info!("Catalog sorted by {} {}", sort_by, order);

        self.persist();
        self.notify(CatalogEvent::Sorted { sort_by, order });
        &self.tracks
    }

    /// Sort in place in the opposite order of the previous sort
    pub fn toggle_sort(&mut self, sort_by: SortBy) -> SortOrder {
        let order = self.sort_order.flipped();
        self.sort_in_place(sort_by, order);
        order
    }

    // ========== Internals ==========

    /// Fails unless the session may edit the catalog
    pub fn require_admin(&self, action: &'static str) -> Result<()> {
        if self.role.is_admin() {
            Ok(())
        } else {
            warn!("Role {} may not {}", self.role, action);
            Err(CatalogError::PermissionDenied { action })
        }
    }

    /// `None` once the largest id is `u64::MAX`
    fn next_id(&self) -> Option<u64> {
        match self.tracks.iter().map(|t| t.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }

    fn persist(&mut self) {
        match self.storage.save(&self.tracks) {
            Ok(()) => debug!("Catalog persisted ({} tracks)", self.tracks.len()),
            Err(e) => {
                warn!("Failed to persist catalog: {}", e);
                let message = format!("Could not save library: {}", e);
                self.warnings.push(message.clone());
                self.notify(CatalogEvent::PersistenceWarning(message));
            }
        }
    }

    fn notify(&mut self, event: CatalogEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&event);
        }
    }
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::Validation { field });
    }
    Ok(trimmed.to_string())
}
