//! Serialized catalog layout
//!
//! The catalog is stored as a JSON array of records with the duration kept as
//! an "M:SS" string. Decoding is per record: a record that fails to decode is
//! dropped and counted, the rest of the list still loads.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::Track;
use crate::utils::dates::{format_duration, parse_duration};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed catalog json: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk shape of a track
#[derive(Debug, Serialize, Deserialize)]
struct StoredTrack {
    id: u64,
    title: String,
    artist: String,
    album: String,
    duration: String,
}

impl From<&Track> for StoredTrack {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id,
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            duration: format_duration(track.duration_secs),
        }
    }
}

/// Result of decoding a stored catalog
#[derive(Debug, Default)]
pub struct Decoded {
    pub tracks: Vec<Track>,
    /// Records skipped because they were malformed or reused an id
    pub dropped: usize,
}

/// Serialize tracks in catalog order
pub fn encode(tracks: &[Track]) -> Result<Vec<u8>, CodecError> {
    let stored: Vec<StoredTrack> = tracks.iter().map(StoredTrack::from).collect();
    Ok(serde_json::to_vec(&stored)?)
}

/// Deserialize a stored catalog
///
/// Fails only when the payload is not a JSON array at all.
pub fn decode(bytes: &[u8]) -> Result<Decoded, CodecError> {
    let records: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut decoded = Decoded::default();
    let mut seen_ids = HashSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let stored: StoredTrack = match serde_json::from_value(record) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Dropping catalog record {}: {}", index, e);
                decoded.dropped += 1;
                continue;
            }
        };

        let duration_secs = match parse_duration(&stored.duration) {
            Ok(secs) => secs,
            Err(e) => {
                warn!("Dropping catalog record {} ({}): {}", index, stored.title, e);
                decoded.dropped += 1;
                continue;
            }
        };

        if !seen_ids.insert(stored.id) {
            warn!("Dropping catalog record {}: duplicate id {}", index, stored.id);
            decoded.dropped += 1;
            continue;
        }

        decoded.tracks.push(Track {
            id: stored.id,
            title: stored.title,
            artist: stored.artist,
            album: stored.album,
            duration_secs,
        });
    }

    Ok(decoded)
}
