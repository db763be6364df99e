//! Partition a view into album or artist groups

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{GroupBy, Track};

/// One group of a grouped view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackGroup<'a> {
    pub key: String,
    pub tracks: Vec<&'a Track>,
}

/// Split `tracks` by album or artist
///
/// Groups appear in the order their key is first seen and keep the input
/// order inside. Returns `None` for `GroupBy::None`.
pub fn group_tracks<'a>(tracks: Vec<&'a Track>, by: GroupBy) -> Option<Vec<TrackGroup<'a>>> {
    if by == GroupBy::None {
        return None;
    }

    let mut groups: Vec<TrackGroup<'a>> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for track in tracks {
        let key: &'a str = match by {
            GroupBy::Artist => &track.artist,
            _ => &track.album,
        };
        match positions.get(key) {
            Some(&pos) => groups[pos].tracks.push(track),
            None => {
                positions.insert(key, groups.len());
                groups.push(TrackGroup {
                    key: key.to_string(),
                    tracks: vec![track],
                });
            }
        }
    }

    Some(groups)
}
