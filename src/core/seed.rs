//! Built-in catalog used when nothing usable is stored

use crate::models::Track;

const SEED: &[(&str, &str, &str, u32)] = &[
    ("Blinding Lights", "The Weeknd", "After Hours", 200),
    ("Save Your Tears", "The Weeknd", "After Hours", 215),
    ("Levitating", "Dua Lipa", "Future Nostalgia", 203),
    ("Don't Start Now", "Dua Lipa", "Future Nostalgia", 183),
    ("Watermelon Sugar", "Harry Styles", "Fine Line", 174),
    ("Adore You", "Harry Styles", "Fine Line", 207),
    ("Bad Guy", "Billie Eilish", "When We All Fall Asleep, Where Do We Go?", 194),
    ("Bury a Friend", "Billie Eilish", "When We All Fall Asleep, Where Do We Go?", 193),
    ("Circles", "Post Malone", "Hollywood's Bleeding", 215),
    ("Sunflower", "Post Malone", "Hollywood's Bleeding", 158),
    ("Bohemian Rhapsody", "Queen", "A Night at the Opera", 355),
    ("Love of My Life", "Queen", "A Night at the Opera", 219),
    ("Hotel California", "Eagles", "Hotel California", 391),
    ("Stairway to Heaven", "Led Zeppelin", "Led Zeppelin IV", 482),
    ("Heroes", "David Bowie", "\"Heroes\"", 371),
];

/// The seed catalog, ids 1..=n in insertion order
pub fn seed_tracks() -> Vec<Track> {
    SEED.iter()
        .enumerate()
        .map(|(i, (title, artist, album, secs))| {
            Track::new(i as u64 + 1, *title, *artist, *album, *secs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_unique_and_ordered() {
        let tracks = seed_tracks();
        assert!(tracks.len() > 10);

        let ids: HashSet<u64> = tracks.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), tracks.len());
        assert!(tracks.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_seed_fields_present() {
        for track in seed_tracks() {
            assert!(!track.title.trim().is_empty());
            assert!(!track.artist.trim().is_empty());
            assert!(!track.album.trim().is_empty());
            assert!(track.duration_secs > 0);
        }
    }
}
