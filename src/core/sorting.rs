//! Sorting utilities for tracks

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::models::{SortBy, SortOrder, Track};

/// Sorting library
pub struct SortLib;

impl SortLib {
    /// Stable sort by field
    ///
    /// Descending reverses the comparator, so tracks with equal keys keep
    /// their relative order in both directions.
    pub fn sort_tracks<T: Borrow<Track>>(tracks: &mut [T], by: SortBy, order: SortOrder) {
        tracks.sort_by(|a, b| {
            let cmp = Self::compare(a.borrow(), b.borrow(), by);
            match order {
                SortOrder::Asc => cmp,
                SortOrder::Desc => cmp.reverse(),
            }
        });
    }

    /// Ascending comparison on one field
    pub fn compare(a: &Track, b: &Track, by: SortBy) -> Ordering {
        match by {
            SortBy::Title => collate(&a.title, &b.title),
            SortBy::Artist => collate(&a.artist, &b.artist),
            SortBy::Album => collate(&a.album, &b.album),
            SortBy::Duration => a.duration_secs.cmp(&b.duration_secs),
        }
    }
}

/// Locale-style string ordering
///
/// Letters compare by base form first (accents and case ignored), then by
/// accent, then by case with lowercase before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_form(a)
        .cmp(&base_form(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn base_form(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.title.as_str()).collect()
    }

    fn sample() -> Vec<Track> {
        vec![
            Track::new(1, "beta", "Zed", "Alpha", 200),
            Track::new(2, "Alpha", "amy", "beta", 90),
            Track::new(3, "Étude", "Bob", "alpha", 200),
            Track::new(4, "delta", "Émile", "Gamma", 30),
        ]
    }

    #[test]
    fn test_collate_ignores_case_and_accents_first() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Étude", "eve"), Ordering::Less);
        assert_eq!(collate("etude", "étude"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_title() {
        let mut tracks = sample();
        SortLib::sort_tracks(&mut tracks, SortBy::Title, SortOrder::Asc);
        assert_eq!(titles(&tracks), vec!["Alpha", "beta", "delta", "Étude"]);
    }

    #[test]
    fn test_title_desc_is_reverse_of_asc() {
        let mut asc = sample();
        SortLib::sort_tracks(&mut asc, SortBy::Title, SortOrder::Asc);
        let mut desc = sample();
        SortLib::sort_tracks(&mut desc, SortBy::Title, SortOrder::Desc);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_sort_by_artist_uses_collation() {
        let mut tracks = sample();
        SortLib::sort_tracks(&mut tracks, SortBy::Artist, SortOrder::Asc);
        let artists: Vec<&str> = tracks.iter().map(|t| t.artist.as_str()).collect();
        assert_eq!(artists, vec!["amy", "Bob", "Émile", "Zed"]);
    }

    #[test]
    fn test_equal_keys_keep_relative_order_both_ways() {
        let mut asc = sample();
        SortLib::sort_tracks(&mut asc, SortBy::Duration, SortOrder::Asc);
        let ids: Vec<u64> = asc.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);

        let mut desc = sample();
        SortLib::sort_tracks(&mut desc, SortBy::Duration, SortOrder::Desc);
        let ids: Vec<u64> = desc.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_sort_borrowed_tracks() {
        let tracks = sample();
        let mut view: Vec<&Track> = tracks.iter().collect();
        SortLib::sort_tracks(&mut view, SortBy::Album, SortOrder::Asc);

        let ids: Vec<u64> = view.iter().map(|t| t.id).collect();
        // "alpha" and "Alpha" share a base form, lowercase first
        assert_eq!(ids, vec![3, 1, 2, 4]);
        // the owned list is untouched
        assert_eq!(tracks[0].id, 1);
    }
}
