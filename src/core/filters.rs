//! View filters
//!
//! Thresholds are always computed over the whole catalog, never over the
//! already searched subset.

use std::collections::BTreeSet;

use crate::models::{FilterBy, Track};

/// How many of the highest ids count as recent
pub const RECENT_WINDOW: u64 = 10;

/// Keep the tracks of `candidates` that pass `filter`
pub fn apply_filter<'a>(
    candidates: Vec<&'a Track>,
    catalog: &[Track],
    likes: &BTreeSet<u64>,
    filter: FilterBy,
) -> Vec<&'a Track> {
    match filter {
        FilterBy::All => candidates,
        FilterBy::Liked => candidates
            .into_iter()
            .filter(|t| likes.contains(&t.id))
            .collect(),
        FilterBy::Recent => match recent_threshold(catalog) {
            Some(threshold) => candidates
                .into_iter()
                .filter(|t| t.id > threshold)
                .collect(),
            None => candidates,
        },
        FilterBy::Longest => match duration_quartiles(catalog) {
            Some((_, long)) => candidates
                .into_iter()
                .filter(|t| t.duration_secs >= long)
                .collect(),
            None => Vec::new(),
        },
        FilterBy::Shortest => match duration_quartiles(catalog) {
            Some((short, _)) => candidates
                .into_iter()
                .filter(|t| t.duration_secs <= short)
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Id above which a track counts as recent
///
/// `None` while the catalog holds no more than `RECENT_WINDOW` tracks, in
/// which case everything is recent. This is an id heuristic: after deletions
/// it can keep fewer than `RECENT_WINDOW` tracks.
pub fn recent_threshold(catalog: &[Track]) -> Option<u64> {
    if catalog.len() as u64 <= RECENT_WINDOW {
        return None;
    }

    let max_id = catalog.iter().map(|t| t.id).max()?;
    Some(max_id.saturating_sub(RECENT_WINDOW))
}

/// (25th, 75th) percentile durations of the whole catalog
///
/// Picked by index `floor(n * 0.25)` and `floor(n * 0.75)` into the ascending
/// duration list.
pub fn duration_quartiles(catalog: &[Track]) -> Option<(u32, u32)> {
    if catalog.is_empty() {
        return None;
    }

    let mut durations: Vec<u32> = catalog.iter().map(|t| t.duration_secs).collect();
    durations.sort_unstable();

    let n = durations.len();
    Some((durations[n / 4], durations[n * 3 / 4]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(tracks: &[&Track]) -> Vec<u64> {
        tracks.iter().map(|t| t.id).collect()
    }

    fn numbered(n: u64) -> Vec<Track> {
        (1..=n)
            .map(|i| Track::new(i, format!("Song {}", i), "A", "B", 100 + i as u32))
            .collect()
    }

    #[test]
    fn test_shortest_quartile_example() {
        let catalog = vec![
            Track::new(1, "a", "x", "y", 225),
            Track::new(2, "b", "x", "y", 130),
            Track::new(3, "c", "x", "y", 240),
            Track::new(4, "d", "x", "y", 90),
        ];

        assert_eq!(duration_quartiles(&catalog), Some((130, 240)));

        let kept = apply_filter(
            catalog.iter().collect(),
            &catalog,
            &BTreeSet::new(),
            FilterBy::Shortest,
        );
        assert_eq!(ids(&kept), vec![2, 4]);

        let kept = apply_filter(
            catalog.iter().collect(),
            &catalog,
            &BTreeSet::new(),
            FilterBy::Longest,
        );
        assert_eq!(ids(&kept), vec![3]);
    }

    #[test]
    fn test_quartiles_use_full_catalog() {
        let catalog = vec![
            Track::new(1, "short", "x", "y", 60),
            Track::new(2, "mid", "x", "y", 180),
            Track::new(3, "mid too", "x", "y", 200),
            Track::new(4, "long", "x", "y", 400),
        ];

        // search narrowed to the two middle tracks; thresholds still 180 / 400
        let candidates: Vec<&Track> = catalog[1..3].iter().collect();
        let kept = apply_filter(candidates, &catalog, &BTreeSet::new(), FilterBy::Shortest);
        assert_eq!(ids(&kept), vec![2]);
    }

    #[test]
    fn test_liked() {
        let catalog = numbered(5);
        let likes: BTreeSet<u64> = [2, 5].into_iter().collect();
        let kept = apply_filter(catalog.iter().collect(), &catalog, &likes, FilterBy::Liked);
        assert_eq!(ids(&kept), vec![2, 5]);
    }

    #[test]
    fn test_recent_small_catalog_is_passthrough() {
        let catalog = numbered(10);
        assert_eq!(recent_threshold(&catalog), None);

        let kept = apply_filter(
            catalog.iter().collect(),
            &catalog,
            &BTreeSet::new(),
            FilterBy::Recent,
        );
        assert_eq!(kept.len(), 10);
    }

    #[test]
    fn test_recent_keeps_ids_above_threshold() {
        let catalog = numbered(14);
        assert_eq!(recent_threshold(&catalog), Some(4));

        let kept = apply_filter(
            catalog.iter().collect(),
            &catalog,
            &BTreeSet::new(),
            FilterBy::Recent,
        );
        assert_eq!(ids(&kept), (5..=14).collect::<Vec<u64>>());
    }

    #[test]
    fn test_recent_is_id_heuristic_after_gaps() {
        let mut catalog = numbered(11);
        catalog.push(Track::new(100, "late", "A", "B", 10));

        // only id 100 clears 100 - 10
        let kept = apply_filter(
            catalog.iter().collect(),
            &catalog,
            &BTreeSet::new(),
            FilterBy::Recent,
        );
        assert_eq!(ids(&kept), vec![100]);
    }

    #[test]
    fn test_empty_catalog() {
        assert_eq!(duration_quartiles(&[]), None);
        let kept = apply_filter(Vec::new(), &[], &BTreeSet::new(), FilterBy::Longest);
        assert!(kept.is_empty());
    }
}
