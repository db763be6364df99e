//! Rendered views of the catalog
//!
//! A render runs search, then filter, then groups the result and sorts each
//! group (or the flat list). It borrows the catalog and never changes it.

use std::collections::BTreeSet;

use serde::Serialize;

use super::filters::apply_filter;
use super::grouping::{group_tracks, TrackGroup};
use super::search::SearchLib;
use super::sorting::SortLib;
use crate::models::{GroupBy, Track, ViewOptions};

/// Output of a render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "lowercase")]
pub enum RenderedView<'a> {
    Flat(Vec<&'a Track>),
    Grouped(Vec<TrackGroup<'a>>),
}

impl<'a> RenderedView<'a> {
    /// Number of tracks across all groups
    pub fn track_count(&self) -> usize {
        match self {
            RenderedView::Flat(tracks) => tracks.len(),
            RenderedView::Grouped(groups) => groups.iter().map(|g| g.tracks.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.track_count() == 0
    }

    /// Tracks in display order, groups concatenated
    pub fn tracks(&self) -> Vec<&'a Track> {
        match self {
            RenderedView::Flat(tracks) => tracks.clone(),
            RenderedView::Grouped(groups) => groups
                .iter()
                .flat_map(|g| g.tracks.iter().copied())
                .collect(),
        }
    }
}

/// Computes views from catalog state plus options
pub struct QueryEngine;

impl QueryEngine {
    pub fn render<'a>(
        catalog: &'a [Track],
        likes: &BTreeSet<u64>,
        options: &ViewOptions,
    ) -> RenderedView<'a> {
        let matched = SearchLib::search_tracks(catalog, &options.search_text);
        let mut filtered = apply_filter(matched, catalog, likes, options.filter_by);

        // group order comes from the filtered catalog order, sorting only
        // reorders tracks inside each group
        match options.group_by {
            GroupBy::None => {
                SortLib::sort_tracks(&mut filtered, options.sort_by, options.sort_order);
                RenderedView::Flat(filtered)
            }
            by => {
                let mut groups = group_tracks(filtered, by).unwrap_or_default();
                for group in groups.iter_mut() {
                    SortLib::sort_tracks(&mut group.tracks, options.sort_by, options.sort_order);
                }
                RenderedView::Grouped(groups)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::seed_tracks;
    use crate::models::{FilterBy, GroupBy, SortBy, SortOrder};

    fn ids(tracks: &[&Track]) -> Vec<u64> {
        tracks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn test_default_render_sorts_by_title() {
        let catalog = seed_tracks();
        let view = QueryEngine::render(&catalog, &BTreeSet::new(), &ViewOptions::default());

        let RenderedView::Flat(tracks) = &view else {
            panic!("expected flat view");
        };
        assert_eq!(tracks.len(), catalog.len());
        assert_eq!(tracks[0].title, "Adore You");
    }

    #[test]
    fn test_search_filter_sort_pipeline() {
        let catalog = seed_tracks();
        let likes: BTreeSet<u64> = [1, 2, 11].into_iter().collect();
        let options = ViewOptions::default()
            .with_search("the weeknd")
            .with_filter(FilterBy::Liked)
            .with_sort(SortBy::Duration, SortOrder::Desc);

        let view = QueryEngine::render(&catalog, &likes, &options);
        assert_eq!(ids(&view.tracks()), vec![2, 1]);
    }

    #[test]
    fn test_grouped_render() {
        let catalog = seed_tracks();
        let options = ViewOptions::default()
            .with_search("queen")
            .with_group(GroupBy::Album)
            .with_sort(SortBy::Title, SortOrder::Asc);

        let view = QueryEngine::render(&catalog, &BTreeSet::new(), &options);
        let RenderedView::Grouped(groups) = &view else {
            panic!("expected grouped view");
        };
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "A Night at the Opera");
        assert_eq!(ids(&groups[0].tracks), vec![11, 12]);
        assert_eq!(view.track_count(), 2);
    }

    #[test]
    fn test_group_order_follows_catalog_not_sort() {
        let catalog = vec![
            Track::new(1, "Zebra", "B", "First Album", 200),
            Track::new(2, "Apple", "A", "Second Album", 180),
            Track::new(3, "Mango", "B", "First Album", 120),
        ];
        let options = ViewOptions::default().with_group(GroupBy::Album);

        let view = QueryEngine::render(&catalog, &BTreeSet::new(), &options);
        let RenderedView::Grouped(groups) = &view else {
            panic!("expected grouped view");
        };
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["First Album", "Second Album"]);
        // sorted by title inside the group
        assert_eq!(ids(&groups[0].tracks), vec![3, 1]);

        let options = options.with_sort(SortBy::Duration, SortOrder::Desc);
        let view = QueryEngine::render(&catalog, &BTreeSet::new(), &options);
        let RenderedView::Grouped(groups) = &view else {
            panic!("expected grouped view");
        };
        assert_eq!(groups[0].key, "First Album");
        assert_eq!(ids(&groups[0].tracks), vec![1, 3]);
    }

    #[test]
    fn test_render_does_not_touch_catalog() {
        let catalog = seed_tracks();
        let before = catalog.clone();
        let options = ViewOptions::default().with_sort(SortBy::Duration, SortOrder::Desc);

        let _ = QueryEngine::render(&catalog, &BTreeSet::new(), &options);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let catalog = seed_tracks();
        let options = ViewOptions::default().with_search("no such song");
        assert!(QueryEngine::render(&catalog, &BTreeSet::new(), &options).is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let catalog = vec![Track::new(1, "A", "B", "C", 60)];
        let view = QueryEngine::render(&catalog, &BTreeSet::new(), &ViewOptions::default());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "flat");
        assert_eq!(json["items"][0]["title"], "A");
    }
}
