//! View options chosen by the UI for each render

use serde::{Deserialize, Serialize};

use super::{FilterBy, GroupBy, SortBy, SortOrder};

/// The full set of options a render is computed from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptions {
    /// Free-text search, empty matches everything
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub group_by: GroupBy,
    #[serde(default)]
    pub filter_by: FilterBy,
    #[serde(default)]
    pub sort_by: SortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl ViewOptions {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_group(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    pub fn with_filter(mut self, filter_by: FilterBy) -> Self {
        self.filter_by = filter_by;
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ViewOptions::default();
        assert!(options.search_text.is_empty());
        assert_eq!(options.group_by, GroupBy::None);
        assert_eq!(options.filter_by, FilterBy::All);
        assert_eq!(options.sort_by, SortBy::Title);
        assert_eq!(options.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ViewOptions =
            serde_json::from_str(r#"{"groupBy":"artist","sortOrder":"desc"}"#).unwrap();
        assert_eq!(options.group_by, GroupBy::Artist);
        assert_eq!(options.sort_order, SortOrder::Desc);
        assert_eq!(options.filter_by, FilterBy::All);
    }
}
