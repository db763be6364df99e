//! Enums for the catalog view options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a view option name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {})", .expected.join(", "))]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static [&'static str],
}

macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                        expected: &[$($text),+],
                    }),
                }
            }
        }
    };
}

/// How a view partitions tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Album,
    Artist,
}

wire_enum!(GroupBy, "group", {
    None => "none",
    Album => "album",
    Artist => "artist",
});

/// Which subset of tracks a view keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterBy {
    #[default]
    All,
    Liked,
    Recent,
    Longest,
    Shortest,
}

wire_enum!(FilterBy, "filter", {
    All => "all",
    Liked => "liked",
    Recent => "recent",
    Longest => "longest",
    Shortest => "shortest",
});

/// Sort field for tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Title,
    Artist,
    Album,
    Duration,
}

wire_enum!(SortBy, "sort field", {
    Title => "title",
    Artist => "artist",
    Album => "album",
    Duration => "duration",
});

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

wire_enum!(SortOrder, "sort order", {
    Asc => "asc",
    Desc => "desc",
});

impl SortOrder {
    /// The other direction
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("album".parse::<GroupBy>(), Ok(GroupBy::Album));
        assert_eq!(" Shortest ".parse::<FilterBy>(), Ok(FilterBy::Shortest));
        assert_eq!("duration".parse::<SortBy>(), Ok(SortBy::Duration));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "genre".parse::<GroupBy>().unwrap_err();
        assert_eq!(err.kind, "group");
        assert!(err.to_string().contains("none, album, artist"));
    }

    #[test]
    fn test_display_matches_wire_name() {
        for filter in [
            FilterBy::All,
            FilterBy::Liked,
            FilterBy::Recent,
            FilterBy::Longest,
            FilterBy::Shortest,
        ] {
            assert_eq!(filter.to_string().parse::<FilterBy>(), Ok(filter));
        }
    }

    #[test]
    fn test_flipped() {
        assert_eq!(SortOrder::Asc.flipped(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.flipped(), SortOrder::Asc);
    }
}
