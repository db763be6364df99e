//! Data models for Yapple
//!
//! Tracks, view options and the session types the catalog works with.

mod enums;
mod track;
mod user;
mod view_options;

pub use enums::{FilterBy, GroupBy, SortBy, SortOrder};
pub use track::Track;
pub use user::{Credentials, Role, Session};
pub use view_options::ViewOptions;
