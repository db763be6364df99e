//! In-memory catalog store and its notifications

mod catalog_store;
mod error;
mod events;

pub use catalog_store::CatalogStore;
pub use events::{CatalogEvent, SubscriptionId};
