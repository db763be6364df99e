//! Storage module for Yapple
//!
//! A key-value store holds the serialized catalog and the saved session.
//! `FileStore` keeps one JSON file per key; `MemoryStore` backs tests.

mod catalog_storage;
pub mod codec;
mod storage;

pub use catalog_storage::{CatalogStorage, CATALOG_KEY};
pub use storage::{FileStore, KeyValueStore, StorageError};

#[cfg(test)]
pub use storage::MemoryStore;
