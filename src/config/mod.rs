//! Configuration module for Yapple
//!
//! Settings file handling and path management.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;
