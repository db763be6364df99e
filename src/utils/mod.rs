//! Utility modules for Yapple

pub mod auth;
pub mod dates;
