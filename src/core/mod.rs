//! Core library functions for Yapple

pub mod filters;
pub mod grouping;
pub mod query;
pub mod search;
pub mod seed;
pub mod session;
pub mod sorting;
