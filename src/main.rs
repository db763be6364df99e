//! Yapple - a song catalog with search, filters and role-gated editing
//!
//! The catalog lives in a small key-value store on disk. Anyone with a
//! session can browse, like and reorder tracks; only admins add or delete.

mod cli;
mod config;
mod core;
mod db;
mod models;
mod stores;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Initialize paths
    let paths = config::Paths::init(args.config.clone())?;
    let user_config = config::UserConfig::global().read().clone();

    // --debug wins over the configured level
    let log_level = if args.debug {
        "debug"
    } else {
        user_config.log_level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("Config directory: {:?}", paths.config_dir());

    cli::run(args.command, &user_config, &paths)
}
