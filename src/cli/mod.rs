//! Command-line front end
//!
//! Stands in for the UI shell: it logs in through the session provider,
//! opens the catalog for the session's role and renders views as text.

mod commands;
mod render;
mod shell;

pub use commands::run;

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{FilterBy, GroupBy, Role, SortBy, SortOrder, ViewOptions};

/// Yapple - song catalog with search, filters and role-gated editing
#[derive(Parser, Debug)]
#[command(name = "yapple")]
#[command(version)]
#[command(about = "Song catalog with search, filters and role-gated editing")]
pub struct Args {
    /// Path to config directory
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start a session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// admin or user
        #[arg(long, default_value = "user", value_parser = parse_role)]
        role: Role,
    },
    /// End the saved session
    Logout,
    /// Show the saved session
    Whoami,
    /// Render the catalog
    List(ViewArgs),
    /// List album names in catalog order
    Albums,
    /// Add a track (admin only)
    Add {
        title: String,
        artist: String,
        album: String,
        /// Duration as M:SS
        duration: String,
    },
    /// Delete a track by id (admin only)
    Delete { id: u64 },
    /// Reorder the stored catalog
    Sort {
        #[arg(long, default_value = "title")]
        by: SortBy,
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },
    /// Interactive session, likes last until exit
    Shell,
}

#[derive(ClapArgs, Debug, Default)]
pub struct ViewArgs {
    /// Search title, artist and album
    #[arg(short, long)]
    pub search: Option<String>,

    /// none, album or artist
    #[arg(long)]
    pub group: Option<GroupBy>,

    /// all, liked, recent, longest or shortest
    #[arg(long)]
    pub filter: Option<FilterBy>,

    /// title, artist, album or duration
    #[arg(long)]
    pub sort: Option<SortBy>,

    /// asc or desc
    #[arg(long)]
    pub order: Option<SortOrder>,

    /// Treat these track ids as liked for this render
    #[arg(long = "like")]
    pub likes: Vec<u64>,

    /// Print the view as JSON
    #[arg(long)]
    pub json: bool,
}

impl ViewArgs {
    /// Options given on the command line over the configured defaults
    pub fn options(&self, defaults: &ViewOptions) -> ViewOptions {
        let search = self
            .search
            .clone()
            .unwrap_or_else(|| defaults.search_text.clone());

        ViewOptions::default()
            .with_search(search)
            .with_group(self.group.unwrap_or(defaults.group_by))
            .with_filter(self.filter.unwrap_or(defaults.filter_by))
            .with_sort(
                self.sort.unwrap_or(defaults.sort_by),
                self.order.unwrap_or(defaults.sort_order),
            )
    }
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(s).ok_or_else(|| format!("unknown role '{}' (expected admin or user)", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_list_options() {
        let args = Args::parse_from([
            "yapple", "list", "--search", "queen", "--group", "album", "--filter", "liked",
            "--like", "3", "--like", "7",
        ]);

        let Command::List(view) = args.command else {
            panic!("expected list");
        };
        let options = view.options(&ViewOptions::default());
        assert_eq!(options.search_text, "queen");
        assert_eq!(options.group_by, GroupBy::Album);
        assert_eq!(options.filter_by, FilterBy::Liked);
        assert_eq!(options.sort_by, SortBy::Title);
        assert_eq!(view.likes, vec![3, 7]);
    }

    #[test]
    fn test_defaults_fill_missing_options() {
        let defaults = ViewOptions::default().with_sort(SortBy::Duration, SortOrder::Desc);
        let options = ViewArgs::default().options(&defaults);
        assert_eq!(options, defaults);
    }

    #[test]
    fn test_parse_login_role() {
        let args = Args::parse_from([
            "yapple", "login", "--email", "a@b.io", "--password", "pass", "--role", "admin",
        ]);
        assert!(matches!(args.command, Command::Login { role: Role::Admin, .. }));

        assert!(Args::try_parse_from([
            "yapple", "login", "--email", "a@b.io", "--password", "pass", "--role", "root",
        ])
        .is_err());
    }

    #[test]
    fn test_bad_enum_value_is_rejected() {
        assert!(Args::try_parse_from(["yapple", "list", "--filter", "newest"]).is_err());
    }
}
