//! Command handlers

use anyhow::{Context as _, Result};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

use super::render::{track_line, view_text};
use super::{shell, Command, ViewArgs};
use crate::config::{Paths, UserConfig};
use crate::core::session::{LocalSessionProvider, SessionProvider, SessionStore};
use crate::db::{CatalogStorage, FileStore, KeyValueStore};
use crate::models::{Credentials, Role, Session, SortBy, SortOrder};
use crate::stores::CatalogStore;
use crate::utils::auth::AuthError;
use crate::utils::dates::parse_duration;

/// Everything a command needs from configuration
struct Context {
    config: UserConfig,
    storage_dir: PathBuf,
}

impl Context {
    fn open_store(&self) -> Result<Box<dyn KeyValueStore>> {
        let store = FileStore::open(&self.storage_dir)
            .with_context(|| format!("Failed to open storage at {:?}", self.storage_dir))?;
        debug!("Using storage at {:?}", store.dir());
        Ok(Box::new(store))
    }

    fn sessions(&self) -> Result<SessionStore> {
        Ok(SessionStore::new(
            self.open_store()?,
            self.config.session_key.clone(),
        ))
    }

    fn provider(&self) -> LocalSessionProvider {
        LocalSessionProvider::new(self.config.token_secret.clone(), self.config.token_ttl_secs())
    }

    /// The saved session, if its token is still good
    fn session(&self) -> Result<Session> {
        let session = self.sessions()?.load().ok_or(AuthError::NotAuthenticated)?;
        self.provider().validate(&session)?;
        debug!("Restored session for {} ({})", session.email, session.role);
        Ok(session)
    }

    fn catalog(&self, role: Role) -> Result<CatalogStore> {
        let storage = CatalogStorage::new(self.open_store()?, self.config.catalog_key.clone());
        Ok(CatalogStore::open(storage, role))
    }

    fn catalog_for_session(&self) -> Result<CatalogStore> {
        let session = self.session()?;
        self.catalog(session.role)
    }
}

/// Dispatch a parsed command
pub fn run(command: Command, config: &UserConfig, paths: &Paths) -> Result<()> {
    let ctx = Context {
        config: config.clone(),
        storage_dir: paths.storage_dir(),
    };

    match command {
        Command::Login {
            email,
            password,
            role,
        } => {
            let credentials = Credentials {
                email,
                password,
                role,
            };
            login(&ctx, credentials)
        }
        Command::Logout => logout(&ctx),
        Command::Whoami => whoami(&ctx),
        Command::List(view) => list(&ctx, &view),
        Command::Albums => albums(&ctx),
        Command::Add {
            title,
            artist,
            album,
            duration,
        } => add(&ctx, &title, &artist, &album, &duration),
        Command::Delete { id } => delete(&ctx, id),
        Command::Sort { by, order } => sort(&ctx, by, order),
        Command::Shell => {
            let session = ctx.session()?;
            let mut catalog = ctx.catalog(session.role)?;
            shell::run(&mut catalog, &session, ctx.config.default_view.clone())
        }
    }
}

// ========== Session ==========

fn login(ctx: &Context, credentials: Credentials) -> Result<()> {
    let session = ctx.provider().login(&credentials)?;
    ctx.sessions()?.save(&session)?;
    println!("Logged in as {} ({})", session.email, session.role);
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    ctx.sessions()?.clear()?;
    println!("Logged out");
    Ok(())
}

fn whoami(ctx: &Context) -> Result<()> {
    let Some(session) = ctx.sessions()?.load() else {
        println!("Not logged in");
        return Ok(());
    };

    match ctx.provider().validate(&session) {
        Ok(role) => println!("{} ({})", session.email, role),
        Err(e) => {
            info!("Saved session rejected: {}", e);
            println!("Session for {} is no longer valid, log in again", session.email);
        }
    }
    Ok(())
}

// ========== Catalog ==========

fn list(ctx: &Context, view: &ViewArgs) -> Result<()> {
    let mut catalog = ctx.catalog_for_session()?;

    let wanted: BTreeSet<u64> = view.likes.iter().copied().collect();
    for id in wanted {
        if !catalog.likes().contains(&id) {
            catalog.toggle_like(id)?;
        }
    }

    let options = view.options(&ctx.config.default_view);
    debug!("Rendering view {:?}", options);
    let rendered = catalog.render(&options);

    if view.json {
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        println!("{}", view_text(&rendered, catalog.likes()));
    }

    print_warnings(&mut catalog);
    Ok(())
}

fn albums(ctx: &Context) -> Result<()> {
    let mut catalog = ctx.catalog_for_session()?;
    if catalog.is_empty() {
        println!("Library is empty");
    }
    for album in catalog.albums() {
        println!("{}", album);
    }
    print_warnings(&mut catalog);
    Ok(())
}

fn add(ctx: &Context, title: &str, artist: &str, album: &str, duration: &str) -> Result<()> {
    let mut catalog = ctx.catalog_for_session()?;
    catalog.require_admin("add tracks")?;
    let duration_secs = parse_duration(duration)?;

    let track = catalog.add(title, artist, album, duration_secs)?;
    println!(
        "Added #{} \"{}\" by {} ({})",
        track.id,
        track.title,
        track.artist,
        track.duration()
    );

    print_warnings(&mut catalog);
    Ok(())
}

fn delete(ctx: &Context, id: u64) -> Result<()> {
    let mut catalog = ctx.catalog_for_session()?;

    match catalog.delete(id)? {
        Some(track) => println!("Removed #{} \"{}\"", track.id, track.title),
        None => println!("No track with id {}", id),
    }

    print_warnings(&mut catalog);
    Ok(())
}

fn sort(ctx: &Context, by: SortBy, order: SortOrder) -> Result<()> {
    let mut catalog = ctx.catalog_for_session()?;
    catalog.sort_in_place(by, order);

    for track in catalog.tracks() {
        println!("{}", track_line(track, false));
    }
    println!("Sorted {} tracks by {} ({})", catalog.len(), by, order);

    print_warnings(&mut catalog);
    Ok(())
}

fn print_warnings(catalog: &mut CatalogStore) {
    for warning in catalog.take_warnings() {
        eprintln!("warning: {}", warning);
    }
}
