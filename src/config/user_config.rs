//! User configuration for Yapple
//!
//! Settings live in settings.json. Any field can be overridden for a single
//! run with a `YAPPLE_*` environment variable, e.g. `YAPPLE_LOG_LEVEL=debug`
//! or `YAPPLE_DEFAULT_FILTER_BY=liked`.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::Paths;
use crate::core::session::SESSION_KEY;
use crate::db::CATALOG_KEY;
use crate::models::ViewOptions;
use crate::utils::auth::generate_random_string;

static USER_CONFIG: OnceCell<Arc<RwLock<UserConfig>>> = OnceCell::new();

/// User configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Secret used to sign session tokens
    #[serde(default)]
    pub token_secret: String,

    /// How long a session token stays valid
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,

    /// Storage key of the catalog
    #[serde(default = "default_catalog_key")]
    pub catalog_key: String,

    /// Storage key of the saved session
    #[serde(default = "default_session_key")]
    pub session_key: String,

    /// View used when no options are given
    #[serde(default)]
    pub default_view: ViewOptions,

    /// Log filter used unless --debug is passed
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_hours: default_token_ttl_hours(),
            catalog_key: default_catalog_key(),
            session_key: default_session_key(),
            default_view: ViewOptions::default(),
            log_level: default_log_level(),
        }
    }
}

impl UserConfig {
    /// Load configuration from the settings file plus environment overrides
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        let mut config = Self::load_from(&paths.settings_path())?;

        let env = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix("YAPPLE"))
            .build()
            .context("Failed to read YAPPLE_* environment")?;
        config.apply_overrides(&env)?;

        Ok(config)
    }

    /// Load a settings file, creating it with defaults when missing
    ///
    /// A missing token secret is generated and written back.
    pub fn load_from(settings_path: &Path) -> Result<Self> {
        let mut config = if settings_path.exists() {
            let content =
                std::fs::read_to_string(settings_path).context("Failed to read settings file")?;
            serde_json::from_str(&content).context("Failed to parse settings file")?
        } else {
            Self::default()
        };

        if config.token_secret.is_empty() || !settings_path.exists() {
            if config.token_secret.is_empty() {
                config.token_secret = generate_random_string(48);
            }
            config.save_to(settings_path)?;
        }

        Ok(config)
    }

    fn save_to(&self, settings_path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(settings_path, content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Get the global config instance
    pub fn global() -> Arc<RwLock<UserConfig>> {
        USER_CONFIG
            .get_or_init(|| {
                let config = UserConfig::load().unwrap_or_else(|e| {
                    tracing::warn!("Falling back to default settings: {:#}", e);
                    UserConfig::default()
                });
                Arc::new(RwLock::new(config))
            })
            .clone()
    }

    /// Overlay values from a layered source, keys in snake_case
    pub fn apply_overrides(&mut self, source: &::config::Config) -> Result<()> {
        if let Some(v) = get_string(source, "token_secret") {
            self.token_secret = v;
        }
        if let Some(v) = get_string(source, "token_ttl_hours") {
            self.token_ttl_hours = v
                .parse()
                .with_context(|| format!("Invalid token_ttl_hours '{}'", v))?;
        }
        if let Some(v) = get_string(source, "catalog_key") {
            self.catalog_key = v;
        }
        if let Some(v) = get_string(source, "session_key") {
            self.session_key = v;
        }
        if let Some(v) = get_string(source, "log_level") {
            self.log_level = v;
        }

        let view = &mut self.default_view;
        override_parsed(source, "default_group_by", &mut view.group_by)?;
        override_parsed(source, "default_filter_by", &mut view.filter_by)?;
        override_parsed(source, "default_sort_by", &mut view.sort_by)?;
        override_parsed(source, "default_sort_order", &mut view.sort_order)?;

        Ok(())
    }

    /// Token lifetime in seconds
    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_hours.saturating_mul(3600)
    }
}

fn get_string(source: &::config::Config, key: &str) -> Option<String> {
    source
        .get_string(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn override_parsed<T>(source: &::config::Config, key: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(v) = get_string(source, key) {
        *target = v.parse().with_context(|| format!("Invalid {}", key))?;
    }
    Ok(())
}

// Default value functions for serde

fn default_token_ttl_hours() -> u64 {
    24
}

fn default_catalog_key() -> String {
    CATALOG_KEY.to_string()
}

fn default_session_key() -> String {
    SESSION_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
