//! Application settings.
//!
//! Settings come from an optional `config.toml`; `DATABASE_URL` and `BIND_ADDR`
//! in the environment (or `.env`) take precedence over the file.
//!
//! ```toml
//! database_url = "sqlite://order_desk.sqlite?mode=rwc"
//! bind_addr = "127.0.0.1:8000"
//!
//! [[users]]
//! username = "cashier"
//! first_name = "Maria"
//! last_name = "Santos"
//!
//! [[items]]
//! name = "Pandesal"
//! description = "Bread roll"
//! price = "2.50"
//! code = "PDS"
//! ```

use crate::config::database::DEFAULT_DATABASE_URL;
use crate::errors::{Error, Result};
use sea_orm::prelude::Decimal;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Default listen address for the HTTP server.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// `SeaORM` connection string
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Staff accounts to create on startup
    #[serde(default)]
    pub users: Vec<UserSeed>,
    /// Catalog items to create on startup
    #[serde(default)]
    pub items: Vec<ItemSeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            bind_addr: default_bind_addr(),
            users: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// A staff account listed in config.toml
#[derive(Debug, Deserialize, Clone)]
pub struct UserSeed {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A catalog item listed in config.toml; `code` identifies it across restarts
#[derive(Debug, Deserialize, Clone)]
pub struct ItemSeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub code: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

const fn default_true() -> bool {
    true
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a field has the wrong type.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `path`, falling back to defaults if the file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let settings = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read config file {}: {e}", path.display()),
        })?;
        info!("Loaded settings from {}", path.display());
        parse_settings(&contents)?
    } else {
        warn!("{} not found, using default settings", path.display());
        Settings::default()
    };
    Ok(apply_env_overrides(settings))
}

/// Loads settings from `./config.toml`.
pub fn load_default_settings() -> Result<Settings> {
    load_settings("config.toml")
}

fn apply_env_overrides(mut settings: Settings) -> Settings {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        settings.database_url = url;
    }
    if let Ok(addr) = std::env::var("BIND_ADDR") {
        settings.bind_addr = addr;
    }
    settings
}
