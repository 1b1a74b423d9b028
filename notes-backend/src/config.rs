use std::env;
use std::path::Path;
use std::time::Duration;

use crate::db::PoolOptions;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const DB_POOL_SIZE: &str = "DB_POOL_SIZE";
    /// Seconds to wait for a pooled connection or a locked database.
    pub const DB_TIMEOUT_SECS: &str = "DB_TIMEOUT_SECS";
    /// Comma-separated CORS allow-list. A lone `*` allows any origin.
    pub const ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
    pub const FRONTEND_DIST: &str = "FRONTEND_DIST";
    /// Set to "1" or "true" to skip static file serving (separate dev server).
    pub const DISABLE_FRONTEND: &str = "DISABLE_FRONTEND";
    /// Base URL of the notes endpoint, used by `notes-cli`.
    pub const NOTES_API_URL: &str = "NOTES_API_URL";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3000;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const DATABASE_URL: &str = "./.db/notes.db";
    pub const DB_POOL_SIZE: u32 = 8;
    pub const DB_TIMEOUT_SECS: u64 = 5;
    pub const ALLOWED_ORIGINS: &[&str] = &["http://localhost:5173", "http://localhost:3000"];
    pub const FRONTEND_DIST_CANDIDATES: &[&str] = &["./frontend/dist", "../frontend/dist"];
    pub const NOTES_API_URL: &str = "http://localhost:3000/api/notes";
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if origins.iter().any(|o| o == "*") {
            AllowedOrigins::Any
        } else {
            AllowedOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub database_url: String,
    pub db_pool_size: u32,
    pub db_timeout: Duration,
    pub allowed_origins: AllowedOrigins,
    /// Directory holding the built SPA; `None` disables static serving.
    pub frontend_dist: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, env_vars::PORT, defaults::PORT)?;
        let db_pool_size = parse_or(&lookup, env_vars::DB_POOL_SIZE, defaults::DB_POOL_SIZE)?;
        let db_timeout_secs =
            parse_or(&lookup, env_vars::DB_TIMEOUT_SECS, defaults::DB_TIMEOUT_SECS)?;

        let allowed_origins = match lookup(env_vars::ALLOWED_ORIGINS) {
            Some(raw) => AllowedOrigins::parse(&raw),
            None => AllowedOrigins::List(
                defaults::ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            ),
        };

        let frontend_disabled = lookup(env_vars::DISABLE_FRONTEND)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let frontend_dist = if frontend_disabled {
            None
        } else {
            match lookup(env_vars::FRONTEND_DIST) {
                Some(dir) => Some(dir),
                None => defaults::FRONTEND_DIST_CANDIDATES
                    .iter()
                    .find(|p| Path::new(p).exists())
                    .map(|p| p.to_string()),
            }
        };

        Ok(Self {
            port,
            bind_address: lookup(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            database_url: lookup(env_vars::DATABASE_URL)
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            db_pool_size,
            db_timeout: Duration::from_secs(db_timeout_secs),
            allowed_origins,
            frontend_dist,
        })
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.db_pool_size,
            timeout: self.db_timeout,
        }
    }
}

/// Base URL the CLI client talks to
pub fn notes_api_url() -> String {
    env::var(env_vars::NOTES_API_URL)
        .map(|u| u.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| defaults::NOTES_API_URL.to_string())
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        None => Ok(default),
    }
}
