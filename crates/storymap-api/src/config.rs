//! Server configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use storymap_narrative::domain::path::SearchBounds;

use crate::error::AppError;

/// Where event records are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// A PostgreSQL database.
    Postgres {
        /// Connection string.
        database_url: String,
        /// Pool size.
        max_connections: u32,
    },
    /// A JSON file with an array of event records.
    JsonFile(PathBuf),
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Event record source.
    pub store: StoreConfig,
    /// Length bounds for constrained story generation.
    pub bounds: SearchBounds,
    /// Default number of start options offered.
    pub start_options_limit: usize,
    /// OTLP collector endpoint; tracing export is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is missing or invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if neither `DATABASE_URL` nor
    /// `STORY_EVENTS_FILE` is set, or if a numeric value does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match (lookup("DATABASE_URL"), lookup("STORY_EVENTS_FILE")) {
            (Some(database_url), _) => StoreConfig::Postgres {
                database_url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            },
            (None, Some(path)) => StoreConfig::JsonFile(PathBuf::from(path)),
            (None, None) => {
                return Err(AppError::Config(
                    "DATABASE_URL or STORY_EVENTS_FILE environment variable must be set".into(),
                ));
            }
        };

        let min_len = parse_or(&lookup, "STORY_MIN_LENGTH", SearchBounds::DEFAULT_MIN_LEN)?;
        let max_len = parse_or(&lookup, "STORY_MAX_LENGTH", SearchBounds::DEFAULT_MAX_LEN)?;
        let bounds = SearchBounds::new(min_len, max_len)
            .map_err(|e| AppError::Config(format!("invalid story length bounds: {e}")))?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            store,
            bounds,
            start_options_limit: parse_or(&lookup, "START_OPTIONS_LIMIT", 3)?,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}
