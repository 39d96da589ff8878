use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DistanceUnit;
use crate::services::YelpSearch;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub search: SearchSettings,
    pub yelp: YelpSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Candidate search around the user
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    /// Half-width of the search box, in degrees
    #[serde(default = "default_closeness")]
    pub closeness: f64,
    /// Reported distance unit: "K", "N", anything else means miles
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl SearchSettings {
    pub fn distance_unit(&self) -> DistanceUnit {
        self.unit.parse().unwrap_or_default()
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            closeness: default_closeness(),
            unit: default_unit(),
        }
    }
}

fn default_closeness() -> f64 { 1.0 }
fn default_unit() -> String { "m".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct YelpSettings {
    #[serde(default = "default_yelp_base_url")]
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_term")]
    pub term: String,
    #[serde(default = "default_categories")]
    pub categories: String,
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_search_limit")]
    pub limit: u8,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl YelpSettings {
    pub fn search(&self) -> YelpSearch {
        YelpSearch {
            term: self.term.clone(),
            categories: self.categories.clone(),
            radius_m: self.radius_m,
            sort_by: self.sort_by.clone(),
            limit: self.limit,
        }
    }
}

fn default_yelp_base_url() -> String { "https://api.yelp.com/v3".to_string() }
fn default_term() -> String { "food".to_string() }
fn default_categories() -> String { "restaurants,food".to_string() }
fn default_radius_m() -> u32 { 1500 }
fn default_sort_by() -> String { "rating".to_string() }
fn default_search_limit() -> u8 { 1 }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            capacity: default_capacity(),
        }
    }
}

fn default_ttl_secs() -> u64 { 300 }
fn default_capacity() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with AIRPORT_EATS_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., AIRPORT_EATS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("AIRPORT_EATS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("AIRPORT_EATS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables on top of the layered config
///
/// `DATABASE_URL` and `YELP_API_KEY` win over file and prefixed values.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(api_key) = env::var("YELP_API_KEY") {
        builder = builder.set_override("yelp.api_key", api_key)?;
    }

    builder.build()
}
