//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// DRE editor settings.
    #[serde(default)]
    pub dre: DreConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Settings that shape the records the editors produce.
#[derive(Debug, Clone, Deserialize)]
pub struct DreConfig {
    /// Prefix of generated account codes (`A001`, `A002`, ...).
    #[serde(default = "default_account_code_prefix")]
    pub account_code_prefix: String,
    /// Upper bound applied by the line editor's indent control.
    #[serde(default = "default_max_indent_level")]
    pub max_indent_level: i32,
}

fn default_account_code_prefix() -> String {
    "A".to_string()
}

fn default_max_indent_level() -> i32 {
    5
}

impl Default for DreConfig {
    fn default() -> Self {
        Self {
            account_code_prefix: default_account_code_prefix(),
            max_indent_level: default_max_indent_level(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `DRE__*` variables
    /// (`DRE__DATABASE__URL` maps to `database.url`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DRE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
