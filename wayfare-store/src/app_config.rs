use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub provider: ProviderConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 { 5 }

/// Where and how to reach the external flight-search API.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 { 10 }

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Key callers must send in `x-api-key`. Falls back to the provider key.
    pub api_key: Option<String>,
}

/// `WAYFARE_` prefix, `__` between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix("WAYFARE")
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let dir = env::var("WAYFARE_CONFIG_DIR").unwrap_or_else(|_| "config".into());

        let builder = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name(&format!("{}/default", dir)))
            // Add in the current environment file, defaulting to 'development'
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // Add in a local configuration file, never checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // Eg.. `WAYFARE_SERVER__PORT=8080` would set `server.port`
            .add_source(environment())
            // The bare deployment variables win over everything else
            .set_override_option("provider.api_url", env::var("API_URL").ok())?
            .set_override_option("provider.api_key", env::var("API_KEY").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?;

        Self::from_builder(builder)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn inbound_api_key(&self) -> &str {
        self.auth
            .api_key
            .as_deref()
            .unwrap_or(&self.provider.api_key)
    }
}
