//! Application configuration management.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub reports: ReportSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout enforced by the HTTP layer.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
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

/// Settings that shape report output.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    /// Symbol printed in front of currency amounts in documents.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// IANA timezone that defines "today" for overdue checks.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            timezone: default_timezone(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl ReportSettings {
    /// Parses the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA timezone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| ConfigError::Message(format!("reports.timezone: {e}")))
    }

    /// Returns the current calendar date in the configured timezone.
    ///
    /// Falls back to UTC when the timezone does not parse; `AppConfig::load`
    /// rejects such configurations up front.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        let now = Utc::now();
        self.tz()
            .map_or_else(|_| now.date_naive(), |tz| now.with_timezone(&tz).date_naive())
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEASEBOOK").separator("__"));

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.reports.tz()?;
        Ok(config)
    }
}
