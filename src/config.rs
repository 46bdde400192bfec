use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub audience: AudienceSettings,
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
pub struct DashboardSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AudienceSettings {
    #[serde(default = "default_sample_size")]
    pub default_sample_size: usize,
    #[serde(default = "default_max_sample_size")]
    pub max_sample_size: usize,
}

impl Default for AudienceSettings {
    fn default() -> Self {
        Self {
            default_sample_size: default_sample_size(),
            max_sample_size: default_max_sample_size(),
        }
    }
}

fn default_timeout_secs() -> u64 { 30 }
fn default_ttl_secs() -> u64 { 300 }
fn default_cache_capacity() -> u64 { 16 }
fn default_sample_size() -> usize { 25 }
fn default_max_sample_size() -> usize { 500 }

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
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with KINTR)
    /// 5. DASHBOARD_API_URL for the backend base URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., KINTR__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("KINTR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("KINTR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the deployment-level variables shared with the dashboard frontend
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = std::env::var("DASHBOARD_API_URL") {
        builder = builder.set_override("dashboard.base_url", url)?;
    }

    builder.build()
}
