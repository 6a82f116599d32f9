use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// Required only when `storage.backend` is "postgres"
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Product name interpolated into billing notices
    #[serde(default = "default_app_name")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    /// Base URL of the public frontend, used for links in messages
    #[serde(default = "default_frontend_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// "memory" or "postgres"
    #[serde(default = "default_storage_backend")]
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Fallback filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Environment variables, e.g. NOTIFY_STORAGE__BACKEND or NOTIFY_DATABASE__POOL_SIZE.
///
/// Sections and keys are split on `__` so multi-word keys stay intact.
fn environment() -> Environment {
    Environment::with_prefix("NOTIFY")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn default_app_name() -> String {
    "Eventyay".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:4200".to_string()
}

fn default_storage_backend() -> String {
    "memory".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300 // 5 minutes
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(environment())
    }

    /// Layer defaults, config files and the given environment source.
    fn load(environment: Environment) -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("app.name", default_app_name())?
            .set_default("frontend.url", default_frontend_url())?
            .set_default("storage.backend", default_storage_backend())?
            .set_default("logging.format", default_log_format())?
            .set_default("logging.level", default_log_level())?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment);

        builder.build()?.try_deserialize()
    }

    pub fn uses_postgres(&self) -> bool {
        self.storage.backend == "postgres"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            url: default_frontend_url(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(AppConfig::default().name, "Eventyay");
        assert_eq!(FrontendConfig::default().url, "http://localhost:4200");
        assert_eq!(StorageConfig::default().backend, "memory");
        assert_eq!(LoggingConfig::default().format, "pretty");
    }

    #[test]
    fn test_deserialize_partial_settings() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "frontend": {"url": "https://eventyay.com"},
            "storage": {"backend": "postgres"},
            "database": {"url": "postgres://u:p@localhost/events"}
        }))
        .unwrap();

        assert_eq!(settings.app.name, "Eventyay");
        assert!(settings.uses_postgres());
        let database = settings.database.unwrap();
        assert_eq!(database.pool_size, 5);
        assert_eq!(database.idle_timeout_seconds, 300);
    }

    #[test]
    fn test_environment_overrides_multi_word_keys() {
        let vars: config::Map<String, String> = [
            ("NOTIFY_STORAGE__BACKEND", "postgres"),
            ("NOTIFY_DATABASE__URL", "postgres://u:p@localhost/events"),
            ("NOTIFY_DATABASE__POOL_SIZE", "20"),
            ("NOTIFY_DATABASE__IDLE_TIMEOUT_SECONDS", "30"),
            ("NOTIFY_FRONTEND__URL", "https://eventyay.com"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings = Settings::load(environment().source(Some(vars))).unwrap();

        assert!(settings.uses_postgres());
        assert_eq!(settings.frontend.url, "https://eventyay.com");
        let database = settings.database.unwrap();
        assert_eq!(database.url, "postgres://u:p@localhost/events");
        assert_eq!(database.pool_size, 20);
        assert_eq!(database.idle_timeout_seconds, 30);
        assert_eq!(database.connect_timeout_seconds, 10);
    }
}
