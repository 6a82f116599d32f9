mod settings;

pub use settings::{
    AppConfig, DatabaseConfig, FrontendConfig, LoggingConfig, Settings, StorageConfig,
};
