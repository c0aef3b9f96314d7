mod app_config;

pub use app_config::{
    AppConfig, AuditConfig, AuditSinkType, CacheSettings, CacheType, DatabaseConfig, LogFormat,
    LoggingConfig, ServerConfig, StorageType,
};
