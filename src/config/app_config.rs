use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where entity records are loaded from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub storage: StorageType,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheType {
    #[default]
    InMemory,
    Redis,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    #[serde(rename = "type")]
    pub cache_type: CacheType,
    pub redis_url: String,
    pub key_prefix: Option<String>,
    pub connection_timeout_ms: u64,
    pub response_timeout_ms: u64,
    pub entity_ttl_secs: u64,
    pub not_found_ttl_secs: u64,
    pub max_capacity: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuditSinkType {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// When disabled the auditing decorator is not installed at all
    pub enabled: bool,
    pub sink: AuditSinkType,
    pub write_timeout_ms: u64,
    pub max_in_flight: usize,
    /// Size of the dedicated audit connection pool
    pub max_connections: u32,
    /// Records kept by the in-memory sink; the oldest are dropped first
    pub memory_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            storage: StorageType::default(),
            url: "postgres://localhost/careful_admin".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            cache_type: CacheType::default(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: None,
            connection_timeout_ms: 5_000,
            response_timeout_ms: 500,
            entity_ttl_secs: 900,
            not_found_ttl_secs: 60,
            max_capacity: 10_000,
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sink: AuditSinkType::default(),
            write_timeout_ms: 3_000,
            max_in_flight: 64,
            max_connections: 2,
            memory_capacity: 1_000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.cache_type, CacheType::InMemory);
        assert_eq!(config.cache.entity_ttl_secs, 900);
        assert_eq!(config.cache.not_found_ttl_secs, 60);
        assert!(config.audit.enabled);
        assert_eq!(config.audit.memory_capacity, 1_000);
        assert_eq!(config.audit.write_timeout_ms, 3_000);
        assert_eq!(config.audit.max_in_flight, 64);
        assert_eq!(config.database.storage, StorageType::Memory);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = config::Config::builder()
            .set_override("cache.type", "redis")
            .unwrap()
            .set_override("audit.sink", "postgres")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.cache.cache_type, CacheType::Redis);
        assert_eq!(config.cache.not_found_ttl_secs, 60);
        assert_eq!(config.audit.sink, AuditSinkType::Postgres);
        assert_eq!(config.audit.max_in_flight, 64);
        assert_eq!(config.logging.level, "info");
    }
}
