//! Cache factory for runtime selection

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{CacheSettings, CacheType};
use crate::domain::cache::{Cache, CachePolicy};
use crate::domain::DomainError;

use super::in_memory::{InMemoryCache, InMemoryCacheConfig};
use super::redis::{RedisCache, RedisCacheConfig};

impl std::fmt::Display for CacheType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheType::InMemory => write!(f, "in_memory"),
            CacheType::Redis => write!(f, "redis"),
        }
    }
}

/// Builds the configured cache backend and TTL policy
#[derive(Debug, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub async fn create(settings: &CacheSettings) -> Result<Arc<dyn Cache>, DomainError> {
        let cache: Arc<dyn Cache> = match settings.cache_type {
            CacheType::InMemory => Arc::new(InMemoryCache::with_config(
                InMemoryCacheConfig::default().with_max_capacity(settings.max_capacity),
            )),
            CacheType::Redis => {
                let mut redis_config = RedisCacheConfig::new(settings.redis_url.clone())
                    .with_connection_timeout(Duration::from_millis(settings.connection_timeout_ms))
                    .with_response_timeout(Duration::from_millis(settings.response_timeout_ms));

                if let Some(prefix) = &settings.key_prefix {
                    redis_config = redis_config.with_key_prefix(prefix.clone());
                }

                Arc::new(RedisCache::new(redis_config).await?)
            }
        };

        info!(backend = %settings.cache_type, "Cache backend initialized");
        Ok(cache)
    }

    pub fn policy(settings: &CacheSettings) -> Result<CachePolicy, DomainError> {
        CachePolicy::new(
            Duration::from_secs(settings.entity_ttl_secs),
            Duration::from_secs(settings.not_found_ttl_secs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_create_in_memory() {
        let cache = CacheFactory::create(&CacheSettings::default()).await.unwrap();

        cache
            .set_raw("test", "value", Duration::from_secs(60))
            .await
            .unwrap();

        assert_eq!(cache.get_raw("test").await.unwrap().as_deref(), Some("value"));
        assert_eq!(cache.backend_name(), "in_memory");
    }

    #[test]
    fn test_policy_from_settings() {
        let policy = CacheFactory::policy(&CacheSettings::default()).unwrap();
        assert_eq!(policy.entity_ttl(), Duration::from_secs(900));
        assert_eq!(policy.not_found_ttl(), Duration::from_secs(60));
    }

    #[test]
    fn test_policy_rejects_inverted_ttls() {
        let settings = CacheSettings {
            entity_ttl_secs: 30,
            not_found_ttl_secs: 60,
            ..Default::default()
        };

        assert!(CacheFactory::policy(&settings).is_err());
    }

    #[test]
    fn test_cache_type_display() {
        assert_eq!(CacheType::InMemory.to_string(), "in_memory");
        assert_eq!(CacheType::Redis.to_string(), "redis");
    }
}
