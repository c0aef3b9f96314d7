//! Careful Admin
//!
//! Cache-aside reads of user and dictionary entities:
//! - Snapshots cached under `namespace:id` keys, with a short-lived
//!   `not_found` tombstone for ids the store does not know
//! - Pluggable cache backends (in-memory, Redis)
//! - Optional audit trail of every cache operation, written in the background

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use api::state::AppState;
use config::{AuditSinkType, StorageType};
use domain::audit::AuditSink;
use domain::cache::{Cache, CachePolicy, CacheableEntity, EntityCache};
use domain::dict::Dict;
use domain::user::{User, UserStore};
use infrastructure::audit::{CacheAuditLogger, InMemoryAuditSink, PostgresAuditSink};
use infrastructure::cache::{AuditingEntityCache, CacheFactory, KeyValueEntityCache};
use infrastructure::dict::{DictService, DictStore, PostgresDictStore};
use infrastructure::storage::{connect_pool, InMemoryEntityStore, PostgresConfig};
use infrastructure::user::{PostgresUserStore, UserService};

/// Wires stores, caches and services from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let cache = CacheFactory::create(&config.cache).await?;
    let policy = CacheFactory::policy(&config.cache)?;

    let (user_store, dict_store) = create_stores(config).await?;
    let logger = create_audit_logger(config).await?;

    let users = entity_cache::<User>(cache.clone(), policy, logger.clone());
    let dicts = entity_cache::<Dict>(cache.clone(), policy, logger);

    Ok(AppState::new(
        Arc::new(UserService::new(users, user_store)),
        Arc::new(DictService::new(dicts, dict_store)),
        cache,
    ))
}

async fn create_stores(
    config: &AppConfig,
) -> anyhow::Result<(Arc<dyn UserStore>, Arc<DictStore>)> {
    match config.database.storage {
        StorageType::Memory => {
            info!("Using in-memory entity stores");
            Ok((
                Arc::new(InMemoryEntityStore::new()),
                Arc::new(InMemoryEntityStore::new()),
            ))
        }
        StorageType::Postgres => {
            let pool = connect_pool(&PostgresConfig::from(&config.database)).await?;
            info!("Using PostgreSQL entity stores");
            Ok((
                Arc::new(PostgresUserStore::new(pool.clone())),
                Arc::new(PostgresDictStore::new(pool)),
            ))
        }
    }
}

async fn create_audit_logger(config: &AppConfig) -> anyhow::Result<Option<CacheAuditLogger>> {
    let audit = &config.audit;
    if !audit.enabled {
        info!("Cache auditing disabled");
        return Ok(None);
    }

    let sink: Arc<dyn AuditSink> = match audit.sink {
        AuditSinkType::Memory => {
            Arc::new(InMemoryAuditSink::with_capacity(audit.memory_capacity))
        }
        AuditSinkType::Postgres => {
            let pool_config = PostgresConfig::from(&config.database)
                .with_max_connections(audit.max_connections)
                .with_min_connections(0);
            let sink = PostgresAuditSink::connect(&pool_config).await?;
            sink.ensure_table().await?;
            Arc::new(sink)
        }
    };

    info!(
        sink = sink.sink_name(),
        max_in_flight = audit.max_in_flight,
        "Cache auditing enabled"
    );

    Ok(Some(CacheAuditLogger::new(
        sink,
        Duration::from_millis(audit.write_timeout_ms),
        audit.max_in_flight,
    )))
}

/// Key-value entity cache, wrapped in the auditing decorator when a logger is given
fn entity_cache<E: CacheableEntity>(
    cache: Arc<dyn Cache>,
    policy: CachePolicy,
    logger: Option<CacheAuditLogger>,
) -> Arc<dyn EntityCache<E>> {
    let inner: Arc<dyn EntityCache<E>> = Arc::new(KeyValueEntityCache::<E>::new(cache, policy));
    match logger {
        Some(logger) => Arc::new(AuditingEntityCache::new(inner, logger)),
        None => inner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::CallContext;

    #[tokio::test]
    async fn test_create_app_state_with_defaults() {
        let config = AppConfig::default();

        let state = create_app_state(&config).await.unwrap();

        assert_eq!(state.cache.backend_name(), "in_memory");
        let err = state
            .user_service
            .get_by_id(&CallContext::background(), "missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_app_state_without_auditing() {
        let mut config = AppConfig::default();
        config.audit.enabled = false;

        let state = create_app_state(&config).await.unwrap();

        let err = state
            .dict_service
            .get_by_id(&CallContext::background(), "D1")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
