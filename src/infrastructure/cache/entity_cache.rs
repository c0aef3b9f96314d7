//! Entity cache over a key-value backend

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cache::{
    entity_key, Cache, CacheError, CachePolicy, CacheableEntity, EntityCache, NOT_FOUND_MARKER,
};
use crate::domain::context::CallContext;

/// Stores JSON snapshots of `E` under `{namespace}:{id}`, with a
/// `not_found` marker for ids known to be absent from the store
pub struct KeyValueEntityCache<E: CacheableEntity> {
    cache: Arc<dyn Cache>,
    policy: CachePolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CacheableEntity> fmt::Debug for KeyValueEntityCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueEntityCache")
            .field("entity", &E::KIND)
            .field("backend", &self.cache.backend_name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl<E: CacheableEntity> KeyValueEntityCache<E> {
    pub fn new(cache: Arc<dyn Cache>, policy: CachePolicy) -> Self {
        Self {
            cache,
            policy,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: CacheableEntity> EntityCache<E> for KeyValueEntityCache<E> {
    async fn get(&self, _ctx: &CallContext, id: &str) -> Result<Option<E>, CacheError> {
        let key = self.key(id);

        let data = self
            .cache
            .get_raw(&key)
            .await
            .map_err(CacheError::Backend)?
            .ok_or(CacheError::Miss)?;

        if data == NOT_FOUND_MARKER {
            return Ok(None);
        }

        serde_json::from_str(&data)
            .map(Some)
            .map_err(|e| CacheError::Deserialize {
                key,
                message: e.to_string(),
            })
    }

    async fn set(&self, _ctx: &CallContext, entity: &E) -> Result<(), CacheError> {
        let key = self.key(entity.cache_id());
        let data =
            serde_json::to_string(entity).map_err(|e| CacheError::Serialize(e.to_string()))?;

        self.cache
            .set_raw(&key, &data, self.policy.entity_ttl())
            .await
            .map_err(CacheError::Backend)
    }

    async fn delete(&self, _ctx: &CallContext, id: &str) -> Result<(), CacheError> {
        self.cache
            .delete(&self.key(id))
            .await
            .map(|_| ())
            .map_err(CacheError::Backend)
    }

    async fn set_not_found(&self, _ctx: &CallContext, id: &str) -> Result<(), CacheError> {
        self.cache
            .set_raw(&self.key(id), NOT_FOUND_MARKER, self.policy.not_found_ttl())
            .await
            .map_err(CacheError::Backend)
    }

    fn key(&self, id: &str) -> String {
        entity_key(E::NAMESPACE, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cache::MockCache;
    use crate::domain::dict::{Dict, DictRecord};
    use std::time::Duration;

    const KEY: &str = "careful:tools:dict:info:D1";

    fn gateway(cache: Arc<MockCache>) -> KeyValueEntityCache<Dict> {
        KeyValueEntityCache::new(cache, CachePolicy::default())
    }

    fn sample() -> Dict {
        Dict::from(DictRecord::new("D1", "Status", "status"))
    }

    #[tokio::test]
    async fn test_absent_key_is_miss() {
        let cache = Arc::new(MockCache::new());
        let result = gateway(cache).get(&CallContext::background(), "D1").await;

        assert!(matches!(result, Err(CacheError::Miss)));
    }

    #[tokio::test]
    async fn test_marker_is_known_missing() {
        let cache = Arc::new(MockCache::new().with_raw_entry(
            KEY,
            "not_found",
            Duration::from_secs(60),
        ));

        let result = gateway(cache).get(&CallContext::background(), "D1").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = Arc::new(MockCache::new());
        let gateway = gateway(cache.clone());
        let ctx = CallContext::background();

        gateway.set(&ctx, &sample()).await.unwrap();

        let cached = gateway.get(&ctx, "D1").await.unwrap();
        assert_eq!(cached, Some(sample()));
        assert_eq!(cache.ttl(KEY).await.unwrap(), Some(Duration::from_secs(900)));
    }

    #[tokio::test]
    async fn test_set_not_found_uses_short_ttl() {
        let cache = Arc::new(MockCache::new());
        gateway(cache.clone())
            .set_not_found(&CallContext::background(), "D1")
            .await
            .unwrap();

        assert_eq!(cache.raw(KEY).as_deref(), Some("not_found"));
        assert_eq!(cache.ttl(KEY).await.unwrap(), Some(Duration::from_secs(60)));
    }

    #[tokio::test]
    async fn test_set_replaces_marker() {
        let cache = Arc::new(MockCache::new());
        let gateway = gateway(cache.clone());
        let ctx = CallContext::background();

        gateway.set_not_found(&ctx, "D1").await.unwrap();
        gateway.set(&ctx, &sample()).await.unwrap();

        assert_ne!(cache.raw(KEY).as_deref(), Some("not_found"));
        assert!(gateway.get(&ctx, "D1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_malformed_payload_is_deserialize_error() {
        let cache = Arc::new(MockCache::new().with_raw_entry(
            KEY,
            "{not json",
            Duration::from_secs(60),
        ));

        let result = gateway(cache).get(&CallContext::background(), "D1").await;
        match result {
            Err(CacheError::Deserialize { key, .. }) => assert_eq!(key, KEY),
            other => panic!("expected deserialize error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_backend_failure_is_backend_error() {
        let cache = Arc::new(MockCache::new());
        cache.set_fail_reads(true);

        let result = gateway(cache).get(&CallContext::background(), "D1").await;
        assert!(matches!(result, Err(CacheError::Backend(_))));
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        let cache = Arc::new(MockCache::new());
        let result = gateway(cache)
            .delete(&CallContext::background(), "D1")
            .await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_key_uses_namespace() {
        let gateway = gateway(Arc::new(MockCache::new()));
        assert_eq!(gateway.key("D1"), KEY);
    }
}
