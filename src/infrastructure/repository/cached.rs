//! Cache-aside repository over an entity store

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::domain::cache::{CacheError, CacheableEntity, EntityCache};
use crate::domain::context::CallContext;
use crate::domain::traits::EntityStore;
use crate::domain::DomainError;

/// Reads entities cache-first and falls back to the store
///
/// The store is the source of truth. Cache failures are logged and never
/// returned to the caller; store failures always are. Concurrent misses for
/// the same id may all read the store and all write the cache.
pub struct CachedEntityRepository<E, S>
where
    E: CacheableEntity + From<S::Record>,
    S: EntityStore + ?Sized,
{
    cache: Arc<dyn EntityCache<E>>,
    store: Arc<S>,
}

impl<E, S> fmt::Debug for CachedEntityRepository<E, S>
where
    E: CacheableEntity + From<S::Record>,
    S: EntityStore + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedEntityRepository")
            .field("entity", &E::KIND)
            .field("cache", &self.cache)
            .field("store", &self.store)
            .finish()
    }
}

impl<E, S> CachedEntityRepository<E, S>
where
    E: CacheableEntity + From<S::Record>,
    S: EntityStore + ?Sized,
{
    pub fn new(cache: Arc<dyn EntityCache<E>>, store: Arc<S>) -> Self {
        Self { cache, store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn not_found(id: &str) -> DomainError {
        DomainError::not_found(format!("{} '{}' does not exist", E::KIND, id))
    }

    /// Gets an entity by id
    ///
    /// Returns `DomainError::NotFound` both when the store has no such record
    /// and when a not-found marker is cached for the id.
    pub async fn get_by_id(&self, ctx: &CallContext, id: &str) -> Result<E, DomainError> {
        match self.cache.get(ctx, id).await {
            Ok(Some(entity)) => {
                debug!(entity = E::KIND, id = %id, "Cache hit");
                return Ok(entity);
            }
            Ok(None) => {
                debug!(entity = E::KIND, id = %id, "Cached not-found marker");
                return Err(Self::not_found(id));
            }
            Err(CacheError::Miss) => {
                debug!(entity = E::KIND, id = %id, "Cache miss");
            }
            Err(e @ CacheError::Deserialize { .. }) => {
                warn!(entity = E::KIND, id = %id, error = %e, "Discarding unreadable cache entry");
            }
            Err(e) => {
                error!(entity = E::KIND, id = %id, error = %e, "Cache read failed, reading from store");
            }
        }

        let Some(record) = self.store.find_by_id(id).await? else {
            if let Err(e) = self.cache.set_not_found(ctx, id).await {
                warn!(entity = E::KIND, id = %id, error = %e, "Failed to cache not-found marker");
            }
            return Err(Self::not_found(id));
        };

        let entity = E::from(record);
        if let Err(e) = self.cache.set(ctx, &entity).await {
            warn!(entity = E::KIND, id = %id, error = %e, "Failed to cache entity");
        }

        Ok(entity)
    }

    /// Evicts the cached snapshot or marker for an id
    pub async fn invalidate(&self, ctx: &CallContext, id: &str) -> Result<(), DomainError> {
        self.cache
            .delete(ctx, id)
            .await
            .map_err(|e| DomainError::cache(format!("Failed to evict {} '{}': {}", E::KIND, id, e)))?;

        debug!(entity = E::KIND, id = %id, "Cache entry evicted");
        Ok(())
    }
}
