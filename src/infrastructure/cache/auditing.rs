//! Auditing decorator for entity caches

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::domain::audit::{CacheAuditRecord, CacheOperation};
use crate::domain::cache::{CacheError, CacheableEntity, EntityCache, NOT_FOUND_MARKER};
use crate::domain::context::CallContext;
use crate::infrastructure::audit::CacheAuditLogger;

/// Wraps an entity cache and audits every operation made during a request
///
/// The inner result is returned untouched. Calls without request metadata
/// are not audited.
pub struct AuditingEntityCache<E: CacheableEntity> {
    inner: Arc<dyn EntityCache<E>>,
    logger: CacheAuditLogger,
}

impl<E: CacheableEntity> fmt::Debug for AuditingEntityCache<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditingEntityCache")
            .field("inner", &self.inner)
            .field("logger", &self.logger)
            .finish()
    }
}

impl<E: CacheableEntity> AuditingEntityCache<E> {
    pub fn new(inner: Arc<dyn EntityCache<E>>, logger: CacheAuditLogger) -> Self {
        Self { inner, logger }
    }

    fn audit(
        &self,
        ctx: &CallContext,
        operation: CacheOperation,
        id: &str,
        elapsed: Duration,
        value: Option<String>,
        error: Option<&CacheError>,
    ) {
        let Some(meta) = ctx.request() else {
            return;
        };

        let record = CacheAuditRecord::new(operation, self.inner.key(id), meta, elapsed)
            .with_value(value)
            .with_error(error.map(|e| e.to_string()));

        self.logger.log(record);
    }
}

fn marker() -> Option<String> {
    Some(NOT_FOUND_MARKER.to_string())
}

#[async_trait]
impl<E: CacheableEntity> EntityCache<E> for AuditingEntityCache<E> {
    async fn get(&self, ctx: &CallContext, id: &str) -> Result<Option<E>, CacheError> {
        let start = Instant::now();
        let result = self.inner.get(ctx, id).await;

        let value = match &result {
            Ok(Some(entity)) => serde_json::to_string(entity).ok(),
            Ok(None) | Err(CacheError::Miss) => marker(),
            Err(_) => None,
        };
        self.audit(
            ctx,
            CacheOperation::Get,
            id,
            start.elapsed(),
            value,
            result.as_ref().err(),
        );

        result
    }

    async fn set(&self, ctx: &CallContext, entity: &E) -> Result<(), CacheError> {
        let start = Instant::now();
        let result = self.inner.set(ctx, entity).await;

        self.audit(
            ctx,
            CacheOperation::Set,
            entity.cache_id(),
            start.elapsed(),
            serde_json::to_string(entity).ok(),
            result.as_ref().err(),
        );

        result
    }

    async fn delete(&self, ctx: &CallContext, id: &str) -> Result<(), CacheError> {
        let start = Instant::now();
        let result = self.inner.delete(ctx, id).await;

        self.audit(
            ctx,
            CacheOperation::Delete,
            id,
            start.elapsed(),
            marker(),
            result.as_ref().err(),
        );

        result
    }

    async fn set_not_found(&self, ctx: &CallContext, id: &str) -> Result<(), CacheError> {
        let start = Instant::now();
        let result = self.inner.set_not_found(ctx, id).await;

        self.audit(
            ctx,
            CacheOperation::SetNotFound,
            id,
            start.elapsed(),
            marker(),
            result.as_ref().err(),
        );

        result
    }

    fn key(&self, id: &str) -> String {
        self.inner.key(id)
    }
}
