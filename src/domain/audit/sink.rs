use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::record::CacheAuditRecord;
use crate::domain::DomainError;

/// Append-only destination for cache audit records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persists one record
    async fn insert(&self, record: CacheAuditRecord) -> Result<(), DomainError>;

    /// Name of the sink, used in logs
    fn sink_name(&self) -> &'static str;
}
