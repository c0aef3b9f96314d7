//! In-memory audit sink

use std::collections::VecDeque;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::audit::{AuditSink, CacheAuditRecord};
use crate::domain::DomainError;

/// Records kept when no capacity is configured
pub const DEFAULT_MEMORY_CAPACITY: usize = 1_000;

/// Keeps the most recent audit records in process memory
///
/// Useful for development and tests. Once `capacity` records are held, each
/// insert evicts the oldest one. Records are lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryAuditSink {
    records: RwLock<VecDeque<CacheAuditRecord>>,
    capacity: usize,
}

impl Default for InMemoryAuditSink {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero capacity is raised to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: RwLock::new(VecDeque::with_capacity(capacity.min(DEFAULT_MEMORY_CAPACITY))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshot of the retained records, oldest first
    pub fn records(&self) -> Vec<CacheAuditRecord> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditSink {
    async fn insert(&self, record: CacheAuditRecord) -> Result<(), DomainError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| DomainError::internal("Audit record buffer lock poisoned"))?;

        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "in_memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::CacheOperation;
    use crate::domain::context::RequestMeta;
    use std::time::Duration;

    fn record(op: CacheOperation, key: &str) -> CacheAuditRecord {
        let meta = RequestMeta::new("GET", "/admin/dicts/1");
        CacheAuditRecord::new(op, key, &meta, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_insert_keeps_order() {
        let sink = InMemoryAuditSink::new();

        for op in [CacheOperation::Get, CacheOperation::Set] {
            sink.insert(record(op, "k")).await.unwrap();
        }

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].operation, CacheOperation::Get);
        assert_eq!(records[1].operation, CacheOperation::Set);
    }

    #[tokio::test]
    async fn test_overflow_drops_oldest_records() {
        let sink = InMemoryAuditSink::with_capacity(3);

        for i in 0..5 {
            sink.insert(record(CacheOperation::Get, &format!("k{}", i)))
                .await
                .unwrap();
        }

        assert_eq!(sink.len(), 3);
        let keys: Vec<_> = sink.records().into_iter().map(|r| r.cache_key).collect();
        assert_eq!(keys, vec!["k2", "k3", "k4"]);
    }

    #[tokio::test]
    async fn test_zero_capacity_keeps_latest_record() {
        let sink = InMemoryAuditSink::with_capacity(0);

        sink.insert(record(CacheOperation::Get, "a")).await.unwrap();
        sink.insert(record(CacheOperation::Set, "b")).await.unwrap();

        assert_eq!(sink.capacity(), 1);
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cache_key, "b");
    }
}
