//! Audit domain - records of cache operations performed during requests

mod record;
mod sink;

pub use record::{CacheAuditRecord, CacheOperation};
pub use sink::AuditSink;

#[cfg(test)]
pub use sink::MockAuditSink;
