//! Audit infrastructure - detached audit logger and sinks

mod in_memory;
mod logger;
mod postgres;

pub use in_memory::InMemoryAuditSink;
pub use logger::{CacheAuditLogger, DEFAULT_MAX_IN_FLIGHT, DEFAULT_WRITE_TIMEOUT};
pub use postgres::{PostgresAuditSink, CACHE_LOG_TABLE};
