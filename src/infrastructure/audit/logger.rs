//! Detached writer of cache audit records

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use crate::domain::audit::{AuditSink, CacheAuditRecord};

/// Default upper bound for a single audit write
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(3);

/// Default number of audit writes allowed in flight at once
pub const DEFAULT_MAX_IN_FLIGHT: usize = 64;

/// Submits audit records to a sink on detached tasks
///
/// `log` never waits on the sink. Each write runs under `write_timeout`, and
/// at most `max_in_flight` writes run concurrently; records submitted beyond
/// that are dropped with a warning.
#[derive(Clone)]
pub struct CacheAuditLogger {
    sink: Arc<dyn AuditSink>,
    write_timeout: Duration,
    max_in_flight: usize,
    permits: Arc<Semaphore>,
}

impl fmt::Debug for CacheAuditLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheAuditLogger")
            .field("sink", &self.sink.sink_name())
            .field("write_timeout", &self.write_timeout)
            .field("max_in_flight", &self.max_in_flight)
            .finish()
    }
}

impl CacheAuditLogger {
    pub fn new(sink: Arc<dyn AuditSink>, write_timeout: Duration, max_in_flight: usize) -> Self {
        let max_in_flight = max_in_flight.max(1);
        Self {
            sink,
            write_timeout,
            max_in_flight,
            permits: Arc::new(Semaphore::new(max_in_flight)),
        }
    }

    pub fn with_defaults(sink: Arc<dyn AuditSink>) -> Self {
        Self::new(sink, DEFAULT_WRITE_TIMEOUT, DEFAULT_MAX_IN_FLIGHT)
    }

    /// Number of audit writes currently running
    pub fn in_flight(&self) -> usize {
        self.max_in_flight - self.permits.available_permits()
    }

    /// Hands the record to a background task and returns immediately
    pub fn log(&self, record: CacheAuditRecord) {
        let Ok(handle) = Handle::try_current() else {
            warn!(
                cache_key = %record.cache_key,
                "No async runtime available, dropping cache audit record"
            );
            return;
        };

        let Ok(permit) = self.permits.clone().try_acquire_owned() else {
            warn!(
                cache_key = %record.cache_key,
                operation = %record.operation,
                max_in_flight = self.max_in_flight,
                "Too many audit writes in flight, dropping cache audit record"
            );
            return;
        };

        let sink = self.sink.clone();
        let write_timeout = self.write_timeout;

        handle.spawn(async move {
            let _permit = permit;
            let cache_key = record.cache_key.clone();
            let operation = record.operation;
            let path = record.path.clone();
            let method = record.method.clone();

            match tokio::time::timeout(write_timeout, sink.insert(record)).await {
                Ok(Ok(())) => {
                    debug!(cache_key = %cache_key, operation = %operation, "Cache audit record written");
                }
                Ok(Err(e)) => {
                    error!(
                        cache_key = %cache_key,
                        operation = %operation,
                        method = %method,
                        path = %path,
                        error = %e,
                        "Failed to write cache audit record"
                    );
                }
                Err(_) => {
                    warn!(
                        cache_key = %cache_key,
                        operation = %operation,
                        method = %method,
                        path = %path,
                        timeout_ms = write_timeout.as_millis() as u64,
                        "Cache audit write timed out"
                    );
                }
            }
        });
    }
}
