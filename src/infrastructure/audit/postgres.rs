//! PostgreSQL audit sink

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::audit::{AuditSink, CacheAuditRecord};
use crate::domain::DomainError;
use crate::infrastructure::storage::{connect_pool, PostgresConfig};

/// Table the cache audit trail is appended to
pub const CACHE_LOG_TABLE: &str = "careful_logger_cache_log";

const MAX_ERROR_LEN: usize = 255;

/// Appends cache audit records to `careful_logger_cache_log`
///
/// Uses its own small pool with statement logging disabled, so audit inserts
/// do not show up in the query log of the primary pool.
#[derive(Debug, Clone)]
pub struct PostgresAuditSink {
    pool: PgPool,
}

impl PostgresAuditSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens the dedicated audit pool
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let config = config.clone().without_statement_logging();
        Ok(Self::new(connect_pool(&config).await?))
    }

    /// Creates the cache log table when missing
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                id VARCHAR(64) PRIMARY KEY,
                sort INTEGER NOT NULL DEFAULT 1,
                timestamp BIGINT NOT NULL DEFAULT 0,
                creator VARCHAR(64),
                modifier VARCHAR(64),
                belong_dept VARCHAR(64),
                create_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                update_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                remark VARCHAR(255),
                status BOOLEAN NOT NULL DEFAULT TRUE,
                cache_operation VARCHAR(20) NOT NULL,
                cache_host VARCHAR(100),
                cache_ip VARCHAR(100),
                cache_username VARCHAR(40),
                cache_method VARCHAR(10),
                cache_path VARCHAR(255),
                cache_time VARCHAR(255),
                cache_key VARCHAR(255) NOT NULL,
                cache_value TEXT,
                cache_error VARCHAR(255)
            )
            "#,
            table = CACHE_LOG_TABLE
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create cache log table: {}", e)))?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{table}_search ON {table} (cache_username, cache_method)",
            table = CACHE_LOG_TABLE
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create cache log index: {}", e)))?;

        Ok(())
    }
}

fn truncate_error(error: Option<String>) -> Option<String> {
    error.map(|e| e.chars().take(MAX_ERROR_LEN).collect())
}

#[async_trait]
impl AuditSink for PostgresAuditSink {
    async fn insert(&self, record: CacheAuditRecord) -> Result<(), DomainError> {
        let cache_time = format!("{:?}", record.elapsed());
        let timestamp = record.created_at.timestamp_micros();

        sqlx::query(&format!(
            r#"
            INSERT INTO {} (id, timestamp, creator, modifier, belong_dept, create_time,
                            update_time, status, cache_operation, cache_host, cache_ip,
                            cache_username, cache_method, cache_path, cache_time, cache_key,
                            cache_value, cache_error)
            VALUES ($1, $2, $3, $4, $5, $6, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
            CACHE_LOG_TABLE
        ))
        .bind(&record.id)
        .bind(timestamp)
        .bind(&record.creator)
        .bind(&record.modifier)
        .bind(&record.belong_dept)
        .bind(record.created_at)
        .bind(record.status)
        .bind(record.operation.as_str())
        .bind(&record.host)
        .bind(&record.client_ip)
        .bind(&record.username)
        .bind(&record.method)
        .bind(&record.path)
        .bind(cache_time)
        .bind(&record.cache_key)
        .bind(&record.cache_value)
        .bind(truncate_error(record.error))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to insert cache log: {}", e)))?;

        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "postgres"
    }
}
