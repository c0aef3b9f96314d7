//! Cache audit record

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::context::RequestMeta;

/// Kind of cache operation being audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheOperation {
    Get,
    Set,
    Delete,
    SetNotFound,
}

impl CacheOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheOperation::Get => "get",
            CacheOperation::Set => "set",
            CacheOperation::Delete => "delete",
            CacheOperation::SetNotFound => "set_not_found",
        }
    }
}

impl std::fmt::Display for CacheOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audited cache operation performed while serving a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheAuditRecord {
    pub id: String,
    pub operation: CacheOperation,
    pub cache_key: String,
    pub cache_value: Option<String>,
    /// Creator and modifier are both the calling user
    pub creator: Option<String>,
    pub modifier: Option<String>,
    pub belong_dept: Option<String>,
    pub username: Option<String>,
    pub host: String,
    pub client_ip: Option<String>,
    pub method: String,
    pub path: String,
    pub error: Option<String>,
    pub elapsed_micros: u64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl CacheAuditRecord {
    pub fn new(
        operation: CacheOperation,
        cache_key: impl Into<String>,
        meta: &RequestMeta,
        elapsed: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string().to_uppercase(),
            operation,
            cache_key: cache_key.into(),
            cache_value: None,
            creator: meta.user_id().map(String::from),
            modifier: meta.user_id().map(String::from),
            belong_dept: meta.dept_id().map(String::from),
            username: meta.username().map(String::from),
            host: meta.host.clone(),
            client_ip: meta.client_ip.clone(),
            method: meta.method.clone(),
            path: meta.path.clone(),
            error: None,
            elapsed_micros: u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            status: true,
            created_at: Utc::now(),
        }
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.cache_value = value;
        self
    }

    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.elapsed_micros)
    }
}
