//! Audit columns shared by every persisted admin entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format used for timestamps in entity snapshots
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Common columns as read from the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreColumns {
    pub id: String,
    pub sort: i64,
    /// Row version, microseconds since epoch at last write
    pub timestamp: i64,
    pub creator: String,
    pub modifier: String,
    pub belong_dept: String,
    pub remark: String,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl CoreColumns {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sort: 1,
            ..Default::default()
        }
    }
}

/// Common columns as exposed in cached snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreSnapshot {
    pub id: String,
    #[serde(default)]
    pub sort: i64,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub modifier: String,
    #[serde(default)]
    pub belong_dept: String,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub create_time: String,
    #[serde(default)]
    pub update_time: String,
}

impl From<CoreColumns> for CoreSnapshot {
    fn from(columns: CoreColumns) -> Self {
        Self {
            id: columns.id,
            sort: columns.sort,
            timestamp: columns.timestamp,
            creator: columns.creator,
            modifier: columns.modifier,
            belong_dept: columns.belong_dept,
            remark: columns.remark,
            create_time: format_time(columns.create_time),
            update_time: format_time(columns.update_time),
        }
    }
}

fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format(DATETIME_FORMAT).to_string())
        .unwrap_or_default()
}
