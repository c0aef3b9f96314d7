//! PostgreSQL dictionary store

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::dict::{DictRecord, DictType, DictValueType};
use crate::domain::traits::EntityStore;
use crate::domain::DomainError;
use crate::infrastructure::storage::{column, core_select, row_to_core};

/// Reads dictionaries from `careful_tools_dict`
#[derive(Debug, Clone)]
pub struct PostgresDictStore {
    pool: PgPool,
}

impl PostgresDictStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PostgresDictStore {
    type Record = DictRecord;

    async fn find_by_id(&self, id: &str) -> Result<Option<DictRecord>, DomainError> {
        let sql = format!(
            r#"
            SELECT {}, d.status, d.name, d.code,
                   d.type::SMALLINT AS dict_type, d.value_type::SMALLINT AS value_type
            FROM careful_tools_dict d
            WHERE d.id = $1
            "#,
            core_select("d")
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get dict: {}", e)))?;

        row.as_ref().map(row_to_dict).transpose()
    }
}

fn row_to_dict(row: &PgRow) -> Result<DictRecord, DomainError> {
    let invalid = |e: DomainError| DomainError::storage(format!("Invalid dict row: {}", e));

    let dict_type = match column::<Option<i16>>(row, "dict_type")? {
        Some(value) => DictType::try_from(value).map_err(invalid)?,
        None => DictType::default(),
    };
    let value_type = match column::<Option<i16>>(row, "value_type")? {
        Some(value) => DictValueType::try_from(value).map_err(invalid)?,
        None => DictValueType::default(),
    };

    Ok(DictRecord {
        core: row_to_core(row)?,
        status: column::<Option<bool>>(row, "status")?.unwrap_or(true),
        name: column(row, "name")?,
        code: column(row, "code")?,
        dict_type,
        value_type,
    })
}
