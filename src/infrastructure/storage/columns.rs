//! Row mapping for the columns shared by every admin table

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::domain::core_fields::CoreColumns;
use crate::domain::DomainError;

/// Select list for the shared columns, qualified by table alias
pub fn core_select(alias: &str) -> String {
    [
        "id",
        "sort",
        "timestamp",
        "creator",
        "modifier",
        "belong_dept",
        "create_time",
        "update_time",
        "remark",
    ]
    .iter()
    .map(|column| match *column {
        // integer width differs between deployments
        "sort" | "timestamp" => format!("{0}.{1}::BIGINT AS {1}", alias, column),
        _ => format!("{}.{}", alias, column),
    })
    .collect::<Vec<_>>()
    .join(", ")
}

/// Reads a column, naming it in the error on type mismatch
pub fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

pub fn row_to_core(row: &PgRow) -> Result<CoreColumns, DomainError> {
    let text = |name: &str| -> Result<String, DomainError> {
        Ok(column::<Option<String>>(row, name)?.unwrap_or_default())
    };

    Ok(CoreColumns {
        id: column(row, "id")?,
        sort: column::<Option<i64>>(row, "sort")?.unwrap_or(1),
        timestamp: column::<Option<i64>>(row, "timestamp")?.unwrap_or_default(),
        creator: text("creator")?,
        modifier: text("modifier")?,
        belong_dept: text("belong_dept")?,
        remark: text("remark")?,
        create_time: column::<Option<DateTime<Utc>>>(row, "create_time")?,
        update_time: column::<Option<DateTime<Utc>>>(row, "update_time")?,
    })
}
