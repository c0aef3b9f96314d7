//! PostgreSQL user store

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::traits::EntityStore;
use crate::domain::user::{DeptSummary, Gender, UserRecord, UserStore};
use crate::domain::DomainError;
use crate::infrastructure::storage::{column, core_select, row_to_core};

/// Reads users from `careful_system_users`, joined with their department
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_sql(filter: &str) -> String {
        format!(
            r#"
            SELECT {core},
                   u.status, u.username, u.password, u.name, u.gender::SMALLINT AS gender,
                   u.email, u.mobile, u.avatar, u.dept_id,
                   d.id AS dept_ref_id, d.name AS dept_name, d.code AS dept_code,
                   d.status AS dept_status
            FROM careful_system_users u
            LEFT JOIN careful_system_dept d ON d.id = u.dept_id
            WHERE {filter}
            "#,
            core = core_select("u"),
            filter = filter
        )
    }

    async fn fetch_one_where(
        &self,
        filter: &str,
        value: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let row = sqlx::query(&Self::select_sql(filter))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[async_trait]
impl EntityStore for PostgresUserStore {
    type Record = UserRecord;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, DomainError> {
        self.fetch_one_where("u.id = $1", id).await
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError> {
        self.fetch_one_where("u.username = $1", username).await
    }
}

fn text(row: &PgRow, name: &str) -> Result<String, DomainError> {
    Ok(column::<Option<String>>(row, name)?.unwrap_or_default())
}

fn row_to_user(row: &PgRow) -> Result<UserRecord, DomainError> {
    let gender = match column::<Option<i16>>(row, "gender")? {
        Some(value) => Gender::try_from(value)
            .map_err(|e| DomainError::storage(format!("Invalid user row: {}", e)))?,
        None => Gender::default(),
    };

    let dept = column::<Option<String>>(row, "dept_ref_id")?
        .map(|id| -> Result<DeptSummary, DomainError> {
            Ok(DeptSummary {
                id,
                name: text(row, "dept_name")?,
                code: text(row, "dept_code")?,
                status: column::<Option<bool>>(row, "dept_status")?.unwrap_or_default(),
            })
        })
        .transpose()?;

    Ok(UserRecord {
        core: row_to_core(row)?,
        status: column::<Option<bool>>(row, "status")?.unwrap_or(true),
        username: column(row, "username")?,
        password_hash: text(row, "password")?,
        name: text(row, "name")?,
        gender,
        email: text(row, "email")?,
        mobile: text(row, "mobile")?,
        avatar: text(row, "avatar")?,
        dept_id: column(row, "dept_id")?,
        dept,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::{connect_pool, PostgresConfig};

    #[test]
    fn test_select_joins_department() {
        let sql = PostgresUserStore::select_sql("u.id = $1");
        assert!(sql.contains("LEFT JOIN careful_system_dept d ON d.id = u.dept_id"));
        assert!(sql.contains("WHERE u.id = $1"));
    }

    #[tokio::test]
    #[ignore = "Requires running PostgreSQL instance"]
    async fn test_find_missing_user() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/careful_admin".to_string());
        let pool = connect_pool(&PostgresConfig::new(url)).await.unwrap();
        let store = PostgresUserStore::new(pool);

        assert!(store.find_by_id("no-such-user").await.unwrap().is_none());
    }
}
