//! User record and cached user snapshot

use serde::{Deserialize, Serialize};

use crate::domain::cache::{CacheableEntity, USER_NAMESPACE};
use crate::domain::core_fields::{CoreColumns, CoreSnapshot};
use crate::domain::traits::StoreRecord;
use crate::domain::DomainError;

/// Gender stored as a small integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Secret,
}

impl TryFrom<i16> for Gender {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Gender::Male),
            2 => Ok(Gender::Female),
            3 => Ok(Gender::Secret),
            other => Err(DomainError::validation(format!(
                "Unknown gender value: {}",
                other
            ))),
        }
    }
}

impl From<Gender> for i16 {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::Secret => 3,
        }
    }
}

/// Department a user belongs to, as embedded in the user snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeptSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: bool,
}

/// User row as stored, including the password hash
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub core: CoreColumns,
    pub status: bool,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub gender: Gender,
    pub email: String,
    pub mobile: String,
    pub avatar: String,
    pub dept_id: Option<String>,
    pub dept: Option<DeptSummary>,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            core: CoreColumns::new(id),
            status: true,
            username: username.into(),
            password_hash: String::new(),
            name: String::new(),
            gender: Gender::default(),
            email: String::new(),
            mobile: String::new(),
            avatar: String::new(),
            dept_id: None,
            dept: None,
        }
    }

    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = hash.into();
        self
    }

    pub fn with_dept(mut self, dept: DeptSummary) -> Self {
        self.dept_id = Some(dept.id.clone());
        self.dept = Some(dept);
        self
    }
}

impl StoreRecord for UserRecord {
    fn record_id(&self) -> &str {
        &self.core.id
    }
}

/// Cached user snapshot; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    pub core: CoreSnapshot,
    #[serde(default)]
    pub status: bool,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "dept_id", default)]
    pub dept_id: String,
    #[serde(default)]
    pub dept: Option<DeptSummary>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            core: record.core.into(),
            status: record.status,
            username: record.username,
            name: record.name,
            gender: record.gender,
            email: record.email,
            mobile: record.mobile,
            avatar: record.avatar,
            dept_id: record.dept_id.unwrap_or_default(),
            dept: record.dept,
        }
    }
}

impl CacheableEntity for User {
    const NAMESPACE: &'static str = USER_NAMESPACE;
    const KIND: &'static str = "User";

    fn cache_id(&self) -> &str {
        &self.core.id
    }
}
