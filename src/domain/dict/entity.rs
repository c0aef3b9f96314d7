//! Data dictionary entries

use serde::{Deserialize, Serialize};

use crate::domain::cache::{CacheableEntity, DICT_NAMESPACE};
use crate::domain::core_fields::{CoreColumns, CoreSnapshot};
use crate::domain::traits::StoreRecord;
use crate::domain::DomainError;

/// Dictionary category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum DictType {
    #[default]
    Ordinary,
    System,
    Enum,
}

impl TryFrom<i16> for DictType {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DictType::Ordinary),
            2 => Ok(DictType::System),
            3 => Ok(DictType::Enum),
            other => Err(DomainError::validation(format!(
                "Unknown dict type: {}",
                other
            ))),
        }
    }
}

impl From<DictType> for i16 {
    fn from(value: DictType) -> Self {
        match value {
            DictType::Ordinary => 1,
            DictType::System => 2,
            DictType::Enum => 3,
        }
    }
}

/// Type of the values held by a dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum DictValueType {
    #[default]
    Str,
    Int,
    Bool,
}

impl TryFrom<i16> for DictValueType {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DictValueType::Str),
            2 => Ok(DictValueType::Int),
            3 => Ok(DictValueType::Bool),
            other => Err(DomainError::validation(format!(
                "Unknown dict value type: {}",
                other
            ))),
        }
    }
}

impl From<DictValueType> for i16 {
    fn from(value: DictValueType) -> Self {
        match value {
            DictValueType::Str => 1,
            DictValueType::Int => 2,
            DictValueType::Bool => 3,
        }
    }
}

/// Dictionary row as stored
#[derive(Debug, Clone, PartialEq)]
pub struct DictRecord {
    pub core: CoreColumns,
    pub status: bool,
    pub name: String,
    pub code: String,
    pub dict_type: DictType,
    pub value_type: DictValueType,
}

impl DictRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            core: CoreColumns::new(id),
            status: true,
            name: name.into(),
            code: code.into(),
            dict_type: DictType::default(),
            value_type: DictValueType::default(),
        }
    }

    pub fn with_types(mut self, dict_type: DictType, value_type: DictValueType) -> Self {
        self.dict_type = dict_type;
        self.value_type = value_type;
        self
    }
}

impl StoreRecord for DictRecord {
    fn record_id(&self) -> &str {
        &self.core.id
    }
}

/// Cached dictionary snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dict {
    #[serde(flatten)]
    pub core: CoreSnapshot,
    #[serde(default)]
    pub status: bool,
    pub name: String,
    pub code: String,
    #[serde(rename = "type", default)]
    pub dict_type: DictType,
    #[serde(default)]
    pub value_type: DictValueType,
}

impl From<DictRecord> for Dict {
    fn from(record: DictRecord) -> Self {
        Self {
            core: record.core.into(),
            status: record.status,
            name: record.name,
            code: record.code,
            dict_type: record.dict_type,
            value_type: record.value_type,
        }
    }
}

impl CacheableEntity for Dict {
    const NAMESPACE: &'static str = DICT_NAMESPACE;
    const KIND: &'static str = "Dict";

    fn cache_id(&self) -> &str {
        &self.core.id
    }
}
