//! Employee Model

use serde::{Deserialize, Serialize};
use shared::models::{Employee, PlatformLink};

/// Employee row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub key: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub platforms: Vec<PlatformLink>,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default)]
    pub deleted_at: Option<i64>,
}

impl From<EmployeeRecord> for Employee {
    fn from(row: EmployeeRecord) -> Self {
        Self {
            id: row.key,
            name: row.name,
            email: row.email,
            platforms: row.platforms,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
