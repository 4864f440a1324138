//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult, decode_rows};
use crate::db::models::EmployeeRecord;
use shared::models::PlatformLink;
use shared::util::{new_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const EMPLOYEE_FIELDS: &str =
    "record::id(id) AS key, name, email, platforms, created_at, updated_at, deleted_at";

/// Validated employee content
#[derive(Debug, Clone)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub platforms: Vec<PlatformLink>,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all employees that are not soft-deleted
    pub async fn find_all(&self) -> RepoResult<Vec<EmployeeRecord>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM employee WHERE deleted_at = NONE ORDER BY created_at"
            ))
            .await?
            .take(0)?;
        decode_rows(rows)
    }

    /// Find a live (not soft-deleted) employee by key
    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<EmployeeRecord>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM type::thing('employee', $key) WHERE deleted_at = NONE"
            ))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(decode_rows(rows)?.into_iter().next())
    }

    /// Find employee by email, soft-deleted rows included
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<EmployeeRecord>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {EMPLOYEE_FIELDS} FROM employee WHERE email = $email LIMIT 1"
            ))
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(decode_rows(rows)?.into_iter().next())
    }

    /// Create a new employee
    pub async fn create(&self, draft: EmployeeDraft) -> RepoResult<EmployeeRecord> {
        if self.find_by_email(&draft.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Employee email '{}' already exists",
                draft.email
            )));
        }

        let key = new_key();
        let now = now_millis();
        let doc = serde_json::json!({
            "name": draft.name,
            "email": draft.email,
            "platforms": serde_json::to_value(&draft.platforms)?,
            "created_at": now,
            "updated_at": now,
        });

        self.base
            .db()
            .query("CREATE type::thing('employee', $key) CONTENT $doc")
            .bind(("key", key.clone()))
            .bind(("doc", doc))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Replace name, email and platform links of a live employee
    pub async fn update(&self, key: &str, draft: EmployeeDraft) -> RepoResult<EmployeeRecord> {
        if self.find_by_id(key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Employee {} not found", key)));
        }

        if let Some(other) = self.find_by_email(&draft.email).await?
            && other.key != key
        {
            return Err(RepoError::Duplicate(format!(
                "Employee email '{}' already exists",
                draft.email
            )));
        }

        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('employee', $key) SET \
                    name = $name, \
                    email = $email, \
                    platforms = $platforms, \
                    updated_at = $now \
                 WHERE deleted_at = NONE RETURN record::id(id) AS key",
            )
            .bind(("key", key.to_string()))
            .bind(("name", draft.name))
            .bind(("email", draft.email))
            .bind(("platforms", serde_json::to_value(&draft.platforms)?))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;

        if rows.is_empty() {
            return Err(RepoError::NotFound(format!("Employee {} not found", key)));
        }

        self.find_by_id(key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", key)))
    }

    /// Remove the document. Returns false when nothing was deleted.
    pub async fn delete(&self, key: &str) -> RepoResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query("DELETE type::thing('employee', $key) RETURN record::id($before.id) AS key")
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }

    /// Mark a live employee deleted, storing the given (already marked) links
    pub async fn soft_delete(&self, key: &str, platforms: &[PlatformLink]) -> RepoResult<bool> {
        let now = now_millis();
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('employee', $key) SET \
                    deleted_at = $now, \
                    updated_at = $now, \
                    platforms = $platforms \
                 WHERE deleted_at = NONE RETURN record::id(id) AS key",
            )
            .bind(("key", key.to_string()))
            .bind(("now", now))
            .bind(("platforms", serde_json::to_value(platforms)?))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }
}
