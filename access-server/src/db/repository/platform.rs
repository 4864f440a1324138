//! Platform Repository

use super::{BaseRepository, RepoError, RepoResult, decode_rows};
use crate::db::models::PlatformRecord;
use shared::util::{new_key, now_millis};
use std::collections::BTreeMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PLATFORM_FIELDS: &str =
    "record::id(id) AS key, name, api_endpoint, auth_method, credentials, created_at";

/// Validated platform content
#[derive(Debug, Clone)]
pub struct PlatformDraft {
    pub name: String,
    pub api_endpoint: Option<String>,
    pub auth_method: Option<String>,
    pub credentials: BTreeMap<String, String>,
}

#[derive(Clone)]
pub struct PlatformRepository {
    base: BaseRepository,
}

impl PlatformRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<PlatformRecord>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {PLATFORM_FIELDS} FROM platform ORDER BY created_at"
            ))
            .await?
            .take(0)?;
        decode_rows(rows)
    }

    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<PlatformRecord>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {PLATFORM_FIELDS} FROM type::thing('platform', $key)"
            ))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(decode_rows(rows)?.into_iter().next())
    }

    /// Find platform by name (case-insensitive)
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<PlatformRecord>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {PLATFORM_FIELDS} FROM platform WHERE name_key = $name_key LIMIT 1"
            ))
            .bind(("name_key", name.trim().to_lowercase()))
            .await?
            .take(0)?;
        Ok(decode_rows(rows)?.into_iter().next())
    }

    pub async fn create(&self, draft: PlatformDraft) -> RepoResult<PlatformRecord> {
        if self.find_by_name(&draft.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Platform '{}' already exists",
                draft.name
            )));
        }

        let key = new_key();
        let doc = serde_json::json!({
            "name_key": draft.name.to_lowercase(),
            "name": draft.name,
            "api_endpoint": draft.api_endpoint,
            "auth_method": draft.auth_method,
            "credentials": draft.credentials,
            "created_at": now_millis(),
        });

        self.base
            .db()
            .query("CREATE type::thing('platform', $key) CONTENT $doc")
            .bind(("key", key.clone()))
            .bind(("doc", doc))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create platform".to_string()))
    }

    /// Returns false when nothing was deleted
    pub async fn delete(&self, key: &str) -> RepoResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query("DELETE type::thing('platform', $key) RETURN record::id($before.id) AS key")
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }
}
