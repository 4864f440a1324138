//! Admin Repository

use super::{BaseRepository, RepoError, RepoResult, decode_rows};
use crate::db::models::Admin;
use shared::util::{new_key, now_millis};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ADMIN_FIELDS: &str = "record::id(id) AS key, email, hash_pass, refresh_token_hash, created_at";

#[derive(Clone)]
pub struct AdminRepository {
    base: BaseRepository,
}

impl AdminRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find admin by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Admin>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {ADMIN_FIELDS} FROM admin WHERE email = $email LIMIT 1"
            ))
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(decode_rows(rows)?.into_iter().next())
    }

    /// Find admin by key
    pub async fn find_by_id(&self, key: &str) -> RepoResult<Option<Admin>> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(format!(
                "SELECT {ADMIN_FIELDS} FROM type::thing('admin', $key)"
            ))
            .bind(("key", key.to_string()))
            .await?
            .take(0)?;
        Ok(decode_rows(rows)?.into_iter().next())
    }

    /// Create an admin with an already hashed password
    pub async fn create(&self, email: &str, hash_pass: String) -> RepoResult<Admin> {
        if self.find_by_email(email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Admin '{}' already exists",
                email
            )));
        }

        let key = new_key();
        let doc = serde_json::json!({
            "email": email,
            "hash_pass": hash_pass,
            "created_at": now_millis(),
        });

        self.base
            .db()
            .query("CREATE type::thing('admin', $key) CONTENT $doc")
            .bind(("key", key.clone()))
            .bind(("doc", doc))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create admin".to_string()))
    }

    /// Unconditionally replace the stored refresh digest
    ///
    /// `None` clears it. Returns false when the admin does not exist.
    pub async fn set_refresh_hash(&self, key: &str, hash: Option<String>) -> RepoResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query("UPDATE type::thing('admin', $key) SET refresh_token_hash = $hash RETURN record::id(id) AS key")
            .bind(("key", key.to_string()))
            .bind(("hash", hash))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }

    /// Compare-and-swap the refresh digest
    ///
    /// Succeeds only while the stored digest still equals `expected`, so a
    /// token can be rotated exactly once.
    pub async fn rotate_refresh_hash(
        &self,
        key: &str,
        expected: &str,
        new_hash: String,
    ) -> RepoResult<bool> {
        let rows: Vec<serde_json::Value> = self
            .base
            .db()
            .query(
                "UPDATE type::thing('admin', $key) SET refresh_token_hash = $new \
                 WHERE refresh_token_hash = $expected RETURN record::id(id) AS key",
            )
            .bind(("key", key.to_string()))
            .bind(("expected", expected.to_string()))
            .bind(("new", new_hash))
            .await?
            .take(0)?;
        Ok(!rows.is_empty())
    }
}
