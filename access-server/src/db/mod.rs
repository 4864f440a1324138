//! Database Module
//!
//! Embedded SurrealDB: RocksDB on disk, or the in-memory engine when the
//! configured path is `memory`.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Path value selecting the in-memory engine
pub const MEMORY_PATH: &str = "memory";

const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS admin SCHEMALESS;
DEFINE INDEX IF NOT EXISTS admin_email ON TABLE admin FIELDS email UNIQUE;
DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE INDEX IF NOT EXISTS employee_email ON TABLE employee FIELDS email UNIQUE;
DEFINE TABLE IF NOT EXISTS platform SCHEMALESS;
DEFINE INDEX IF NOT EXISTS platform_name ON TABLE platform FIELDS name_key UNIQUE;
"#;

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the store, select namespace/database and apply the schema
    pub async fn new(path: &str, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db = if path == MEMORY_PATH {
            Surreal::new::<Mem>(()).await
        } else {
            if let Some(parent) = std::path::Path::new(path).parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::database(format!("Failed to create database directory: {e}"))
                })?;
            }
            Surreal::new::<RocksDb>(path).await
        }
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select database: {e}")))?;

        db.query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(path = %path, namespace = %namespace, "Database ready");

        Ok(Self { db })
    }
}
