//! libSQL backend — async `StorageBackend` implementation.
//!
//! One `store_state` key-value table holds every store's projection as a
//! JSON text column. Supports local file and in-memory databases.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::StorageError;
use crate::store::backend::StorageBackend;

const INIT_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS store_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// libSQL key-value backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Open(format!("Failed to create storage directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        info!(path = %path.display(), "Storage opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                StorageError::Open(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;

        let backend = Self {
            db: Arc::new(db),
            conn,
        };
        backend.init_schema().await?;
        Ok(backend)
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .execute(INIT_SCHEMA, ())
            .await
            .map_err(|e| StorageError::Open(format!("init_schema: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for LibSqlBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut rows = self
            .conn
            .query(
                "SELECT value FROM store_state WHERE key = ?1",
                params![key],
            )
            .await
            .map_err(|e| StorageError::Query(format!("read: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let value: String = row
                    .get(0)
                    .map_err(|e| StorageError::Query(format!("read: {e}")))?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Query(format!("read: {e}"))),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO store_state (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now],
            )
            .await
            .map_err(|e| StorageError::Query(format!("write: {e}")))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM store_state WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("remove: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_roundtrip() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        assert!(backend.read("journal_storage").await.unwrap().is_none());

        backend
            .write("journal_storage", r#"{"entries":[]}"#)
            .await
            .unwrap();
        assert_eq!(
            backend.read("journal_storage").await.unwrap().as_deref(),
            Some(r#"{"entries":[]}"#)
        );
    }

    #[tokio::test]
    async fn upsert_replaces_value() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        backend.write("k", "first").await.unwrap();
        backend.write("k", "second").await.unwrap();
        assert_eq!(backend.read("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn remove_then_read_is_none() {
        let backend = LibSqlBackend::new_memory().await.unwrap();
        backend.write("k", "v").await.unwrap();
        backend.remove("k").await.unwrap();
        assert!(backend.read("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn local_file_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("easemind.db");

        {
            let backend = LibSqlBackend::new_local(&path).await.unwrap();
            backend.write("auth_storage", r#"{"ok":true}"#).await.unwrap();
        }

        let reopened = LibSqlBackend::new_local(&path).await.unwrap();
        assert_eq!(
            reopened.read("auth_storage").await.unwrap().as_deref(),
            Some(r#"{"ok":true}"#)
        );
    }
}
