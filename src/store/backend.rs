//! Storage backend seam — async key-value persistence for store projections.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend-agnostic durable key-value storage.
///
/// Keys are store names; values are JSON-serialized projections. A read
/// that returns `None` and a read that fails are treated identically by
/// the caller (defaults apply), so backends should prefer returning errors
/// only for genuinely broken storage.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the serialized projection stored under `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the serialized projection for `key`, replacing any prior value.
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing a missing key is ok.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend for tests and ephemeral runs.
///
/// Shared via `Arc`, so two store instances pointed at the same backend see
/// each other's writes — which is exactly what the restart-simulation tests
/// rely on.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Query(format!("lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Query(format!("lock poisoned: {e}")))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Query(format!("lock poisoned: {e}")))?;
        entries.remove(key);
        Ok(())
    }
}
