//! Persistence substrate — reactive stores and their durable backends.

pub mod backend;
pub mod libsql_backend;
pub mod persisted;

pub use backend::{MemoryBackend, StorageBackend};
pub use libsql_backend::LibSqlBackend;
pub use persisted::{PersistedStore, StoreState, Subscription};
