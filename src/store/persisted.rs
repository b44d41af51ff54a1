//! Reactive persisted store — one in-memory value, atomic updates, and a
//! best-effort durable projection.
//!
//! In-memory state is the source of truth. The durable copy is a projection
//! (a subset of fields) written fire-and-forget after every update and
//! merged back over defaults on startup. Storage failures are never fatal:
//! a store that cannot read or write simply behaves like a fresh install.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::store::backend::StorageBackend;

/// State held by a [`PersistedStore`].
///
/// `Projection` is the strict subset of fields written to durable storage;
/// everything else is transient and resets to its default on restart.
/// Stores that persist everything use `Projection = Self`.
pub trait StoreState: Clone + Send + Sync + 'static {
    /// Durable-storage key for this store.
    const NAME: &'static str;

    /// Serializable subset of the state written to storage.
    type Projection: Serialize + DeserializeOwned + Send + 'static;

    /// Extract the durable subset. Must be pure and side-effect-free;
    /// violating this is a programming error, not a runtime fault.
    fn project(&self) -> Self::Projection;

    /// Merge a rehydrated projection over default state.
    fn merge(defaults: Self, projection: Self::Projection) -> Self;
}

type Listener<S> = Box<dyn Fn(&S) + Send + Sync>;
type Listeners<S> = Arc<Mutex<Vec<(u64, Listener<S>)>>>;

/// Handle returned by [`PersistedStore::subscribe`].
///
/// Dropping the handle does NOT de-register the listener; call
/// [`Subscription::unsubscribe`] explicitly.
pub struct Subscription<S> {
    id: u64,
    listeners: Weak<Mutex<Vec<(u64, Listener<S>)>>>,
}

impl<S> Subscription<S> {
    /// De-register the listener. No-op if the store is already gone.
    pub fn unsubscribe(self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.lock().unwrap_or_else(|e| e.into_inner());
            listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Reactive container holding a value of `S` with durable projection.
///
/// All mutation goes through [`update`](Self::update); updates are
/// serialized by an internal lock, so the pure-fold property holds even
/// with multi-threaded callers. Listeners run synchronously inside
/// `update` and must not call back into the same store.
pub struct PersistedStore<S: StoreState> {
    value: RwLock<S>,
    listeners: Listeners<S>,
    next_listener_id: AtomicU64,
    backend: Arc<dyn StorageBackend>,
}

impl<S: StoreState> PersistedStore<S> {
    /// Create a store with `default` state, without touching storage.
    pub fn new(default: S, backend: Arc<dyn StorageBackend>) -> Arc<Self> {
        Arc::new(Self {
            value: RwLock::new(default),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: AtomicU64::new(0),
            backend,
        })
    }

    /// Create a store and rehydrate it from storage.
    ///
    /// Rehydration failures (missing key, parse error, read error) are
    /// swallowed and leave the default state in place — a store always
    /// opens successfully.
    pub async fn open(default: S, backend: Arc<dyn StorageBackend>) -> Arc<Self> {
        let store = Self::new(default, backend);
        store.rehydrate().await;
        store
    }

    /// Current value. Clones under a read lock; never blocks on I/O.
    pub fn snapshot(&self) -> S {
        self.value
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the value with `f(current)`, notify subscribers, persist.
    ///
    /// Subscribers are invoked synchronously in registration order with the
    /// new value; a panicking subscriber is caught and logged so the rest
    /// still run. The projection write happens on the tokio runtime
    /// fire-and-forget; a failed write is logged and the in-memory value
    /// stands.
    pub fn update(&self, f: impl FnOnce(S) -> S) {
        let snapshot = {
            let mut guard = self.value.write().unwrap_or_else(|e| e.into_inner());
            let next = f(guard.clone());
            *guard = next;
            guard.clone()
        };

        self.notify(&snapshot);
        self.persist(&snapshot);
    }

    /// Register a listener invoked on every update.
    pub fn subscribe(&self, listener: impl Fn(&S) + Send + Sync + 'static) -> Subscription<S> {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        listeners.push((id, Box::new(listener)));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Re-read storage and merge the projection over the current state.
    ///
    /// Called once by [`open`](Self::open); public so hosts can re-run it
    /// after an external storage change (and tests can simulate restarts).
    pub async fn rehydrate(&self) {
        let raw = match self.backend.read(S::NAME).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(store = S::NAME, "no persisted state; keeping defaults");
                return;
            }
            Err(e) => {
                debug!(store = S::NAME, "storage read failed: {e}; keeping defaults");
                return;
            }
        };

        let projection: S::Projection = match serde_json::from_str(&raw) {
            Ok(p) => p,
            Err(e) => {
                // Corrupt persisted data is treated as absent data.
                debug!(store = S::NAME, "discarding unreadable persisted state: {e}");
                return;
            }
        };

        let mut guard = self.value.write().unwrap_or_else(|e| e.into_inner());
        let merged = S::merge(guard.clone(), projection);
        *guard = merged;
    }

    /// Serialize and write the current projection, awaiting the result.
    ///
    /// `update` already persists fire-and-forget; this is for lifecycle
    /// points that want the write durable before proceeding (app going to
    /// background, test restart simulation).
    pub async fn flush(&self) {
        let projection = self.snapshot().project();
        let payload = match serde_json::to_string(&projection) {
            Ok(p) => p,
            Err(e) => {
                warn!(store = S::NAME, "failed to serialize projection: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.write(S::NAME, &payload).await {
            warn!(store = S::NAME, "failed to persist projection: {e}");
        }
    }

    fn notify(&self, snapshot: &S) {
        let listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        for (id, listener) in listeners.iter() {
            let outcome =
                std::panic::catch_unwind(AssertUnwindSafe(|| listener(snapshot)));
            if outcome.is_err() {
                warn!(store = S::NAME, listener = *id, "subscriber panicked");
            }
        }
    }

    fn persist(&self, snapshot: &S) {
        let payload = match serde_json::to_string(&snapshot.project()) {
            Ok(p) => p,
            Err(e) => {
                warn!(store = S::NAME, "failed to serialize projection: {e}");
                return;
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let backend = Arc::clone(&self.backend);
                handle.spawn(async move {
                    if let Err(e) = backend.write(S::NAME, &payload).await {
                        warn!(store = S::NAME, "failed to persist projection: {e}");
                    }
                });
            }
            Err(_) => {
                debug!(store = S::NAME, "no async runtime; skipping persistence");
            }
        }
    }
}
