//! Composition root — constructs and rehydrates every feature store.
//!
//! Stores are explicitly constructed, dependency-injected instances; there
//! is no ambient global state. Hosts (and tests) build an `App` per
//! process and hand out `Arc` references to whoever needs them.

use std::sync::Arc;

use crate::features::auth::{AuthState, AuthStore};
use crate::features::chat::{ChatState, ChatStore};
use crate::features::exercise::{ExerciseState, ExerciseStore};
use crate::features::journal::{JournalState, JournalStore};
use crate::features::onboarding::{OnboardingAnswers, OnboardingStore};
use crate::flow::{FlowConfig, FlowSequencer};
use crate::store::{PersistedStore, StorageBackend};

/// Process-wide store registry.
pub struct App {
    pub auth: Arc<AuthStore>,
    pub chat: Arc<ChatStore>,
    pub journal: Arc<JournalStore>,
    pub exercises: Arc<ExerciseStore>,
    pub onboarding: Arc<OnboardingStore>,
}

impl App {
    /// Build all stores against one backend and rehydrate each. Never
    /// fails: stores that cannot rehydrate start from defaults.
    pub async fn init(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            auth: PersistedStore::open(AuthState::default(), Arc::clone(&backend)).await,
            chat: PersistedStore::open(ChatState::default(), Arc::clone(&backend)).await,
            journal: PersistedStore::open(JournalState::default(), Arc::clone(&backend)).await,
            exercises: PersistedStore::open(ExerciseState::default(), Arc::clone(&backend))
                .await,
            onboarding: PersistedStore::open(OnboardingAnswers::default(), backend).await,
        }
    }

    /// Whether the onboarding flow should run on this start.
    pub fn needs_onboarding(&self) -> bool {
        self.auth.snapshot().is_onboarding
    }

    /// Build a wizard wired to this app's stores.
    pub fn onboarding_flow(&self, config: FlowConfig) -> FlowSequencer {
        FlowSequencer::new(config, Arc::clone(&self.onboarding), Arc::clone(&self.auth))
    }

    /// Await a durable write of every store's projection (app going to
    /// background or shutting down).
    pub async fn flush_all(&self) {
        self.auth.flush().await;
        self.chat.flush().await;
        self.journal.flush().await;
        self.exercises.flush().await;
        self.onboarding.flush().await;
    }
}
