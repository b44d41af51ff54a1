//! Feature stores — one `PersistedStore` instantiation per feature area.

pub mod auth;
pub mod chat;
pub mod exercise;
pub mod journal;
pub mod onboarding;

pub use auth::{AuthOps, AuthState, AuthStore, User};
pub use chat::{ChatMessage, ChatOps, ChatState, ChatStore, MessageRole};
pub use exercise::{Exercise, ExerciseKind, ExerciseOps, ExerciseState, ExerciseStore};
pub use journal::{JournalEntry, JournalOps, JournalPatch, JournalState, JournalStore, Mood};
pub use onboarding::{OnboardingAnswers, OnboardingOps, OnboardingStore};
