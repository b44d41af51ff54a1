//! Exercise store — static catalog plus the user's completion set.
//!
//! Only the completion set is persisted; the catalog ships with the app
//! and is seeded fresh on every start.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::{PersistedStore, StoreState};

/// Category of a guided exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Meditation,
    Breathing,
    Mindfulness,
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Meditation => "meditation",
            Self::Breathing => "breathing",
            Self::Mindfulness => "mindfulness",
        };
        write!(f, "{s}")
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub kind: ExerciseKind,
    pub summary: String,
}

/// The built-in exercise catalog.
pub fn default_catalog() -> Vec<Exercise> {
    fn entry(
        id: &str,
        title: &str,
        description: &str,
        duration_minutes: u32,
        kind: ExerciseKind,
        summary: &str,
    ) -> Exercise {
        Exercise {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            duration_minutes,
            kind,
            summary: summary.to_string(),
        }
    }

    vec![
        entry(
            "1",
            "Deep Breathing",
            "Calm your mind with deep breathing exercises",
            5,
            ExerciseKind::Breathing,
            "This exercise helps reduce anxiety and stress through controlled breathing.",
        ),
        entry(
            "2",
            "Body Scan Meditation",
            "Increase awareness of your body and reduce tension",
            10,
            ExerciseKind::Meditation,
            "This meditation helps you become aware of sensations throughout your body.",
        ),
        entry(
            "3",
            "Mindful Walking",
            "Practice mindfulness while walking",
            15,
            ExerciseKind::Mindfulness,
            "This exercise helps you stay present by focusing on the sensations of walking.",
        ),
        entry(
            "4",
            "Gratitude Meditation",
            "Cultivate gratitude and positive emotions",
            8,
            ExerciseKind::Meditation,
            "This meditation helps you focus on things you're grateful for in your life.",
        ),
        entry(
            "5",
            "4-7-8 Breathing",
            "A relaxing breathing pattern to reduce anxiety",
            3,
            ExerciseKind::Breathing,
            "This breathing technique helps calm your nervous system quickly.",
        ),
    ]
}

/// Exercise store state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseState {
    /// Static catalog, seeded at construction. Not persisted.
    pub exercises: Vec<Exercise>,
    /// Ids of exercises the user has finished at least once.
    pub completed: BTreeSet<String>,
}

impl Default for ExerciseState {
    fn default() -> Self {
        Self {
            exercises: default_catalog(),
            completed: BTreeSet::new(),
        }
    }
}

/// Durable subset of [`ExerciseState`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseProjection {
    pub completed: BTreeSet<String>,
}

impl StoreState for ExerciseState {
    const NAME: &'static str = "exercise_storage";
    type Projection = ExerciseProjection;

    fn project(&self) -> ExerciseProjection {
        ExerciseProjection {
            completed: self.completed.clone(),
        }
    }

    fn merge(defaults: Self, projection: ExerciseProjection) -> Self {
        Self {
            completed: projection.completed,
            ..defaults
        }
    }
}

/// Exercise feature store.
pub type ExerciseStore = PersistedStore<ExerciseState>;

/// Domain operations over the exercise store.
pub trait ExerciseOps {
    /// Record a completion. Already-completed ids are kept once.
    fn mark_completed(&self, id: &str);
    fn is_completed(&self, id: &str) -> bool;
    fn exercise(&self, id: &str) -> Option<Exercise>;
}

impl ExerciseOps for Arc<ExerciseStore> {
    fn mark_completed(&self, id: &str) {
        let id = id.to_string();
        self.update(move |mut s| {
            s.completed.insert(id);
            s
        });
    }

    fn is_completed(&self, id: &str) -> bool {
        self.snapshot().completed.contains(id)
    }

    fn exercise(&self, id: &str) -> Option<Exercise> {
        self.snapshot().exercises.into_iter().find(|e| e.id == id)
    }
}
