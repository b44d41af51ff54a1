//! Wizard step descriptors and captured answers.
//!
//! The step list is data: each descriptor carries its own gate and skip
//! eligibility, so the sequencer never branches on literal indices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Key for one captured onboarding answer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKey {
    FocusArea,
    TherapyExperience,
    OverwhelmedFrequency,
    Age,
    Gender,
}

impl std::fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FocusArea => "focus_area",
            Self::TherapyExperience => "therapy_experience",
            Self::OverwhelmedFrequency => "overwhelmed_frequency",
            Self::Age => "age",
            Self::Gender => "gender",
        };
        write!(f, "{s}")
    }
}

/// A captured answer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Number(i64),
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn number(value: i64) -> Self {
        Self::Number(value)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }
}

/// Answers collected so far, keyed by [`AnswerKey`].
pub type AnswerMap = BTreeMap<AnswerKey, AnswerValue>;

/// One wizard step.
///
/// The gate predicate is "all `requires` keys are present in the answer
/// map"; an empty list gates nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    /// Stable identifier, used by hosts to pick the screen to render.
    pub id: &'static str,
    /// Answer keys that must be captured before `go_next` may advance.
    pub requires: &'static [AnswerKey],
    /// Whether the skip affordance applies at this step.
    pub skippable: bool,
    /// Whether hosts advance immediately after capture (single-answer taps
    /// and the timed loading screen) instead of via an explicit continue.
    pub auto_advance: bool,
}

impl StepDescriptor {
    pub const fn plain(id: &'static str) -> Self {
        Self {
            id,
            requires: &[],
            skippable: false,
            auto_advance: false,
        }
    }

    /// Whether the gate holds for the given answers.
    pub fn gate_satisfied(&self, answers: &AnswerMap) -> bool {
        self.requires.iter().all(|key| answers.contains_key(key))
    }
}

/// The production onboarding step list.
///
/// Order matters: the optional personalization block (engagement through
/// demographics) is skippable and jumps to the loading step, which every
/// user passes through on the way to the goal and privacy screens.
pub fn default_onboarding_steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::plain("splash"),
        StepDescriptor::plain("problem"),
        StepDescriptor::plain("promise"),
        StepDescriptor::plain("social_proof"),
        StepDescriptor::plain("how_it_works"),
        StepDescriptor {
            id: "engagement",
            requires: &[],
            skippable: true,
            auto_advance: true,
        },
        StepDescriptor {
            id: "personalization_1",
            requires: &[],
            skippable: true,
            auto_advance: true,
        },
        StepDescriptor {
            id: "personalization_2",
            requires: &[],
            skippable: true,
            auto_advance: true,
        },
        StepDescriptor {
            id: "demographics",
            requires: &[AnswerKey::Age, AnswerKey::Gender],
            skippable: true,
            auto_advance: false,
        },
        StepDescriptor {
            id: "loading",
            requires: &[],
            skippable: false,
            auto_advance: true,
        },
        StepDescriptor::plain("goal"),
        StepDescriptor::plain("privacy"),
    ]
}

/// Index of the step the skip affordance jumps to in the default list
/// (the loading screen).
pub const DEFAULT_SKIP_TARGET: usize = 9;
