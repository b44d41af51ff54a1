//! Onboarding answers store — the personalization profile captured by the
//! wizard. Fully persisted.
//!
//! Wizard state is ephemeral; the sequencer writes into this store only at
//! completion (see `flow::sequencer`).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::flow::step::{AnswerKey, AnswerMap, AnswerValue};
use crate::store::{PersistedStore, StoreState};

/// Answers collected during onboarding. All optional — a skipped
/// personalization section leaves its fields unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    pub focus_area: Option<String>,
    pub therapy_experience: Option<String>,
    pub overwhelmed_frequency: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl StoreState for OnboardingAnswers {
    const NAME: &'static str = "onboarding_storage";
    type Projection = OnboardingAnswers;

    fn project(&self) -> OnboardingAnswers {
        self.clone()
    }

    fn merge(_defaults: Self, projection: OnboardingAnswers) -> Self {
        projection
    }
}

impl OnboardingAnswers {
    /// Merge a wizard answer map into the profile. Unset keys are left as
    /// they are; a non-integer age is ignored.
    pub fn apply(mut self, answers: &AnswerMap) -> Self {
        for (key, value) in answers {
            match (key, value) {
                (AnswerKey::FocusArea, AnswerValue::Text(v)) => {
                    self.focus_area = Some(v.clone());
                }
                (AnswerKey::TherapyExperience, AnswerValue::Text(v)) => {
                    self.therapy_experience = Some(v.clone());
                }
                (AnswerKey::OverwhelmedFrequency, AnswerValue::Text(v)) => {
                    self.overwhelmed_frequency = Some(v.clone());
                }
                (AnswerKey::Age, AnswerValue::Number(v)) => {
                    self.age = u32::try_from(*v).ok();
                }
                (AnswerKey::Gender, AnswerValue::Text(v)) => {
                    self.gender = Some(v.clone());
                }
                _ => {}
            }
        }
        self
    }
}

/// Onboarding feature store.
pub type OnboardingStore = PersistedStore<OnboardingAnswers>;

/// Domain operations over the onboarding store.
pub trait OnboardingOps {
    fn set_focus_area(&self, area: impl Into<String>);
    fn set_therapy_experience(&self, experience: impl Into<String>);
    fn set_overwhelmed_frequency(&self, frequency: impl Into<String>);
    fn set_age(&self, age: u32);
    fn set_gender(&self, gender: impl Into<String>);
    /// Merge a completed wizard's answer map into the profile.
    fn apply_answers(&self, answers: &AnswerMap);
    /// Clear every answer (new onboarding attempt).
    fn reset(&self);
}

impl OnboardingOps for Arc<OnboardingStore> {
    fn set_focus_area(&self, area: impl Into<String>) {
        let area = area.into();
        self.update(move |mut s| {
            s.focus_area = Some(area);
            s
        });
    }

    fn set_therapy_experience(&self, experience: impl Into<String>) {
        let experience = experience.into();
        self.update(move |mut s| {
            s.therapy_experience = Some(experience);
            s
        });
    }

    fn set_overwhelmed_frequency(&self, frequency: impl Into<String>) {
        let frequency = frequency.into();
        self.update(move |mut s| {
            s.overwhelmed_frequency = Some(frequency);
            s
        });
    }

    fn set_age(&self, age: u32) {
        self.update(move |mut s| {
            s.age = Some(age);
            s
        });
    }

    fn set_gender(&self, gender: impl Into<String>) {
        let gender = gender.into();
        self.update(move |mut s| {
            s.gender = Some(gender);
            s
        });
    }

    fn apply_answers(&self, answers: &AnswerMap) {
        let answers = answers.clone();
        self.update(move |s| s.apply(&answers));
    }

    fn reset(&self) {
        self.update(|_| OnboardingAnswers::default());
    }
}
