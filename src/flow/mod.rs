//! Onboarding flow — data-driven wizard sequencing and monetization.

pub mod monetization;
pub mod sequencer;
pub mod step;

pub use monetization::{MonetizationState, PaywallAction};
pub use sequencer::{FlowConfig, FlowSequencer, NavOutcome, PaywallOutcome};
pub use step::{
    AnswerKey, AnswerMap, AnswerValue, DEFAULT_SKIP_TARGET, StepDescriptor,
    default_onboarding_steps,
};
