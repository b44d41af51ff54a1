//! Integration tests for the full onboarding flow: wizard traversal,
//! skip path, monetization walk, and the completion side effects.

use std::sync::Arc;

use easemind::app::App;
use easemind::flow::{
    AnswerKey, AnswerValue, FlowConfig, MonetizationState, NavOutcome, PaywallAction,
    PaywallOutcome,
};
use easemind::store::{MemoryBackend, StorageBackend};

async fn fresh_app() -> (App, Arc<MemoryBackend>) {
    let backend = Arc::new(MemoryBackend::new());
    let app = App::init(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;
    (app, backend)
}

#[tokio::test]
async fn full_walk_through_every_step_and_the_paywall() {
    let (app, _backend) = fresh_app().await;
    let mut flow = app.onboarding_flow(FlowConfig::default());

    // Marketing block.
    for expected in ["splash", "problem", "promise", "social_proof", "how_it_works"] {
        assert_eq!(flow.step().id, expected);
        assert_eq!(flow.go_next(), NavOutcome::Moved);
    }

    // Personalization taps auto-advance after each answer.
    flow.record_answer(AnswerKey::FocusArea, AnswerValue::text("Anxiety"));
    assert_eq!(flow.go_next(), NavOutcome::Moved);
    flow.record_answer(AnswerKey::TherapyExperience, AnswerValue::text("Never"));
    assert_eq!(flow.go_next(), NavOutcome::Moved);
    flow.record_answer(AnswerKey::OverwhelmedFrequency, AnswerValue::text("Often"));
    assert_eq!(flow.go_next(), NavOutcome::Moved);

    // Demographics requires both answers before continue works.
    assert_eq!(flow.step().id, "demographics");
    assert_eq!(flow.go_next(), NavOutcome::Gated);
    flow.record_answer(AnswerKey::Age, AnswerValue::number(28));
    flow.record_answer(AnswerKey::Gender, AnswerValue::text("Female"));
    assert_eq!(flow.go_next(), NavOutcome::Moved);

    // Loading, goal, privacy, then the paywall takes over.
    for expected in ["loading", "goal", "privacy"] {
        assert_eq!(flow.step().id, expected);
        assert_eq!(flow.go_next(), NavOutcome::Moved);
    }
    assert_eq!(flow.monetization(), MonetizationState::PaywallPrimary);

    // Start the trial from the secondary paywall.
    assert_eq!(
        flow.advance_monetization(PaywallAction::Continue),
        PaywallOutcome::Showing(MonetizationState::PaywallSecondary)
    );
    assert_eq!(
        flow.advance_monetization(PaywallAction::Continue),
        PaywallOutcome::Completed
    );

    // Completion wrote through to the stores.
    assert!(!app.needs_onboarding());
    let answers = app.onboarding.snapshot();
    assert_eq!(answers.focus_area.as_deref(), Some("Anxiety"));
    assert_eq!(answers.therapy_experience.as_deref(), Some("Never"));
    assert_eq!(answers.overwhelmed_frequency.as_deref(), Some("Often"));
    assert_eq!(answers.age, Some(28));
    assert_eq!(answers.gender.as_deref(), Some("Female"));
}

#[tokio::test]
async fn skipping_personalization_still_reaches_the_mandatory_steps() {
    let (app, _backend) = fresh_app().await;
    let mut flow = app.onboarding_flow(FlowConfig::default());

    for _ in 0..5 {
        flow.go_next();
    }
    assert_eq!(flow.step().id, "engagement");

    // Skip from inside the optional block lands on the loading step,
    // bypassing the demographics gate entirely.
    assert_eq!(flow.skip(), NavOutcome::Moved);
    assert_eq!(flow.step().id, "loading");

    assert_eq!(flow.go_next(), NavOutcome::Moved);
    assert_eq!(flow.go_next(), NavOutcome::Moved);
    assert_eq!(flow.go_next(), NavOutcome::Moved);
    assert_eq!(flow.monetization(), MonetizationState::PaywallPrimary);

    // No answers were captured; completion leaves the profile empty.
    flow.advance_monetization(PaywallAction::Close);
    flow.advance_monetization(PaywallAction::Close);
    assert!(flow.is_completed());
    assert_eq!(app.onboarding.snapshot(), Default::default());
    assert!(!app.needs_onboarding());
}

#[tokio::test]
async fn exit_offer_intercepts_the_first_close_only() {
    let (app, _backend) = fresh_app().await;
    let mut flow = app.onboarding_flow(FlowConfig::default());

    for _ in 0..5 {
        flow.go_next();
    }
    flow.skip();
    for _ in 0..3 {
        flow.go_next();
    }
    assert_eq!(flow.monetization(), MonetizationState::PaywallPrimary);

    assert_eq!(
        flow.advance_monetization(PaywallAction::Close),
        PaywallOutcome::Showing(MonetizationState::ExitOffer)
    );
    assert_eq!(
        flow.advance_monetization(PaywallAction::Close),
        PaywallOutcome::Completed
    );
}

#[tokio::test]
async fn completed_flow_survives_a_restart() {
    let backend = Arc::new(MemoryBackend::new());

    {
        let app = App::init(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;
        let mut flow = app.onboarding_flow(FlowConfig::default());
        flow.record_answer(AnswerKey::FocusArea, AnswerValue::text("Mood"));
        flow.complete();
        app.flush_all().await;
    }

    let restarted = App::init(backend).await;
    assert!(!restarted.needs_onboarding());
    assert_eq!(
        restarted.onboarding.snapshot().focus_area.as_deref(),
        Some("Mood")
    );
    let auth = restarted.auth.snapshot();
    assert!(auth.user.unwrap().onboarding_completed);
}

#[tokio::test]
async fn abandoned_wizard_leaves_no_trace() {
    let backend = Arc::new(MemoryBackend::new());

    {
        let app = App::init(Arc::clone(&backend) as Arc<dyn StorageBackend>).await;
        let mut flow = app.onboarding_flow(FlowConfig::default());
        flow.go_next();
        flow.record_answer(AnswerKey::FocusArea, AnswerValue::text("Relationships"));
        // Never completed — intermediate wizard state is ephemeral.
        app.flush_all().await;
    }

    let restarted = App::init(backend).await;
    assert!(restarted.needs_onboarding());
    assert!(restarted.onboarding.snapshot().focus_area.is_none());
}
