//! Flow sequencer — onboarding traversal, gating, skip-ahead, and the
//! monetization hand-off.

use std::sync::Arc;

use tracing::debug;

use crate::features::auth::{AuthOps, AuthStore, User};
use crate::features::onboarding::{OnboardingOps, OnboardingStore};
use crate::flow::monetization::{MonetizationState, PaywallAction};
use crate::flow::step::{
    AnswerMap, DEFAULT_SKIP_TARGET, StepDescriptor, default_onboarding_steps,
};

/// Sequencer configuration. Both the step list and the skip landing index
/// are explicit data so the flow stays extensible without touching the
/// sequencer.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    pub steps: Vec<StepDescriptor>,
    /// Index the skip affordance jumps to.
    pub skip_target: usize,
}

impl FlowConfig {
    /// `steps` must be non-empty; a skip target outside the list simply
    /// makes [`FlowSequencer::skip`] a no-op.
    pub fn new(steps: Vec<StepDescriptor>, skip_target: usize) -> Self {
        Self { steps, skip_target }
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self::new(default_onboarding_steps(), DEFAULT_SKIP_TARGET)
    }
}

/// Result of a navigation operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The sequencer moved (possibly into the paywall).
    Moved,
    /// The current step's gate is unsatisfied; nothing changed.
    Gated,
    /// Navigation is not permitted from the current state; nothing changed.
    Ignored,
}

/// Result of a monetization action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaywallOutcome {
    /// Still inside the monetization machine; render this state.
    Showing(MonetizationState),
    /// The flow finished; the host should leave onboarding.
    Completed,
    /// Monetization is not active; nothing changed.
    Ignored,
}

/// Onboarding wizard controller.
///
/// Created when onboarding begins and discarded once [`complete`]
/// (`Self::complete`) has fired. Wizard answers live here until completion,
/// at which point they are written into the onboarding store and the auth
/// store is marked onboarded (best-effort, not transactional).
pub struct FlowSequencer {
    config: FlowConfig,
    step_index: usize,
    answers: AnswerMap,
    monetization: MonetizationState,
    exit_offer_shown: bool,
    completed: bool,
    answers_store: Arc<OnboardingStore>,
    auth_store: Arc<AuthStore>,
}

impl FlowSequencer {
    pub fn new(
        config: FlowConfig,
        answers_store: Arc<OnboardingStore>,
        auth_store: Arc<AuthStore>,
    ) -> Self {
        Self {
            config,
            step_index: 0,
            answers: AnswerMap::new(),
            monetization: MonetizationState::Inactive,
            exit_offer_shown: false,
            completed: false,
            answers_store,
            auth_store,
        }
    }

    /// Current step index. Frozen once monetization is active.
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// Descriptor of the current step.
    pub fn step(&self) -> &StepDescriptor {
        &self.config.steps[self.step_index]
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn monetization(&self) -> MonetizationState {
        self.monetization
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Advance one step, entering the paywall from the last step.
    ///
    /// A no-op when the current step's gate is unsatisfied or when the
    /// monetization machine has taken over.
    pub fn go_next(&mut self) -> NavOutcome {
        if self.completed || self.monetization.is_active() {
            return NavOutcome::Ignored;
        }
        if !self.step().gate_satisfied(&self.answers) {
            debug!(step = self.step().id, "gate unsatisfied; staying put");
            return NavOutcome::Gated;
        }

        if self.step_index + 1 == self.config.steps.len() {
            self.monetization = MonetizationState::PaywallPrimary;
        } else {
            self.step_index += 1;
        }
        NavOutcome::Moved
    }

    /// Step back. No backward navigation out of monetization states.
    pub fn go_back(&mut self) -> NavOutcome {
        if self.completed || self.monetization.is_active() || self.step_index == 0 {
            return NavOutcome::Ignored;
        }
        self.step_index -= 1;
        NavOutcome::Moved
    }

    /// Capture an answer. Never navigates; hosts pair this with
    /// [`go_next`](Self::go_next) on auto-advance steps.
    pub fn record_answer(&mut self, key: AnswerKey, value: AnswerValue) {
        self.answers.insert(key, value);
    }

    /// Jump to `target`, bypassing intermediate gates.
    ///
    /// Only valid from a step marked skippable and only to an index inside
    /// the step list.
    pub fn skip_to(&mut self, target: usize) -> NavOutcome {
        if self.completed || self.monetization.is_active() {
            return NavOutcome::Ignored;
        }
        if !self.step().skippable || target >= self.config.steps.len() {
            debug!(
                step = self.step().id,
                target, "skip not permitted from here"
            );
            return NavOutcome::Ignored;
        }
        self.step_index = target;
        NavOutcome::Moved
    }

    /// Jump to the configured skip target.
    pub fn skip(&mut self) -> NavOutcome {
        self.skip_to(self.config.skip_target)
    }

    /// Act on the current monetization screen.
    ///
    /// Continue on the primary paywall reveals the secondary one; any close
    /// shows the exit offer exactly once and completes thereafter; the exit
    /// offer completes on either action.
    pub fn advance_monetization(&mut self, action: PaywallAction) -> PaywallOutcome {
        if self.completed {
            return PaywallOutcome::Ignored;
        }
        match (self.monetization, action) {
            (MonetizationState::Inactive, _) => PaywallOutcome::Ignored,
            (MonetizationState::PaywallPrimary, PaywallAction::Continue) => {
                self.monetization = MonetizationState::PaywallSecondary;
                PaywallOutcome::Showing(self.monetization)
            }
            (MonetizationState::PaywallSecondary, PaywallAction::Continue)
            | (MonetizationState::ExitOffer, _) => {
                self.complete();
                PaywallOutcome::Completed
            }
            (
                MonetizationState::PaywallPrimary | MonetizationState::PaywallSecondary,
                PaywallAction::Close,
            ) => self.try_exit(),
        }
    }

    fn try_exit(&mut self) -> PaywallOutcome {
        if self.exit_offer_shown {
            self.complete();
            return PaywallOutcome::Completed;
        }
        self.exit_offer_shown = true;
        self.monetization = MonetizationState::ExitOffer;
        PaywallOutcome::Showing(self.monetization)
    }

    /// Finish the flow: persist the collected answers, provision the local
    /// user, and mark onboarding complete. Idempotent — only the first
    /// call has any effect. Returns whether this call performed the
    /// completion.
    pub fn complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;

        self.answers_store.apply_answers(&self.answers);
        self.auth_store.set_user(User::local());
        self.auth_store.complete_onboarding();
        true
    }
}
