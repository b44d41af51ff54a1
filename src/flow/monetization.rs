//! Monetization sub-machine — paywall and exit-offer states shown after
//! the last wizard step.
//!
//! Once active, the step index is frozen and this machine alone decides
//! what renders. The exit offer is a one-time interception: after it has
//! been shown, every close action resolves directly to completion.

use serde::{Deserialize, Serialize};

/// Which monetization screen, if any, is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonetizationState {
    /// Normal wizard traversal; `step_index` drives rendering.
    Inactive,
    /// The free-trial pitch shown when the last step advances.
    PaywallPrimary,
    /// The plan-selection paywall reached via an explicit continue.
    PaywallSecondary,
    /// The one-time discount shown on the first close attempt.
    ExitOffer,
}

impl MonetizationState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

impl std::fmt::Display for MonetizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Inactive => "inactive",
            Self::PaywallPrimary => "paywall_primary",
            Self::PaywallSecondary => "paywall_secondary",
            Self::ExitOffer => "exit_offer",
        };
        write!(f, "{s}")
    }
}

/// How the user acted on the current monetization screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaywallAction {
    /// The affirmative button (continue for free / start trial / claim).
    Continue,
    /// The close/dismiss affordance.
    Close,
}
