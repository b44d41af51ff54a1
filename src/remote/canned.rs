//! Canned supportive responses for keyless runs and tests.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::time::Duration;

use crate::error::RemoteError;
use crate::remote::Responder;

/// The stock supportive lines the app ships with.
pub const CANNED_RESPONSES: &[&str] = &[
    "I understand how you're feeling. Would you like to talk more about what's causing these emotions?",
    "That sounds challenging. How have you been coping with this situation?",
    "I'm here to listen. What do you think would help you feel better right now?",
    "It's completely normal to feel that way. Have you tried any relaxation techniques that helped in the past?",
    "Thank you for sharing that with me. Would it help to explore some strategies for managing these feelings?",
    "I appreciate your openness. Let's think about some small steps you could take to address this.",
    "That's a common experience. Many people feel similarly in these situations.",
    "I'm sorry you're going through this. What kind of support would be most helpful right now?",
];

/// `Responder` that picks a random canned line, optionally after a short
/// artificial think delay.
pub struct CannedResponder {
    delay: Option<Duration>,
}

impl CannedResponder {
    pub fn new() -> Self {
        Self { delay: None }
    }

    /// Mimic remote think time (the UI shows its loading state meanwhile).
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, _prompt: &str) -> Result<String, RemoteError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let line = CANNED_RESPONSES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or("I'm here with you.");
        Ok(line.to_string())
    }
}
