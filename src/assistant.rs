//! Assistant service — chat orchestration over the transcript store and
//! the remote response capability.

use std::sync::Arc;

use tracing::warn;

use crate::features::chat::{ChatOps, ChatStore, MessageRole};
use crate::remote::Responder;

/// Opening line seeded into an empty transcript.
pub const GREETING: &str = "Hi there! I'm your AI companion. How are you feeling today?";

/// Shown instead of a reply when the remote call fails. Failure is
/// recoverable by design; nothing propagates to the host.
pub const FALLBACK_RESPONSE: &str =
    "I'm having trouble responding right now, but I'm still here with you. \
     Could you tell me a little more?";

/// Drives a conversation: transcript writes, the loading flag, and the
/// remote round trip with its fallback.
pub struct AssistantService {
    chat: Arc<ChatStore>,
    responder: Arc<dyn Responder>,
}

impl AssistantService {
    pub fn new(chat: Arc<ChatStore>, responder: Arc<dyn Responder>) -> Self {
        Self { chat, responder }
    }

    /// Seed the welcome message if the transcript is empty.
    pub fn greet_if_empty(&self) {
        if self.chat.snapshot().messages.is_empty() {
            self.chat.push_message(GREETING, MessageRole::Assistant);
        }
    }

    /// Send a user message and append the assistant's reply.
    ///
    /// The loading flag is set for the duration of the remote call and
    /// always cleared, even on failure. Returns the reply text (the
    /// fallback line when the remote call failed).
    pub async fn send(&self, user_text: impl Into<String>) -> String {
        let user_text = user_text.into();
        self.chat.push_message(user_text.clone(), MessageRole::User);
        self.chat.set_loading(true);

        let reply = match self.responder.respond(&user_text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("remote response failed: {e}");
                FALLBACK_RESPONSE.to_string()
            }
        };

        self.chat.push_message(reply.clone(), MessageRole::Assistant);
        self.chat.set_loading(false);
        reply
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::RemoteError;
    use crate::features::chat::ChatState;
    use crate::store::{MemoryBackend, PersistedStore};

    /// Stub responder for service tests (no real API calls).
    struct StubResponder {
        fail: bool,
    }

    #[async_trait]
    impl Responder for StubResponder {
        async fn respond(&self, prompt: &str) -> Result<String, RemoteError> {
            if self.fail {
                Err(RemoteError::RequestFailed {
                    endpoint: "stub".to_string(),
                    reason: "down".to_string(),
                })
            } else {
                Ok(format!("echo: {prompt}"))
            }
        }
    }

    fn service(fail: bool) -> (AssistantService, Arc<ChatStore>) {
        let chat = PersistedStore::new(ChatState::default(), Arc::new(MemoryBackend::new()));
        let service = AssistantService::new(
            Arc::clone(&chat),
            Arc::new(StubResponder { fail }),
        );
        (service, chat)
    }

    #[tokio::test]
    async fn greet_if_empty_seeds_exactly_once() {
        let (service, chat) = service(false);
        service.greet_if_empty();
        service.greet_if_empty();

        let messages = chat.snapshot().messages;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, GREETING);
        assert_eq!(messages[0].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn send_appends_user_and_assistant_messages() {
        let (service, chat) = service(false);
        let reply = service.send("I feel anxious").await;

        assert_eq!(reply, "echo: I feel anxious");
        let snapshot = chat.snapshot();
        assert_eq!(snapshot.messages.len(), 2);
        assert_eq!(snapshot.messages[0].role, MessageRole::User);
        assert_eq!(snapshot.messages[1].content, "echo: I feel anxious");
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn remote_failure_yields_the_fallback_line() {
        let (service, chat) = service(true);
        let reply = service.send("hello?").await;

        assert_eq!(reply, FALLBACK_RESPONSE);
        let snapshot = chat.snapshot();
        assert_eq!(snapshot.messages[1].content, FALLBACK_RESPONSE);
        assert!(!snapshot.is_loading);
    }

    #[tokio::test]
    async fn loading_flag_is_raised_during_the_remote_call() {
        let (service, chat) = service(false);
        let saw_loading = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));

        let observer = Arc::clone(&saw_loading);
        chat.subscribe(move |state: &ChatState| {
            if state.is_loading {
                observer.store(true, std::sync::atomic::Ordering::SeqCst);
            }
        });

        service.send("hi").await;
        assert!(saw_loading.load(std::sync::atomic::Ordering::SeqCst));
        assert!(!chat.snapshot().is_loading);
    }
}
