//! Chat transcript store.
//!
//! Persists the message list only; the loading flag is transient UI state
//! and resets on restart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{PersistedStore, StoreState};

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        };
        write!(f, "{s}")
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub content: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>, role: MessageRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }
}

/// Chat store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// True while a remote response is pending. Not persisted.
    pub is_loading: bool,
}

/// Durable subset of [`ChatState`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatProjection {
    pub messages: Vec<ChatMessage>,
}

impl StoreState for ChatState {
    const NAME: &'static str = "chat_storage";
    type Projection = ChatProjection;

    fn project(&self) -> ChatProjection {
        ChatProjection {
            messages: self.messages.clone(),
        }
    }

    fn merge(defaults: Self, projection: ChatProjection) -> Self {
        Self {
            messages: projection.messages,
            ..defaults
        }
    }
}

/// Chat feature store.
pub type ChatStore = PersistedStore<ChatState>;

/// Domain operations over the chat store.
pub trait ChatOps {
    /// Append a message to the transcript.
    fn push_message(&self, content: impl Into<String>, role: MessageRole);
    fn set_loading(&self, loading: bool);
    fn clear_messages(&self);
}

impl ChatOps for Arc<ChatStore> {
    fn push_message(&self, content: impl Into<String>, role: MessageRole) {
        let message = ChatMessage::new(content, role);
        self.update(move |mut s| {
            s.messages.push(message);
            s
        });
    }

    fn set_loading(&self, loading: bool) {
        self.update(move |mut s| {
            s.is_loading = loading;
            s
        });
    }

    fn clear_messages(&self) {
        self.update(|mut s| {
            s.messages.clear();
            s
        });
    }
}
