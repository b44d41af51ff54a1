//! Remote response capability — the opaque "respond to a prompt" seam.
//!
//! The core consumes this trait only; production wiring supplies the
//! Hugging Face client, tests and keyless runs supply the canned responder.

pub mod canned;
pub mod hugging_face;

use async_trait::async_trait;

use crate::error::RemoteError;

pub use canned::CannedResponder;
pub use hugging_face::HuggingFaceResponder;

/// Produce a response for a user prompt. May take arbitrarily long and may
/// fail; callers must treat failure as recoverable.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, prompt: &str) -> Result<String, RemoteError>;
}
