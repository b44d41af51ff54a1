//! Hugging Face inference API responder.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::RemoteError;
use crate::remote::Responder;

/// Base URL of the hosted inference API.
pub const DEFAULT_API_URL: &str = "https://api-inference.huggingface.co/models";

/// `Responder` backed by a hosted text-generation model.
pub struct HuggingFaceResponder {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl HuggingFaceResponder {
    pub fn new(model: &str, api_key: SecretString) -> Self {
        Self::with_base_url(DEFAULT_API_URL, model, api_key)
    }

    /// Point at a different API host (tests, self-hosted inference).
    pub fn with_base_url(base_url: &str, model: &str, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/{}", base_url.trim_end_matches('/'), model),
            api_key,
        }
    }
}

#[async_trait]
impl Responder for HuggingFaceResponder {
    async fn respond(&self, prompt: &str) -> Result<String, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&serde_json::json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| RemoteError::RequestFailed {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::RequestFailed {
                endpoint: self.endpoint.clone(),
                reason: format!("HTTP {status}"),
            });
        }

        let body: serde_json::Value =
            response
                .json()
                .await
                .map_err(|e| RemoteError::InvalidResponse {
                    endpoint: self.endpoint.clone(),
                    reason: e.to_string(),
                })?;

        // The generation endpoint returns `[{"generated_text": "..."}]`.
        let text = body
            .get(0)
            .and_then(|entry| entry.get("generated_text"))
            .and_then(|text| text.as_str())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| RemoteError::InvalidResponse {
                endpoint: self.endpoint.clone(),
                reason: "missing generated_text".to_string(),
            })?;

        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let responder = HuggingFaceResponder::with_base_url(
            "https://example.test/models/",
            "my-model",
            SecretString::from("key"),
        );
        assert_eq!(responder.endpoint, "https://example.test/models/my-model");
    }
}
