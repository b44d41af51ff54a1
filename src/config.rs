//! Configuration for the easemind binary, read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// App configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the libSQL storage file.
    pub db_path: PathBuf,
    /// Hugging Face model used for chat responses.
    pub hf_model: String,
    /// Inference API key. When absent, the canned responder is used.
    pub hf_api_key: Option<SecretString>,
    /// Directory for the rolling session log; stderr-only when unset.
    pub log_dir: Option<PathBuf>,
    /// Artificial think delay for the canned responder.
    pub canned_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/easemind.db"),
            hf_model: "mistralai/Mistral-7B-Instruct-v0.2".to_string(),
            hf_api_key: None,
            log_dir: None,
            canned_delay: Duration::from_millis(1500),
        }
    }
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `EASEMIND_DB_PATH`, `EASEMIND_HF_MODEL`, `HUGGING_FACE_API_KEY`,
    /// `EASEMIND_LOG_DIR`, `EASEMIND_CANNED_DELAY_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let canned_delay = match std::env::var("EASEMIND_CANNED_DELAY_MS") {
            Ok(raw) => {
                let ms: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "EASEMIND_CANNED_DELAY_MS".to_string(),
                    message: format!("expected milliseconds, got {raw:?}"),
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => defaults.canned_delay,
        };

        Ok(Self {
            db_path: std::env::var("EASEMIND_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            hf_model: std::env::var("EASEMIND_HF_MODEL").unwrap_or(defaults.hf_model),
            hf_api_key: std::env::var("HUGGING_FACE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .map(SecretString::from),
            log_dir: std::env::var("EASEMIND_LOG_DIR").ok().map(PathBuf::from),
            canned_delay,
        })
    }
}
