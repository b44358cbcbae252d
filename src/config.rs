//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Environment variable holding the completion API key.
pub const API_KEY_ENV: &str = "TRUYEN_ASSIST_API_KEY";

/// Assistant configuration.
///
/// Everything is env-sourced with sensible defaults except the API key,
/// whose absence is surfaced once at startup rather than per turn.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Completion API key. `None` means no credential was configured; the
    /// completion client will fail fast with `MissingCredential`.
    pub api_key: Option<SecretString>,
    /// Completion model name.
    pub model: String,
    /// Base URL of the completion API.
    pub completion_base_url: String,
    /// Base URL of the story catalog backend.
    pub catalog_base_url: String,
    /// Timeout applied to every outbound HTTP call.
    pub http_timeout: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            completion_base_url: "https://generativelanguage.googleapis.com/v1beta/models"
                .to_string(),
            catalog_base_url: "https://api.truyenfull.example.com".to_string(),
            http_timeout: Duration::from_secs(10),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from the environment.
    ///
    /// A missing API key is an error here: it is the one fatal condition in
    /// this subsystem and must be reported at startup, not on first use.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self {
            api_key: Some(SecretString::from(std::env::var(API_KEY_ENV).map_err(
                |_| ConfigError::MissingEnvVar(API_KEY_ENV.to_string()),
            )?)),
            ..Self::default()
        };

        if let Ok(model) = std::env::var("TRUYEN_ASSIST_MODEL") {
            config.model = model;
        }
        if let Ok(url) = std::env::var("TRUYEN_ASSIST_COMPLETION_URL") {
            config.completion_base_url = url;
        }
        if let Ok(url) = std::env::var("TRUYEN_ASSIST_CATALOG_URL") {
            config.catalog_base_url = url;
        }
        if let Ok(secs) = std::env::var("TRUYEN_ASSIST_HTTP_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TRUYEN_ASSIST_HTTP_TIMEOUT_SECS".to_string(),
                message: format!("expected an integer number of seconds, got {secs:?}"),
            })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
