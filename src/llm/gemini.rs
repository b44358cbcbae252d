//! Gemini completion client.
//!
//! Wire format: POST `{base}/{model}:generateContent?key=...` with
//! `{contents:[{parts:[{text}]}], generationConfig:{...}}`; the reply text
//! lives at `candidates[0].content.parts[0].text`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::{API_KEY_ENV, AssistantConfig};
use crate::error::CompletionError;
use crate::llm::{CompletionRequest, LlmProvider};

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}

/// Upstream error body, decoded best-effort for diagnostics.
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
}

/// HTTP client for the Gemini completion endpoint.
pub struct GeminiClient {
    api_key: Option<SecretString>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// A missing key does not fail construction; it fails the first
    /// `complete()` call with `MissingCredential`, before any network I/O.
    pub fn new(config: &AssistantConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| CompletionError::Http {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.completion_base_url.clone(),
            client,
        })
    }

    #[cfg(test)]
    fn with_key(mut self, key: Option<SecretString>) -> Self {
        self.api_key = key;
        self
    }

    fn request_body(request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.params.temperature,
                top_k: request.params.top_k,
                top_p: request.params.top_p,
                max_output_tokens: request.params.max_output_tokens,
            },
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| CompletionError::MissingCredential {
                env_var: API_KEY_ENV.to_string(),
            })?;

        let url = format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.expose_secret())])
            .json(&Self::request_body(&request))
            .send()
            .await
            .map_err(|e| CompletionError::Http {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("status {status}"));
            return Err(CompletionError::Http { reason });
        }

        let parsed: GeminiResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::Http {
                    reason: format!("malformed response body: {e}"),
                })?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(CompletionError::EmptyReply)?;

        Ok(text)
    }
}
