//! Completion access for the assistant.
//!
//! The pipeline talks to a [`LlmProvider`] trait object; the one real
//! implementation is the Gemini HTTP client in [`gemini`]. Tests substitute
//! stubs at this seam.

mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;

use crate::error::CompletionError;

/// Generation parameters sent with every completion call.
///
/// Calibrated for deterministic, grounded output over creative variety —
/// the prompt already carries the data the reply must stick to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 40,
            top_p: 0.8,
            max_output_tokens: 1024,
        }
    }
}

/// A fully assembled completion request: one prompt, fixed parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            params: GenerationParams::default(),
        }
    }
}

/// A completion backend. Stateless; safe to share across sessions.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Model identifier, for logs.
    fn model_name(&self) -> &str;

    /// Run one completion and return the reply text. No retries: transient
    /// failures are the caller's to handle.
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}
