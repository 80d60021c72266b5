//! Provider trait — the abstraction over the generative-model collaborator.
//!
//! A Provider knows how to turn one assembled prompt into generated text.
//! The pipeline treats it as an opaque function: text in, text out, or a
//! typed failure — notably a distinguishable rate-limit condition that the
//! orchestrating layer presents to the user together with a retry delay.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gemini-2.5-flash-lite")
    pub model: String,

    /// The fully assembled prompt text
    pub prompt: String,
}

/// A completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// The core Provider trait.
///
/// The assistant pipeline calls `complete()` without knowing which backend
/// is configured. Errors come back as [`ProviderError`] values the pipeline
/// propagates untouched — rendering them (including the rate-limit retry
/// hint) is the orchestrator's job.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a prompt and get the generated text back.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;
}
