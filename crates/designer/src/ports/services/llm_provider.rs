//! LLM Provider Port
//!
//! Abstract interface for the text-generation backend.
//! One prompt in, one text reply out; no streaming, no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Response from a single completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated text content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub input_tokens: u32,
    /// Tokens in the reply
    pub output_tokens: u32,
    /// Total tokens used
    pub total_tokens: u32,
}

/// LLM Provider interface
///
/// # Example
///
/// ```rust,ignore
/// use designer::ports::LlmProvider;
///
/// struct OpenAiProvider { /* ... */ }
///
/// #[async_trait]
/// impl LlmProvider for OpenAiProvider {
///     async fn complete(&self, prompt: &str) -> Result<CompletionResponse, DomainError> {
///         // Call the Responses API
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send `prompt` as a single request.
    ///
    /// Transport, auth, quota and status failures are
    /// `DomainError::GenerationService`.
    async fn complete(&self, prompt: &str) -> Result<CompletionResponse, DomainError>;

    /// Whether a credential is present; checked before any call is issued
    fn is_configured(&self) -> bool;

    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Get the model ID being used
    fn model_id(&self) -> &str;
}
