//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad caller input; nothing was written
    #[error("{0}")]
    Validation(String),

    /// Generation backend credential missing; nothing was written
    #[error("{0}")]
    Configuration(String),

    #[error("{entity_type} not found")]
    NotFound { entity_type: String, id: String },

    /// Backend replied with text that is not JSON
    #[error("Invalid JSON response from AI: {0}")]
    GenerationFormat(String),

    /// Backend call itself failed
    #[error("OpenAI API error: {0}")]
    GenerationService(String),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn missing_credential() -> Self {
        Self::Configuration(
            "OpenAI API key not configured. Please set OPENAI_API_KEY environment variable."
                .to_string(),
        )
    }
}
