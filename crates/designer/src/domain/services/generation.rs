//! Generation Client - prompt composition and reply parsing
//!
//! Wraps an [`LlmProvider`] so that every call carries the architect
//! instruction, the operation's template and a labeled user-input block,
//! and every reply is parsed strictly as JSON.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::ports::LlmProvider;

/// Fixed instruction placed ahead of every template
pub const SYSTEM_INSTRUCTION: &str = "You are an expert system architect. Always respond with valid JSON that matches the requested schema exactly.";

/// Closing instruction placed after the user input
pub const CLOSING_INSTRUCTION: &str =
    "Please provide a structured JSON response following the schema described in the prompt.";

/// Envelope key a reconciliation reply may wrap its design in
pub const UPDATED_DESIGN_KEY: &str = "updated_design";

/// Combine instruction, template and user input into one request body
pub fn build_prompt(template: &str, user_input: &str) -> String {
    format!("{SYSTEM_INSTRUCTION}\n\n{template}\n\nUser Input:\n{user_input}\n\n{CLOSING_INSTRUCTION}")
}

/// Parse a reply strictly as JSON
pub fn parse_reply(text: &str) -> Result<Value, DomainError> {
    serde_json::from_str(text).map_err(|e| DomainError::GenerationFormat(e.to_string()))
}

/// Input block for a fresh design
pub fn creation_input(
    requirements: &str,
    assumptions: &serde_json::Map<String, Value>,
    constraints: &[String],
) -> String {
    format!(
        "Requirements: {}\nAssumptions: {}\nConstraints: {}",
        requirements,
        pretty(&Value::Object(assumptions.clone())),
        constraints.join(", ")
    )
}

/// Input block for reconciling `design` with free-text edits
pub fn reconciliation_input(design: &Value, user_edits: &str) -> String {
    format!(
        "Original Design: {}\nUser Edits: {}",
        pretty(design),
        user_edits
    )
}

/// Extract the design content from a reconciliation reply.
///
/// Backends answer either with an `{"updated_design": ...}` envelope or with
/// the design itself; both shapes are accepted.
pub fn unwrap_reconciled(reply: Value) -> Value {
    match reply {
        Value::Object(mut obj) if obj.contains_key(UPDATED_DESIGN_KEY) => obj
            .remove(UPDATED_DESIGN_KEY)
            .unwrap_or(Value::Null),
        other => other,
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Generation client over a concrete provider
pub struct GenerationClient<L: LlmProvider + ?Sized> {
    provider: Arc<L>,
}

impl<L: LlmProvider + ?Sized> Clone for GenerationClient<L> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<L: LlmProvider + ?Sized> GenerationClient<L> {
    pub fn new(provider: Arc<L>) -> Self {
        Self { provider }
    }

    /// Whether the backend has a credential to call with
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Issue one request for `template` + `user_input` and parse the reply
    pub async fn generate(&self, template: &str, user_input: &str) -> Result<Value, DomainError> {
        let prompt = build_prompt(template, user_input);

        let response = self.provider.complete(&prompt).await.map_err(|e| {
            tracing::warn!(
                "Generation call to {} ({}) failed: {}",
                self.provider.provider_name(),
                self.provider.model_id(),
                e
            );
            e
        })?;

        tracing::debug!(
            "Generation reply from {}: {} tokens",
            response.model,
            response.usage.total_tokens
        );

        parse_reply(&response.content).map_err(|e| {
            tracing::warn!("Generation reply is not valid JSON: {}", e);
            e
        })
    }
}
