//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod json_file;
pub mod openai;

// Re-exports
pub use json_file::{JsonDesignRepository, JsonPromptRepository};
pub use openai::{OpenAiConfig, OpenAiProvider};
