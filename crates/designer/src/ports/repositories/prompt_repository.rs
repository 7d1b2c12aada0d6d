//! Prompt Repository Port

use async_trait::async_trait;

use crate::domain::PromptSet;

/// Read-only access to prompt templates
#[async_trait]
pub trait PromptRepository: Send + Sync {
    /// Load the template set; missing or malformed documents yield an empty set
    async fn load(&self) -> PromptSet;
}
