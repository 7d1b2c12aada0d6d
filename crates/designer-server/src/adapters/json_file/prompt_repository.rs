//! JSON-file implementation of PromptRepository

use std::path::PathBuf;

use async_trait::async_trait;

use designer::{PromptRepository, PromptSet};

use super::read_document;

/// Prompt templates kept in one JSON object, name -> template string.
///
/// Read on every call; edits to the file apply to the next request.
pub struct JsonPromptRepository {
    path: PathBuf,
}

impl JsonPromptRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PromptRepository for JsonPromptRepository {
    async fn load(&self) -> PromptSet {
        let templates = read_document(&self.path)
            .await
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::String(template) => Some((name, template)),
                _ => None,
            })
            .collect();

        PromptSet::new(templates)
    }
}
