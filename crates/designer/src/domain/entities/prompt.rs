//! Prompt templates for the generation backend

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which operation a template steers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// High-level design from fresh requirements
    InitialGeneration,
    /// Merge user edits into an existing design
    Reconciliation,
}

impl PromptKind {
    /// Key under which the template is stored in the prompt document
    pub fn key(&self) -> &'static str {
        match self {
            PromptKind::InitialGeneration => "hld",
            PromptKind::Reconciliation => "reconcile",
        }
    }

    /// Built-in template used when the document has no entry
    pub fn default_template(&self) -> &'static str {
        match self {
            PromptKind::InitialGeneration => "Generate a high-level system design.",
            PromptKind::Reconciliation => "Reconcile design changes.",
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Named template strings loaded from the prompt document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptSet {
    templates: HashMap<String, String>,
}

impl PromptSet {
    pub fn new(templates: HashMap<String, String>) -> Self {
        Self { templates }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Template for `kind`, falling back to the built-in default
    pub fn template(&self, kind: PromptKind) -> &str {
        self.templates
            .get(kind.key())
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_template())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falls_back_to_defaults() {
        let prompts = PromptSet::empty();
        assert_eq!(
            prompts.template(PromptKind::InitialGeneration),
            "Generate a high-level system design."
        );
        assert_eq!(
            prompts.template(PromptKind::Reconciliation),
            "Reconcile design changes."
        );
    }

    #[test]
    fn test_stored_template_wins() {
        let mut templates = HashMap::new();
        templates.insert("hld".to_string(), "Return {\"services\": []}".to_string());
        let prompts = PromptSet::new(templates);

        assert_eq!(
            prompts.template(PromptKind::InitialGeneration),
            "Return {\"services\": []}"
        );
        assert_eq!(
            prompts.template(PromptKind::Reconciliation),
            "Reconcile design changes."
        );
    }
}
