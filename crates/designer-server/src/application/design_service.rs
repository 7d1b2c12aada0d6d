//! Design Application Service (Use Case)
//!
//! Orchestrates prompt loading, generation and persistence for designs.
//! Holds no state between calls: every operation reloads the stores.

use std::sync::Arc;

use serde_json::{Map, Value};

use designer::domain::{creation_input, reconciliation_input, unwrap_reconciled};
use designer::{
    lineage, Design, DesignRepository, DomainError, GenerationClient, LlmProvider, PromptKind,
    PromptRepository,
};

/// Application service for Design operations
pub struct DesignService<D: DesignRepository, P: PromptRepository, L: LlmProvider> {
    designs: Arc<D>,
    prompts: Arc<P>,
    generator: GenerationClient<L>,
}

impl<D: DesignRepository, P: PromptRepository, L: LlmProvider> DesignService<D, P, L> {
    pub fn new(designs: Arc<D>, prompts: Arc<P>, provider: Arc<L>) -> Self {
        Self {
            designs,
            prompts,
            generator: GenerationClient::new(provider),
        }
    }

    /// Generate and store the first version of a design
    pub async fn create(
        &self,
        requirements: String,
        assumptions: Map<String, Value>,
        constraints: Vec<String>,
    ) -> Result<Design, DomainError> {
        if requirements.trim().is_empty() {
            return Err(DomainError::Validation(
                "Requirements cannot be empty.".to_string(),
            ));
        }
        self.ensure_configured()?;

        let prompts = self.prompts.load().await;
        let template = prompts.template(PromptKind::InitialGeneration);
        let input = creation_input(&requirements, &assumptions, &constraints);

        let content = self.generator.generate(template, &input).await?;

        let design = Design::generated(requirements, assumptions, constraints, content);
        self.designs.save(&design).await?;

        tracing::info!("Created design {} (v{})", design.id, design.version);

        Ok(design)
    }

    /// All designs, most recent first
    pub async fn list_all(&self) -> Vec<Design> {
        let mut designs: Vec<Design> = self.designs.load_all().await.into_values().collect();
        // Stable: equal timestamps keep document order
        designs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        designs
    }

    /// Get a design by ID
    pub async fn get_by_id(&self, id: &str) -> Result<Design, DomainError> {
        self.designs
            .load_all()
            .await
            .swap_remove(id)
            .ok_or_else(|| DomainError::not_found("Design", id))
    }

    /// Reconcile user edits into a new version of `design_id`.
    ///
    /// The parent record is left untouched.
    pub async fn update(&self, design_id: &str, user_edits: &str) -> Result<Design, DomainError> {
        if user_edits.trim().is_empty() {
            return Err(DomainError::Validation(
                "User edits cannot be empty.".to_string(),
            ));
        }
        self.ensure_configured()?;

        let designs = self.designs.load_all().await;
        let parent = designs
            .get(design_id)
            .ok_or_else(|| DomainError::not_found("Design", design_id))?;

        let prompts = self.prompts.load().await;
        let template = prompts.template(PromptKind::Reconciliation);
        let input = reconciliation_input(&parent.design, user_edits);

        let reply = self.generator.generate(template, &input).await?;

        let design = Design::reconciled(parent, unwrap_reconciled(reply))?;
        self.designs.save(&design).await?;

        tracing::info!(
            "Reconciled design {} -> {} (v{})",
            design_id,
            design.id,
            design.version
        );

        Ok(design)
    }

    /// The design followed by its ancestors, newest first
    pub async fn lineage(&self, id: &str) -> Result<Vec<Design>, DomainError> {
        let designs = self.designs.load_all().await;
        lineage(&designs, id).ok_or_else(|| DomainError::not_found("Design", id))
    }

    fn ensure_configured(&self) -> Result<(), DomainError> {
        if self.generator.is_configured() {
            Ok(())
        } else {
            Err(DomainError::missing_credential())
        }
    }
}
