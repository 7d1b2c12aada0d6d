//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    ApiInfo, CreateDesignRequest, DesignResponse, ErrorResponse, UpdateDesignRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        super::design::generate_design,
        super::design::list_designs,
        super::design::update_design,
        super::design::get_design,
        super::design::get_design_lineage,
    ),
    info(
        title = "AI System Designer API",
        version = "0.1.0",
        description = "Generates system designs with an LLM and keeps every reconciliation as a new immutable version.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Design", description = "Design - generation, listing and reconciliation"),
    ),
    components(
        schemas(
            DesignResponse,
            CreateDesignRequest,
            UpdateDesignRequest,
            ErrorResponse,
            ApiInfo,
            crate::HealthCheck,
        )
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documents_every_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/generate_design",
            "/list_designs",
            "/update_design",
            "/design/{design_id}",
            "/design/{design_id}/lineage",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_every_declared_tag_is_used() {
        let doc = ApiDoc::openapi();
        let used: Vec<String> = doc
            .paths
            .paths
            .values()
            .flat_map(|item| item.operations.values())
            .flat_map(|op| op.tags.clone().unwrap_or_default())
            .collect();

        for tag in doc.tags.unwrap_or_default() {
            assert!(used.contains(&tag.name), "unused tag {}", tag.name);
        }
    }
}
