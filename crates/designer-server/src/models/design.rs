//! Design - versioned system-design records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Design record as returned by every design endpoint
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DesignResponse {
    pub id: String,
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub requirements: String,
    #[schema(value_type = Object)]
    pub assumptions: serde_json::Map<String, serde_json::Value>,
    pub constraints: Vec<String>,
    #[schema(value_type = Object)]
    pub design: serde_json::Value,
    pub parent_id: Option<String>,
}

impl From<designer::Design> for DesignResponse {
    fn from(design: designer::Design) -> Self {
        Self {
            id: design.id,
            version: design.version,
            timestamp: design.timestamp,
            requirements: design.requirements,
            assumptions: design.assumptions,
            constraints: design.constraints,
            design: design.design,
            parent_id: design.parent_id,
        }
    }
}

// ============================================
// Request/Response DTOs
// ============================================

/// Generate design request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateDesignRequest {
    pub requirements: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub assumptions: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

/// Reconcile design request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateDesignRequest {
    pub design_id: String,
    pub user_edits: String,
}

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Root banner
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiInfo {
    pub message: String,
}
