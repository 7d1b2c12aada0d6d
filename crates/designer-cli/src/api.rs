//! Designer API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for the designer server
pub struct DesignerClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Types
// ============================================

#[derive(Debug, Clone, Deserialize)]
pub struct DesignResponse {
    pub id: String,
    pub version: u32,
    pub timestamp: DateTime<Utc>,
    pub requirements: String,
    pub assumptions: serde_json::Map<String, serde_json::Value>,
    pub constraints: Vec<String>,
    pub design: serde_json::Value,
    pub parent_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDesignRequest {
    pub requirements: String,
    #[serde(default)]
    pub assumptions: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub constraints: Vec<String>,
}

#[derive(Debug, Serialize)]
struct UpdateDesignRequest<'a> {
    design_id: &'a str,
    user_edits: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

impl DesignerClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Generate a new design
    pub async fn generate(&self, request: &CreateDesignRequest) -> Result<DesignResponse> {
        let url = format!("{}/generate_design", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("Failed to connect to designer API")?;

        parse(resp).await
    }

    /// List all designs, most recent first
    pub async fn list(&self) -> Result<Vec<DesignResponse>> {
        let url = format!("{}/list_designs", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to designer API")?;

        parse(resp).await
    }

    /// Get a specific design
    pub async fn get(&self, design_id: &str) -> Result<DesignResponse> {
        let url = format!("{}/design/{}", self.base_url, design_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to designer API")?;

        parse(resp).await
    }

    /// Reconcile edits into a new version
    pub async fn update(&self, design_id: &str, user_edits: &str) -> Result<DesignResponse> {
        let url = format!("{}/update_design", self.base_url);
        let request = UpdateDesignRequest {
            design_id,
            user_edits,
        };
        let resp = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to connect to designer API")?;

        parse(resp).await
    }

    /// A design followed by its ancestors
    pub async fn lineage(&self, design_id: &str) -> Result<Vec<DesignResponse>> {
        let url = format!("{}/design/{}/lineage", self.base_url, design_id);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to connect to designer API")?;

        parse(resp).await
    }
}

/// Decode a success body, or fail with the server's `detail` message
async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.detail)
            .unwrap_or(body);
        bail!("API error ({}): {}", status, message);
    }

    resp.json().await.context("Failed to parse response")
}
