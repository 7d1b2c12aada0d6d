//! Design Routes - generation, listing and reconciliation
//!
//! HTTP handlers that delegate to DesignService for business logic.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use designer::DomainError;

use crate::models::{CreateDesignRequest, DesignResponse, ErrorResponse, UpdateDesignRequest};
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain failure to its status code and `detail` body
fn api_error(e: DomainError) -> ApiError {
    let status = match &e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Configuration(_)
        | DomainError::GenerationFormat(_)
        | DomainError::GenerationService(_)
        | DomainError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("Design request failed: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            detail: e.to_string(),
        }),
    )
}

/// Generate a new design
#[utoipa::path(
    post,
    path = "/generate_design",
    request_body = CreateDesignRequest,
    responses(
        (status = 200, description = "Design generated", body = DesignResponse),
        (status = 400, description = "Requirements empty", body = ErrorResponse),
        (status = 500, description = "Missing credential or generation failure", body = ErrorResponse)
    ),
    tag = "Design"
)]
pub async fn generate_design(
    State(state): State<AppState>,
    Json(payload): Json<CreateDesignRequest>,
) -> Result<Json<DesignResponse>, ApiError> {
    let design = state
        .design_service
        .create(payload.requirements, payload.assumptions, payload.constraints)
        .await
        .map_err(api_error)?;

    Ok(Json(design.into()))
}

/// List all designs, most recent first
#[utoipa::path(
    get,
    path = "/list_designs",
    responses(
        (status = 200, description = "All stored designs", body = Vec<DesignResponse>)
    ),
    tag = "Design"
)]
pub async fn list_designs(State(state): State<AppState>) -> Json<Vec<DesignResponse>> {
    let designs = state.design_service.list_all().await;
    Json(designs.into_iter().map(Into::into).collect())
}

/// Reconcile user edits into a new design version
#[utoipa::path(
    post,
    path = "/update_design",
    request_body = UpdateDesignRequest,
    responses(
        (status = 200, description = "New design version", body = DesignResponse),
        (status = 400, description = "User edits empty", body = ErrorResponse),
        (status = 404, description = "Design not found", body = ErrorResponse),
        (status = 500, description = "Missing credential or generation failure", body = ErrorResponse)
    ),
    tag = "Design"
)]
pub async fn update_design(
    State(state): State<AppState>,
    Json(payload): Json<UpdateDesignRequest>,
) -> Result<Json<DesignResponse>, ApiError> {
    let design = state
        .design_service
        .update(&payload.design_id, &payload.user_edits)
        .await
        .map_err(api_error)?;

    Ok(Json(design.into()))
}

/// Get design by ID
#[utoipa::path(
    get,
    path = "/design/{design_id}",
    params(
        ("design_id" = String, Path, description = "Design ID")
    ),
    responses(
        (status = 200, description = "Design found", body = DesignResponse),
        (status = 404, description = "Design not found", body = ErrorResponse)
    ),
    tag = "Design"
)]
pub async fn get_design(
    State(state): State<AppState>,
    Path(design_id): Path<String>,
) -> Result<Json<DesignResponse>, ApiError> {
    let design = state
        .design_service
        .get_by_id(&design_id)
        .await
        .map_err(api_error)?;

    Ok(Json(design.into()))
}

/// Get a design and its ancestors, newest first
#[utoipa::path(
    get,
    path = "/design/{design_id}/lineage",
    params(
        ("design_id" = String, Path, description = "Design ID")
    ),
    responses(
        (status = 200, description = "Design lineage", body = Vec<DesignResponse>),
        (status = 404, description = "Design not found", body = ErrorResponse)
    ),
    tag = "Design"
)]
pub async fn get_design_lineage(
    State(state): State<AppState>,
    Path(design_id): Path<String>,
) -> Result<Json<Vec<DesignResponse>>, ApiError> {
    let chain = state
        .design_service
        .lineage(&design_id)
        .await
        .map_err(api_error)?;

    Ok(Json(chain.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate_design", post(generate_design))
        .route("/list_designs", get(list_designs))
        .route("/update_design", post(update_design))
        .route("/design/:design_id", get(get_design))
        .route("/design/:design_id/lineage", get(get_design_lineage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::adapters::{JsonDesignRepository, JsonPromptRepository, OpenAiConfig, OpenAiProvider};
    use crate::application::DesignService;

    struct TestApp {
        router: Router,
        _dir: tempfile::TempDir,
    }

    fn app(backend: &MockServer, api_key: Option<&str>) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let provider = OpenAiProvider::new(OpenAiConfig {
            api_key: api_key.map(str::to_string),
            base_url: backend.uri(),
            ..OpenAiConfig::default()
        })
        .unwrap();

        let service = DesignService::new(
            Arc::new(JsonDesignRepository::new(dir.path().join("designs.json"))),
            Arc::new(JsonPromptRepository::new(dir.path().join("prompts.json"))),
            Arc::new(provider),
        );
        let state = AppState {
            design_service: Arc::new(service),
        };

        TestApp {
            router: router().with_state(state),
            _dir: dir,
        }
    }

    fn reply_with(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-5",
            "output": [{
                "type": "message",
                "content": [{"type": "output_text", "text": text}]
            }]
        }))
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_generate_then_update_flow() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(reply_with(r#"{"services":["api","db"]}"#))
            .up_to_n_times(1)
            .mount(&backend)
            .await;
        Mock::given(method("POST"))
            .and(path("/responses"))
            .respond_with(reply_with(
                r#"{"updated_design":{"services":["api","db","cache"]}}"#,
            ))
            .mount(&backend)
            .await;

        let test = app(&backend, Some("sk-test"));

        let (status, created) = send(
            &test.router,
            post_json(
                "/generate_design",
                json!({
                    "requirements": "Design a URL shortener",
                    "assumptions": {"scale": "1M/day"},
                    "constraints": ["low latency"]
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["version"], 1);
        assert!(created["parent_id"].is_null());
        assert_eq!(created["design"], json!({"services": ["api", "db"]}));

        let id = created["id"].as_str().unwrap().to_string();
        let (status, updated) = send(
            &test.router,
            post_json(
                "/update_design",
                json!({"design_id": id, "user_edits": "add a cache layer"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["version"], 2);
        assert_eq!(updated["parent_id"], json!(id));
        assert_eq!(updated["assumptions"], json!({"scale": "1M/day"}));
        assert_eq!(
            updated["design"],
            json!({"services": ["api", "db", "cache"]})
        );

        let (status, listed) = send(&test.router, get_request("/list_designs")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0]["id"], updated["id"]);

        let (status, fetched) = send(&test.router, get_request(&format!("/design/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let updated_id = updated["id"].as_str().unwrap();
        let (status, chain) =
            send(&test.router, get_request(&format!("/design/{updated_id}/lineage"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(chain.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply_with("not json at all"))
            .mount(&backend)
            .await;

        let test = app(&backend, Some("sk-test"));

        let (status, body) = send(
            &test.router,
            post_json("/generate_design", json!({"requirements": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Requirements cannot be empty.");

        let (status, body) = send(
            &test.router,
            post_json(
                "/update_design",
                json!({"design_id": "missing", "user_edits": "add a cache"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Design not found");

        let (status, body) = send(
            &test.router,
            post_json("/generate_design", json!({"requirements": "Design a chat app"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid JSON response from AI:"));

        let (status, _) = send(&test.router, get_request("/design/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, listed) = send(&test.router, get_request("/list_designs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_missing_credential_is_server_error() {
        let backend = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply_with("{}"))
            .expect(0)
            .mount(&backend)
            .await;

        let test = app(&backend, None);

        let (status, body) = send(
            &test.router,
            post_json("/generate_design", json!({"requirements": "Design a chat app"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("OPENAI_API_KEY"));
    }
}
