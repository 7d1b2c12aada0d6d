use anyhow::Context;
use axum::{http::HeaderValue, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;

use adapters::{JsonDesignRepository, JsonPromptRepository, OpenAiProvider};
use application::DesignService;
use config::ServerConfig;
use models::ApiInfo;

/// Type alias for the application service with concrete adapters
pub type AppDesignService = DesignService<JsonDesignRepository, JsonPromptRepository, OpenAiProvider>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub design_service: Arc<AppDesignService>,
}

#[derive(Serialize, ToSchema)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is running", body = HealthCheck)
    ),
    tag = "Health"
)]
async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "AI System Designer API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        message: "AI System Designer API".to_string(),
    })
}

/// CORS for the configured browser origins, credentials allowed
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("⚠️  Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    // Credentials rule out wildcards, so methods and headers mirror the request
    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    tracing::info!("🏗️  AI System Designer API initializing...");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;

    if config.openai.api_key.is_some() {
        tracing::info!("🔐 OpenAI credential configured (model {})", config.openai.model);
    } else {
        tracing::warn!("⚠️  No OPENAI_API_KEY set - generation requests will fail");
    }

    tracing::info!(
        "🗂️  Designs: {} | Prompts: {}",
        config.designs_file.display(),
        config.prompts_file.display()
    );

    // Initialize application services
    let designs = Arc::new(JsonDesignRepository::new(&config.designs_file));
    let prompts = Arc::new(JsonPromptRepository::new(&config.prompts_file));
    let provider = Arc::new(
        OpenAiProvider::new(config.openai.clone()).context("Failed to initialize OpenAI client")?,
    );
    let design_service = Arc::new(DesignService::new(designs, prompts, provider));

    let state = AppState { design_service };

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(routes::design::router())
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ AI System Designer API listening on {}", addr);

    axum::serve(listener, router).await.context("Server error")?;

    Ok(())
}
