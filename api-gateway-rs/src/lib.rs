//! HTTP front end for the log triage service
//!
//! Routes:
//! - `POST /summarize` - analyze raw log text
//! - `GET /health` - liveness probe
//! - anything else - 404 `{ "error": "Route not found" }`

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use config_rs::AppConfig;
use log_analyzer::{build_analyzer, FallbackAnalyzer};
use serde::Serialize;
use shared_types::ErrorEnvelope;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod error_middleware;
pub mod request_id;
pub mod summarize;
pub mod validation;

pub use error::{ApiError, StartupError, UnhandledError};
pub use request_id::{RequestId, REQUEST_ID_HEADER};

use error::ROUTE_NOT_FOUND_MESSAGE;
use error_middleware::handle_unhandled_errors;
use request_id::assign_request_id;
use summarize::summarize_handler;

/// Shared application state, immutable after startup
pub struct AppState {
    pub config: AppConfig,
    pub analyzer: FallbackAnalyzer,
    started_at: Instant,
}

impl AppState {
    /// Build state with the analyzer selected by `config`
    pub fn new(config: AppConfig) -> Self {
        let analyzer = build_analyzer(&config.provider);
        Self::with_analyzer(config, analyzer)
    }

    pub fn with_analyzer(config: AppConfig, analyzer: FallbackAnalyzer) -> Self {
        Self {
            config,
            analyzer,
            started_at: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub provider: &'static str,
    pub uptime_seconds: u64,
}

/// GET /health - Health check endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        service: "log-triage-api",
        provider: state.analyzer.primary_name(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

async fn not_found_handler() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorEnvelope::new(ROUTE_NOT_FOUND_MESSAGE)),
    )
}

/// CORS restricted to the configured origin, credentials allowed
pub fn build_cors(origin: &str) -> Result<CorsLayer, StartupError> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|_| StartupError::InvalidOrigin(origin.to_string()))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

/// Build the router with its middleware chain
///
/// Layer order, outermost first: CORS, tracing, request id, error boundary,
/// handler. The body limit is enforced inside the summarize handler.
pub fn create_router(state: Arc<AppState>) -> Result<Router, StartupError> {
    let cors = build_cors(&state.config.server.cors_origin)?;

    let router = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/summarize",
            post(summarize_handler).fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .layer(middleware::from_fn(handle_unhandled_errors))
        .layer(middleware::from_fn(assign_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// Bind and serve until ctrl-c
pub async fn serve(config: AppConfig) -> Result<(), StartupError> {
    let address = config.server.bind_address();
    let state = Arc::new(AppState::new(config));
    let app = create_router(state.clone())?;

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!("API server running on {}", address);
    tracing::info!("Health check: http://{}/health", address);
    tracing::info!("AI Provider: {}", state.config.provider.kind);
    tracing::info!("CORS origin: {}", state.config.server.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
}
