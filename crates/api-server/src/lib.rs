//! HTTP surface for the market research engine.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use research_core::ResearchError;
use research_orchestrator::{NicheDiscovery, ResearchOrchestrator};

pub mod discovery_routes;
pub mod research_routes;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ResearchOrchestrator>,
    pub discovery: Arc<NicheDiscovery>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ResearchOrchestrator>) -> Self {
        let discovery = Arc::new(NicheDiscovery::new(Arc::clone(&orchestrator)));
        Self {
            orchestrator,
            discovery,
        }
    }
}

/// Uniform response envelope for every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Route-level error wrapper. Invalid input maps to 400, everything
/// else to 500.
pub struct AppError(anyhow::Error);

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0.downcast_ref::<ResearchError>() {
            Some(ResearchError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => {
                tracing::error!("Request failed: {:#}", self.0);
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
        };
        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Assemble the full application router.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(research_routes::research_routes())
        .merge(discovery_routes::discovery_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = AppState::new(Arc::new(ResearchOrchestrator::new()));
    let app = app_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8001);
    let addr = format!("{}:{}", host, port);

    tracing::info!("NicheLens API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
