use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use research_core::DiscoveryReport;

use crate::{ApiResponse, AppState};

#[derive(Deserialize)]
pub struct DiscoverQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

pub fn discovery_routes() -> Router<AppState> {
    Router::new().route("/api/research/discover", get(discover_niches))
}

/// Scan niche categories and return the highest-scoring keywords.
async fn discover_niches(
    State(state): State<AppState>,
    Query(query): Query<DiscoverQuery>,
) -> Json<ApiResponse<DiscoveryReport>> {
    let report = state
        .discovery
        .discover(query.category.as_deref(), query.limit.unwrap_or(20))
        .await;
    Json(ApiResponse::success(report))
}
