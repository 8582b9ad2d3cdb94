use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use research_core::{category_names, HistoryRecord, KeywordAnalysis};
use research_orchestrator::CACHE_EXPIRY_HOURS;
use supply_analysis::SUPPLY_SOURCES;

use crate::{ApiResponse, AppError, AppState};

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct TrendingKeyword {
    pub keyword: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub source: &'static str,
    pub confidence: u32,
}

pub fn research_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/api/research/analyze/:keyword", get(analyze_keyword))
        .route("/api/research/history", get(get_history))
        .route("/api/research/trending", get(get_trending))
        .route("/api/research/sources", get(get_sources))
        .route("/api/research/export", get(export_csv))
        .route("/api/research/cache", delete(clear_cache))
}

async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "NicheLens API",
        "features": [
            "Multi-source supply aggregation",
            "Demand trend analysis",
            "Composite niche scoring",
            "Trend forecasting with confidence bands",
            "Seasonality analysis",
        ],
        "endpoints": [
            "/api/research/analyze/:keyword",
            "/api/research/discover",
            "/api/research/history",
            "/api/research/trending",
            "/api/research/sources",
            "/api/research/export",
        ],
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Full analysis for one keyword, cache-first.
async fn analyze_keyword(
    State(state): State<AppState>,
    Path(keyword): Path<String>,
) -> Result<Json<ApiResponse<KeywordAnalysis>>, AppError> {
    let result = state.orchestrator.analyze(&keyword).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Recently analyzed keywords, newest first.
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Json<ApiResponse<Vec<HistoryRecord>>> {
    let records = state.orchestrator.history(query.limit.unwrap_or(50));
    Json(ApiResponse::success(records))
}

/// Curated stock-photography keyword suggestions. A live trends feed
/// would be merged in here by a deployment that wires one up.
async fn get_trending() -> Json<ApiResponse<Vec<TrendingKeyword>>> {
    let suggestions = vec![
        TrendingKeyword { keyword: "Christmas 2025", kind: "Seasonal", source: "Stock Trends", confidence: 88 },
        TrendingKeyword { keyword: "New Year 2026", kind: "Seasonal", source: "Stock Trends", confidence: 85 },
        TrendingKeyword { keyword: "AI Technology", kind: "Technology", source: "Stock Trends", confidence: 92 },
        TrendingKeyword { keyword: "Sustainable Living", kind: "Lifestyle", source: "Stock Trends", confidence: 88 },
        TrendingKeyword { keyword: "Remote Work", kind: "Business", source: "Stock Trends", confidence: 85 },
        TrendingKeyword { keyword: "Digital Art", kind: "Creative", source: "Stock Trends", confidence: 82 },
        TrendingKeyword { keyword: "Mental Wellness", kind: "Health", source: "Stock Trends", confidence: 80 },
        TrendingKeyword { keyword: "Electric Vehicles", kind: "Technology", source: "Stock Trends", confidence: 85 },
    ];
    Json(ApiResponse::success(suggestions))
}

/// Supply-source registry and category list.
async fn get_sources() -> Json<serde_json::Value> {
    let sources: serde_json::Map<String, serde_json::Value> = SUPPLY_SOURCES
        .iter()
        .map(|s| {
            (
                s.id.to_string(),
                serde_json::json!({ "name": s.name, "weight": s.weight, "free": s.free }),
            )
        })
        .collect();

    Json(serde_json::json!({
        "sources": sources,
        "cache_expiry_hours": CACHE_EXPIRY_HOURS,
        "niche_categories": category_names(),
    }))
}

/// All fresh cached analyses as a CSV attachment.
async fn export_csv(State(state): State<AppState>) -> impl IntoResponse {
    let mut csv = String::from(
        "Keyword,Demand Score,Supply Count,Opportunity Score,Status,Growth %,Trend,Data Quality,Analyzed At\n",
    );

    for analysis in state.orchestrator.cached_analyses() {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            csv_field(&analysis.keyword),
            analysis.demand_score,
            analysis.supply_count,
            analysis.opportunity_score,
            analysis.status.as_str(),
            analysis.growth,
            analysis.trend.as_str(),
            analysis.data_quality.as_str(),
            analysis.analyzed_at.format("%Y-%m-%dT%H:%M:%S"),
        ));
    }

    let filename = format!(
        "nichelens_export_{}.csv",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );

    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        csv,
    )
}

/// Clear the result cache and history log.
async fn clear_cache(State(state): State<AppState>) -> Json<ApiResponse<String>> {
    state.orchestrator.clear_cache();
    Json(ApiResponse::success(
        "Cache and history cleared".to_string(),
    ))
}

/// Quote a CSV field if it contains a delimiter, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("minimalist"), "minimalist");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
