use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::RecommendationResponse,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub titles: usize,
    pub loaded_at: DateTime<Utc>,
}

// Handlers

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        titles: state.catalog().len(),
        loaded_at: state.loaded_at,
    })
}

/// Get all titles, in catalog order, for populating a picker
pub async fn get_titles(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog().titles().map(str::to_string).collect())
}

/// Recommend movies similar to the selected title
///
/// Unknown titles still get recommendations; only a missing `title`
/// parameter is rejected.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let selected = query
        .title
        .ok_or_else(|| AppError::InvalidInput("Missing `title` query parameter".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        selected = %selected,
        "Processing recommendation request"
    );

    let recommendations = state.recommender.recommend_cards(&selected).await;

    tracing::info!(
        request_id = %request_id,
        count = recommendations.len(),
        "Recommendations ready"
    );

    Ok(Json(RecommendationResponse {
        selected,
        recommendations,
    }))
}
