//! Derived analysis API: emotions, keywords, brand comparison

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::db::analytics::{self, BrandComparison};
use crate::error::{ApiError, ApiResult};
use crate::services::emotion::{self, EmotionRecord};
use crate::services::keywords::{self, KeywordAnalysis};
use crate::AppState;

/// Fallback when the emotion_sample_limit setting is unreadable
const DEFAULT_EMOTION_SAMPLE_LIMIT: i64 = 50;

/// POST /api/analysis/compare request
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub brands: Vec<String>,
}

/// GET /api/analysis/emotions
///
/// Emotion buckets over the most recent records, re-scored fresh; the
/// sample bound comes from the emotion_sample_limit setting.
pub async fn emotion_analysis(State(state): State<AppState>) -> ApiResult<Json<Vec<EmotionRecord>>> {
    let limit = pulse_common::db::settings::get_i64(
        &state.db,
        "emotion_sample_limit",
        DEFAULT_EMOTION_SAMPLE_LIMIT,
    )
    .await?;

    let records = emotion::analyze_recent(&state.db, &state.scorer, limit).await?;
    Ok(Json(records))
}

/// GET /api/analysis/keywords
///
/// Top keywords per sentiment class over the full corpus.
pub async fn keyword_analysis(State(state): State<AppState>) -> ApiResult<Json<KeywordAnalysis>> {
    let analysis = keywords::analyze_keywords(&state.db).await?;
    Ok(Json(analysis))
}

/// POST /api/analysis/compare
///
/// Sentiment comparison across the given brands. An empty brand list is a
/// client error, rejected before any query executes.
pub async fn comparative_analysis(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> ApiResult<Json<Vec<BrandComparison>>> {
    if request.brands.is_empty() {
        return Err(ApiError::BadRequest("No brands provided".to_string()));
    }

    let comparison = analytics::compare_brands(&state.db, &request.brands).await?;
    Ok(Json(comparison))
}

/// Build analysis routes
pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analysis/emotions", get(emotion_analysis))
        .route("/api/analysis/keywords", get(keyword_analysis))
        .route("/api/analysis/compare", post(comparative_analysis))
}
