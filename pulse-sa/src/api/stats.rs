//! Aggregated statistics API
//!
//! Thin handlers over the aggregation queries; every endpoint is
//! read-only and computes over the full corpus at call time.

use axum::{extract::State, routing::get, Json, Router};

use crate::db::analytics::{
    self, BrandBreakdown, HeatmapCell, SentimentTotal, TimelinePoint,
};
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/stats/sentiment
///
/// Count and mean score per sentiment label.
pub async fn sentiment_stats(State(state): State<AppState>) -> ApiResult<Json<Vec<SentimentTotal>>> {
    let totals = analytics::sentiment_totals(&state.db).await?;
    Ok(Json(totals))
}

/// GET /api/stats/brands
///
/// Per-brand sentiment distribution with totals.
pub async fn brand_stats(State(state): State<AppState>) -> ApiResult<Json<Vec<BrandBreakdown>>> {
    let breakdowns = analytics::brand_breakdown(&state.db).await?;
    Ok(Json(breakdowns))
}

/// GET /api/stats/timeline
///
/// Daily sentiment counts, ascending by date.
pub async fn sentiment_timeline(State(state): State<AppState>) -> ApiResult<Json<Vec<TimelinePoint>>> {
    let timeline = analytics::sentiment_timeline(&state.db).await?;
    Ok(Json(timeline))
}

/// GET /api/stats/heatmap
///
/// Hour-of-day by day-of-week sentiment counts.
pub async fn sentiment_heatmap(State(state): State<AppState>) -> ApiResult<Json<Vec<HeatmapCell>>> {
    let cells = analytics::sentiment_heatmap(&state.db).await?;
    Ok(Json(cells))
}

/// Build statistics routes
pub fn stats_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stats/sentiment", get(sentiment_stats))
        .route("/api/stats/brands", get(brand_stats))
        .route("/api/stats/timeline", get(sentiment_timeline))
        .route("/api/stats/heatmap", get(sentiment_heatmap))
}
