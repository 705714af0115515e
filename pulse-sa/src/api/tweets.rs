//! Tweet ingest and listing API
//!
//! POST runs the classification pipeline and persists the labeled record;
//! GET pages through stored records newest first. The classification path
//! never fails a request: provider trouble degrades to the lexicon
//! fallback inside the resolver.

use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::tweets::{self, Tweet};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/tweets request
#[derive(Debug, Deserialize)]
pub struct AddTweetRequest {
    /// Tweet text (required, non-empty)
    #[serde(default)]
    pub text: String,

    /// Grouping key; "default" when unspecified
    #[serde(default)]
    pub brand: Option<String>,
}

/// Query parameters for tweet listing
#[derive(Debug, Deserialize)]
pub struct TweetsQuery {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// GET /api/tweets response
#[derive(Debug, Serialize)]
pub struct TweetListResponse {
    pub tweets: Vec<Tweet>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

/// POST /api/tweets
///
/// Classify and store a tweet. Returns the stored record including its
/// generated id. Missing or empty text is a client error.
pub async fn add_tweet(
    State(state): State<AppState>,
    Json(request): Json<AddTweetRequest>,
) -> ApiResult<Json<Tweet>> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Tweet text is required".to_string()));
    }

    let sentiment = state.resolver.resolve(&request.text).await;

    let tweet = Tweet::new(request.text, &sentiment, request.brand);
    tweets::insert_tweet(&state.db, &tweet).await?;

    Ok(Json(tweet))
}

/// GET /api/tweets
///
/// Paginated listing, newest first.
pub async fn list_tweets(
    State(state): State<AppState>,
    Query(query): Query<TweetsQuery>,
) -> ApiResult<Json<TweetListResponse>> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, 100);

    let tweets = tweets::list_tweets(&state.db, page, limit).await?;
    let total = tweets::count_tweets(&state.db).await?;

    Ok(Json(TweetListResponse {
        tweets,
        page,
        limit,
        total,
    }))
}

/// Build tweet routes
pub fn tweet_routes() -> Router<AppState> {
    Router::new().route("/api/tweets", post(add_tweet).get(list_tweets))
}
