//! pulse-sa library interface
//!
//! Exposes the application state and router so integration tests can
//! drive the service in-process.

pub mod api;
pub mod db;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::services::lexicon::LexiconScorer;
use crate::services::resolver::SentimentResolver;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Provider chain for classification
    pub resolver: Arc<SentimentResolver>,
    /// Lexicon scorer for the emotion read path
    pub scorer: LexiconScorer,
    /// Whether a remote provider is in the chain (surfaced by /health)
    pub remote_configured: bool,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool, resolver: SentimentResolver, remote_configured: bool) -> Self {
        Self {
            db,
            resolver: Arc::new(resolver),
            scorer: LexiconScorer::new(),
            remote_configured,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::tweet_routes())
        .merge(api::stats_routes())
        .merge(api::analysis_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
