//! HTTP API handlers for pulse-sa

pub mod analysis;
pub mod health;
pub mod stats;
pub mod tweets;

pub use analysis::analysis_routes;
pub use health::health_routes;
pub use stats::stats_routes;
pub use tweets::tweet_routes;
