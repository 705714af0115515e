//! Database access layer for pulse-sa

pub mod analytics;
pub mod tweets;
