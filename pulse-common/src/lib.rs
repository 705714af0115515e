//! # Pulse Common Library
//!
//! Shared code for the Pulse sentiment analytics services including:
//! - Error types
//! - Configuration loading and root folder resolution
//! - Database initialization and settings access
//! - Canonical sentiment types

pub mod config;
pub mod db;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{AnalysisMethod, SentimentLabel, SentimentResult};
