//! Emotion classification over recent records
//!
//! A presentation layer on top of the lexicon scorer: maps a
//! (polarity, subjectivity) pair into one of six emotion buckets via an
//! ordered decision table. Polarity and subjectivity are never persisted;
//! they are recomputed fresh for each request over a bounded recent subset
//! of the corpus.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db;
use crate::services::lexicon::LexiconScorer;

/// Length of the display excerpt, in characters
const EXCERPT_CHARS: usize = 100;

/// Emotion bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Emotion {
    Joy,
    Anger,
    Sadness,
    Trust,
    Surprise,
    Neutral,
}

/// One classified record, computed on read
#[derive(Debug, Clone, Serialize)]
pub struct EmotionRecord {
    /// Truncated text excerpt for display
    pub text: String,
    pub emotion: Emotion,
    pub polarity: f64,
    pub subjectivity: f64,
    pub timestamp: DateTime<Utc>,
}

/// Classify a (polarity, subjectivity) pair into an emotion bucket
///
/// The rules form an ordered decision table: they are evaluated
/// top-to-bottom and the first match wins. Order is part of the contract —
/// (0.6, 0.8) is Joy, not Surprise.
pub fn classify_emotion(polarity: f64, subjectivity: f64) -> Emotion {
    if polarity > 0.5 && subjectivity > 0.5 {
        Emotion::Joy
    } else if polarity < -0.5 && subjectivity > 0.5 {
        Emotion::Anger
    } else if polarity < -0.3 && subjectivity < 0.5 {
        Emotion::Sadness
    } else if polarity > 0.3 && subjectivity < 0.3 {
        Emotion::Trust
    } else if subjectivity > 0.7 {
        Emotion::Surprise
    } else {
        Emotion::Neutral
    }
}

/// Classify the most recent stored records
///
/// Fetches at most `limit` records (newest first), re-scores each text
/// with the lexicon scorer, and buckets it. Cost is bounded by the limit,
/// not the corpus size.
pub async fn analyze_recent(
    pool: &SqlitePool,
    scorer: &LexiconScorer,
    limit: i64,
) -> Result<Vec<EmotionRecord>> {
    let tweets = db::tweets::fetch_recent(pool, limit).await?;

    let records = tweets
        .into_iter()
        .map(|tweet| {
            let (polarity, subjectivity) = scorer.score_text(&tweet.text);
            EmotionRecord {
                text: excerpt(&tweet.text),
                emotion: classify_emotion(polarity, subjectivity),
                polarity,
                subjectivity,
                timestamp: tweet.timestamp,
            }
        })
        .collect();

    Ok(records)
}

/// First 100 characters plus a continuation marker
///
/// Char-based, so multi-byte text cannot split a code point.
fn excerpt(text: &str) -> String {
    let mut excerpt: String = text.chars().take(EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}
