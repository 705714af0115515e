//! Tweet record persistence
//!
//! Records are insert-only: created once by the classification pipeline,
//! then read many times by the analytics queries. There are no update or
//! delete paths.

use anyhow::{anyhow, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use pulse_common::types::{AnalysisMethod, SentimentLabel, SentimentResult};
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// A stored, labeled tweet
#[derive(Debug, Clone, Serialize)]
pub struct Tweet {
    pub guid: Uuid,
    pub text: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_score: f64,
    pub analysis_method: AnalysisMethod,
    pub timestamp: DateTime<Utc>,
    pub brand: String,
}

impl Tweet {
    /// Create a record from the resolver's output plus caller-supplied
    /// text and brand; timestamp is assigned here and never mutated
    pub fn new(text: String, sentiment: &SentimentResult, brand: Option<String>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            text,
            sentiment_label: sentiment.label,
            sentiment_score: sentiment.score,
            analysis_method: sentiment.method,
            timestamp: Utc::now(),
            brand: brand.unwrap_or_else(|| "default".to_string()),
        }
    }
}

/// Save a tweet record
pub async fn insert_tweet(pool: &SqlitePool, tweet: &Tweet) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tweets (guid, text, sentiment_label, sentiment_score, analysis_method, timestamp, brand)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(tweet.guid.to_string())
    .bind(&tweet.text)
    .bind(tweet.sentiment_label.as_str())
    .bind(tweet.sentiment_score)
    .bind(tweet.analysis_method.as_str())
    .bind(tweet.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
    .bind(&tweet.brand)
    .execute(pool)
    .await?;

    Ok(())
}

/// List tweets newest first with LIMIT/OFFSET pagination
pub async fn list_tweets(pool: &SqlitePool, page: i64, limit: i64) -> Result<Vec<Tweet>> {
    let offset = (page.max(1) - 1) * limit;

    let rows = sqlx::query(
        r#"
        SELECT guid, text, sentiment_label, sentiment_score, analysis_method, timestamp, brand
        FROM tweets
        ORDER BY timestamp DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_tweet).collect()
}

/// Total stored record count
pub async fn count_tweets(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tweets")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Fetch the most recent records, bounded
///
/// Used by the emotion analysis path so its cost is capped regardless of
/// corpus size.
pub async fn fetch_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Tweet>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, text, sentiment_label, sentiment_score, analysis_method, timestamp, brand
        FROM tweets
        ORDER BY timestamp DESC
        LIMIT ?
        "#,
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_tweet).collect()
}

/// Full-corpus scan of (text, label) for the keyword extractor
///
/// Only POSITIVE/NEGATIVE records are returned; NEUTRAL contributes to
/// neither keyword table.
pub async fn fetch_labeled_texts(pool: &SqlitePool) -> Result<Vec<(String, SentimentLabel)>> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        r#"
        SELECT text, sentiment_label
        FROM tweets
        WHERE sentiment_label IN ('POSITIVE', 'NEGATIVE')
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(text, label)| {
            let label = SentimentLabel::parse(&label)
                .ok_or_else(|| anyhow!("Unknown sentiment label in database: {}", label))?;
            Ok((text, label))
        })
        .collect()
}

fn row_to_tweet(row: &sqlx::sqlite::SqliteRow) -> Result<Tweet> {
    let guid_str: String = row.get("guid");
    let label_str: String = row.get("sentiment_label");
    let method_str: String = row.get("analysis_method");
    let timestamp_str: String = row.get("timestamp");

    Ok(Tweet {
        guid: Uuid::parse_str(&guid_str)?,
        text: row.get("text"),
        sentiment_label: SentimentLabel::parse(&label_str)
            .ok_or_else(|| anyhow!("Unknown sentiment label in database: {}", label_str))?,
        sentiment_score: row.get("sentiment_score"),
        analysis_method: AnalysisMethod::parse(&method_str)
            .ok_or_else(|| anyhow!("Unknown analysis method in database: {}", method_str))?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)?.with_timezone(&Utc),
        brand: row.get("brand"),
    })
}
