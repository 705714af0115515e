//! Aggregation queries over the stored corpus
//!
//! All aggregations are read-only, idempotent, and computed over the
//! entire matching record set at call time (no caching, no incremental
//! maintenance). Cost scales with corpus size; the brand, timestamp, and
//! sentiment_label indexes keep the grouping tractable.

use anyhow::{anyhow, Result};
use pulse_common::types::SentimentLabel;
use serde::Serialize;
use sqlx::SqlitePool;

/// Count and mean score for one sentiment class
#[derive(Debug, Clone, Serialize)]
pub struct SentimentTotal {
    pub sentiment: SentimentLabel,
    pub count: i64,
    pub avg_score: f64,
}

/// One (sentiment, count, avg) cell within a brand
#[derive(Debug, Clone, Serialize)]
pub struct SentimentCell {
    pub sentiment: SentimentLabel,
    pub count: i64,
    pub avg_score: f64,
}

/// Per-brand sentiment distribution
#[derive(Debug, Clone, Serialize)]
pub struct BrandBreakdown {
    pub brand: String,
    pub sentiments: Vec<SentimentCell>,
    /// Total record count for the brand; equals the sum of cell counts
    pub total: i64,
}

/// Daily count for one (date, sentiment) pair
#[derive(Debug, Clone, Serialize)]
pub struct TimelinePoint {
    /// Calendar date as YYYY-MM-DD
    pub date: String,
    pub sentiment: SentimentLabel,
    pub count: i64,
}

/// Count for one (hour, weekday, sentiment) cell
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapCell {
    /// Hour of day, 0-23
    pub hour: i64,
    /// Day of week, 1=Sunday .. 7=Saturday
    pub day: i64,
    pub sentiment: SentimentLabel,
    pub count: i64,
}

/// One (brand, sentiment) comparison cell
#[derive(Debug, Clone, Serialize)]
pub struct BrandComparison {
    pub brand: String,
    pub sentiment: SentimentLabel,
    pub count: i64,
    pub avg_score: f64,
}

/// Group by sentiment label: count and mean score per label
pub async fn sentiment_totals(pool: &SqlitePool) -> Result<Vec<SentimentTotal>> {
    let rows: Vec<(String, i64, f64)> = sqlx::query_as(
        r#"
        SELECT sentiment_label, COUNT(*), AVG(sentiment_score)
        FROM tweets
        GROUP BY sentiment_label
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(label, count, avg_score)| {
            Ok(SentimentTotal {
                sentiment: parse_label(&label)?,
                count,
                avg_score,
            })
        })
        .collect()
}

/// Group by (brand, sentiment), then fold per brand
///
/// Mirrors a two-stage group pipeline: the SQL stage produces one row per
/// (brand, sentiment) cell; the fold re-groups cells under their brand and
/// sums counts into the per-brand total.
pub async fn brand_breakdown(pool: &SqlitePool) -> Result<Vec<BrandBreakdown>> {
    let rows: Vec<(String, String, i64, f64)> = sqlx::query_as(
        r#"
        SELECT brand, sentiment_label, COUNT(*), AVG(sentiment_score)
        FROM tweets
        GROUP BY brand, sentiment_label
        ORDER BY brand
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut breakdowns: Vec<BrandBreakdown> = Vec::new();
    for (brand, label, count, avg_score) in rows {
        let cell = SentimentCell {
            sentiment: parse_label(&label)?,
            count,
            avg_score,
        };

        match breakdowns.last_mut() {
            Some(current) if current.brand == brand => {
                current.total += count;
                current.sentiments.push(cell);
            }
            _ => breakdowns.push(BrandBreakdown {
                brand,
                sentiments: vec![cell],
                total: count,
            }),
        }
    }

    Ok(breakdowns)
}

/// Group by (calendar date, sentiment), ascending by date string
pub async fn sentiment_timeline(pool: &SqlitePool) -> Result<Vec<TimelinePoint>> {
    let rows: Vec<(String, String, i64)> = sqlx::query_as(
        r#"
        SELECT strftime('%Y-%m-%d', timestamp) AS date, sentiment_label, COUNT(*)
        FROM tweets
        GROUP BY date, sentiment_label
        ORDER BY date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(date, label, count)| {
            Ok(TimelinePoint {
                date,
                sentiment: parse_label(&label)?,
                count,
            })
        })
        .collect()
}

/// Group by (hour-of-day, day-of-week, sentiment)
///
/// Day numbering is 1=Sunday through 7=Saturday. No ordering guarantee.
pub async fn sentiment_heatmap(pool: &SqlitePool) -> Result<Vec<HeatmapCell>> {
    let rows: Vec<(i64, i64, String, i64)> = sqlx::query_as(
        r#"
        SELECT CAST(strftime('%H', timestamp) AS INTEGER) AS hour,
               CAST(strftime('%w', timestamp) AS INTEGER) + 1 AS day,
               sentiment_label,
               COUNT(*)
        FROM tweets
        GROUP BY hour, day, sentiment_label
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(hour, day, label, count)| {
            Ok(HeatmapCell {
                hour,
                day,
                sentiment: parse_label(&label)?,
                count,
            })
        })
        .collect()
}

/// Filter to the given brands, then group by (brand, sentiment)
///
/// The API layer rejects an empty brand list before this runs; an empty
/// list here is an error, never an empty-result query.
pub async fn compare_brands(pool: &SqlitePool, brands: &[String]) -> Result<Vec<BrandComparison>> {
    if brands.is_empty() {
        return Err(anyhow!("Brand list must not be empty"));
    }

    let placeholders = vec!["?"; brands.len()].join(", ");
    let sql = format!(
        r#"
        SELECT brand, sentiment_label, COUNT(*), AVG(sentiment_score)
        FROM tweets
        WHERE brand IN ({})
        GROUP BY brand, sentiment_label
        ORDER BY brand
        "#,
        placeholders
    );

    let mut query = sqlx::query_as::<_, (String, String, i64, f64)>(&sql);
    for brand in brands {
        query = query.bind(brand);
    }

    let rows = query.fetch_all(pool).await?;

    rows.into_iter()
        .map(|(brand, label, count, avg_score)| {
            Ok(BrandComparison {
                brand,
                sentiment: parse_label(&label)?,
                count,
                avg_score,
            })
        })
        .collect()
}

fn parse_label(label: &str) -> Result<SentimentLabel> {
    SentimentLabel::parse(label)
        .ok_or_else(|| anyhow!("Unknown sentiment label in database: {}", label))
}
