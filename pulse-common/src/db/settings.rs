//! Settings table access
//!
//! Runtime configuration lives in the `settings` key-value table. Missing
//! values fall back to built-in defaults; `ensure_setting` writes defaults
//! so the table documents the effective configuration.

use crate::Result;
use sqlx::SqlitePool;
use tracing::warn;

/// Read a setting value as a string
pub async fn get_string(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let value: Option<(Option<String>,)> =
        sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;

    Ok(value.and_then(|(v,)| v))
}

/// Read a setting as i64, falling back to a default on missing or
/// unparseable values
pub async fn get_i64(pool: &SqlitePool, key: &str, default: i64) -> Result<i64> {
    match get_string(pool, key).await? {
        Some(value) => match value.parse::<i64>() {
            Ok(parsed) => Ok(parsed),
            Err(_) => {
                warn!("Setting '{}' has non-integer value '{}', using default {}", key, value, default);
                Ok(default)
            }
        },
        None => Ok(default),
    }
}

/// Write a setting value
pub async fn set_setting(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a setting with its default value if it is missing or NULL
pub async fn ensure_setting(pool: &SqlitePool, key: &str, default: &str) -> Result<()> {
    let existing = get_string(pool, key).await?;
    if existing.is_none() {
        sqlx::query(
            "INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(key)
        .bind(default)
        .execute(pool)
        .await?;
    }
    Ok(())
}
