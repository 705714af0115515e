//! Tests for database initialization and the settings table

use pulse_common::db::{init_database, settings};

#[tokio::test]
async fn test_init_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pulse.db");
    assert!(!db_path.exists());

    let _pool = init_database(&db_path).await.expect("Should create database");
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("pulse.db");

    let pool = init_database(&db_path).await.unwrap();
    drop(pool);

    // Second init over the same file must succeed without clobbering anything
    let pool = init_database(&db_path).await.expect("Re-init should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tweets")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_tweets_schema_columns() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("pulse.db")).await.unwrap();

    // Insert a row touching every column to validate the schema
    sqlx::query(
        r#"
        INSERT INTO tweets (guid, text, sentiment_label, sentiment_score, analysis_method, timestamp, brand)
        VALUES ('g-1', 'hello', 'POSITIVE', 0.9, 'Lexicon', '2025-01-01T00:00:00Z', 'default')
        "#,
    )
    .execute(&pool)
    .await
    .expect("Schema should accept a full row");
}

#[tokio::test]
async fn test_default_settings_initialized() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("pulse.db")).await.unwrap();

    let timeout = settings::get_i64(&pool, "hf_request_timeout_ms", 0).await.unwrap();
    assert_eq!(timeout, 5000);

    let limit = settings::get_i64(&pool, "emotion_sample_limit", 0).await.unwrap();
    assert_eq!(limit, 50);
}

#[tokio::test]
async fn test_setting_roundtrip_and_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("pulse.db")).await.unwrap();

    assert_eq!(settings::get_string(&pool, "no_such_key").await.unwrap(), None);
    assert_eq!(settings::get_i64(&pool, "no_such_key", 42).await.unwrap(), 42);

    settings::set_setting(&pool, "emotion_sample_limit", "25").await.unwrap();
    assert_eq!(
        settings::get_i64(&pool, "emotion_sample_limit", 50).await.unwrap(),
        25
    );

    // ensure_setting must not overwrite an existing value
    settings::ensure_setting(&pool, "emotion_sample_limit", "50").await.unwrap();
    assert_eq!(
        settings::get_i64(&pool, "emotion_sample_limit", 50).await.unwrap(),
        25
    );

    // Non-integer values fall back to the default
    settings::set_setting(&pool, "emotion_sample_limit", "lots").await.unwrap();
    assert_eq!(
        settings::get_i64(&pool, "emotion_sample_limit", 50).await.unwrap(),
        50
    );
}
