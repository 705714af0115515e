//! pulse-sa - Sentiment Analytics microservice
//!
//! Ingests tweets, classifies sentiment with remote-then-lexicon fallback,
//! and serves aggregated analytics over the stored corpus.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use pulse_common::config::{self, TomlConfig};
use pulse_sa::services::huggingface::HuggingFaceClient;
use pulse_sa::services::resolver::SentimentResolver;
use pulse_sa::{build_router, AppState};

const DEFAULT_PORT: u16 = 5731;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "pulse-sa", about = "Pulse sentiment analytics service")]
struct Args {
    /// Root folder holding pulse.db (overrides env and config file)
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP server port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Pulse Sentiment Analytics (pulse-sa) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let toml_config = TomlConfig::load();

    // Resolve root folder: CLI > env > TOML > OS default
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    config::ensure_root_folder(&root_folder)?;

    let db_path = config::database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = pulse_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    // Build the provider chain: remote Hugging Face when configured,
    // lexicon fallback always
    let api_key = config::resolve_huggingface_api_key(&pool, &toml_config).await?;
    let timeout_ms =
        pulse_common::db::settings::get_i64(&pool, "hf_request_timeout_ms", 5000).await?;

    let remote = match api_key {
        Some(key) => Some(HuggingFaceClient::new(
            key,
            Duration::from_millis(timeout_ms.max(1) as u64),
        )?),
        None => None,
    };
    let remote_configured = remote.is_some();
    let resolver = SentimentResolver::with_default_chain(remote);

    if remote_configured {
        info!("Classification chain: HuggingFace -> Lexicon");
    } else {
        info!("Classification chain: Lexicon only");
    }

    // Create application state and router
    let state = AppState::new(pool, resolver, remote_configured);
    let app = build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("pulse-sa listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
