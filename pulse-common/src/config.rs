//! Configuration loading and root folder resolution
//!
//! Two-tier configuration:
//! 1. Bootstrap (CLI / environment / TOML): root folder, bind port,
//!    Hugging Face credential. Cannot change while running.
//! 2. Database runtime settings (`settings` table): see [`crate::db::settings`].

use crate::{Error, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "PULSE_ROOT_FOLDER";

/// Environment variable carrying the Hugging Face API credential
pub const HF_API_KEY_ENV: &str = "PULSE_HF_API_KEY";

/// Bootstrap configuration loaded from the TOML config file
///
/// Minimal by design: only settings needed before the database is open.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root folder holding pulse.db (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port override (optional)
    #[serde(default)]
    pub port: Option<u16>,

    /// Hugging Face API credential (optional; absence enables
    /// lexicon-only fallback mode)
    #[serde(default)]
    pub huggingface_api_key: Option<String>,
}

impl TomlConfig {
    /// Load the TOML config file if one exists
    ///
    /// A missing or unparseable file is not fatal: the service starts with
    /// defaults and logs a warning.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<TomlConfig>(&contents) {
                Ok(config) => {
                    info!("Loaded TOML configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Configuration file location for the platform
///
/// Linux: `~/.config/pulse/config.toml`, falling back to
/// `/etc/pulse/config.toml`; other platforms use the OS config dir.
fn config_file_path() -> Option<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        let user_config = dir.join("pulse").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/pulse/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    dirs::config_dir().map(|d| d.join("pulse").join("config.toml"))
}

/// Resolve the root folder using the priority order:
/// 1. Command-line argument (highest priority)
/// 2. `PULSE_ROOT_FOLDER` environment variable
/// 3. TOML config file
/// 4. OS-dependent default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml_config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.root_folder {
        return path.clone();
    }

    // Priority 4: OS-dependent default
    default_root_folder()
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("pulse"))
        .unwrap_or_else(|| PathBuf::from("./pulse_data"))
}

/// Create the root folder if missing
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    if !root.exists() {
        std::fs::create_dir_all(root)
            .map_err(|e| Error::Config(format!("Cannot create root folder {}: {}", root.display(), e)))?;
        info!("Created root folder: {}", root.display());
    }
    Ok(())
}

/// Database file location under the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join("pulse.db")
}

/// Resolve the Hugging Face API credential from 3-tier configuration
///
/// Priority: database settings → environment → TOML. A missing credential
/// is not an error: the service runs in lexicon-only fallback mode.
pub async fn resolve_huggingface_api_key(
    db: &SqlitePool,
    toml_config: &TomlConfig,
) -> Result<Option<String>> {
    let db_key = crate::db::settings::get_string(db, "hf_api_key").await?;
    let env_key = std::env::var(HF_API_KEY_ENV).ok();
    let toml_key = toml_config.huggingface_api_key.clone();

    let mut sources = Vec::new();
    if db_key.as_deref().is_some_and(is_valid_key) {
        sources.push("database");
    }
    if env_key.as_deref().is_some_and(is_valid_key) {
        sources.push("environment");
    }
    if toml_key.as_deref().is_some_and(is_valid_key) {
        sources.push("TOML");
    }

    if sources.len() > 1 {
        warn!(
            "Hugging Face API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    for (key, source) in [
        (db_key, "database"),
        (env_key, "environment variable"),
        (toml_key, "TOML config"),
    ] {
        if let Some(key) = key {
            if is_valid_key(&key) {
                info!("Hugging Face API key loaded from {}", source);
                return Ok(Some(key));
            }
        }
    }

    warn!("No Hugging Face API key configured; remote classification disabled (lexicon fallback only)");
    Ok(None)
}

fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
