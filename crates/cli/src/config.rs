//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CLOVER_STORE_DIR` - Document-store data directory (default: `./store-data`)
//! - `CLOVER_SEED_DIR` - Seed input directory (default: `./seed-data`)
//! - `CLOVER_PRESERVE_USER` - User id preserved by `flush` (default: `demo-shopper`)
//! - `CLOVER_SEED_CHUNK_SIZE` - Documents per seed commit (default: 400)
//! - `CLOVER_DELETE_PAGE_SIZE` - Page size for the paginated deleter (default: 500)
//! - `CLOVER_PURGE_CHUNK_SIZE` - Documents per purge delete batch (default: 500)

use std::path::PathBuf;

use clover_pipeline::PipelineConfig;
use thiserror::Error;

/// User preserved by `flush` when nothing else is configured.
pub const DEFAULT_PRESERVED_USER: &str = "demo-shopper";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the JSON document store lives in.
    pub store_dir: PathBuf,
    /// Directory holding the per-entity seed files.
    pub seed_dir: PathBuf,
    /// User id `flush` preserves in the `users` collection.
    pub preserve_user: String,
    /// Batch and page sizes for both pipelines.
    pub pipeline: PipelineConfig,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] for empty or unparseable
    /// values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PipelineConfig::default();
        Ok(Self {
            store_dir: PathBuf::from(non_empty(&lookup, "CLOVER_STORE_DIR", "./store-data")?),
            seed_dir: PathBuf::from(non_empty(&lookup, "CLOVER_SEED_DIR", "./seed-data")?),
            preserve_user: non_empty(&lookup, "CLOVER_PRESERVE_USER", DEFAULT_PRESERVED_USER)?,
            pipeline: PipelineConfig {
                seed_chunk_size: chunk_size(
                    &lookup,
                    "CLOVER_SEED_CHUNK_SIZE",
                    defaults.seed_chunk_size,
                )?,
                delete_page_size: chunk_size(
                    &lookup,
                    "CLOVER_DELETE_PAGE_SIZE",
                    defaults.delete_page_size,
                )?,
                purge_chunk_size: chunk_size(
                    &lookup,
                    "CLOVER_PURGE_CHUNK_SIZE",
                    defaults.purge_chunk_size,
                )?,
            },
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}

fn chunk_size<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => match value.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            Ok(_) => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                "must be at least 1".to_string(),
            )),
            Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        },
        None => Ok(default),
    }
}
