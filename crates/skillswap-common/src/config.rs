//! Application configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for production.
//! Config precedence: env vars > config file > defaults
//!
//! The loaded [`AppConfig`] is a plain value. Callers own it and hand it to
//! whatever needs it; there is no process-wide config singleton.

use std::path::Path;

use serde::Deserialize;
use validator::Validate;

use crate::error::SkillSwapResult;
use crate::validation::validate_request;

/// Load configuration, optionally from an explicit config file.
///
/// Without `path`, a `config.{toml,json,yaml}` in the working directory is
/// picked up if present.
pub fn load(path: Option<&Path>) -> SkillSwapResult<AppConfig> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let mut builder = config::Config::builder()
        // Defaults
        .set_default("backend.kind", "rest")?
        .set_default("backend.url", "http://localhost:54321")?
        .set_default("backend.anon_key", "")?
        .set_default("backend.timeout_secs", 30)?
        .set_default("database.url", "")?
        .set_default("database.max_connections", 5)?
        .set_default("matching.broad_limit", 12)?
        .set_default("matching.strict_limit", 12)?
        .set_default("matching.candidate_limit", 100)?;

    builder = match path {
        Some(p) => builder.add_source(config::File::from(p)),
        None => builder.add_source(config::File::with_name("config").required(false)),
    };

    let cfg = builder
        // Environment variables (SKILLSWAP__BACKEND__URL, SKILLSWAP__MATCHING__BROAD_LIMIT, etc.)
        .add_source(
            config::Environment::with_prefix("SKILLSWAP")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = cfg.try_deserialize()?;
    validate_request(&app_config.matching)?;
    tracing::debug!(backend = ?app_config.backend.kind, "Configuration loaded");
    Ok(app_config)
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub database: DatabaseConfig,
    pub matching: MatchingConfig,
}

/// Which data source the match finder reads from.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// The hosted backend's tabular HTTP interface.
    Rest,
    /// A direct connection to the hosted Postgres instance.
    Postgres,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Base URL of the hosted backend (the `/rest/v1` suffix is appended by the client)
    pub url: String,
    /// Public anonymous API key, sent as `apikey` on every request
    pub anon_key: String,
    /// Client-side HTTP timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL, only used with `backend.kind = "postgres"`
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct MatchingConfig {
    /// Result cap for the broad (either-direction) finder
    #[validate(range(min = 1, max = 100, message = "broad_limit must be between 1 and 100"))]
    pub broad_limit: usize,

    /// Result cap for the strict (bidirectional) finder
    #[validate(range(min = 1, max = 100, message = "strict_limit must be between 1 and 100"))]
    pub strict_limit: usize,

    /// Row cap applied to each candidate query sent to the backend
    #[validate(range(min = 1, max = 1000, message = "candidate_limit must be between 1 and 1000"))]
    pub candidate_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            broad_limit: 12,
            strict_limit: 12,
            candidate_limit: 100,
        }
    }
}
