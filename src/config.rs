//! Runtime configuration from `ASSETFINDER_*` environment variables.
//!
//! The embedding model must match the catalog's. The bundled catalog path
//! holds `all-MiniLM-L6-v2` vectors (384 dimensions): set
//! `ASSETFINDER_EMBEDDING_MODEL=all-MiniLM-L6-v2` and point
//! `ASSETFINDER_EMBEDDING_BASE_URL` at a server hosting it. A mismatched
//! pair fails at startup with `DimensionMismatch`.

use crate::domain::error::DomainError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CATALOG: &str = "./data/tickers_data.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    OpenAi,
    Voyage,
}

impl FromStr for EmbeddingBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(EmbeddingBackend::OpenAi),
            "voyage" => Ok(EmbeddingBackend::Voyage),
            _ => Err(format!("Unknown embedding provider: {s} (expected openai or voyage)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub api_key: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Forces the vector size instead of the model's advertised one.
    pub dimension: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub embedding: EmbeddingConfig,
    pub http_timeout: Duration,
    pub http_retries: u32,
    pub default_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match get("ASSETFINDER_EMBEDDING_PROVIDER") {
            Some(p) => p.parse().map_err(DomainError::Config)?,
            None => EmbeddingBackend::OpenAi,
        };

        Ok(Self {
            catalog_path: get("ASSETFINDER_CATALOG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG)),
            embedding: EmbeddingConfig {
                backend,
                api_key: get("ASSETFINDER_EMBEDDING_API_KEY").unwrap_or_default(),
                model: get("ASSETFINDER_EMBEDDING_MODEL"),
                base_url: get("ASSETFINDER_EMBEDDING_BASE_URL"),
                dimension: parse_opt(get("ASSETFINDER_EMBEDDING_DIMENSION"), "ASSETFINDER_EMBEDDING_DIMENSION")?,
            },
            http_timeout: Duration::from_secs(
                parse_opt(get("ASSETFINDER_HTTP_TIMEOUT_SECS"), "ASSETFINDER_HTTP_TIMEOUT_SECS")?
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            http_retries: parse_opt(get("ASSETFINDER_HTTP_RETRIES"), "ASSETFINDER_HTTP_RETRIES")?
                .unwrap_or(DEFAULT_RETRIES),
            default_limit: parse_opt(get("ASSETFINDER_DEFAULT_LIMIT"), "ASSETFINDER_DEFAULT_LIMIT")?
                .unwrap_or(DEFAULT_LIMIT),
        })
    }
}

fn parse_opt<T: FromStr>(value: Option<String>, key: &str) -> Result<Option<T>, DomainError> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| DomainError::Config(format!("{key}: cannot parse '{v}'")))
        })
        .transpose()
}
