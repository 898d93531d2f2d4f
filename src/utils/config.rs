//! Process-wide configuration.
//!
//! Loaded once at startup from the environment (with `.env` support via
//! dotenvy) and passed into constructors, so nothing else in the pipeline
//! reads process state ad hoc.

use crate::types::{AppError, Result, SimilarityMetric};
use std::env;

/// Default corpus for the `ingest` command when `SOURCE_URLS` is unset.
const DEFAULT_SOURCE_URLS: &[&str] = &[
    "https://en.wikipedia.org/wiki/Football",
    "https://www.skysports.com/football",
    "https://www.theguardian.com/football",
    "https://onefootball.com/en/home",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub astra: AstraConfig,
    pub openai: OpenAIConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection parameters for the Astra-style JSON Data API.
#[derive(Debug, Clone)]
pub struct AstraConfig {
    pub api_endpoint: String,
    pub application_token: String,
    pub keyspace: String,
    pub collection: String,
}

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub api_base: String,
    pub embedding_model: String,
    pub chat_model: String,
}

#[derive(Debug, Clone)]
pub struct RagConfig {
    /// Must match the dimension the collection is created with.
    pub embedding_dimension: usize,
    pub metric: SimilarityMetric,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
    pub source_urls: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let (chunk_size, chunk_overlap) =
            validated_chunking(parsed("CHUNK_SIZE", "512")?, parsed("CHUNK_OVERLAP", "100")?)?;

        Ok(Config {
            server: ServerConfig {
                host: optional("HOST", "127.0.0.1"),
                port: parsed("PORT", "3000")?,
            },
            astra: AstraConfig {
                api_endpoint: required("ASTRA_DB_API_ENDPOINT")?,
                application_token: required("ASTRA_DB_APPLICATION_TOKEN")?,
                keyspace: required("ASTRA_DB_NAMESPACE")?,
                collection: required("ASTRA_DB_COLLECTION")?,
            },
            openai: OpenAIConfig {
                api_key: required("OPENAI_API_KEY")?,
                api_base: optional("OPENAI_API_BASE", "https://api.openai.com/v1"),
                embedding_model: optional("EMBEDDING_MODEL", "text-embedding-3-small"),
                chat_model: optional("CHAT_MODEL", "gpt-3.5-turbo"),
            },
            rag: RagConfig {
                embedding_dimension: parsed("EMBEDDING_DIMENSION", "1536")?,
                metric: optional("SIMILARITY_METRIC", "dot_product").parse()?,
                chunk_size,
                chunk_overlap,
                top_k: parsed("RAG_TOP_K", "10")?,
                source_urls: source_urls(),
            },
        })
    }
}

/// The chunker constructor panics on a bad size/overlap pair; reject it here
/// so misconfiguration fails startup like any other configuration error.
fn validated_chunking(chunk_size: usize, chunk_overlap: usize) -> Result<(usize, usize)> {
    if chunk_size == 0 {
        return Err(AppError::Configuration(
            "CHUNK_SIZE must be positive".to_string(),
        ));
    }
    if chunk_overlap >= chunk_size {
        return Err(AppError::Configuration(format!(
            "CHUNK_OVERLAP ({}) must be smaller than CHUNK_SIZE ({})",
            chunk_overlap, chunk_size
        )));
    }
    Ok((chunk_size, chunk_overlap))
}

fn required(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(AppError::Configuration(format!(
            "Missing required environment variable: {}",
            name
        ))),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &str, default: &str) -> Result<T> {
    optional(name, default)
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid value for {}", name)))
}

fn source_urls() -> Vec<String> {
    match env::var("SOURCE_URLS") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => DEFAULT_SOURCE_URLS.iter().map(|s| s.to_string()).collect(),
    }
}
