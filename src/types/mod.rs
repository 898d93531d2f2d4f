use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= API Request Types =============

/// Body of `POST /api/chat`: the full conversation so far, ordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Build a system message synthesized per-query (never stored).
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: None,
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: None,
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

// ============= RAG Types =============

/// Raw scraper output for one source URL. Consumed once per ingestion run.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub text: String,
}

/// The unit persisted in the vector store: one embedded chunk of a document.
/// Immutable once inserted; the store owns its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedRecord {
    pub vector: Vec<f32>,
    pub text: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

impl IndexedRecord {
    pub fn new(vector: Vec<f32>, text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            vector,
            text: text.into(),
            source: source.into(),
            timestamp: Utc::now(),
        }
    }
}

/// One retrieval hit: stored text plus its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredText {
    pub text: String,
    pub score: f32,
}

/// Distance metric a collection is created with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    #[default]
    DotProduct,
    Cosine,
    Euclidean,
}

impl SimilarityMetric {
    /// Wire name used by the vector database.
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityMetric::DotProduct => "dot_product",
            SimilarityMetric::Cosine => "cosine",
            SimilarityMetric::Euclidean => "euclidean",
        }
    }
}

impl std::str::FromStr for SimilarityMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dot_product" => Ok(SimilarityMetric::DotProduct),
            "cosine" => Ok(SimilarityMetric::Cosine),
            "euclidean" => Ok(SimilarityMetric::Euclidean),
            other => Err(AppError::Configuration(format!(
                "Unknown similarity metric '{}' (expected dot_product, cosine or euclidean)",
                other
            ))),
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("Collection already exists: {0}")]
    CollectionExists(String),

    #[error("Chat completion error: {0}")]
    Completion(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        // Full detail goes to the log; clients get a generic body.
        tracing::error!(error = %self, "request failed");

        let (status, message) = match self {
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "invalid request"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
