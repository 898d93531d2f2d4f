//! # Pitchside
//!
//! A retrieval-augmented chat server for football news. Pitchside scrapes a
//! small corpus of football pages, indexes them as embeddings in a vector
//! database, and answers chat requests with completions grounded in the
//! passages most similar to the question.
//!
//! ## Overview
//!
//! Two entry points share one library:
//!
//! 1. **`pitchside-server ingest`** - scrape the configured sources, chunk
//!    and embed their text, and store the chunks in the vector database
//! 2. **`pitchside-server serve`** - run the chat API; each request embeds
//!    the latest question, retrieves the top-K similar chunks, and streams a
//!    context-grounded completion
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use pitchside::rag::{RagChatService, TextChunker};
//! use pitchside::types::ChatMessage;
//!
//! let service = RagChatService::new(embeddings, store, completions, "football".into(), 10);
//! let mut stream = service.answer(&[ChatMessage::user("Who won the World Cup?")]).await?;
//! ```
//!
//! The embedding, vector store and chat completion backends are capability
//! traits ([`rag::EmbeddingClient`], [`db::VectorStore`],
//! [`llm::ChatCompletionClient`]), so tests substitute fakes without any
//! network access.
//!
//! ## Modules
//!
//! - [`rag`] - chunking, embedding, ingestion and query pipelines
//! - [`db`] - vector store trait and Data API client
//! - [`llm`] - streaming chat completion client
//! - [`scrape`] - source-page scraping
//! - [`api`] - REST API handlers and routes
//! - [`types`] - common types and error handling

/// HTTP API handlers and routes.
pub mod api;
/// CLI output helpers.
pub mod cli;
/// Vector database clients.
pub mod db;
/// Chat completion clients.
pub mod llm;
/// Retrieval Augmented Generation pipeline.
pub mod rag;
/// Source-page scraping.
pub mod scrape;
/// Core types (requests, records, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use db::{AstraVectorStore, InMemoryVectorStore, VectorStore};
pub use llm::{ChatCompletionClient, OpenAiChatClient, TokenStream};
pub use rag::{
    EmbeddingClient, IngestReport, IngestionPipeline, OpenAiEmbeddingClient, RagChatService,
    TextChunker,
};
pub use scrape::{HttpScraper, Scraper};
pub use types::{AppError, Result};
pub use utils::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process-wide configuration, loaded once at startup
    pub config: Arc<Config>,
    /// Retrieval-augmented query service
    pub rag: Arc<RagChatService>,
}

impl AppState {
    /// Wire the production backends from configuration.
    pub fn from_config(config: Config) -> Self {
        let embeddings: Arc<dyn EmbeddingClient> = Arc::new(OpenAiEmbeddingClient::new(
            config.openai.api_key.clone(),
            config.openai.api_base.clone(),
            config.openai.embedding_model.clone(),
        ));
        let store: Arc<dyn VectorStore> = Arc::new(AstraVectorStore::new(
            &config.astra.api_endpoint,
            &config.astra.keyspace,
            config.astra.application_token.clone(),
        ));
        let completions: Arc<dyn ChatCompletionClient> = Arc::new(OpenAiChatClient::new(
            config.openai.api_key.clone(),
            config.openai.api_base.clone(),
            config.openai.chat_model.clone(),
        ));

        let rag = Arc::new(RagChatService::new(
            embeddings,
            store,
            completions,
            config.astra.collection.clone(),
            config.rag.top_k,
        ));

        Self {
            config: Arc::new(config),
            rag,
        }
    }
}
