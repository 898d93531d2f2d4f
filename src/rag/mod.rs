//! Retrieval Augmented Generation pipeline.
//!
//! Ingestion flow: scrape → [`chunker`] → [`embeddings`] → vector store.
//! Query flow: embed question → top-K search → [`prompt`] assembly →
//! streamed completion ([`query`]).

pub mod chunker;
pub mod embeddings;
pub mod ingest;
pub mod prompt;
pub mod query;

pub use chunker::TextChunker;
pub use embeddings::{EmbeddingClient, OpenAiEmbeddingClient};
pub use ingest::{IngestReport, IngestionPipeline};
pub use query::RagChatService;
