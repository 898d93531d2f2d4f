//! Fake implementations of the capability traits.
//!
//! These stand in for the embedding service, vector store, chat completion
//! service and scraper so the pipelines can be exercised without any network
//! access.

use async_trait::async_trait;
use futures::stream;
use parking_lot::Mutex;
use pitchside::db::VectorStore;
use pitchside::llm::{ChatCompletionClient, TokenStream};
use pitchside::rag::EmbeddingClient;
use pitchside::scrape::Scraper;
use pitchside::types::{
    AppError, ChatMessage, IndexedRecord, Result, ScoredText, SimilarityMetric,
};
use std::collections::HashMap;

/// Marker: the fake embedder fails on any text containing this.
pub const POISON_TEXT: &str = "__embed_fail__";

/// Scraper backed by a fixed URL → text map; unknown URLs scrape to empty.
pub struct FakeScraper {
    pages: HashMap<String, String>,
}

impl FakeScraper {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, text)| (url.to_string(), text.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl Scraper for FakeScraper {
    async fn scrape(&self, url: &str) -> String {
        self.pages.get(url).cloned().unwrap_or_default()
    }
}

/// Deterministic embedder: the vector is derived from the text's bytes.
/// Fails on [`POISON_TEXT`], or on everything when constructed failing.
pub struct FakeEmbeddingClient {
    dimension: usize,
    always_fail: bool,
}

impl FakeEmbeddingClient {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            always_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            dimension: 0,
            always_fail: true,
        }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for (i, byte) in text.bytes().enumerate() {
            vector[i % self.dimension] += byte as f32;
        }
        vector
    }
}

#[async_trait]
impl EmbeddingClient for FakeEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.always_fail || text.contains(POISON_TEXT) {
            return Err(AppError::Embedding("fake embedding failure".to_string()));
        }
        Ok(self.vector_for(text))
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }
}

/// Store whose `search` always returns the same canned hits.
pub struct CannedVectorStore {
    results: Vec<ScoredText>,
}

impl CannedVectorStore {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            results: texts
                .iter()
                .enumerate()
                .map(|(i, text)| ScoredText {
                    text: text.to_string(),
                    score: 1.0 - i as f32 * 0.01,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl VectorStore for CannedVectorStore {
    fn provider_name(&self) -> &'static str {
        "canned"
    }

    async fn create_collection(
        &self,
        _name: &str,
        _dimension: usize,
        _metric: SimilarityMetric,
    ) -> Result<()> {
        Ok(())
    }

    async fn insert(&self, _collection: &str, _record: &IndexedRecord) -> Result<()> {
        Ok(())
    }

    async fn search(
        &self,
        _collection: &str,
        _vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredText>> {
        Ok(self.results.iter().take(top_k).cloned().collect())
    }
}

/// Store that is unreachable: every operation errors.
pub struct UnreachableVectorStore;

#[async_trait]
impl VectorStore for UnreachableVectorStore {
    fn provider_name(&self) -> &'static str {
        "unreachable"
    }

    async fn create_collection(
        &self,
        _name: &str,
        _dimension: usize,
        _metric: SimilarityMetric,
    ) -> Result<()> {
        Err(AppError::VectorStore("connection refused".to_string()))
    }

    async fn insert(&self, _collection: &str, _record: &IndexedRecord) -> Result<()> {
        Err(AppError::VectorStore("connection refused".to_string()))
    }

    async fn search(
        &self,
        _collection: &str,
        _vector: &[f32],
        _top_k: usize,
    ) -> Result<Vec<ScoredText>> {
        Err(AppError::VectorStore("connection refused".to_string()))
    }
}

/// Chat client that records the outbound message list and streams fixed
/// fragments back.
pub struct RecordingChatClient {
    fragments: Vec<String>,
    pub requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl RecordingChatClient {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Message lists received so far.
    pub fn recorded(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl ChatCompletionClient for RecordingChatClient {
    async fn complete_stream(&self, messages: &[ChatMessage]) -> Result<TokenStream> {
        self.requests.lock().push(messages.to_vec());
        let items: Vec<Result<String>> = self.fragments.iter().cloned().map(Ok).collect();
        Ok(Box::new(Box::pin(stream::iter(items))))
    }

    fn model_name(&self) -> &str {
        "recording-fake"
    }
}

/// Chat client that fails before any streaming begins.
pub struct FailingChatClient;

#[async_trait]
impl ChatCompletionClient for FailingChatClient {
    async fn complete_stream(&self, _messages: &[ChatMessage]) -> Result<TokenStream> {
        Err(AppError::Completion("fake completion failure".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-fake"
    }
}
