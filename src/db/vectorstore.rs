//! Vector store capability.
//!
//! The pipeline talks to the vector database through this trait so tests can
//! substitute a fake. The production implementation is the JSON Data API
//! client in [`super::astra`]; `InMemoryVectorStore` backs the test suites.

use crate::types::{AppError, IndexedRecord, Result, ScoredText, SimilarityMetric};
use async_trait::async_trait;

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Name of the backing provider, for logs.
    fn provider_name(&self) -> &'static str;

    /// Create a collection with a fixed vector dimension and metric.
    ///
    /// Re-creating an existing collection surfaces
    /// [`AppError::CollectionExists`]; ingestion absorbs that on re-runs.
    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: SimilarityMetric,
    ) -> Result<()>;

    /// Append one record. No dedup key: re-ingesting the same source
    /// produces duplicate records.
    async fn insert(&self, collection: &str, record: &IndexedRecord) -> Result<()>;

    /// Return up to `top_k` nearest records, highest similarity first. An
    /// empty collection yields an empty list, not an error.
    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredText>>;
}

// ============================================================================
// In-Memory Vector Store (for tests)
// ============================================================================

use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory store with cosine ranking. Not persisted; test use only.
#[derive(Default)]
pub struct InMemoryVectorStore {
    collections: RwLock<HashMap<String, InMemoryCollection>>,
}

struct InMemoryCollection {
    dimension: usize,
    records: Vec<IndexedRecord>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held by a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map(|c| c.records.len())
            .unwrap_or(0)
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    fn provider_name(&self) -> &'static str {
        "in-memory"
    }

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        _metric: SimilarityMetric,
    ) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(name) {
            return Err(AppError::CollectionExists(name.to_string()));
        }
        collections.insert(
            name.to_string(),
            InMemoryCollection {
                dimension,
                records: Vec::new(),
            },
        );
        Ok(())
    }

    async fn insert(&self, collection: &str, record: &IndexedRecord) -> Result<()> {
        let mut collections = self.collections.write();
        let col = collections
            .get_mut(collection)
            .ok_or_else(|| AppError::VectorStore(format!("Collection '{}' not found", collection)))?;

        if record.vector.len() != col.dimension {
            return Err(AppError::VectorStore(format!(
                "Vector dimension {} does not match collection dimension {}",
                record.vector.len(),
                col.dimension
            )));
        }

        col.records.push(record.clone());
        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredText>> {
        let collections = self.collections.read();
        let Some(col) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut results: Vec<ScoredText> = col
            .records
            .iter()
            .map(|r| ScoredText {
                text: r.text.clone(),
                score: Self::cosine_similarity(vector, &r.vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }
}
