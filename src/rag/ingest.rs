//! Batch ingestion: scrape → chunk → embed → insert.
//!
//! One bad source or chunk never aborts the run; only collection creation
//! failing for a reason other than "already exists" (or a total outage it
//! implies) is fatal.

use crate::db::VectorStore;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::EmbeddingClient;
use crate::scrape::Scraper;
use crate::types::{AppError, Document, IndexedRecord, Result, SimilarityMetric};
use std::sync::Arc;

/// Aggregate outcome of one ingestion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub sources_ingested: usize,
    pub sources_skipped: usize,
    pub chunks_inserted: usize,
    pub chunks_failed: usize,
}

pub struct IngestionPipeline {
    scraper: Arc<dyn Scraper>,
    chunker: TextChunker,
    embeddings: Arc<dyn EmbeddingClient>,
    store: Arc<dyn VectorStore>,
    collection: String,
    dimension: usize,
    metric: SimilarityMetric,
}

impl IngestionPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        scraper: Arc<dyn Scraper>,
        chunker: TextChunker,
        embeddings: Arc<dyn EmbeddingClient>,
        store: Arc<dyn VectorStore>,
        collection: String,
        dimension: usize,
        metric: SimilarityMetric,
    ) -> Self {
        Self {
            scraper,
            chunker,
            embeddings,
            store,
            collection,
            dimension,
            metric,
        }
    }

    /// Ingest every URL in order, returning the aggregated report.
    pub async fn run(&self, urls: &[String]) -> Result<IngestReport> {
        self.ensure_collection().await?;

        let mut report = IngestReport::default();
        for url in urls {
            tracing::info!(url, "scraping source");
            let text = self.scraper.scrape(url).await;
            if text.is_empty() {
                tracing::warn!(url, "no content scraped, skipping source");
                report.sources_skipped += 1;
                continue;
            }

            let document = Document {
                source: url.clone(),
                text,
            };
            self.ingest_document(&document, &mut report).await;
            report.sources_ingested += 1;
        }

        tracing::info!(
            sources = report.sources_ingested,
            skipped = report.sources_skipped,
            inserted = report.chunks_inserted,
            failed = report.chunks_failed,
            "ingestion run complete"
        );
        Ok(report)
    }

    /// Create the collection if needed. "Already exists" is expected on
    /// re-runs and absorbed; anything else aborts the run.
    async fn ensure_collection(&self) -> Result<()> {
        match self
            .store
            .create_collection(&self.collection, self.dimension, self.metric)
            .await
        {
            Ok(()) => {
                tracing::info!(
                    collection = %self.collection,
                    dimension = self.dimension,
                    metric = self.metric.as_str(),
                    provider = self.store.provider_name(),
                    "created collection"
                );
                Ok(())
            }
            Err(AppError::CollectionExists(name)) => {
                tracing::info!(collection = %name, "collection already exists, reusing");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn ingest_document(&self, document: &Document, report: &mut IngestReport) {
        let chunks = self.chunker.split(&document.text);
        tracing::info!(url = %document.source, chunks = chunks.len(), "split document");

        for chunk in chunks {
            match self.embed_and_insert(&document.source, &chunk).await {
                Ok(()) => report.chunks_inserted += 1,
                Err(e) => {
                    // One lost chunk per failure; the run carries on.
                    tracing::warn!(url = %document.source, "skipping chunk: {}", e);
                    report.chunks_failed += 1;
                }
            }
        }
    }

    async fn embed_and_insert(&self, source: &str, chunk: &str) -> Result<()> {
        let vector = self.embeddings.embed(chunk).await?;
        let record = IndexedRecord::new(vector, chunk, source);
        self.store.insert(&self.collection, &record).await
    }
}
