//! Astra-style JSON Data API vector store.
//!
//! Collection-scoped `createCollection` / `insertOne` / `find` commands over
//! HTTP, with similarity search expressed as a `$vector` sort plus a result
//! limit. No filter predicates are used.

use crate::types::{AppError, IndexedRecord, Result, ScoredText, SimilarityMetric};
use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use super::vectorstore::VectorStore;

pub struct AstraVectorStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl AstraVectorStore {
    /// `api_endpoint` is the database endpoint; commands are posted under
    /// `/api/json/v1/{keyspace}`.
    pub fn new(api_endpoint: &str, keyspace: &str, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: format!(
                "{}/api/json/v1/{}",
                api_endpoint.trim_end_matches('/'),
                keyspace
            ),
            token,
        }
    }

    /// Post one Data API command and return the parsed response body.
    async fn command(&self, path: &str, body: &Value) -> Result<Value> {
        let url = if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        };

        let response = self
            .client
            .post(&url)
            .header("Token", &self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::VectorStore(format!("Data API request failed: {}", e)))?;

        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::VectorStore(format!("Malformed Data API response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::VectorStore(format!(
                "Data API returned {}: {}",
                status,
                first_error_message(&payload).unwrap_or_else(|| "no detail".to_string())
            )));
        }

        Ok(payload)
    }
}

/// The Data API reports command failures as an `errors` array inside a 200
/// response; pull out the first one.
fn first_error_message(payload: &Value) -> Option<String> {
    payload
        .get("errors")
        .and_then(|e| e.as_array())
        .and_then(|errs| errs.first())
        .map(|err| {
            let code = err.get("errorCode").and_then(|c| c.as_str()).unwrap_or("");
            let message = err.get("message").and_then(|m| m.as_str()).unwrap_or("");
            format!("{} {}", code, message).trim().to_string()
        })
}

fn is_collection_exists(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("existing_collection") || lower.contains("already exist")
}

#[async_trait]
impl VectorStore for AstraVectorStore {
    fn provider_name(&self) -> &'static str {
        "astra"
    }

    async fn create_collection(
        &self,
        name: &str,
        dimension: usize,
        metric: SimilarityMetric,
    ) -> Result<()> {
        let body = json!({
            "createCollection": {
                "name": name,
                "options": {
                    "vector": {
                        "dimension": dimension,
                        "metric": metric.as_str(),
                    }
                }
            }
        });

        let payload = self.command("", &body).await?;
        if let Some(message) = first_error_message(&payload) {
            if is_collection_exists(&message) {
                return Err(AppError::CollectionExists(name.to_string()));
            }
            return Err(AppError::VectorStore(format!(
                "createCollection failed: {}",
                message
            )));
        }

        Ok(())
    }

    async fn insert(&self, collection: &str, record: &IndexedRecord) -> Result<()> {
        let body = json!({
            "insertOne": {
                "document": {
                    "_id": Uuid::new_v4().to_string(),
                    "$vector": record.vector,
                    "text": record.text,
                    "source": record.source,
                    "timestamp": record.timestamp.to_rfc3339(),
                }
            }
        });

        let payload = self.command(collection, &body).await?;
        if let Some(message) = first_error_message(&payload) {
            return Err(AppError::VectorStore(format!("insertOne failed: {}", message)));
        }

        Ok(())
    }

    async fn search(
        &self,
        collection: &str,
        vector: &[f32],
        top_k: usize,
    ) -> Result<Vec<ScoredText>> {
        let body = json!({
            "find": {
                "sort": { "$vector": vector },
                "options": {
                    "limit": top_k,
                    "includeSimilarity": true,
                }
            }
        });

        let payload = self.command(collection, &body).await?;
        if let Some(message) = first_error_message(&payload) {
            // A missing collection means nothing ingested yet; retrieval is
            // best-effort, so that reads as no context rather than a failure.
            if message.to_lowercase().contains("collection") {
                tracing::warn!(collection, "search against missing collection: {}", message);
                return Ok(Vec::new());
            }
            return Err(AppError::VectorStore(format!("find failed: {}", message)));
        }

        let documents = payload
            .get("data")
            .and_then(|d| d.get("documents"))
            .and_then(|d| d.as_array())
            .cloned()
            .unwrap_or_default();

        Ok(documents
            .iter()
            .filter_map(|doc| {
                let text = doc.get("text")?.as_str()?.to_string();
                let score = doc
                    .get("$similarity")
                    .and_then(|s| s.as_f64())
                    .unwrap_or(0.0) as f32;
                Some(ScoredText { text, score })
            })
            .collect())
    }
}
