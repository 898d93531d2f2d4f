//! Per-request retrieval-augmented answering.
//!
//! Strict order within a request: embed the latest user question, search the
//! vector store, assemble the system prompt, stream the completion. Embedding
//! failure is fatal to the request; retrieval failure degrades to ungrounded
//! generation.

use crate::db::VectorStore;
use crate::llm::{ChatCompletionClient, TokenStream};
use crate::rag::embeddings::EmbeddingClient;
use crate::rag::prompt::build_system_prompt;
use crate::types::{ChatMessage, MessageRole, Result};
use std::sync::Arc;

pub struct RagChatService {
    embeddings: Arc<dyn EmbeddingClient>,
    store: Arc<dyn VectorStore>,
    completions: Arc<dyn ChatCompletionClient>,
    collection: String,
    top_k: usize,
}

impl RagChatService {
    pub fn new(
        embeddings: Arc<dyn EmbeddingClient>,
        store: Arc<dyn VectorStore>,
        completions: Arc<dyn ChatCompletionClient>,
        collection: String,
        top_k: usize,
    ) -> Self {
        Self {
            embeddings,
            store,
            completions,
            collection,
            top_k,
        }
    }

    /// Answer the conversation with a streamed, context-grounded completion.
    pub async fn answer(&self, messages: &[ChatMessage]) -> Result<TokenStream> {
        let question = latest_user_content(messages);

        // Without a question embedding nothing can be grounded; this error
        // surfaces to the caller.
        let query_vector = self.embeddings.embed(&question).await?;

        let context_texts = match self
            .store
            .search(&self.collection, &query_vector, self.top_k)
            .await
        {
            Ok(hits) => hits.into_iter().map(|hit| hit.text).collect(),
            Err(e) => {
                tracing::warn!("retrieval failed, answering without context: {}", e);
                Vec::new()
            }
        };

        let system = ChatMessage::system(build_system_prompt(&context_texts, &question));
        let mut outbound = Vec::with_capacity(messages.len() + 1);
        outbound.push(system);
        outbound.extend_from_slice(messages);

        tracing::info!(
            model = self.completions.model_name(),
            context_chunks = context_texts.len(),
            "starting completion stream"
        );
        self.completions.complete_stream(&outbound).await
    }
}

/// Content of the last user message; empty string if the conversation has
/// none. An empty question is still embedded and yields a degenerate context.
fn latest_user_content(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::User)
        .map(|m| m.content.clone())
        .unwrap_or_default()
}
