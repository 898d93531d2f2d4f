//! Chat completion capability.

pub mod openai;

use crate::types::{ChatMessage, Result};
use async_trait::async_trait;

pub use openai::OpenAiChatClient;

/// Finite, single-pass sequence of generated text fragments. Dropping it
/// releases the upstream connection.
pub type TokenStream = Box<dyn futures::Stream<Item = Result<String>> + Send + Unpin>;

#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Start a streaming completion over the given message list. Fragments
    /// arrive in generation order; an error item truncates the stream.
    async fn complete_stream(&self, messages: &[ChatMessage]) -> Result<TokenStream>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}
