use crate::{
    AppState,
    api::extract::AppJson,
    types::{AppError, ChatRequest, Result},
};
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::Response,
};

/// Answer a conversation with a retrieval-augmented, streamed completion.
///
/// Tokens are forwarded as they arrive; nothing is buffered ahead of the
/// first byte. Errors before the stream starts produce a generic error
/// response; errors mid-stream truncate the body.
pub async fn chat(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ChatRequest>,
) -> Result<Response> {
    let stream = state.rag.answer(&payload.messages).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::Completion(format!("Failed to build response: {}", e)))
}
