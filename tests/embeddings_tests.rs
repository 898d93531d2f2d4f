//! Embedding client tests against a mocked OpenAI-compatible server.

use pitchside::rag::{EmbeddingClient, OpenAiEmbeddingClient};
use pitchside::types::AppError;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiEmbeddingClient {
    OpenAiEmbeddingClient::new(
        "test-key".to_string(),
        format!("{}/v1", server.uri()),
        "text-embedding-3-small".to_string(),
    )
}

fn embedding_item(index: u32, values: &[f32]) -> serde_json::Value {
    json!({ "object": "embedding", "index": index, "embedding": values })
}

fn embedding_response(items: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "object": "list",
        "model": "text-embedding-3-small",
        "data": items,
        "usage": { "prompt_tokens": 1, "total_tokens": 1 }
    })
}

#[tokio::test]
async fn test_embed_returns_first_vector() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(body_partial_json(json!({
            "model": "text-embedding-3-small",
            "input": "Who won the World Cup?",
            "encoding_format": "float"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_response(vec![
            embedding_item(0, &[0.1, 0.2, 0.3]),
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let vector = client.embed("Who won the World Cup?").await.unwrap();
    assert_eq!(vector, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_embed_many_is_index_aligned() {
    let mock_server = MockServer::start().await;

    // The API may answer out of order; the client realigns by index.
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_response(vec![
            embedding_item(1, &[2.0]),
            embedding_item(0, &[1.0]),
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let vectors = client
        .embed_many(&["first".to_string(), "second".to_string()])
        .await
        .unwrap();
    assert_eq!(vectors, vec![vec![1.0], vec![2.0]]);
}

#[tokio::test]
async fn test_empty_batch_skips_the_network() {
    // No mock mounted: any request would fail the test.
    let mock_server = MockServer::start().await;
    let client = client_for(&mock_server);
    assert!(client.embed_many(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_embedding_data_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_response(vec![])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.embed("anything").await.unwrap_err();
    assert!(matches!(err, AppError::Embedding(_)));
}

#[tokio::test]
async fn test_upstream_rejection_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Invalid API key",
                "type": "invalid_request_error",
                "param": null,
                "code": null
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.embed("anything").await.unwrap_err();
    assert!(matches!(err, AppError::Embedding(_)));
}

#[tokio::test]
async fn test_truncated_batch_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedding_response(vec![
            embedding_item(0, &[1.0]),
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .embed_many(&["first".to_string(), "second".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Embedding(_)));
}
