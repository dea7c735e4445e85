//! HTTP chat transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use advisor_core::request::RequestClient;
use advisor_core::{Error, Result};

/// Chat API request format
#[derive(Debug, Serialize)]
struct ChatRequest {
    prompt: String,
}

/// HTTP client for the advisor chat endpoint
pub struct ChatClient {
    client: Client,
    base_url: String,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .http1_only() // Force HTTP/1.1 to avoid issues with some local servers
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Extract reply text from a response body.
    ///
    /// The service normally answers with a JSON string. Any other JSON value
    /// is passed through as its compact JSON text so the caller still gets
    /// something renderable.
    fn decode_content(body: &str) -> Result<String> {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(text)) => Ok(text),
            Ok(other) => {
                warn!("Chat response is not a JSON string, passing raw JSON through");
                Ok(other.to_string())
            }
            Err(e) => Err(Error::InvalidResponse(format!(
                "response body is not JSON: {}",
                e
            ))),
        }
    }
}

#[async_trait]
impl RequestClient for ChatClient {
    async fn send_query(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            prompt: prompt.to_string(),
        };

        let url = format!("{}/api/chat", self.base_url);
        debug!("Sending chat request to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Fault(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Transport(format!("HTTP {}: {}", status, error_text)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Fault(e.to_string()))?;
        Self::decode_content(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_decode_json_string() {
        let content = ChatClient::decode_content("\"hello there\"").unwrap();
        assert_eq!(content, "hello there");
    }

    #[test]
    fn test_decode_other_json_value() {
        let content = ChatClient::decode_content("{\"answer\": 42}").unwrap();
        assert_eq!(content, "{\"answer\":42}");
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        let result = ChatClient::decode_content("not json at all");
        assert!(matches!(result, Err(Error::InvalidResponse(_))));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ChatClient::new("http://localhost:8080/", 5);
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_send_query_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(json!({"prompt": "what is rust?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!("A systems language.")))
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri(), 5);
        let reply = client.send_query("what is rust?").await.unwrap();
        assert_eq!(reply, "A systems language.");
    }

    #[tokio::test]
    async fn test_send_query_object_body_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "hi"})))
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri(), 5);
        let reply = client.send_query("hello").await.unwrap();
        assert_eq!(reply, "{\"reply\":\"hi\"}");
    }

    #[tokio::test]
    async fn test_send_query_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri(), 5);
        let err = client.send_query("hello").await.unwrap_err();
        match err {
            Error::Transport(msg) => {
                assert!(msg.contains("HTTP 500"));
                assert!(msg.contains("backend exploded"));
            }
            other => panic!("expected Transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_query_connection_refused() {
        // Nothing listens on port 1
        let client = ChatClient::new("http://127.0.0.1:1", 5);
        let err = client.send_query("hello").await.unwrap_err();
        assert!(matches!(err, Error::Fault(_)));
    }

    #[tokio::test]
    async fn test_send_query_timeout_is_a_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!("late"))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = ChatClient::new(&server.uri(), 1);
        let err = client.send_query("hello").await.unwrap_err();
        assert!(matches!(err, Error::Fault(_)));
    }
}
