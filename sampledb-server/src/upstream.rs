//! Client for the remote "say" cloud function
//!
//! One GET per call with the keyword as a query parameter. No retry, no
//! caching, no timeout beyond the reqwest defaults.

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

/// Public endpoint of the reference cloud function
pub const DEFAULT_SAY_ENDPOINT: &str =
    "https://djzuh8moki.execute-api.us-east-2.amazonaws.com/default/my-function";

/// Failure talking to the remote function
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request to upstream failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// HTTP client bound to one remote endpoint
#[derive(Debug, Clone)]
pub struct SayClient {
    http: Client,
    endpoint: Url,
}

impl SayClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Ask the remote function to say `keyword`.
    ///
    /// A JSON response body is returned as parsed; anything else is
    /// returned as a JSON string holding the raw text.
    pub async fn say(&self, keyword: &str) -> Result<Value, UpstreamError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[("keyword", keyword)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::Status { status, body });
        }

        tracing::info!(%status, response = %body, "upstream function responded");
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Query, http::StatusCode as AxumStatus, routing::get, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn_stub(router: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        Url::parse(&format!("http://{}/default/my-function", addr)).unwrap()
    }

    async fn greet(Query(params): Query<HashMap<String, String>>) -> String {
        let keyword = params.get("keyword").cloned().unwrap_or_default();
        serde_json::to_string(&format!("Pranjal says {}", keyword)).unwrap()
    }

    #[tokio::test]
    async fn parses_json_string_body() {
        let url = spawn_stub(Router::new().route("/default/my-function", get(greet))).await;
        let client = SayClient::new(url);

        let message = client.say("hello").await.unwrap();
        assert_eq!(message, Value::String("Pranjal says hello".into()));
    }

    #[tokio::test]
    async fn encodes_keyword() {
        let url = spawn_stub(Router::new().route("/default/my-function", get(greet))).await;
        let client = SayClient::new(url);

        let message = client.say("a&b c").await.unwrap();
        assert_eq!(message, Value::String("Pranjal says a&b c".into()));
    }

    #[tokio::test]
    async fn keeps_plain_text_body() {
        let url = spawn_stub(Router::new().route(
            "/default/my-function",
            get(|| async { "not json at all" }),
        ))
        .await;

        let message = SayClient::new(url).say("x").await.unwrap();
        assert_eq!(message, Value::String("not json at all".into()));
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let url = spawn_stub(Router::new().route(
            "/default/my-function",
            get(|| async { (AxumStatus::BAD_GATEWAY, "lambda exploded") }),
        ))
        .await;

        let err = SayClient::new(url).say("x").await.unwrap_err();
        match err {
            UpstreamError::Status { status, body } => {
                assert_eq!(status, StatusCode::BAD_GATEWAY);
                assert_eq!(body, "lambda exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_error() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        let err = SayClient::new(url).say("x").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Request(_)));
        assert!(!err.to_string().is_empty());
    }
}
