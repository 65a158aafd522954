//! Mock Upstream Server
//!
//! Local axum server standing in for a remote classification API. Replies
//! with a fixed status and body, optionally after a delay, and records
//! every request it receives.

use axum::{
    body::Bytes,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One request seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

/// Running mock server
pub struct MockUpstream {
    /// `http://127.0.0.1:<port>`
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    /// Serve `body` with `status` for POSTs to `path`
    pub async fn start(path: &str, status: StatusCode, body: impl Into<String>) -> Self {
        Self::start_delayed(path, status, body, Duration::ZERO).await
    }

    /// Like `start`, but hold each reply for `delay` after recording it
    pub async fn start_delayed(
        path: &str,
        status: StatusCode,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        let body: String = body.into();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = requests.clone();

        let app = Router::new().route(
            path,
            post(move |headers: HeaderMap, payload: Bytes| {
                let body = body.clone();
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(RecordedRequest {
                        authorization: headers
                            .get(header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                        body: payload.to_vec(),
                    });
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream server");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Base URL nothing listens on
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind closed port");
    let addr = listener.local_addr().expect("closed port address");
    drop(listener);
    format!("http://{}", addr)
}

/// OpenAI-style chat completion wrapping `content`
pub fn chat_completion(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
