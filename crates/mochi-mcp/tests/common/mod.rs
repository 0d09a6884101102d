//! Common test utilities for the MCP server tests.

#![allow(dead_code)] // Not all test files use every helper

use std::time::Duration;

use mochi::MochiClient;
use mochi_mcp::{MochiServer, ServerConfig};
use rmcp::model::CallToolResult;
use serde_json::{Value, json};
use tokio::time::timeout;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";

/// Start a mock Mochi API.
pub async fn setup_upstream() -> MockServer {
    MockServer::start().await
}

/// A server whose client talks to the mock upstream.
pub fn server_for(upstream: &MockServer, allow_file_paths: bool) -> MochiServer {
    let client = MochiClient::builder()
        .url(upstream.uri())
        .api_key(API_KEY)
        .build()
        .unwrap();
    MochiServer::new(client, allow_file_paths)
}

/// Transport configuration pointing at the mock upstream.
pub fn config_for(upstream: &MockServer, api_key: Option<&str>) -> ServerConfig {
    ServerConfig {
        api_key: api_key.map(str::to_string),
        base_url: upstream.uri(),
        allow_file_paths: false,
        session_ttl: Duration::from_secs(60),
    }
}

/// All text content of a tool result, joined by newlines.
pub fn text(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text())
        .map(|t| t.text.clone())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// Parse the single text block of a successful result as JSON.
pub fn json_body(result: &CallToolResult) -> Value {
    assert!(!is_error(result), "unexpected error result: {}", text(result));
    serde_json::from_str(&text(result)).expect("result is JSON")
}

/// Serve a router on an ephemeral port and return its base URL.
pub async fn spawn_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Incremental reader for a `text/event-stream` response.
pub struct EventReader {
    response: reqwest::Response,
    buffer: String,
}

impl EventReader {
    pub fn new(response: reqwest::Response) -> Self {
        Self {
            response,
            buffer: String::new(),
        }
    }

    /// Next event with data, as `(event name, data)`. Keep-alives are skipped.
    pub async fn next_event(&mut self) -> (String, String) {
        loop {
            if let Some(pos) = self.buffer.find("\n\n") {
                let block: String = self.buffer.drain(..pos + 2).collect();
                let mut event = "message".to_string();
                let mut data = Vec::new();
                for line in block.lines() {
                    if let Some(name) = line.strip_prefix("event:") {
                        event = name.trim().to_string();
                    } else if let Some(value) = line.strip_prefix("data:") {
                        data.push(value.strip_prefix(' ').unwrap_or(value).to_string());
                    }
                }
                if !data.is_empty() {
                    return (event, data.join("\n"));
                }
                continue;
            }

            let chunk = timeout(Duration::from_secs(5), self.response.chunk())
                .await
                .expect("timed out waiting for event")
                .expect("failed to read stream")
                .expect("stream ended");
            self.buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    }

    /// Wait for the server to end the stream, discarding any events.
    pub async fn closed(mut self) {
        loop {
            let chunk = timeout(Duration::from_secs(5), self.response.chunk())
                .await
                .expect("timed out waiting for stream to close")
                .expect("failed to read stream");
            if chunk.is_none() {
                return;
            }
        }
    }

    /// Next JSON-RPC message answering request `id`.
    pub async fn response_to(&mut self, id: u64) -> Value {
        loop {
            let (event, data) = self.next_event().await;
            if event != "message" {
                continue;
            }
            let message: Value = serde_json::from_str(&data).expect("message is JSON");
            if message["id"] == json!(id) {
                return message;
            }
        }
    }
}
