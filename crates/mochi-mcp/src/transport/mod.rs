//! Transport front-ends.
//!
//! Every transport does the same thing before accepting traffic: check for
//! an API key, build a [`MochiClient`](mochi::MochiClient), register the
//! tool groups on a fresh [`MochiServer`](crate::MochiServer), and attach.

pub mod http;
pub mod sse;
pub mod stdio;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::MochiServer;

/// Name reported by the informational routes.
pub const SERVER_NAME: &str = "mochi-mcp";

/// `GET /health`
pub(crate) async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "server": SERVER_NAME}))
}

/// Body of `GET /` describing the service.
pub(crate) fn service_descriptor(transport: &str, endpoints: Value) -> Value {
    json!({
        "name": SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": "MCP server for the Mochi flashcard API",
        "transport": transport,
        "endpoints": endpoints,
        "tools": MochiServer::tool_names(),
    })
}

/// 500 response used when the server was started without an API key.
pub(crate) fn missing_api_key() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": crate::Error::MissingApiKey.to_string()})),
    )
        .into_response()
}
