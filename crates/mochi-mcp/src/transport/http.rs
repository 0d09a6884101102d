//! Managed streamable-HTTP transport.
//!
//! `GET /` and `GET /health` are answered here; `/mcp` and every other
//! unmatched path are handed to the MCP SDK's streamable HTTP service.

use std::sync::Arc;

use axum::Router;
use axum::routing::{any, get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use serde_json::json;
use tracing::{info, warn};

use super::{health, missing_api_key, service_descriptor};
use crate::MochiServer;
use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// Build the router for the managed HTTP transport.
///
/// Without an API key the informational routes still answer, but every
/// MCP request gets a 500 with a JSON error body.
pub fn router(config: &ServerConfig) -> Result<Router> {
    let info = Router::new()
        .route(
            "/",
            get(|| async {
                axum::Json(service_descriptor(
                    "streamable-http",
                    json!({"mcp": "/mcp", "health": "/health"}),
                ))
            }),
        )
        .route("/health", get(health));

    let client = match config.build_client() {
        Ok(client) => client,
        Err(Error::MissingApiKey) => {
            warn!("No API key configured; MCP requests will fail");
            return Ok(info
                .route("/mcp", any(|| async { missing_api_key() }))
                .fallback(|| async { missing_api_key() }));
        }
        Err(e) => return Err(e),
    };

    let allow_file_paths = config.allow_file_paths;
    let service: StreamableHttpService<MochiServer, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(MochiServer::new(client.clone(), allow_file_paths)),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig::default(),
        );

    Ok(info
        .nest_service("/mcp", service.clone())
        .fallback_service(service))
}

/// Bind and serve the managed HTTP transport.
pub async fn serve(config: &ServerConfig, bind_addr: &str) -> Result<()> {
    let router = router(config)?;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(bind_addr = %bind_addr, "MCP server listening on streamable HTTP");

    axum::serve(listener, router).await?;
    Ok(())
}
