//! stdio transport: newline-delimited JSON-RPC over stdin/stdout.

use rmcp::ServiceExt;
use tracing::info;

use crate::MochiServer;
use crate::config::ServerConfig;
use crate::error::{Error, Result};

/// Serve a single client over stdin/stdout until it disconnects.
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let client = config.build_client()?;
    let server = MochiServer::new(client, config.allow_file_paths);

    info!("Serving MCP over stdio");
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let running = server
        .serve(transport)
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;
    let reason = running
        .waiting()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

    info!(?reason, "stdio session ended");
    Ok(())
}
