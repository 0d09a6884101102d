//! Command-line and environment configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use mochi::MochiClient;

use crate::error::{Error, Result};

/// MCP server exposing the Mochi flashcard API as tools.
#[derive(Parser, Debug, Clone)]
#[command(name = "mochi-mcp")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Mochi API key
    #[arg(long, env = "MOCHI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Mochi API base URL
    #[arg(long, env = "MOCHI_BASE_URL", default_value = mochi::DEFAULT_URL)]
    pub base_url: String,

    /// Transport mode
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// HTTP server port (only used with http and sse transports)
    #[arg(long, default_value_t = 3000)]
    pub http_port: u16,

    /// HTTP server bind address (only used with http and sse transports)
    #[arg(long, default_value = "127.0.0.1")]
    pub http_host: String,

    /// Allow add_attachment to read local files via file-path
    /// [default: true for stdio, false otherwise]
    #[arg(long)]
    pub allow_file_paths: Option<bool>,

    /// Maximum lifetime of an SSE session, in seconds
    #[arg(long, default_value_t = 3600)]
    pub session_ttl_secs: u64,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Transport mode for the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Transport {
    /// Newline-delimited JSON-RPC over stdin/stdout
    #[default]
    Stdio,
    /// Streamable HTTP handled by the MCP SDK
    Http,
    /// Session-based Server-Sent Events (`GET /sse`, `POST /message`)
    Sse,
}

/// Settings shared by every transport.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Whether `add_attachment` may read from the local filesystem.
    pub allow_file_paths: bool,
    /// Maximum lifetime of an SSE session.
    pub session_ttl: Duration,
}

impl ServerConfig {
    /// Resolve transport-dependent defaults from the parsed arguments.
    pub fn from_args(args: &Args) -> Self {
        let allow_file_paths = args
            .allow_file_paths
            .unwrap_or(args.transport == Transport::Stdio);

        Self {
            api_key: args.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: args.base_url.clone(),
            allow_file_paths,
            session_ttl: Duration::from_secs(args.session_ttl_secs),
        }
    }

    /// Build a client, failing if no API key is configured.
    pub fn build_client(&self) -> Result<MochiClient> {
        let api_key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;
        Ok(MochiClient::builder()
            .url(&self.base_url)
            .api_key(api_key)
            .build()?)
    }
}
