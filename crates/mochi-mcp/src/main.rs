//! MCP server for the Mochi flashcard service.

use clap::Parser;
use mochi_mcp::{Args, ServerConfig, Transport, transport};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the stdio transport.
    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from_args(&args);

    if args.transport == Transport::Stdio && config.api_key.is_none() {
        eprintln!("Error: MOCHI_API_KEY environment variable is required.");
        eprintln!("Usage: MOCHI_API_KEY=<your-key> mochi-mcp");
        std::process::exit(1);
    }

    info!(
        base_url = %config.base_url,
        transport = ?args.transport,
        allow_file_paths = config.allow_file_paths,
        "Starting mochi-mcp server"
    );

    let bind_addr = format!("{}:{}", args.http_host, args.http_port);
    match args.transport {
        Transport::Stdio => transport::stdio::serve(&config).await?,
        Transport::Http => transport::http::serve(&config, &bind_addr).await?,
        Transport::Sse => transport::sse::serve(&config, &bind_addr).await?,
    }

    Ok(())
}
