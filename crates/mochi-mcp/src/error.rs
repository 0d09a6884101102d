//! Startup and transport errors.
//!
//! Tool-level failures never use this type: upstream rejections become
//! error results inside the protocol, and everything else is reported as
//! an MCP internal error.

use thiserror::Error;

/// Errors that stop a transport from starting or keep it from running.
#[derive(Debug, Error)]
pub enum Error {
    /// No API key was configured.
    #[error("MOCHI_API_KEY is not set. Provide it via the environment or --api-key.")]
    MissingApiKey,

    /// The Mochi client could not be built.
    #[error("failed to create Mochi client: {0}")]
    Client(#[from] mochi::Error),

    /// Binding or serving a socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The MCP service failed to initialize or terminated abnormally.
    #[error("MCP transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
