//! MCP server for the Mochi flashcard service.
//!
//! Exposes the Mochi REST API as sixteen tools grouped by resource (cards,
//! decks, templates, due cards), served over stdio, streamable HTTP, or a
//! session-based SSE transport.

pub mod attachment;
pub mod config;
pub mod error;
pub mod params;
pub mod server;
mod tools;
pub mod transport;

pub use config::{Args, ServerConfig, Transport};
pub use error::{Error, Result};
pub use server::MochiServer;
