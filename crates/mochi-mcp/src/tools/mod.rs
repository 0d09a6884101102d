//! Tool groups for the Mochi MCP server.
//!
//! Each submodule contributes one `ToolRouter` for a resource (cards, decks,
//! templates, due cards); [`MochiServer::new`](crate::MochiServer::new)
//! combines them.

mod cards;
mod decks;
mod due;
mod templates;
