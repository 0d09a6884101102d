//! The MCP server: shared state and result formatting for every tool.

use mochi::MochiClient;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde::Serialize;
use tracing::warn;

/// MCP server for one connection.
///
/// Each instance owns its own client handle, so there is no global state
/// and no initialization order to get wrong.
#[derive(Clone)]
pub struct MochiServer {
    pub(crate) client: MochiClient,
    pub(crate) allow_file_paths: bool,
    tool_router: ToolRouter<MochiServer>,
}

impl MochiServer {
    /// Create a server with all four tool groups registered.
    pub fn new(client: MochiClient, allow_file_paths: bool) -> Self {
        Self {
            client,
            allow_file_paths,
            tool_router: Self::router(),
        }
    }

    fn router() -> ToolRouter<Self> {
        Self::cards_router() + Self::decks_router() + Self::templates_router() + Self::due_router()
    }

    /// Names of every registered tool, sorted.
    pub fn tool_names() -> Vec<String> {
        let mut names: Vec<String> = Self::router()
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        names
    }
}

/// Pretty-printed JSON as a single text block.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("JSON serialization failed: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

pub(crate) fn text_result(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// A failure the calling assistant can see and act on.
pub(crate) fn tool_error(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(text.into())]))
}

/// Turn a client failure into a tool response.
///
/// Upstream rejections become error results (`Error <status>: <message>`);
/// anything else is a fault in this server and is raised as a protocol error.
pub(crate) fn client_failure(tool: &str, err: mochi::Error) -> Result<CallToolResult, McpError> {
    match err {
        mochi::Error::Api(api) => {
            warn!(tool, status = api.status, "Mochi rejected request");
            tool_error(api.to_string())
        }
        other => Err(McpError::internal_error(other.to_string(), None)),
    }
}

/// Pretty-print the JSON Mochi returned, unchanged, or report the failure.
pub(crate) fn respond<T: Serialize>(
    tool: &str,
    result: mochi::Result<T>,
) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(err) => client_failure(tool, err),
    }
}

#[tool_handler]
impl ServerHandler for MochiServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Mochi flashcards via the Mochi REST API. \
                 Tools: list_cards, get_card, create_card, update_card, delete_card, \
                 add_attachment, delete_attachment, list_decks, get_deck, create_deck, \
                 update_deck, delete_deck, list_templates, get_template, create_template, \
                 get_due_cards. List tools return a bookmark; pass it back to get the next page. \
                 Mochi allows one request at a time, so call tools sequentially."
                    .to_string(),
            ),
        }
    }
}
