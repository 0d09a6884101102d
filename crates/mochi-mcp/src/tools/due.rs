//! Due-card tools.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use serde_json::Value;
use tracing::debug;

use crate::params::GetDueCardsParams;
use crate::server::{MochiServer, respond};

#[tool_router(router = due_router, vis = "pub(crate)")]
impl MochiServer {
    #[tool(
        description = "Get cards due for review, across all decks or in one deck, on a given date (default: today)."
    )]
    pub async fn get_due_cards(
        &self,
        Parameters(params): Parameters<GetDueCardsParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(deck_id = ?params.deck_id, date = ?params.date, "Getting due cards");
        let result = self.client.due().get::<Value>(&params.into()).await;
        if let Ok(due) = &result {
            let count = due["cards"].as_array().map_or(0, Vec::len);
            debug!(count, "Due cards fetched");
        }
        respond("get_due_cards", result)
    }
}
