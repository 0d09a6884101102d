//! Deck tools.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::params::{CreateDeckParams, IdParams, PaginationParams, UpdateDeckParams};
use crate::server::{MochiServer, client_failure, respond, text_result};

#[tool_router(router = decks_router, vis = "pub(crate)")]
impl MochiServer {
    #[tool(
        description = "List decks. Results are paginated: pass the returned bookmark to get the next page."
    )]
    pub async fn list_decks(
        &self,
        Parameters(params): Parameters<PaginationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(bookmark = ?params.bookmark, "Listing decks");
        let result = self.client.decks().list::<Value>(&params.into()).await;
        respond("list_decks", result)
    }

    #[tool(description = "Get a single deck by ID.")]
    pub async fn get_deck(
        &self,
        Parameters(params): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(id = %params.id, "Getting deck");
        respond("get_deck", self.client.decks().get::<Value>(&params.id).await)
    }

    #[tool(
        description = "Create a deck. Set parent-id to nest it under another deck. sort-by and cards-view accept only their listed values."
    )]
    pub async fn create_deck(
        &self,
        Parameters(params): Parameters<CreateDeckParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(name = %params.name, "Creating deck");
        let result = self.client.decks().create::<Value>(&params).await;
        if let Ok(deck) = &result {
            info!(id = ?deck.get("id"), name = %params.name, "Deck created");
        }
        respond("create_deck", result)
    }

    #[tool(description = "Update a deck. Only the fields provided are changed.")]
    pub async fn update_deck(
        &self,
        Parameters(params): Parameters<UpdateDeckParams>,
    ) -> Result<CallToolResult, McpError> {
        let (id, changes) = params.into_parts();
        debug!(id = %id, "Updating deck");
        let result = self.client.decks().update::<Value>(&id, &changes).await;
        if result.is_ok() {
            info!(id = %id, "Deck updated");
        }
        respond("update_deck", result)
    }

    #[tool(description = "Permanently delete a deck.")]
    pub async fn delete_deck(
        &self,
        Parameters(params): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(id = %params.id, "Deleting deck");
        match self.client.decks().delete(&params.id).await {
            Ok(()) => {
                info!(id = %params.id, "Deck deleted");
                text_result(format!("Deck {} deleted successfully.", params.id))
            }
            Err(err) => client_failure("delete_deck", err),
        }
    }
}
