//! Card tools.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::attachment::{self, markdown_reference};
use crate::params::{
    AddAttachmentParams, CreateCardParams, DeleteAttachmentParams, IdParams, ListCardsParams,
    UpdateCardParams,
};
use crate::server::{MochiServer, client_failure, respond, text_result, tool_error};

#[tool_router(router = cards_router, vis = "pub(crate)")]
impl MochiServer {
    #[tool(
        description = "List cards, optionally filtered by deck. Results are paginated: pass the returned bookmark to get the next page."
    )]
    pub async fn list_cards(
        &self,
        Parameters(params): Parameters<ListCardsParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(deck_id = ?params.deck_id, bookmark = ?params.bookmark, "Listing cards");
        let result = self.client.cards().list::<Value>(&params.into()).await;
        respond("list_cards", result)
    }

    #[tool(description = "Get a single card by ID, including its content, fields and review history.")]
    pub async fn get_card(
        &self,
        Parameters(params): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(id = %params.id, "Getting card");
        respond("get_card", self.client.cards().get::<Value>(&params.id).await)
    }

    #[tool(
        description = "Create a card in a deck. Content is markdown; separate front and back with a line containing only '---'."
    )]
    pub async fn create_card(
        &self,
        Parameters(params): Parameters<CreateCardParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(deck_id = %params.deck_id, "Creating card");
        let result = self.client.cards().create::<Value>(&params).await;
        if let Ok(card) = &result {
            info!(id = ?card.get("id"), deck_id = %params.deck_id, "Card created");
        }
        respond("create_card", result)
    }

    #[tool(description = "Update a card. Only the fields provided are changed.")]
    pub async fn update_card(
        &self,
        Parameters(params): Parameters<UpdateCardParams>,
    ) -> Result<CallToolResult, McpError> {
        let (id, changes) = params.into_parts();
        debug!(id = %id, "Updating card");
        let result = self.client.cards().update::<Value>(&id, &changes).await;
        if result.is_ok() {
            info!(id = %id, "Card updated");
        }
        respond("update_card", result)
    }

    #[tool(
        description = "Permanently delete a card. To move it to the trash instead, use update_card with trashed?."
    )]
    pub async fn delete_card(
        &self,
        Parameters(params): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(id = %params.id, "Deleting card");
        match self.client.cards().delete(&params.id).await {
            Ok(()) => {
                info!(id = %params.id, "Card deleted");
                text_result(format!("Card {} deleted successfully.", params.id))
            }
            Err(err) => client_failure("delete_card", err),
        }
    }

    #[tool(
        description = "Upload a file as an attachment to a card. Provide the contents as base64-data (with filename and optionally mime-type), or a file-path readable by this server. Returns the markdown to reference the attachment in card content."
    )]
    pub async fn add_attachment(
        &self,
        Parameters(params): Parameters<AddAttachmentParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(card_id = %params.card_id, filename = %params.filename, "Adding attachment");

        let upload = match attachment::resolve(&params, self.allow_file_paths).await {
            Ok(upload) => upload,
            Err(err) if err.is_recoverable() => return tool_error(err.to_string()),
            Err(err) => return Err(McpError::internal_error(err.to_string(), None)),
        };

        let result = self
            .client
            .cards()
            .add_attachment(&params.card_id, &params.filename, upload.bytes, &upload.mime_type)
            .await;

        match result {
            Ok(response) => {
                info!(card_id = %params.card_id, filename = %params.filename, "Attachment uploaded");
                let response = response.unwrap_or(Value::Null);
                let pretty = serde_json::to_string_pretty(&response).map_err(|e| {
                    McpError::internal_error(format!("JSON serialization failed: {e}"), None)
                })?;
                text_result(format!(
                    "Attachment uploaded. Reference it in card content with:\n{}\n\n{}",
                    markdown_reference(&params.filename),
                    pretty
                ))
            }
            Err(err) => client_failure("add_attachment", err),
        }
    }

    #[tool(description = "Delete an attachment from a card.")]
    pub async fn delete_attachment(
        &self,
        Parameters(params): Parameters<DeleteAttachmentParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(card_id = %params.card_id, filename = %params.filename, "Deleting attachment");
        match self
            .client
            .cards()
            .delete_attachment(&params.card_id, &params.filename)
            .await
        {
            Ok(()) => {
                info!(card_id = %params.card_id, filename = %params.filename, "Attachment deleted");
                text_result(format!(
                    "Attachment {} deleted successfully from card {}.",
                    params.filename, params.card_id
                ))
            }
            Err(err) => client_failure("delete_attachment", err),
        }
    }
}
