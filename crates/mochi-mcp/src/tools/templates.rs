//! Template tools.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::params::{CreateTemplateParams, IdParams, PaginationParams};
use crate::server::{MochiServer, respond};

#[tool_router(router = templates_router, vis = "pub(crate)")]
impl MochiServer {
    #[tool(
        description = "List card templates. Results are paginated: pass the returned bookmark to get the next page."
    )]
    pub async fn list_templates(
        &self,
        Parameters(params): Parameters<PaginationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(bookmark = ?params.bookmark, "Listing templates");
        let result = self.client.templates().list::<Value>(&params.into()).await;
        respond("list_templates", result)
    }

    #[tool(description = "Get a single template by ID, including its field definitions.")]
    pub async fn get_template(
        &self,
        Parameters(params): Parameters<IdParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(id = %params.id, "Getting template");
        respond(
            "get_template",
            self.client.templates().get::<Value>(&params.id).await,
        )
    }

    #[tool(
        description = "Create a card template. Content is markdown with << Field name >> placeholders; fields maps field IDs to their definitions."
    )]
    pub async fn create_template(
        &self,
        Parameters(params): Parameters<CreateTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(name = %params.name, fields = params.fields.len(), "Creating template");
        let result = self.client.templates().create::<Value>(&params).await;
        if let Ok(template) = &result {
            info!(id = ?template.get("id"), name = %params.name, "Template created");
        }
        respond("create_template", result)
    }
}
