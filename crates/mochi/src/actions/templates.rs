//! Template operations.

use serde::de::DeserializeOwned;

use crate::client::MochiClient;
use crate::error::Result;
use crate::types::{CreateTemplate, PageQuery};

/// Provides access to template operations.
///
/// Obtained via [`MochiClient::templates()`]. Responses deserialize into
/// [`Template`](crate::Template) or `serde_json::Value`.
#[derive(Debug)]
pub struct TemplateActions<'a> {
    pub(crate) client: &'a MochiClient,
}

impl<'a> TemplateActions<'a> {
    /// List templates. Pass the previous page's bookmark to continue.
    pub async fn list<R: DeserializeOwned>(&self, query: &PageQuery) -> Result<R> {
        self.client.get(&["templates", ""], &query.to_params()).await
    }

    /// Get a single template.
    pub async fn get<R: DeserializeOwned>(&self, template_id: &str) -> Result<R> {
        self.client.get(&["templates", template_id], &[]).await
    }

    /// Create a template.
    pub async fn create<R: DeserializeOwned>(&self, template: &CreateTemplate) -> Result<R> {
        self.client.post(&["templates", ""], template).await
    }
}
