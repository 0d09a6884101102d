//! Due-card queries.

use serde::de::DeserializeOwned;

use crate::client::MochiClient;
use crate::error::Result;
use crate::types::DueQuery;

/// Provides access to the due endpoints.
///
/// Obtained via [`MochiClient::due()`].
#[derive(Debug)]
pub struct DueActions<'a> {
    pub(crate) client: &'a MochiClient,
}

impl<'a> DueActions<'a> {
    /// Cards due for review, across all decks or within one deck.
    ///
    /// Deserializes into [`DueCards`](crate::DueCards) or `serde_json::Value`.
    pub async fn get<R: DeserializeOwned>(&self, query: &DueQuery) -> Result<R> {
        let params: Vec<(&str, String)> = query
            .date
            .as_ref()
            .map(|d| vec![("date", d.clone())])
            .unwrap_or_default();

        match &query.deck_id {
            Some(deck_id) => self.client.get(&["due", deck_id], &params).await,
            None => self.client.get(&["due"], &params).await,
        }
    }
}
