//! Card operations.
//!
//! # Example
//!
//! ```no_run
//! use mochi::{Card, CreateCard, MochiClient};
//!
//! # async fn example() -> mochi::Result<()> {
//! let client = MochiClient::new("my-api-key")?;
//!
//! let card: Card = client
//!     .cards()
//!     .create(&CreateCard {
//!         content: "What is 2 + 2?\n---\n4".to_string(),
//!         deck_id: "deck123".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("Created card {}", card.id);
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::MochiClient;
use crate::error::Result;
use crate::types::{CreateCard, ListCardsQuery, UpdateCard};

/// Provides access to card operations.
///
/// Obtained via [`MochiClient::cards()`]. Responses deserialize into any
/// `R`: [`Card`](crate::Card) and [`Page<Card>`](crate::Page) for typed
/// access, or [`Value`] to keep the payload exactly as Mochi sent it.
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a MochiClient,
}

impl<'a> CardActions<'a> {
    /// List cards, optionally filtered by deck, one page at a time.
    pub async fn list<R: DeserializeOwned>(&self, query: &ListCardsQuery) -> Result<R> {
        self.client.get(&["cards", ""], &query.to_params()).await
    }

    /// Get a single card.
    pub async fn get<R: DeserializeOwned>(&self, card_id: &str) -> Result<R> {
        self.client.get(&["cards", card_id], &[]).await
    }

    /// Create a card.
    pub async fn create<R: DeserializeOwned>(&self, card: &CreateCard) -> Result<R> {
        self.client.post(&["cards", ""], card).await
    }

    /// Update a card. Only the fields set in `changes` are sent.
    pub async fn update<R: DeserializeOwned>(
        &self,
        card_id: &str,
        changes: &UpdateCard,
    ) -> Result<R> {
        self.client.post(&["cards", card_id], changes).await
    }

    /// Permanently delete a card.
    ///
    /// To move a card to the trash instead, update it with `trashed?` set.
    pub async fn delete(&self, card_id: &str) -> Result<()> {
        self.client.delete(&["cards", card_id]).await
    }

    /// Upload an attachment to a card.
    ///
    /// Once uploaded, the card's markdown can reference it as
    /// `![](@media/<filename>)`. Returns the raw API response, if any.
    pub async fn add_attachment(
        &self,
        card_id: &str,
        filename: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<Option<Value>> {
        self.client
            .upload_file(
                &["cards", card_id, "attachments", filename],
                filename,
                bytes,
                mime_type,
            )
            .await
    }

    /// Delete an attachment from a card.
    pub async fn delete_attachment(&self, card_id: &str, filename: &str) -> Result<()> {
        self.client
            .delete(&["cards", card_id, "attachments", filename])
            .await
    }
}
