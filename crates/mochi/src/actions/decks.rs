//! Deck operations.
//!
//! # Example
//!
//! ```no_run
//! use mochi::{CreateDeck, Deck, MochiClient};
//!
//! # async fn example() -> mochi::Result<()> {
//! let client = MochiClient::new("my-api-key")?;
//!
//! let deck: Deck = client
//!     .decks()
//!     .create(&CreateDeck {
//!         name: "Japanese".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let fetched: Deck = client.decks().get(&deck.id).await?;
//! assert_eq!(fetched.name, "Japanese");
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;

use crate::client::MochiClient;
use crate::error::Result;
use crate::types::{CreateDeck, PageQuery, UpdateDeck};

/// Provides access to deck operations.
///
/// Obtained via [`MochiClient::decks()`]. Responses deserialize into
/// [`Deck`](crate::Deck) / [`Page<Deck>`](crate::Page), or into
/// `serde_json::Value` for pass-through.
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a MochiClient,
}

impl<'a> DeckActions<'a> {
    /// List decks. Pass the previous page's bookmark to continue.
    pub async fn list<R: DeserializeOwned>(&self, query: &PageQuery) -> Result<R> {
        self.client.get(&["decks", ""], &query.to_params()).await
    }

    /// Get a single deck.
    pub async fn get<R: DeserializeOwned>(&self, deck_id: &str) -> Result<R> {
        self.client.get(&["decks", deck_id], &[]).await
    }

    /// Create a deck.
    pub async fn create<R: DeserializeOwned>(&self, deck: &CreateDeck) -> Result<R> {
        self.client.post(&["decks", ""], deck).await
    }

    /// Update a deck. Only the fields set in `changes` are sent.
    pub async fn update<R: DeserializeOwned>(
        &self,
        deck_id: &str,
        changes: &UpdateDeck,
    ) -> Result<R> {
        self.client.post(&["decks", deck_id], changes).await
    }

    /// Permanently delete a deck.
    ///
    /// Cards and child decks are not deleted by Mochi; they are orphaned.
    pub async fn delete(&self, deck_id: &str) -> Result<()> {
        self.client.delete(&["decks", deck_id]).await
    }
}
