//! An async Rust client for the Mochi flashcard REST API.
//!
//! # Quick Start
//!
//! ```no_run
//! use mochi::{Card, ListCardsQuery, MochiClient, Page};
//!
//! # async fn example() -> mochi::Result<()> {
//! let client = MochiClient::new(std::env::var("MOCHI_API_KEY").unwrap())?;
//!
//! let page: Page<Card> = client.cards().list(&ListCardsQuery::default()).await?;
//! println!("{} cards on the first page", page.docs.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Action Groups
//!
//! - [`MochiClient::cards()`] - List, create, update and delete cards and their attachments
//! - [`MochiClient::decks()`] - List, create, update and delete decks
//! - [`MochiClient::templates()`] - List, fetch and create templates
//! - [`MochiClient::due()`] - Cards due for review
//!
//! # Pagination
//!
//! List calls return a [`Page`] whose `bookmark` is an opaque cursor. Pass
//! it back verbatim to fetch the next page.
//!
//! # Errors
//!
//! Upstream rejections (including rate limiting) are reported as
//! [`Error::Api`] carrying the HTTP status and the service's error payload.

pub mod actions;
pub mod client;
pub mod error;
pub mod types;

pub use client::{Body, ClientBuilder, DEFAULT_URL, MochiClient};
pub use error::{ApiError, Error, RATE_LIMIT_MESSAGE, Result};
pub use types::{
    Card, CardField, CardsView, CreateCard, CreateDeck, CreateTemplate, Deck, DueCards, DueQuery,
    FieldOptions, FieldType, Lenient, ListCardsQuery, Page, PageLimit, PageQuery, Review, SortBy,
    Template, TemplateField, TemplateName, TemplateOptions, TemplateStyle, TextAlignment,
    Timestamp, UpdateCard, UpdateDeck,
};
