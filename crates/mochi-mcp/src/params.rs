//! Tool parameter schemas.
//!
//! Every struct here rejects unknown fields, so a typo in a tool call fails
//! at the protocol boundary instead of being silently dropped. Doc comments
//! on fields become the parameter descriptions advertised to clients.

use std::collections::BTreeMap;

use mochi::{
    CardField, CardsView, DueQuery, ListCardsQuery, PageLimit, PageQuery, SortBy, UpdateCard,
    UpdateDeck,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Create-payloads are forwarded to Mochi as-is.
pub use mochi::{CreateCard as CreateCardParams, CreateDeck as CreateDeckParams};
pub use mochi::CreateTemplate as CreateTemplateParams;

/// Shared pagination input.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PaginationParams {
    /// Bookmark from a previous response, to fetch the next page
    #[serde(default)]
    pub bookmark: Option<String>,
    /// Number of results per page (1-100)
    #[serde(default)]
    pub limit: Option<PageLimit>,
}

impl From<PaginationParams> for PageQuery {
    fn from(params: PaginationParams) -> Self {
        PageQuery {
            bookmark: params.bookmark,
            limit: params.limit,
        }
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ListCardsParams {
    /// Only list cards in this deck
    #[serde(default)]
    pub deck_id: Option<String>,
    /// Number of results per page (1-100)
    #[serde(default)]
    pub limit: Option<PageLimit>,
    /// Bookmark from a previous response, to fetch the next page
    #[serde(default)]
    pub bookmark: Option<String>,
}

impl From<ListCardsParams> for ListCardsQuery {
    fn from(params: ListCardsParams) -> Self {
        ListCardsQuery {
            deck_id: params.deck_id,
            limit: params.limit,
            bookmark: params.bookmark,
        }
    }
}

/// Input for tools that address a single resource.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct IdParams {
    /// ID of the resource
    pub id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UpdateCardParams {
    /// ID of the card to update
    pub id: String,
    /// New markdown content
    #[serde(default)]
    pub content: Option<String>,
    /// Move the card to this deck
    #[serde(default)]
    pub deck_id: Option<String>,
    /// Template to apply
    #[serde(default)]
    pub template_id: Option<String>,
    /// Template field values keyed by field ID; each value is `{id, value}`
    #[serde(default)]
    pub fields: Option<BTreeMap<String, CardField>>,
    /// Replace the card's manual tags
    #[serde(default)]
    pub manual_tags: Option<Vec<String>>,
    /// Also review the card back-to-front
    #[serde(rename = "review-reverse?", default)]
    pub review_reverse: Option<bool>,
    /// Sort position within the deck
    #[serde(default)]
    pub pos: Option<String>,
    /// Archive or unarchive the card
    #[serde(rename = "archived?", default)]
    pub archived: Option<bool>,
    /// ISO 8601 timestamp; moves the card to the trash
    #[serde(rename = "trashed?", default)]
    pub trashed: Option<String>,
}

impl UpdateCardParams {
    /// Split the card ID from the changes sent as the request body.
    pub fn into_parts(self) -> (String, UpdateCard) {
        let changes = UpdateCard {
            content: self.content,
            deck_id: self.deck_id,
            template_id: self.template_id,
            fields: self.fields,
            manual_tags: self.manual_tags,
            review_reverse: self.review_reverse,
            pos: self.pos,
            archived: self.archived,
            trashed: self.trashed,
        };
        (self.id, changes)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AddAttachmentParams {
    /// ID of the card to attach the file to
    pub card_id: String,
    /// Filename to store the attachment under, e.g. "diagram.png"
    pub filename: String,
    /// Path to a file on the server's local filesystem
    #[serde(default)]
    pub file_path: Option<String>,
    /// File contents encoded as base64. Takes precedence over file-path
    #[serde(default)]
    pub base64_data: Option<String>,
    /// MIME type of the file (default: application/octet-stream)
    #[serde(default)]
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DeleteAttachmentParams {
    /// ID of the card the attachment belongs to
    pub card_id: String,
    /// Filename of the attachment
    pub filename: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct UpdateDeckParams {
    /// ID of the deck to update
    pub id: String,
    /// New deck name
    #[serde(default)]
    pub name: Option<String>,
    /// Move the deck under this parent deck
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Numeric sort order among sibling decks
    #[serde(default)]
    pub sort: Option<i64>,
    /// Archive or unarchive the deck
    #[serde(rename = "archived?", default)]
    pub archived: Option<bool>,
    /// ISO 8601 timestamp; moves the deck to the trash
    #[serde(rename = "trashed?", default)]
    pub trashed: Option<String>,
    /// Show all sides of a card at once
    #[serde(rename = "show-sides?", default)]
    pub show_sides: Option<bool>,
    /// Reverse the sort order
    #[serde(default)]
    pub sort_by_direction: Option<bool>,
    /// Also review cards back-to-front
    #[serde(rename = "review-reverse?", default)]
    pub review_reverse: Option<bool>,
    /// How cards are sorted in the deck
    #[serde(default)]
    pub sort_by: Option<SortBy>,
    /// How cards are displayed in the deck
    #[serde(default)]
    pub cards_view: Option<CardsView>,
}

impl UpdateDeckParams {
    /// Split the deck ID from the changes sent as the request body.
    pub fn into_parts(self) -> (String, UpdateDeck) {
        let changes = UpdateDeck {
            name: self.name,
            parent_id: self.parent_id,
            sort: self.sort,
            archived: self.archived,
            trashed: self.trashed,
            show_sides: self.show_sides,
            sort_by_direction: self.sort_by_direction,
            review_reverse: self.review_reverse,
            sort_by: self.sort_by,
            cards_view: self.cards_view,
        };
        (self.id, changes)
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GetDueCardsParams {
    /// Only return due cards from this deck
    #[serde(default)]
    pub deck_id: Option<String>,
    /// ISO 8601 date to check (default: today)
    #[serde(default)]
    pub date: Option<String>,
}

impl From<GetDueCardsParams> for DueQuery {
    fn from(params: GetDueCardsParams) -> Self {
        DueQuery {
            deck_id: params.deck_id,
            date: params.date,
        }
    }
}
