//! Deck types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{Lenient, Timestamp};

/// How cards are ordered inside a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    None,
    Lexicographically,
    /// Legacy spelling still accepted by Mochi.
    Lexigraphically,
    CreatedAt,
    UpdatedAt,
    RetentionRateAsc,
    IntervalLength,
}

/// How cards are displayed when browsing a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CardsView {
    List,
    Grid,
    Note,
    Column,
}

/// A deck as returned by Mochi.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Deck {
    pub id: String,
    pub name: String,
    /// Parent deck for nested decks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Sort order among sibling decks. Not always an integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<serde_json::Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<Lenient<SortBy>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards_view: Option<Lenient<CardsView>>,
    #[serde(rename = "show-sides?", default, skip_serializing_if = "Option::is_none")]
    pub show_sides: Option<bool>,
    /// `true` reverses the `sort-by` order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by_direction: Option<bool>,
    #[serde(rename = "review-reverse?", default, skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(rename = "archived?", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "trashed?", default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a create-deck request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CreateDeck {
    /// Name of the deck.
    pub name: String,
    /// ID of the parent deck, to nest this deck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Numeric sort order among sibling decks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    /// Create the deck archived.
    #[serde(rename = "archived?", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// ISO 8601 timestamp to create the deck in the trash.
    #[serde(rename = "trashed?", default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
    /// Show all sides of a card at once.
    #[serde(rename = "show-sides?", default, skip_serializing_if = "Option::is_none")]
    pub show_sides: Option<bool>,
    /// Reverse the sort order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by_direction: Option<bool>,
    /// Also review cards back-to-front.
    #[serde(rename = "review-reverse?", default, skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    /// How cards are sorted in the deck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    /// How cards are displayed in the deck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards_view: Option<CardsView>,
}

/// Body of an update-deck request. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateDeck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    #[serde(rename = "archived?", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "trashed?", default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
    #[serde(rename = "show-sides?", default, skip_serializing_if = "Option::is_none")]
    pub show_sides: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by_direction: Option<bool>,
    #[serde(rename = "review-reverse?", default, skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards_view: Option<CardsView>,
}
