//! Card types.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{PageLimit, Timestamp};

/// A card as returned by Mochi.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Card {
    /// Card ID, assigned by Mochi.
    pub id: String,
    /// Markdown content.
    #[serde(default)]
    pub content: String,
    /// Owning deck.
    pub deck_id: String,
    /// Template the card was created from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Template field values keyed by field ID, as sent by Mochi.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Value>>,
    /// Tags, inline and manual combined.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Tags added outside the content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub manual_tags: Vec<String>,
    #[serde(rename = "archived?", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(rename = "trashed?", default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<Timestamp>,
    #[serde(rename = "review-reverse?", default, skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    /// Review history, oldest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    /// Attachments keyed by filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<BTreeMap<String, Value>>,
    /// Lexicographic sort position within the deck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Keys Mochi returned that are not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A template field value sent when creating or updating a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CardField {
    /// Field ID; matches the key in the enclosing map.
    pub id: String,
    /// Field content.
    pub value: String,
}

/// One entry of a card's review history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Timestamp>,
    /// When the card became due after this review.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<Timestamp>,
    #[serde(rename = "remembered?", default, skip_serializing_if = "Option::is_none")]
    pub remembered: Option<bool>,
}

/// Body of a create-card request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CreateCard {
    /// Markdown content of the card. Use `---` on its own line to separate
    /// the front from the back.
    pub content: String,
    /// ID of the deck the card belongs to.
    pub deck_id: String,
    /// Template to create the card from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Template field values keyed by field ID; each value is `{id, value}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, CardField>>,
    /// Tags to add to the card, without the leading `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_tags: Option<Vec<String>>,
    /// Also review the card back-to-front.
    #[serde(rename = "review-reverse?", default, skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    /// Sort position within the deck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    /// Create the card archived.
    #[serde(rename = "archived?", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

/// Body of an update-card request. Only present fields are changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct UpdateCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, CardField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_tags: Option<Vec<String>>,
    #[serde(rename = "review-reverse?", default, skip_serializing_if = "Option::is_none")]
    pub review_reverse: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(rename = "archived?", default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    /// ISO 8601 timestamp to move the card to the trash.
    #[serde(rename = "trashed?", default, skip_serializing_if = "Option::is_none")]
    pub trashed: Option<String>,
}

/// Filters and pagination for listing cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListCardsQuery {
    /// Only list cards in this deck.
    pub deck_id: Option<String>,
    /// Page size, 1 to 100.
    pub limit: Option<PageLimit>,
    /// Cursor from a previous page.
    pub bookmark: Option<String>,
}

impl ListCardsQuery {
    /// Query parameters, omitting unset filters.
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(deck_id) = &self.deck_id {
            params.push(("deck-id", deck_id.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(bookmark) = &self.bookmark {
            params.push(("bookmark", bookmark.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn card_keeps_unknown_keys() {
        let card: Card = serde_json::from_value(json!({
            "id": "c1",
            "content": "Q\n---\nA",
            "deck-id": "d1",
            "archived?": false,
            "reviews": [{"date": {"date": "2024-01-01"}, "remembered?": true}],
            "new-upstream-key": 7
        }))
        .unwrap();

        assert_eq!(card.deck_id, "d1");
        assert_eq!(card.reviews[0].remembered, Some(true));
        assert_eq!(card.extra.get("new-upstream-key"), Some(&json!(7)));

        let back = serde_json::to_value(&card).unwrap();
        assert_eq!(back["new-upstream-key"], json!(7));
    }

    #[test]
    fn update_card_omits_unset_fields() {
        let update = UpdateCard {
            content: Some("new".to_string()),
            archived: Some(true),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"content": "new", "archived?": true})
        );
    }

    #[test]
    fn create_card_rejects_unknown_fields() {
        let result = serde_json::from_value::<CreateCard>(json!({
            "content": "x",
            "deck-id": "d",
            "color": "red"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn list_query_skips_unset_params() {
        let query = ListCardsQuery {
            bookmark: Some("b".to_string()),
            ..Default::default()
        };
        assert_eq!(query.to_params(), vec![("bookmark", "b".to_string())]);
    }
}
