//! Due-card query types.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Response of the due endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueCards {
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// Which due cards to fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DueQuery {
    /// Restrict to one deck. Switches the request to `/due/{deck-id}`.
    pub deck_id: Option<String>,
    /// ISO 8601 date to check; Mochi defaults to today.
    pub date: Option<String>,
}
