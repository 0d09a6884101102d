//! Action modules for Mochi API operations.
//!
//! Each module provides a set of related operations grouped by resource.

mod cards;
mod decks;
mod due;
mod templates;

pub use cards::CardActions;
pub use decks::DeckActions;
pub use due::DueActions;
pub use templates::TemplateActions;
