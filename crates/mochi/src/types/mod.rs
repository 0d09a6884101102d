//! Type definitions for Mochi API requests and responses.
//!
//! Wire names follow Mochi's conventions: kebab-case keys, with a `?`
//! suffix on boolean flags (`archived?`, `review-reverse?`).

mod card;
mod common;
mod deck;
mod due;
mod template;

pub use card::{Card, CardField, CreateCard, ListCardsQuery, Review, UpdateCard};
pub use common::{Lenient, Page, PageLimit, PageQuery, Timestamp};
pub use deck::{CardsView, CreateDeck, Deck, SortBy, UpdateDeck};
pub use due::{DueCards, DueQuery};
pub use template::{
    CreateTemplate, FieldOptions, FieldType, Template, TemplateField, TemplateName,
    TemplateOptions, TemplateStyle, TextAlignment,
};
