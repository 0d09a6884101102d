//! Shapes shared across resources: pagination and timestamps.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One page of a list endpoint.
///
/// The `bookmark` is an opaque cursor; pass it back unchanged to fetch the
/// next page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// Records on this page.
    #[serde(default)]
    pub docs: Vec<T>,
    /// Cursor for the next page, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
}

/// Page size for list calls, bounded to `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "u64", into = "u64")]
pub struct PageLimit(#[schemars(range(min = 1, max = 100))] u8);

impl PageLimit {
    /// Smallest accepted page size.
    pub const MIN: u64 = 1;
    /// Largest accepted page size.
    pub const MAX: u64 = 100;

    /// The page size as a plain number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for PageLimit {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(format!(
                "limit must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        }
    }
}

impl From<PageLimit> for u64 {
    fn from(limit: PageLimit) -> Self {
        u64::from(limit.0)
    }
}

impl fmt::Display for PageLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Pagination for list calls that take no other filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageQuery {
    /// Cursor from a previous page.
    pub bookmark: Option<String>,
    /// Page size, 1 to 100.
    pub limit: Option<PageLimit>,
}

impl PageQuery {
    /// Query parameters, omitting unset values.
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(bookmark) = &self.bookmark {
            params.push(("bookmark", bookmark.clone()));
        }
        params
    }
}

/// A closed-set value read from a response.
///
/// Mochi adds options over time, so a value this crate does not know yet is
/// kept as [`Lenient::Other`] instead of failing the whole record. Request
/// payloads use the bare enums and stay strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Known(T),
    Other(serde_json::Value),
}

impl<T> Lenient<T> {
    /// The typed value, if it is one this crate knows.
    pub fn known(&self) -> Option<&T> {
        match self {
            Lenient::Known(value) => Some(value),
            Lenient::Other(_) => None,
        }
    }
}

/// A timestamp as returned by Mochi.
///
/// Most endpoints wrap dates as `{"date": "..."}`; some return the bare
/// string. Both shapes are accepted and written back as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// `{"date": "2024-01-01T00:00:00.000Z"}`
    Wrapped {
        /// ISO 8601 date-time.
        date: String,
    },
    /// `"2024-01-01T00:00:00.000Z"`
    Plain(String),
}

impl Timestamp {
    /// The ISO 8601 string, whichever shape it arrived in.
    pub fn as_str(&self) -> &str {
        match self {
            Timestamp::Wrapped { date } => date,
            Timestamp::Plain(date) => date,
        }
    }
}
