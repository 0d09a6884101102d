//! Error types for the mochi crate.
//!
//! # Error Handling
//!
//! Failures reported by the Mochi service itself surface as [`Error::Api`],
//! which carries the HTTP status and whatever error payload the service
//! returned. Everything else (network failures, malformed payloads, bad
//! configuration) has its own variant so callers can tell a recoverable
//! upstream rejection apart from a local fault.
//!
//! # Example
//!
//! ```no_run
//! use mochi::{Card, Error, MochiClient};
//!
//! # async fn example() -> mochi::Result<()> {
//! let client = MochiClient::new("my-api-key")?;
//!
//! match client.cards().get::<Card>("abc123").await {
//!     Ok(card) => println!("{}", card.content),
//!     Err(Error::Api(err)) if err.status == 404 => println!("no such card"),
//!     Err(Error::Api(err)) if err.is_rate_limited() => println!("slow down"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Message used for HTTP 429 responses. The body is never parsed for these.
pub const RATE_LIMIT_MESSAGE: &str =
    "Rate limit exceeded. Mochi allows one request at a time; wait before retrying.";

/// A failed request as reported by the Mochi service.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,
    /// Upstream error payload. Free-form: usually the body's `errors`
    /// field, the whole body, or the HTTP status text.
    pub detail: Value,
}

impl ApiError {
    /// Create an error from a status code and upstream detail.
    pub fn new(status: u16, detail: impl Into<Value>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// The synthetic error produced for HTTP 429 responses.
    pub fn rate_limited() -> Self {
        Self::new(429, RATE_LIMIT_MESSAGE)
    }

    /// Whether this error was caused by upstream rate limiting.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Human-readable description of the upstream detail.
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(s) => s.clone(),
            Value::Null => "no error detail provided".to_string(),
            other => format!("Mochi API error: {other}"),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.status, self.message())
    }
}

impl std::error::Error for ApiError {}

/// The error type for Mochi API operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The Mochi service rejected the request.
    ///
    /// This covers HTTP error statuses as well as rate limiting. These are
    /// expected, recoverable failures that should be shown to the caller.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// HTTP/network error from reqwest.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    ///
    /// Occurs when a successful response does not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A response body was expected but the service returned none.
    #[error("Mochi returned an empty response")]
    EmptyResponse,

    /// Invalid configuration, such as an API key that cannot be used in a
    /// header or a malformed base URL.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns the upstream error if this is an [`Error::Api`].
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// A specialized Result type for Mochi API operations.
pub type Result<T> = std::result::Result<T, Error>;
