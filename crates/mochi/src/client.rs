//! The Mochi API client and builder.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::actions::{CardActions, DeckActions, DueActions, TemplateActions};
use crate::error::{ApiError, Error, Result};

/// Default base URL of the Mochi REST API.
pub const DEFAULT_URL: &str = "https://app.mochi.cards/api";

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body accepted by [`MochiClient::request`].
#[derive(Debug)]
pub enum Body {
    /// Serialized as JSON with `Content-Type: application/json`.
    Json(Value),
    /// Sent untouched so reqwest can set its own multipart boundary.
    Multipart(Form),
}

/// The main client for interacting with the Mochi API.
///
/// # Example
///
/// ```no_run
/// use mochi::{Deck, MochiClient, Page, PageQuery};
///
/// # async fn example() -> mochi::Result<()> {
/// let client = MochiClient::new("my-api-key")?;
///
/// let page: Page<Deck> = client.decks().list(&PageQuery::default()).await?;
/// for deck in page.docs {
///     println!("{}: {}", deck.id, deck.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MochiClient {
    http_client: Client,
    base_url: Url,
    auth_header: HeaderValue,
}

impl MochiClient {
    /// Create a client for the given API key with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a builder for custom client configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access card operations.
    pub fn cards(&self) -> CardActions<'_> {
        CardActions { client: self }
    }

    /// Access deck operations.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Access template operations.
    pub fn templates(&self) -> TemplateActions<'_> {
        TemplateActions { client: self }
    }

    /// Access due-card queries.
    pub fn due(&self) -> DueActions<'_> {
        DueActions { client: self }
    }

    /// Resolve path segments against the base URL.
    ///
    /// Segments are percent-encoded individually. An empty final segment
    /// produces a trailing slash (`&["cards", ""]` becomes `/cards/`).
    fn endpoint(&self, path: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }

    /// Send a request and translate the response.
    ///
    /// Returns `Ok(None)` for `204 No Content`, an empty body, or a
    /// successful response whose body is not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<Body>,
    ) -> Result<Option<Value>> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Sending Mochi request");

        let mut builder = self
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, self.auth_header.clone())
            .header(ACCEPT, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }

        builder = match body {
            Some(Body::Json(value)) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(&value)?),
            Some(Body::Multipart(form)) => builder.multipart(form),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Mochi rate limit hit");
            return Err(ApiError::rate_limited().into());
        }

        let bytes = response.bytes().await?;
        translate_response(status, &bytes)
    }

    /// GET a resource and deserialize it.
    pub async fn get<R>(&self, path: &[&str], query: &[(&str, String)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let value = self.request(Method::GET, path, query, None).await?;
        decode(value)
    }

    /// POST a JSON body and deserialize the response.
    pub async fn post<B, R>(&self, path: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = Body::Json(serde_json::to_value(body)?);
        let value = self.request(Method::POST, path, &[], Some(body)).await?;
        decode(value)
    }

    /// DELETE a resource. Any response body is discarded.
    pub async fn delete(&self, path: &[&str]) -> Result<()> {
        self.request(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Upload raw bytes as a multipart form with a single `file` part.
    pub async fn upload_file(
        &self,
        path: &[&str],
        filename: &str,
        bytes: Vec<u8>,
        mime_type: &str,
    ) -> Result<Option<Value>> {
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime_type)?;
        let form = Form::new().part("file", part);
        self.request(Method::POST, path, &[], Some(Body::Multipart(form)))
            .await
    }
}

/// Map a status and raw body onto the client's result contract.
fn translate_response(status: StatusCode, bytes: &[u8]) -> Result<Option<Value>> {
    if status == StatusCode::NO_CONTENT || bytes.is_empty() {
        return Ok(None);
    }

    let parsed: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(_) if status.is_success() => return Ok(None),
        Err(_) => {
            let reason = status.canonical_reason().unwrap_or("Unknown status");
            warn!(status = status.as_u16(), "Mochi returned a non-JSON error body");
            return Err(ApiError::new(status.as_u16(), reason).into());
        }
    };

    if !status.is_success() {
        warn!(status = status.as_u16(), "Mochi request failed");
        let detail = match parsed {
            Value::Object(mut map) if map.contains_key("errors") => {
                map.remove("errors").unwrap_or(Value::Null)
            }
            other => other,
        };
        return Err(ApiError::new(status.as_u16(), detail).into());
    }

    Ok(Some(parsed))
}

fn decode<R: DeserializeOwned>(value: Option<Value>) -> Result<R> {
    let value = value.ok_or(Error::EmptyResponse)?;
    Ok(serde_json::from_value(value)?)
}

/// Builder for creating a customized [`MochiClient`].
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use mochi::MochiClient;
///
/// let client = MochiClient::builder()
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(60))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the API base URL.
    ///
    /// Defaults to `https://app.mochi.cards/api`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key used as the Basic auth username.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MochiClient> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key must not be empty".to_string()));
        }

        let base_url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base URL {}: {e}", self.base_url)))?;

        let http_client = Client::builder().timeout(self.timeout).build()?;

        Ok(MochiClient {
            http_client,
            base_url,
            auth_header: basic_auth_header(&self.api_key)?,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `Basic base64("<key>:")`, i.e. the key as username with an empty password.
fn basic_auth_header(api_key: &str) -> Result<HeaderValue> {
    let encoded = STANDARD.encode(format!("{api_key}:"));
    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|_| Error::Config("API key contains invalid header characters".to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}
