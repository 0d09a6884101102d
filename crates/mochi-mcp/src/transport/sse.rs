//! Session-based Server-Sent Events transport.
//!
//! For clients that speak the older HTTP+SSE flavour of MCP:
//!
//! 1. `GET /sse` opens an event stream. A new session gets its own
//!    [`MochiServer`], and the first event (`endpoint`) tells the client
//!    where to post messages.
//! 2. `POST /message` with an `X-Session-Id` header delivers one JSON-RPC
//!    message to that session's server. Replies arrive as `message` events
//!    on the stream.
//!
//! Each session's server runs over an in-memory pipe using the same
//! newline-delimited framing as the stdio transport. A session ends when
//! its event stream is dropped or when it outlives the configured TTL;
//! either way its server task is cancelled and the stream is closed.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, middleware};
use futures::stream::{self, Stream, StreamExt};
use mochi::MochiClient;
use rmcp::ServiceExt;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, WriteHalf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::{health, missing_api_key, service_descriptor};
use crate::MochiServer;
use crate::config::ServerConfig;
use crate::error::Result;

/// Header carrying the session ID on `/sse` responses and `/message` requests.
pub const SESSION_HEADER: &str = "x-session-id";

/// Capacity of each session's in-memory pipe.
const PIPE_CAPACITY: usize = 64 * 1024;

type SessionWriter = Arc<tokio::sync::Mutex<WriteHalf<DuplexStream>>>;

struct Session {
    writer: SessionWriter,
    created: Instant,
    cancel: CancellationToken,
}

/// Live sessions keyed by ID.
///
/// The map lock is only held for insert, lookup and removal; writes to a
/// session's pipe happen after the lock is released.
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionRegistry {
    /// An empty registry whose sessions live at most `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Session>> {
        // A panic while holding the lock leaves the map itself intact.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn insert(&self, id: String, writer: SessionWriter, cancel: CancellationToken) {
        let mut sessions = self.lock();
        sessions.retain(|key, s| {
            let live = s.created.elapsed() < self.ttl;
            if !live {
                debug!(session_id = %key, "Session expired");
                s.cancel.cancel();
            }
            live
        });
        sessions.insert(
            id,
            Session {
                writer,
                created: Instant::now(),
                cancel,
            },
        );
    }

    /// Writer for a live session. Expired sessions are torn down on sight.
    fn writer(&self, id: &str) -> Option<SessionWriter> {
        let mut sessions = self.lock();
        let expired = sessions.get(id)?.created.elapsed() >= self.ttl;
        if expired {
            debug!(session_id = %id, "Session expired");
            if let Some(session) = sessions.remove(id) {
                session.cancel.cancel();
            }
            return None;
        }
        sessions.get(id).map(|s| s.writer.clone())
    }

    fn remove(&self, id: &str) {
        if let Some(session) = self.lock().remove(id) {
            session.cancel.cancel();
            debug!(session_id = %id, "Session removed");
        }
    }
}

/// Tears its session down when the event stream is dropped.
struct SessionGuard {
    id: String,
    registry: Arc<SessionRegistry>,
    cancel: CancellationToken,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.registry.remove(&self.id);
    }
}

#[derive(Clone)]
struct SseState {
    client: Option<MochiClient>,
    allow_file_paths: bool,
    registry: Arc<SessionRegistry>,
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

/// Build the router for the SSE transport.
///
/// The returned registry is shared with the router and exposes the live
/// session count.
pub fn router(config: &ServerConfig) -> Result<(Router, Arc<SessionRegistry>)> {
    let client = match config.build_client() {
        Ok(client) => Some(client),
        Err(crate::Error::MissingApiKey) => {
            warn!("No API key configured; SSE sessions will be refused");
            None
        }
        Err(e) => return Err(e),
    };

    let registry = Arc::new(SessionRegistry::new(config.session_ttl));
    let state = SseState {
        client,
        allow_file_paths: config.allow_file_paths,
        registry: registry.clone(),
    };

    let router = Router::new()
        .route("/", get(describe).options(preflight))
        .route("/health", get(health).options(preflight))
        .route("/sse", get(open_session).options(preflight))
        .route("/message", post(post_message).options(preflight))
        .fallback(not_found)
        .layer(middleware::map_response(add_cors_headers))
        .with_state(state);

    Ok((router, registry))
}

/// Bind and serve the SSE transport.
pub async fn serve(config: &ServerConfig, bind_addr: &str) -> Result<()> {
    let (router, _registry) = router(config)?;
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(bind_addr = %bind_addr, "MCP server listening on SSE");

    axum::serve(listener, router).await?;
    Ok(())
}

async fn describe() -> Json<Value> {
    Json(service_descriptor(
        "sse",
        json!({"sse": "/sse", "message": "/message", "health": "/health"}),
    ))
}

async fn open_session(State(state): State<SseState>) -> Response {
    let Some(client) = state.client else {
        return missing_api_key();
    };

    let session_id = uuid::Uuid::new_v4().to_string();
    let (client_end, server_end) = tokio::io::duplex(PIPE_CAPACITY);

    let cancel = CancellationToken::new();

    let server = MochiServer::new(client, state.allow_file_paths);
    let server_id = session_id.clone();
    let server_cancel = cancel.clone();
    tokio::spawn(async move {
        let transport = tokio::io::split(server_end);
        let running = tokio::select! {
            _ = server_cancel.cancelled() => return,
            result = server.serve_with_ct(transport, server_cancel.clone()) => result,
        };
        match running {
            Ok(running) => {
                let reason = running.waiting().await;
                debug!(session_id = %server_id, ?reason, "Session server stopped");
            }
            Err(e) => warn!(session_id = %server_id, error = %e, "Session failed to initialize"),
        }
    });

    let deadline = cancel.clone();
    let ttl = state.registry.ttl;
    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(ttl) => deadline.cancel(),
            _ = deadline.cancelled() => {}
        }
    });

    let (reader, writer) = tokio::io::split(client_end);
    state.registry.insert(
        session_id.clone(),
        Arc::new(tokio::sync::Mutex::new(writer)),
        cancel.clone(),
    );
    info!(session_id = %session_id, "SSE session opened");

    let guard = SessionGuard {
        id: session_id.clone(),
        registry: state.registry.clone(),
        cancel: cancel.clone(),
    };

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("/message?sessionId={session_id}"));

    let stream = stream::once(async move { Ok::<_, Infallible>(endpoint) })
        .chain(server_messages(reader, guard))
        .take_until(cancel.cancelled_owned());

    (
        [(SESSION_HEADER, session_id)],
        Sse::new(stream).keep_alive(KeepAlive::default()),
    )
        .into_response()
}

/// One `message` event per line the session's server writes.
fn server_messages(
    reader: tokio::io::ReadHalf<DuplexStream>,
    guard: SessionGuard,
) -> impl Stream<Item = std::result::Result<Event, Infallible>> {
    let lines = BufReader::new(reader).lines();
    stream::unfold((lines, guard), |(mut lines, guard)| async move {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let event = Event::default().event("message").data(line);
                Some((Ok(event), (lines, guard)))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(session_id = %guard.id, error = %e, "Session pipe closed");
                None
            }
        }
    })
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<MessageQuery>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or(query.session_id);

    let Some(session_id) = session_id else {
        return json_error(StatusCode::BAD_REQUEST, "Missing X-Session-Id header");
    };

    let message: Value = match serde_json::from_str(&body) {
        Ok(message) => message,
        Err(e) => {
            return json_error(StatusCode::BAD_REQUEST, &format!("Invalid JSON-RPC message: {e}"));
        }
    };

    let Some(writer) = state.registry.writer(&session_id) else {
        return json_error(StatusCode::NOT_FOUND, "Session not found");
    };

    // Re-serialize so the message is guaranteed to be a single line.
    let mut line = message.to_string();
    line.push('\n');

    let mut writer = writer.lock().await;
    if let Err(e) = writer.write_all(line.as_bytes()).await {
        warn!(session_id = %session_id, error = %e, "Failed to forward message");
        drop(writer);
        state.registry.remove(&session_id);
        return json_error(StatusCode::GONE, "Session closed");
    }
    if let Err(e) = writer.flush().await {
        warn!(session_id = %session_id, error = %e, "Failed to flush message");
    }

    debug!(session_id = %session_id, "Message forwarded");
    (StatusCode::ACCEPTED, "Accepted").into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn not_found(method: axum::http::Method) -> Response {
    if method == axum::http::Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    json_error(StatusCode::NOT_FOUND, "Not found")
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, X-Session-Id"),
    );
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("X-Session-Id"),
    );
    response
}
