//! Common test utilities for Mochi API tests.

use mochi::MochiClient;
use serde::Serialize;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// API key used by every test client. Basic auth header is `base64("test-key:")`.
pub const API_KEY: &str = "test-key";
pub const AUTH_HEADER: &str = "Basic dGVzdC1rZXk6";

/// Start a new mock server for testing.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// A client pointed at the mock server.
pub fn client_for(server: &MockServer) -> MochiClient {
    MochiClient::builder()
        .url(server.uri())
        .api_key(API_KEY)
        .build()
        .unwrap()
}

/// A successful JSON response.
#[allow(dead_code)] // Not all test files use this
pub fn mock_json<T: Serialize>(body: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Mount a mock for a method and path that checks the auth headers.
pub async fn mock_endpoint(server: &MockServer, verb: &str, route: &str, response: ResponseTemplate) {
    Mock::given(method(verb))
        .and(path(route))
        .and(header("authorization", AUTH_HEADER))
        .and(header("accept", "application/json"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
