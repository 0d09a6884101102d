//! Tests for the due-card tool.

mod common;

use common::{json_body, server_for, setup_upstream};
use mochi_mcp::params::GetDueCardsParams;
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_due_cards_for_deck_and_date() {
    let upstream = setup_upstream().await;
    Mock::given(method("GET"))
        .and(path("/due/d1"))
        .and(query_param("date", "2026-01-15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cards": [{"id": "c1", "content": "Q\n---\nA", "deck-id": "d1"}]
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let due = json_body(
        &server
            .get_due_cards(Parameters(GetDueCardsParams {
                deck_id: Some("d1".to_string()),
                date: Some("2026-01-15".to_string()),
            }))
            .await
            .unwrap(),
    );

    assert_eq!(due["cards"][0]["id"], "c1");
}

#[tokio::test]
async fn test_due_cards_across_decks() {
    let upstream = setup_upstream().await;
    Mock::given(method("GET"))
        .and(path("/due"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cards": []})))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let due = json_body(
        &server
            .get_due_cards(Parameters(GetDueCardsParams::default()))
            .await
            .unwrap(),
    );

    assert_eq!(due["cards"], json!([]));
}
