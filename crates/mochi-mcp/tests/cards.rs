//! Tests for the card tools.

mod common;

use common::{is_error, json_body, server_for, setup_upstream, text};
use mochi::PageLimit;
use mochi_mcp::params::{
    AddAttachmentParams, CreateCardParams, DeleteAttachmentParams, IdParams, ListCardsParams,
    UpdateCardParams,
};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use std::collections::HashSet;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn attachment(file_path: Option<&str>, base64_data: Option<&str>) -> AddAttachmentParams {
    AddAttachmentParams {
        card_id: "c1".to_string(),
        filename: "notes.txt".to_string(),
        file_path: file_path.map(str::to_string),
        base64_data: base64_data.map(str::to_string),
        mime_type: None,
    }
}

#[tokio::test]
async fn test_create_card_echoes_content() {
    let upstream = setup_upstream().await;
    Mock::given(method("POST"))
        .and(path("/cards/"))
        .and(body_json(json!({"content": "2 + 2?\n---\n4", "deck-id": "d1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "content": "2 + 2?\n---\n4",
            "deck-id": "d1"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .create_card(Parameters(CreateCardParams {
            content: "2 + 2?\n---\n4".to_string(),
            deck_id: "d1".to_string(),
            ..Default::default()
        }))
        .await
        .unwrap();

    let body = json_body(&result);
    assert_eq!(body["id"], "c1");
    assert_eq!(body["content"], "2 + 2?\n---\n4");
}

#[tokio::test]
async fn test_rate_limit_is_a_tool_error() {
    let upstream = setup_upstream().await;
    Mock::given(method("GET"))
        .and(path("/cards/c1"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .get_card(Parameters(IdParams {
            id: "c1".to_string(),
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).starts_with("Error 429:"));
}

#[tokio::test]
async fn test_not_found_is_a_tool_error() {
    let upstream = setup_upstream().await;
    Mock::given(method("GET"))
        .and(path("/cards/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"errors": "Not found"})))
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .get_card(Parameters(IdParams {
            id: "missing".to_string(),
        }))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert_eq!(text(&result), "Error 404: Not found");
}

#[tokio::test]
async fn test_get_card_returns_upstream_json_unchanged() {
    let upstream = setup_upstream().await;
    let card = json!({
        "id": "c1",
        "content": "q",
        "deck-id": "d1",
        "tags": [],
        "reviews": [],
        "attachments": {},
        "fields": {"name": {"id": "name", "value": "q", "source": "ai"}}
    });
    Mock::given(method("GET"))
        .and(path("/cards/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(card.clone()))
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .get_card(Parameters(IdParams {
            id: "c1".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(json_body(&result), card);
}

#[tokio::test]
async fn test_card_without_content_is_not_padded() {
    let upstream = setup_upstream().await;
    Mock::given(method("GET"))
        .and(path("/cards/c2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c2"})))
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .get_card(Parameters(IdParams {
            id: "c2".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(json_body(&result), json!({"id": "c2"}));
}

#[tokio::test]
async fn test_update_card_sends_changes_without_id() {
    let upstream = setup_upstream().await;
    Mock::given(method("POST"))
        .and(path("/cards/c1"))
        .and(body_json(json!({"content": "edited"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "c1",
            "content": "edited",
            "deck-id": "d1"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .update_card(Parameters(UpdateCardParams {
            id: "c1".to_string(),
            content: Some("edited".to_string()),
            deck_id: None,
            template_id: None,
            fields: None,
            manual_tags: None,
            review_reverse: None,
            pos: None,
            archived: None,
            trashed: None,
        }))
        .await
        .unwrap();

    assert_eq!(json_body(&result)["content"], "edited");
}

#[tokio::test]
async fn test_delete_card_message() {
    let upstream = setup_upstream().await;
    Mock::given(method("DELETE"))
        .and(path("/cards/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .delete_card(Parameters(IdParams {
            id: "c1".to_string(),
        }))
        .await
        .unwrap();

    assert!(!is_error(&result));
    assert_eq!(text(&result), "Card c1 deleted successfully.");
}

#[tokio::test]
async fn test_pagination_forwards_bookmark() {
    let upstream = setup_upstream().await;
    Mock::given(method("GET"))
        .and(path("/cards/"))
        .and(query_param("limit", "5"))
        .and(query_param("bookmark", "after-c5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [
                {"id": "c6", "content": "", "deck-id": "d"},
                {"id": "c7", "content": "", "deck-id": "d"}
            ]
        })))
        .expect(1)
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/cards/"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "docs": [
                {"id": "c1", "content": "", "deck-id": "d"},
                {"id": "c2", "content": "", "deck-id": "d"}
            ],
            "bookmark": "after-c5"
        })))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let limit: Option<PageLimit> = Some(5_u64.try_into().unwrap());

    let first = json_body(
        &server
            .list_cards(Parameters(ListCardsParams {
                limit,
                ..Default::default()
            }))
            .await
            .unwrap(),
    );
    let bookmark = first["bookmark"].as_str().unwrap().to_string();

    let second = json_body(
        &server
            .list_cards(Parameters(ListCardsParams {
                limit,
                bookmark: Some(bookmark),
                ..Default::default()
            }))
            .await
            .unwrap(),
    );

    let ids = |page: &serde_json::Value| -> HashSet<String> {
        page["docs"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect()
    };
    assert!(ids(&first).is_disjoint(&ids(&second)));
}

#[tokio::test]
async fn test_add_attachment_requires_a_source() {
    let upstream = setup_upstream().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, true);
    let result = server
        .add_attachment(Parameters(attachment(None, None)))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).contains("must be provided"));
}

#[tokio::test]
async fn test_add_attachment_file_path_without_filesystem() {
    let upstream = setup_upstream().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .add_attachment(Parameters(attachment(Some("/tmp/notes.txt"), None)))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).contains("base64-data"));
}

#[tokio::test]
async fn test_add_attachment_missing_file() {
    let upstream = setup_upstream().await;
    let server = server_for(&upstream, true);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let result = server
        .add_attachment(Parameters(attachment(missing.to_str(), None)))
        .await
        .unwrap();

    assert!(is_error(&result));
    assert!(text(&result).starts_with("File not found"));
}

#[tokio::test]
async fn test_add_attachment_from_file() {
    let upstream = setup_upstream().await;
    Mock::given(method("POST"))
        .and(path("/cards/c1/attachments/notes.txt"))
        .and(body_string_contains("hello from disk"))
        .and(body_string_contains("application/octet-stream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&upstream)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "hello from disk").unwrap();

    let server = server_for(&upstream, true);
    let result = server
        .add_attachment(Parameters(attachment(file.to_str(), None)))
        .await
        .unwrap();

    assert!(!is_error(&result));
    let text = text(&result);
    assert!(text.contains("![](@media/notes.txt)"));
    assert!(text.contains("\"ok\": true"));
}

#[tokio::test]
async fn test_add_attachment_from_base64_with_mime() {
    let upstream = setup_upstream().await;
    Mock::given(method("POST"))
        .and(path("/cards/c1/attachments/notes.txt"))
        .and(body_string_contains("hello"))
        .and(body_string_contains("text/plain"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let mut params = attachment(None, Some("aGVsbG8="));
    params.mime_type = Some("text/plain".to_string());
    let result = server.add_attachment(Parameters(params)).await.unwrap();

    assert!(!is_error(&result));
    assert!(text(&result).contains("![](@media/notes.txt)"));
}

#[tokio::test]
async fn test_delete_attachment_message() {
    let upstream = setup_upstream().await;
    Mock::given(method("DELETE"))
        .and(path("/cards/c1/attachments/notes.txt"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&upstream)
        .await;

    let server = server_for(&upstream, false);
    let result = server
        .delete_attachment(Parameters(DeleteAttachmentParams {
            card_id: "c1".to_string(),
            filename: "notes.txt".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(
        text(&result),
        "Attachment notes.txt deleted successfully from card c1."
    );
}
