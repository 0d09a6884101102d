//! Tests for deck operations.

mod common;

use common::{client_for, mock_endpoint, mock_json, setup_mock_server};
use mochi::{CardsView, CreateDeck, Deck, Page, PageQuery, SortBy, UpdateDeck};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_list_decks_first_page() {
    let server = setup_mock_server().await;
    mock_endpoint(
        &server,
        "GET",
        "/decks/",
        mock_json(json!({
            "docs": [
                {"id": "d1", "name": "Japanese"},
                {"id": "d2", "name": "Kanji", "parent-id": "d1"}
            ],
            "bookmark": "next"
        })),
    )
    .await;

    let page: Page<Deck> = client_for(&server).decks().list(&PageQuery::default()).await.unwrap();

    assert_eq!(page.docs.len(), 2);
    assert_eq!(page.docs[1].parent_id.as_deref(), Some("d1"));
    assert_eq!(page.bookmark.as_deref(), Some("next"));
}

#[tokio::test]
async fn test_list_decks_with_bookmark() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/decks/"))
        .and(query_param("bookmark", "next"))
        .respond_with(mock_json(json!({"docs": []})))
        .expect(1)
        .mount(&server)
        .await;

    let page: Page<Deck> = client_for(&server).decks()
        .list(&PageQuery {
            bookmark: Some("next".to_string()),
            limit: None,
        }).await.unwrap();

    assert!(page.docs.is_empty());
    assert!(page.bookmark.is_none());
}

#[tokio::test]
async fn test_create_then_get_deck() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/decks/"))
        .and(body_json(json!({"name": "X", "sort-by": "created-at", "cards-view": "grid"})))
        .respond_with(mock_json(json!({
            "id": "dx",
            "name": "X",
            "sort-by": "created-at",
            "cards-view": "grid"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mock_endpoint(&server, "GET", "/decks/dx", mock_json(json!({"id": "dx", "name": "X"}))).await;

    let client = client_for(&server);
    let created: Deck = client
        .decks()
        .create(&CreateDeck {
            name: "X".to_string(),
            sort_by: Some(SortBy::CreatedAt),
            cards_view: Some(CardsView::Grid),
            ..Default::default()
        })
        .await
        .unwrap();
    let fetched: Deck = client.decks().get(&created.id).await.unwrap();

    assert_eq!(fetched.name, "X");
}

#[tokio::test]
async fn test_update_deck() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/decks/d1"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(mock_json(json!({"id": "d1", "name": "Renamed"})))
        .expect(1)
        .mount(&server)
        .await;

    let deck: Deck = client_for(&server)
        .decks()
        .update(
            "d1",
            &UpdateDeck {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(deck.name, "Renamed");
}

#[tokio::test]
async fn test_delete_deck() {
    let server = setup_mock_server().await;
    mock_endpoint(&server, "DELETE", "/decks/d1", ResponseTemplate::new(204)).await;

    client_for(&server).decks().delete("d1").await.unwrap();
}
