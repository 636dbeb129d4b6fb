//! Participant API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{read_json, TestApp};

#[tokio::test]
async fn test_join_with_valid_name() {
    let app = TestApp::new();

    let response = app
        .post_json("/participants", &json!({ "name": "Ana" }), None)
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.get("/participants", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let participants = read_json(response).await;
    let participants = participants.as_array().unwrap();
    assert_eq!(participants.len(), 1);
    assert_eq!(participants[0]["name"], "Ana");
    assert!(participants[0]["lastStatus"].is_i64());
}

#[tokio::test]
async fn test_join_with_empty_name_fails() {
    let app = TestApp::new();

    let response = app
        .post_json("/participants", &json!({ "name": "" }), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .post_json("/participants", &json!({ "name": "   " }), None)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_join_with_markup_only_name_fails() {
    let app = TestApp::new();

    // Passes the raw length check but is empty once sanitized.
    let response = app
        .post_json("/participants", &json!({ "name": "<div></div>" }), None)
        .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_join_duplicate_name_conflicts_case_insensitively() {
    let app = TestApp::new();
    app.join("Ana").await;

    for duplicate in ["Ana", "ana", "ANA"] {
        let response = app
            .post_json("/participants", &json!({ "name": duplicate }), None)
            .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}

#[tokio::test]
async fn test_join_stores_sanitized_name() {
    let app = TestApp::new();

    let response = app
        .post_json("/participants", &json!({ "name": " <b>Ana</b> " }), None)
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let participants = read_json(app.get("/participants", None).await).await;
    assert_eq!(participants[0]["name"], "Ana");
}

#[tokio::test]
async fn test_join_announces_arrival_to_the_room() {
    let app = TestApp::new();
    app.join("Ana").await;

    let messages = app.visible_messages("Ana", 10).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["from"], "Ana");
    assert_eq!(messages[0]["to"], "Todos");
    assert_eq!(messages[0]["text"], "entra na sala...");
    assert_eq!(messages[0]["type"], "status");
}

#[tokio::test]
async fn test_list_participants_starts_empty() {
    let app = TestApp::new();

    let participants = read_json(app.get("/participants", None).await).await;
    assert_eq!(participants.as_array().unwrap().len(), 0);
}
