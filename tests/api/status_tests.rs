//! Status (Heartbeat) API Tests

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;

use chatroom_server::domain::ParticipantRepository;

use crate::common::{read_json, TestApp};

#[tokio::test]
async fn test_heartbeat_refreshes_last_status() {
    let app = TestApp::new();
    app.join("Ana").await;

    // Backdate the heartbeat, then refresh it through the API.
    let past = Utc::now() - Duration::seconds(60);
    app.participants.touch("Ana", past).await.unwrap();

    let response = app.post_json("/status", &serde_json::json!({}), Some("Ana")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let participants = read_json(app.get("/participants", None).await).await;
    let last_status = participants[0]["lastStatus"].as_i64().unwrap();
    assert!(last_status > past.timestamp_millis());
}

#[tokio::test]
async fn test_heartbeat_for_unknown_user_fails() {
    let app = TestApp::new();

    let response = app
        .post_json("/status", &serde_json::json!({}), Some("Ghost"))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_heartbeat_does_not_match_case_insensitively() {
    let app = TestApp::new();
    app.join("Bob").await;

    // Join matches case-insensitively, heartbeat does not.
    let response = app
        .post_json("/status", &serde_json::json!({}), Some("bob"))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_heartbeat_without_identity_header_fails() {
    let app = TestApp::new();

    let response = app.post_json("/status", &serde_json::json!({}), None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_heartbeat_emits_no_message() {
    let app = TestApp::new();
    app.join("Ana").await;

    app.post_json("/status", &serde_json::json!({}), Some("Ana"))
        .await;

    // Only the join notice is in the ledger.
    let messages = app.visible_messages("Ana", 10).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["text"], "entra na sala...");
}
